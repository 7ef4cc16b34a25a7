use tracing_logstash_layout::config::LayoutConfig;

fn main() {
    let config = LayoutConfig {
        enable_short_message: true,
        short_message_length: 60,
        ..LayoutConfig::default()
    };
    tracing_logstash_layout::init::init_with_config(config);

    tracing::info!(order_id = 81723, "checkout started");
    tracing::warn!(
        attempt = 3,
        "payment declined for order 81723: issuer unreachable, falling back to retry queue"
    );
    tracing::error!("retry queue full, dropping order 81723");
}
