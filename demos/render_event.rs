use std::sync::Arc;

use tracing_logstash_layout::config::LayoutConfig;
use tracing_logstash_layout::event::{ExceptionRecord, LogEvent, LogLevel};
use tracing_logstash_layout::layout::JsonEventLayout;
use tracing_logstash_layout::static_env::StaticEnvironment;

fn main() {
    let config = LayoutConfig {
        enable_short_message: true,
        short_message_length: 40,
        ..LayoutConfig::default()
    };

    let environment = StaticEnvironment {
        machine_name: "demo-host".to_string(),
        user_name: Some("demo".to_string()),
        process_id: Some(std::process::id()),
        process_name: Some("render_event".to_string()),
        app_domain_name: Some("render_event".to_string()),
        thread_id: Some(1),
        thread_name: Some("main".to_string()),
    };
    let layout = JsonEventLayout::with_environment(config, Arc::new(environment));

    let error = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer");
    let event = LogEvent::new(
        LogLevel::Error,
        "orders::checkout",
        "payment declined for order 81723: issuer unreachable, falling back to retry queue",
    )
    .with_property("order_id", 81723)
    .with_property("__correlationContext__", "req-5512")
    .with_exception(ExceptionRecord::from_error(&error));

    let line = layout.render(&event).expect("render event");
    println!("{}", line);
}
