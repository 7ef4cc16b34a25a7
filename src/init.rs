use crate::config::LayoutConfig;
use crate::layout::JsonEventLayout;

/// Install a global `tracing` subscriber that renders every event as one
/// Logstash-style JSON line on stdout.
///
/// **Parameters**
/// - `config`: [`LayoutConfig`] controlling message shortening and the
///   correlation-context lookup.
///
/// **Effects**
///
/// This installs a `tracing_subscriber::fmt` subscriber whose event
/// formatter is [`JsonEventLayout`] as the global default, so every
/// `tracing` event in the process is rendered by the layout. Where the
/// lines go (stdout by default) remains the fmt subscriber's concern.
pub fn init_with_config(config: LayoutConfig) {
    let layout = JsonEventLayout::new(config);
    let subscriber = tracing_subscriber::fmt().event_format(layout).finish();
    tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
}

/// Initialize the layout with its defaults.
///
/// Equivalent to calling [`init_with_config`] with
/// [`LayoutConfig::default`]. This is the recommended entrypoint for
/// typical services.
pub fn init() {
    init_with_config(LayoutConfig::default());
}
