/// Host introspection capability queried by the layout once per rendered
/// event.
///
/// Implementations supply the machine, process, thread and user details
/// that end up in the `@fields` block. The layout treats every `None` as
/// "unknown here" and omits the corresponding key instead of failing, so
/// implementations running in sandboxed or service contexts can simply
/// return `None` for whatever they cannot determine.
///
/// The production implementation is
/// [`SystemEnvironment`](crate::system_env::SystemEnvironment); tests and
/// hosts that need deterministic output use
/// [`StaticEnvironment`](crate::static_env::StaticEnvironment).
pub trait HostEnvironment: Send + Sync {
    /// Name of the machine producing events; rendered as `@source_host`.
    ///
    /// This is the one query that must always produce a value, since
    /// `@source_host` is always present in the output. Implementations
    /// pick their own fallback when the real name cannot be determined.
    fn machine_name(&self) -> String;

    /// Account name the process runs under, if it can be determined.
    fn user_name(&self) -> Option<String>;

    /// Operating-system id of the current process.
    fn process_id(&self) -> Option<u32>;

    /// Short name of the current process (no path, no extension).
    fn process_name(&self) -> Option<String>;

    /// Display name of the hosting application.
    fn app_domain_name(&self) -> Option<String>;

    /// Numeric id of the calling thread. Queried per render call, so
    /// events formatted on different threads report different ids.
    fn thread_id(&self) -> Option<u64>;

    /// Name of the calling thread, if the host named it.
    fn thread_name(&self) -> Option<String>;
}
