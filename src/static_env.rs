use crate::environment::HostEnvironment;

/// A [`HostEnvironment`] that returns fixed values.
///
/// Useful for tests that assert on complete rendered documents, and for
/// hosts that want full control over the environment-derived fields
/// instead of live process introspection.
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironment {
    pub machine_name: String,
    pub user_name: Option<String>,
    pub process_id: Option<u32>,
    pub process_name: Option<String>,
    pub app_domain_name: Option<String>,
    pub thread_id: Option<u64>,
    pub thread_name: Option<String>,
}

impl HostEnvironment for StaticEnvironment {
    fn machine_name(&self) -> String {
        self.machine_name.clone()
    }

    fn user_name(&self) -> Option<String> {
        self.user_name.clone()
    }

    fn process_id(&self) -> Option<u32> {
        self.process_id
    }

    fn process_name(&self) -> Option<String> {
        self.process_name.clone()
    }

    fn app_domain_name(&self) -> Option<String> {
        self.app_domain_name.clone()
    }

    fn thread_id(&self) -> Option<u64> {
        self.thread_id
    }

    fn thread_name(&self) -> Option<String> {
        self.thread_name.clone()
    }
}
