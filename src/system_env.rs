use crate::environment::HostEnvironment;
use std::env;
use std::path::PathBuf;

/// [`HostEnvironment`] backed by the running process.
///
/// The machine name is resolved once at construction from the `HOSTNAME` /
/// `COMPUTERNAME` environment variables (set by login shells, containers
/// and Windows respectively) and falls back to `"localhost"`. Everything
/// else is queried per call; queries that cannot be answered degrade to
/// `None` rather than failing the render.
#[derive(Clone, Debug)]
pub struct SystemEnvironment {
    machine_name: String,
}

impl SystemEnvironment {
    pub fn new() -> Self {
        let machine_name = env::var("HOSTNAME")
            .or_else(|_| env::var("COMPUTERNAME"))
            .unwrap_or_else(|_| "localhost".to_string());
        SystemEnvironment { machine_name }
    }

    fn current_exe() -> Option<PathBuf> {
        env::current_exe().ok()
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for SystemEnvironment {
    fn machine_name(&self) -> String {
        self.machine_name.clone()
    }

    fn user_name(&self) -> Option<String> {
        env::var("USER").or_else(|_| env::var("USERNAME")).ok()
    }

    fn process_id(&self) -> Option<u32> {
        Some(std::process::id())
    }

    fn process_name(&self) -> Option<String> {
        let exe = Self::current_exe()?;
        let stem = exe.file_stem()?;
        Some(stem.to_string_lossy().into_owned())
    }

    fn app_domain_name(&self) -> Option<String> {
        let exe = Self::current_exe()?;
        let name = exe.file_name()?;
        Some(name.to_string_lossy().into_owned())
    }

    fn thread_id(&self) -> Option<u64> {
        // std exposes no numeric accessor; the id is recovered from the
        // stable-ish "ThreadId(n)" debug form and omitted if that form
        // ever changes.
        let debug = format!("{:?}", std::thread::current().id());
        debug
            .strip_prefix("ThreadId(")?
            .strip_suffix(')')?
            .parse()
            .ok()
    }

    fn thread_name(&self) -> Option<String> {
        std::thread::current().name().map(str::to_string)
    }
}
