pub mod command_files;
pub mod paths;
pub mod registry;

pub use paths::Scope;
pub use registry::{Registry, RegistryCommand, RegistryError, RegistryLoader};

/// User-Agent value sent on every outbound request.
pub(crate) const USER_AGENT: &str = "cmdshelf";

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

    /// Serializes tests that mutate the process environment or the
    /// working directory.
    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
