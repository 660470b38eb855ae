use crate::domain::model::RefreshOutcome;
use crate::utils::error::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Whole-file access. Callers map `io::Error` into their own error variants.
pub trait Storage: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Process privilege and the invoking user's home directory.
pub trait Environment {
    fn is_privileged(&self) -> bool;
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Makes hosts-file changes visible to resolvers.
pub trait CacheRefresher {
    fn refresh(&self) -> Result<RefreshOutcome>;
}

/// Fire-and-forget user notification.
pub trait Notifier {
    fn notify(&self, message: &str);
}
