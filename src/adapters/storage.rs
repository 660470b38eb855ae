use crate::domain::ports::Storage;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use crate::domain::ports::Storage;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    /// Shared in-memory file map. Clones see the same files.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
        denied_reads: Arc<Mutex<Vec<PathBuf>>>,
        denied_writes: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
            self.with_bytes(path, content.as_bytes())
        }

        pub fn with_bytes(self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
            self.files.lock().unwrap().insert(path.into(), content.to_vec());
            self
        }

        /// Content as a string, `None` if the file does not exist.
        pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
            self.get_bytes(path)
                .map(|data| String::from_utf8_lossy(&data).into_owned())
        }

        pub fn get_bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(path.as_ref()).cloned()
        }

        /// Reads of `path` fail with `PermissionDenied` afterwards.
        pub fn deny_reads(&self, path: impl Into<PathBuf>) {
            self.denied_reads.lock().unwrap().push(path.into());
        }

        /// Writes to `path` fail with `PermissionDenied` afterwards.
        pub fn deny_writes(&self, path: impl Into<PathBuf>) {
            self.denied_writes.lock().unwrap().push(path.into());
        }

        fn check(list: &Mutex<Vec<PathBuf>>, path: &Path) -> io::Result<()> {
            if list.lock().unwrap().iter().any(|p| p == path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("{} is not accessible", path.display()),
                ));
            }
            Ok(())
        }
    }

    impl Storage for MemoryStorage {
        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            Self::check(&self.denied_reads, path)?;
            self.get_bytes(path).ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
            })
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            let data = self.read(path)?;
            String::from_utf8(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }

        fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
            Self::check(&self.denied_writes, path)?;
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }
}
