// Adapters layer: concrete implementations of the domain ports.

pub mod process;
pub mod storage;
pub mod system;

pub use process::{DesktopNotifier, SystemCacheRefresher};
pub use storage::LocalStorage;
pub use system::SystemEnvironment;

#[cfg(test)]
pub use storage::MemoryStorage;
#[cfg(test)]
pub use system::FixedEnvironment;
