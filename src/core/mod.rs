pub mod app;
pub mod domain_store;
pub mod hosts_block;

pub use crate::domain::model::{BlockChange, BlockMarkers, DomainSet, HostsMode, RefreshOutcome};
pub use crate::domain::ports::{CacheRefresher, Environment, Notifier, Storage};
pub use crate::utils::error::Result;
