pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{DesktopNotifier, LocalStorage, SystemCacheRefresher, SystemEnvironment};
pub use config::Settings;
pub use core::{
    app::{App, Mode},
    domain_store::DomainStore,
    hosts_block::{HostsBlockManager, HostsFileConfig},
};
pub use domain::model::{BlockMarkers, DomainSet, HostsMode, RefreshOutcome};
pub use utils::error::{GsdError, Result};
