#[cfg(feature = "cli")]
pub mod cli;

use crate::core::hosts_block::HostsFileConfig;
use crate::core::Environment;
use crate::utils::error::{ArgumentErrorKind, GsdError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";
pub const STORE_FILE_NAME: &str = "get-shit-done.ini";

/// `<home>/.config/get-shit-done.ini`
pub fn default_store_path(home: &Path) -> PathBuf {
    home.join(".config").join(STORE_FILE_NAME)
}

/// Fully resolved paths and flags for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_path: PathBuf,
    pub hosts: HostsFileConfig,
    pub dry_run: bool,
}

impl Settings {
    /// An explicit store path wins; otherwise the store lives under the
    /// invoking user's home.
    pub fn resolve(
        store_override: Option<&Path>,
        hosts_path: &Path,
        dry_run: bool,
        env: &impl Environment,
    ) -> Result<Self> {
        let store_path = match store_override {
            Some(path) => path.to_path_buf(),
            None => {
                let home = env.home_dir().ok_or_else(|| GsdError::InvalidArgument {
                    kind: ArgumentErrorKind::InvalidValue,
                    message: "Cannot determine home directory; pass --config".to_string(),
                })?;
                default_store_path(&home)
            }
        };

        let settings = Self {
            store_path,
            hosts: HostsFileConfig::new(hosts_path),
            dry_run,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.store_path)?;
        validate_path("hosts_file", &self.hosts.hosts_path)?;
        validate_non_empty_string("start_marker", &self.hosts.markers.start)?;
        validate_non_empty_string("end_marker", &self.hosts.markers.end)?;
        Ok(())
    }
}
