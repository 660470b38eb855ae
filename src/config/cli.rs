use crate::config::{Settings, DEFAULT_HOSTS_FILE};
use crate::core::app::Mode;
use crate::core::Environment;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "get-shit-done")]
#[command(about = "Block distracting sites through the hosts file while you work")]
pub struct CliConfig {
    /// Domain store with the sites to block
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hosts file to manage
    #[arg(long, value_name = "PATH", default_value = DEFAULT_HOSTS_FILE)]
    pub hosts_file: PathBuf,

    /// Show changes but don't modify files
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// work, play, add, remove, list or status
    pub mode: Option<String>,

    /// Domain for add/remove
    pub domain: Option<String>,
}

impl CliConfig {
    pub fn mode(&self) -> Result<Mode> {
        Mode::parse(self.mode.as_deref(), self.domain.as_deref())
    }

    pub fn settings(&self, env: &impl Environment) -> Result<Settings> {
        Settings::resolve(self.config.as_deref(), &self.hosts_file, self.dry_run, env)
    }
}
