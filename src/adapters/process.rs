use crate::domain::model::RefreshOutcome;
use crate::domain::ports::{CacheRefresher, Notifier};
use crate::utils::error::{GsdError, Result};
use std::process::{Command, Stdio};

pub const NOTIFICATION_TITLE: &str = "Get Shit Done";

/// Platform command that flushes the resolver cache, if one is known.
pub fn refresh_command(os: &str) -> Option<(&'static str, &'static [&'static str])> {
    match os {
        "linux" => Some(("/etc/init.d/networking", &["restart"])),
        "macos" => Some(("dscacheutil", &["-flushcache"])),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct SystemCacheRefresher {
    os: String,
}

impl SystemCacheRefresher {
    pub fn new() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    pub fn for_os(os: &str) -> Self {
        Self { os: os.to_string() }
    }
}

impl Default for SystemCacheRefresher {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheRefresher for SystemCacheRefresher {
    fn refresh(&self) -> Result<RefreshOutcome> {
        let Some((program, args)) = refresh_command(&self.os) else {
            tracing::warn!("No DNS cache refresh command known for {}", self.os);
            return Ok(RefreshOutcome::Unsupported);
        };

        let command = format!("{} {}", program, args.join(" "));
        tracing::debug!("Refreshing DNS cache: {}", command);

        let status = Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| GsdError::RefreshFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(GsdError::RefreshFailed {
                command,
                reason: format!("exited with {}", status),
            });
        }
        Ok(RefreshOutcome::Refreshed)
    }
}

/// `notify-send` based notifier. Failures are logged and dropped.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        match Command::new("notify-send")
            .arg(NOTIFICATION_TITLE)
            .arg(message)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if !status.success() => {
                tracing::debug!("notify-send exited with {}", status)
            }
            Ok(_) => {}
            Err(e) => tracing::debug!("notify-send unavailable: {}", e),
        }
    }
}
