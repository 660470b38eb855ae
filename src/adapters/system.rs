use crate::domain::ports::Environment;
use std::ffi::OsString;
use std::path::PathBuf;

/// Reads the real process identity. Under `sudo`, the home directory is the
/// invoking user's, not root's.
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnvironment {
    #[cfg(unix)]
    fn is_privileged(&self) -> bool {
        nix::unistd::Uid::current().is_root()
    }

    #[cfg(not(unix))]
    fn is_privileged(&self) -> bool {
        false
    }

    fn home_dir(&self) -> Option<PathBuf> {
        let sudo_user = std::env::var("SUDO_USER").ok();
        resolve_home(sudo_user.as_deref(), std::env::var_os("HOME"), lookup_home)
    }
}

/// SUDO_USER's home when it resolves, `HOME` otherwise.
pub fn resolve_home(
    sudo_user: Option<&str>,
    home: Option<OsString>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(user) = sudo_user.filter(|u| !u.is_empty()) {
        match lookup(user) {
            Some(dir) => return Some(dir),
            None => tracing::debug!("No passwd entry for SUDO_USER {}", user),
        }
    }
    home.filter(|h| !h.is_empty()).map(PathBuf::from)
}

#[cfg(unix)]
pub fn lookup_home(user: &str) -> Option<PathBuf> {
    match nix::unistd::User::from_name(user) {
        Ok(entry) => entry.map(|u| u.dir),
        Err(e) => {
            tracing::debug!("passwd lookup for {} failed: {}", user, e);
            None
        }
    }
}

#[cfg(not(unix))]
pub fn lookup_home(_user: &str) -> Option<PathBuf> {
    None
}

/// Environment with fixed answers.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    pub privileged: bool,
    pub home: Option<PathBuf>,
}

#[cfg(test)]
impl Environment for FixedEnvironment {
    fn is_privileged(&self) -> bool {
        self.privileged
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}
