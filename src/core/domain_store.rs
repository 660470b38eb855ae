use crate::core::{DomainSet, Storage};
use crate::utils::error::{GsdError, Result};
use crate::utils::validation::normalize_domain;
use std::io;
use std::path::{Path, PathBuf};

pub const SITES_KEY: &str = "sites=";
pub const DEFAULT_DOMAIN: &str = "facebook.com";

/// Parse every `sites=` line and union the entries.
pub fn parse_domains(content: &str) -> DomainSet {
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(SITES_KEY))
        .flat_map(|value| value.trim_matches(',').split(','))
        .collect()
}

/// `sites=a.com,b.com,` with a trailing newline.
pub fn serialize_domains(domains: &DomainSet) -> String {
    let mut line = String::from(SITES_KEY);
    for domain in domains.iter() {
        line.push_str(domain);
        line.push(',');
    }
    line.push('\n');
    line
}

/// Flat-file store of the domains blocked in work mode.
pub struct DomainStore<S: Storage> {
    storage: S,
    path: PathBuf,
}

impl<S: Storage> DomainStore<S> {
    pub fn new(storage: S, path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.storage.exists(&self.path)
    }

    pub fn load(&self) -> Result<DomainSet> {
        let content = self.storage.read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                GsdError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                GsdError::ReadError {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        let domains = parse_domains(&content);
        tracing::debug!("Loaded {} domains from {}", domains.len(), self.path.display());
        Ok(domains)
    }

    pub fn save(&self, domains: &DomainSet) -> Result<()> {
        self.storage
            .write(&self.path, serialize_domains(domains).as_bytes())
            .map_err(|e| GsdError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;
        tracing::debug!("Saved {} domains to {}", domains.len(), self.path.display());
        Ok(())
    }

    /// Returns the normalized domain, or `None` when the input was blank.
    pub fn add(&self, domain: &str) -> Result<Option<String>> {
        self.modify(domain, |set, d| {
            set.insert(d);
        })
    }

    pub fn remove(&self, domain: &str) -> Result<Option<String>> {
        self.modify(domain, |set, d| {
            set.remove(d);
        })
    }

    fn modify(&self, domain: &str, apply: impl FnOnce(&mut DomainSet, &str)) -> Result<Option<String>> {
        let Some(domain) = normalize_domain(domain) else {
            tracing::debug!("Ignoring blank domain");
            return Ok(None);
        };

        let mut domains = self.load()?;
        apply(&mut domains, &domain);
        self.save(&domains)?;
        Ok(Some(domain))
    }

    /// Writes the default set if the store does not exist yet. Returns `true`
    /// when a file was created.
    pub fn initialize_if_missing(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                self.storage
                    .create_dir_all(parent)
                    .map_err(|e| GsdError::WriteError {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
            }
        }

        self.save(&Self::default_domains())?;
        tracing::info!("Created domain store at {}", self.path.display());
        Ok(true)
    }

    pub fn default_domains() -> DomainSet {
        [DEFAULT_DOMAIN].into_iter().collect()
    }
}
