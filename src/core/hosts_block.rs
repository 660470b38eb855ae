use crate::core::{BlockChange, BlockMarkers, CacheRefresher, DomainSet, HostsMode, Storage};
use crate::domain::model::contains_bytes;
use crate::utils::error::{GsdError, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Where the managed block lives and how it is delimited.
#[derive(Debug, Clone)]
pub struct HostsFileConfig {
    pub hosts_path: PathBuf,
    pub backup_path: PathBuf,
    pub markers: BlockMarkers,
}

impl HostsFileConfig {
    /// Backup next to the hosts file, `<path>.bak`.
    pub fn new(hosts_path: impl Into<PathBuf>) -> Self {
        let hosts_path = hosts_path.into();
        let mut backup = hosts_path.clone().into_os_string();
        backup.push(".bak");
        Self {
            hosts_path,
            backup_path: PathBuf::from(backup),
            markers: BlockMarkers::default(),
        }
    }
}

/// Lines of `content` split on `\n`, a trailing `\r` dropped from each.
/// Same boundaries as `str::lines`, but over raw bytes.
fn byte_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let pieces = if content.is_empty() {
        None
    } else {
        Some(body.split(|b| *b == b'\n'))
    };
    pieces
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Splits hosts content into kept lines (verbatim bytes) and managed-block
/// lines (markers included). A start marker with no end marker swallows the
/// rest of the file.
pub fn split_block<'a>(content: &'a [u8], markers: &BlockMarkers) -> (Vec<&'a [u8]>, Vec<String>) {
    let mut kept = Vec::new();
    let mut removed = Vec::new();
    let mut in_block = false;

    for line in byte_lines(content) {
        if contains_bytes(line, &markers.start) {
            in_block = true;
            removed.push(String::from_utf8_lossy(line).into_owned());
        } else if contains_bytes(line, &markers.end) {
            in_block = false;
            removed.push(String::from_utf8_lossy(line).into_owned());
        } else if in_block {
            removed.push(String::from_utf8_lossy(line).into_owned());
        } else {
            kept.push(line);
        }
    }

    (kept, removed)
}

/// Inserts, detects and removes the managed block in a hosts file.
pub struct HostsBlockManager<S: Storage, R: CacheRefresher> {
    storage: S,
    refresher: R,
    config: HostsFileConfig,
}

impl<S: Storage, R: CacheRefresher> HostsBlockManager<S, R> {
    pub fn new(storage: S, refresher: R, config: HostsFileConfig) -> Self {
        Self {
            storage,
            refresher,
            config,
        }
    }

    pub fn hosts_path(&self) -> &Path {
        &self.config.hosts_path
    }

    pub fn status(&self) -> Result<HostsMode> {
        let content = self.read_hosts()?;
        if self.config.markers.both_present(&content) {
            Ok(HostsMode::Work)
        } else {
            Ok(HostsMode::Play)
        }
    }

    pub fn activate(&self, domains: &DomainSet, dry_run: bool) -> Result<BlockChange> {
        let content = self.read_hosts()?;

        if self.config.markers.both_present(&content) {
            return Err(GsdError::AlreadyActive {
                path: self.config.hosts_path.clone(),
            });
        }

        let lines = self.config.markers.render_block(domains);
        if dry_run {
            tracing::debug!("Dry run: {} block lines not written", lines.len());
            return Ok(BlockChange {
                lines,
                applied: false,
                refresh: None,
            });
        }

        self.write_backup(&content);

        let mut updated = content;
        if !updated.is_empty() && !updated.ends_with(b"\n") {
            updated.push(b'\n');
        }
        for line in &lines {
            updated.extend_from_slice(line.as_bytes());
            updated.push(b'\n');
        }
        self.write_hosts(&updated)?;
        tracing::info!(
            "Blocked {} domains in {}",
            domains.len(),
            self.config.hosts_path.display()
        );

        let refresh = self.refresher.refresh()?;

        Ok(BlockChange {
            lines,
            applied: true,
            refresh: Some(refresh),
        })
    }

    /// Succeeds with no removed lines when no block is present.
    pub fn deactivate(&self, dry_run: bool) -> Result<BlockChange> {
        let content = self.read_hosts()?;
        let (kept, removed) = split_block(&content, &self.config.markers);

        if dry_run {
            return Ok(BlockChange {
                lines: removed,
                applied: false,
                refresh: None,
            });
        }

        if removed.is_empty() {
            tracing::info!(
                "No managed block in {}, nothing to remove",
                self.config.hosts_path.display()
            );
        }

        self.write_backup(&content);

        let mut updated = kept.join(&b'\n');
        updated.push(b'\n');
        self.write_hosts(&updated)?;

        Ok(BlockChange {
            lines: removed,
            applied: true,
            refresh: None,
        })
    }

    fn read_hosts(&self) -> Result<Vec<u8>> {
        let path = &self.config.hosts_path;
        self.storage.read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GsdError::MissingHostsFile { path: path.clone() },
            _ => GsdError::ReadError {
                path: path.clone(),
                source: e,
            },
        })
    }

    fn write_hosts(&self, content: &[u8]) -> Result<()> {
        self.storage
            .write(&self.config.hosts_path, content)
            .map_err(|e| GsdError::WriteError {
                path: self.config.hosts_path.clone(),
                source: e,
            })
    }

    // Best effort: a failed backup never aborts the change.
    fn write_backup(&self, content: &[u8]) {
        if let Err(e) = self.storage.write(&self.config.backup_path, content) {
            tracing::warn!(
                "Could not write backup {}: {}",
                self.config.backup_path.display(),
                e
            );
        }
    }
}
