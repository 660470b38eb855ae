use crate::core::domain_store::DomainStore;
use crate::core::hosts_block::HostsBlockManager;
use crate::core::{CacheRefresher, DomainSet, Notifier, RefreshOutcome, Storage};
use crate::utils::error::{ArgumentErrorKind, GsdError, Result};
use std::io::Write;

pub const UNSUPPORTED_REFRESH_HINT: &str = "Please contribute DNS cache flush command on GitHub";

pub const USAGE: &str =
    "Usage: get-shit-done [--config <PATH>] [--hosts-file <PATH>] [--dry-run] <work|play|add|remove|list|status> [DOMAIN]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Work,
    Play,
    Add(String),
    Remove(String),
    List,
    Status,
}

impl Mode {
    /// Resolve the positional arguments into a mode.
    pub fn parse(mode: Option<&str>, arg: Option<&str>) -> Result<Self> {
        let Some(mode) = mode else {
            return Err(GsdError::InvalidArgument {
                kind: ArgumentErrorKind::MissingMode,
                message: "Missing mode. Use: work, play, add, remove, list, or status".to_string(),
            });
        };

        let domain = |verb: &str| match arg {
            Some(d) if !d.trim().is_empty() => Ok(d.to_string()),
            _ => Err(GsdError::missing_domain(verb)),
        };

        match mode {
            "work" => Ok(Mode::Work),
            "play" => Ok(Mode::Play),
            "add" => domain("add").map(Mode::Add),
            "remove" => domain("remove").map(Mode::Remove),
            "list" => Ok(Mode::List),
            "status" => Ok(Mode::Status),
            other => Err(GsdError::InvalidArgument {
                kind: ArgumentErrorKind::UnknownMode,
                message: format!("Unknown mode: {}", other),
            }),
        }
    }
}

/// Runs one mode against the domain store and the hosts file, writing
/// user-facing output to `out`.
pub struct App<S: Storage, R: CacheRefresher, N: Notifier, W: Write> {
    store: DomainStore<S>,
    hosts: HostsBlockManager<S, R>,
    notifier: N,
    out: W,
    dry_run: bool,
}

impl<S: Storage, R: CacheRefresher, N: Notifier, W: Write> App<S, R, N, W> {
    pub fn new(
        store: DomainStore<S>,
        hosts: HostsBlockManager<S, R>,
        notifier: N,
        out: W,
        dry_run: bool,
    ) -> Self {
        Self {
            store,
            hosts,
            notifier,
            out,
            dry_run,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// First-run setup. A dry run only reports what it would create.
    pub fn prepare(&mut self) -> Result<()> {
        if self.dry_run {
            if !self.store.exists() {
                writeln!(
                    self.out,
                    "Dry run: Would create {} with default domains",
                    self.store.path().display()
                )
                .map_err(stdout_error)?;
            }
            return Ok(());
        }
        self.store.initialize_if_missing()?;
        Ok(())
    }

    pub fn run(&mut self, mode: &Mode) -> Result<()> {
        tracing::debug!("Running {:?} (dry run: {})", mode, self.dry_run);

        match mode {
            Mode::Work => self.work(),
            Mode::Play => self.play(),
            Mode::Add(domain) => self.add(domain),
            Mode::Remove(domain) => self.remove(domain),
            Mode::List => self.list(),
            Mode::Status => self.status(),
        }
    }

    fn work(&mut self) -> Result<()> {
        let domains = self.load_domains()?;
        let change = self.hosts.activate(&domains, self.dry_run)?;

        if !change.applied {
            self.print("Dry run: Would add the following entries to hosts file:")?;
            for line in &change.lines {
                self.print(line)?;
            }
            return Ok(());
        }

        if change.refresh == Some(RefreshOutcome::Unsupported) {
            self.print(UNSUPPORTED_REFRESH_HINT)?;
        }
        self.notifier.notify("Work mode activated");
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let change = self.hosts.deactivate(self.dry_run)?;

        if !change.applied {
            self.print("Dry run: Would remove the following lines from hosts file:")?;
            for line in &change.lines {
                self.print(line)?;
            }
            return Ok(());
        }

        self.notifier.notify("Play mode activated");
        Ok(())
    }

    fn add(&mut self, domain: &str) -> Result<()> {
        if self.dry_run {
            let message = format!(
                "Dry run: Would add domain {} to {}",
                domain.trim().to_lowercase(),
                self.store.path().display()
            );
            return self.print(&message);
        }

        if self.store.add(domain)?.is_some() {
            self.notifier.notify(&format!("Domain added: {}", domain));
        }
        Ok(())
    }

    fn remove(&mut self, domain: &str) -> Result<()> {
        if self.dry_run {
            let message = format!(
                "Dry run: Would remove domain {} from {}",
                domain.trim().to_lowercase(),
                self.store.path().display()
            );
            return self.print(&message);
        }

        if self.store.remove(domain)?.is_some() {
            self.notifier.notify(&format!("Domain removed: {}", domain));
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let domains = self.load_domains()?;
        self.print("Blocked domains:")?;
        for domain in domains.iter() {
            self.print(&format!(" - {}", domain))?;
        }
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        match self.hosts.status() {
            Ok(mode) => self.print(&format!("Current mode: {}", mode)),
            Err(e) => {
                tracing::warn!("Status unavailable: {}", e);
                self.print("Could not read hosts file")
            }
        }
    }

    // A dry run never creates the store, so a missing one reads as the default.
    fn load_domains(&self) -> Result<DomainSet> {
        match self.store.load() {
            Err(GsdError::NotFound { .. }) if self.dry_run => {
                Ok(DomainStore::<S>::default_domains())
            }
            other => other,
        }
    }

    fn print(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line).map_err(stdout_error)
    }
}

fn stdout_error(source: std::io::Error) -> GsdError {
    GsdError::WriteError {
        path: "<stdout>".into(),
        source,
    }
}
