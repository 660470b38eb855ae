use crate::utils::validation::normalize_domain;
use std::collections::BTreeSet;
use std::fmt;

pub const LOOPBACK: &str = "127.0.0.1";
pub const DEFAULT_START_MARKER: &str = "## start-gsd";
// Not a typo: existing hosts files carry `=` in the end marker.
pub const DEFAULT_END_MARKER: &str = "## end=gsd";

/// Normalized, deduplicated set of blocked domains. Iterates in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    domains: BTreeSet<String>,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the domain was empty after normalization or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_domain(raw) {
            Some(domain) => self.domains.insert(domain),
            None => false,
        }
    }

    pub fn remove(&mut self, raw: &str) -> bool {
        match normalize_domain(raw) {
            Some(domain) => self.domains.remove(&domain),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DomainSet::new();
        for domain in iter {
            set.insert(domain.as_ref());
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMarkers {
    pub start: String,
    pub end: String,
}

impl Default for BlockMarkers {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl BlockMarkers {
    /// Substring presence of both markers; ordering is not checked.
    pub fn both_present(&self, content: &[u8]) -> bool {
        contains_bytes(content, &self.start) && contains_bytes(content, &self.end)
    }

    /// Start marker, two loopback lines per domain, end marker.
    pub fn render_block(&self, domains: &DomainSet) -> Vec<String> {
        let mut lines = Vec::with_capacity(domains.len() * 2 + 2);
        lines.push(self.start.clone());
        for domain in domains.iter() {
            lines.push(format!("{}\t{}", LOOPBACK, domain));
            lines.push(format!("{}\twww.{}", LOOPBACK, domain));
        }
        lines.push(self.end.clone());
        lines
    }
}

/// Byte-level substring search; hosts files are not guaranteed to be UTF-8.
pub fn contains_bytes(haystack: &[u8], needle: &str) -> bool {
    let needle = needle.as_bytes();
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsMode {
    Work,
    Play,
}

impl fmt::Display for HostsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostsMode::Work => write!(f, "WORK"),
            HostsMode::Play => write!(f, "PLAY"),
        }
    }
}

/// Lines added or removed by an activation/deactivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockChange {
    pub lines: Vec<String>,
    /// `false` for a dry run.
    pub applied: bool,
    /// Set when an activation ran the cache refresh.
    pub refresh: Option<RefreshOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// No flush command is known for this platform.
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_set_normalizes_and_dedups() {
        let set: DomainSet = ["Facebook.com ", "facebook.com", "  ", "a.com"]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a.com", "facebook.com"]);
    }

    #[test]
    fn test_domain_set_insert_remove() {
        let mut set = DomainSet::new();
        assert!(set.insert("News.ycombinator.com"));
        assert!(!set.insert("news.ycombinator.com"));
        assert!(!set.insert(""));
        assert!(set.remove(" NEWS.ycombinator.com"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_render_block_sorted_with_www_variant() {
        let set: DomainSet = ["b.com", "a.com"].into_iter().collect();
        let lines = BlockMarkers::default().render_block(&set);

        assert_eq!(
            lines,
            vec![
                "## start-gsd",
                "127.0.0.1\ta.com",
                "127.0.0.1\twww.a.com",
                "127.0.0.1\tb.com",
                "127.0.0.1\twww.b.com",
                "## end=gsd",
            ]
        );
    }

    #[test]
    fn test_both_present_requires_both_markers() {
        let markers = BlockMarkers::default();
        assert!(markers.both_present(b"x\n## end=gsd\n## start-gsd\n"));
        assert!(!markers.both_present(b"## start-gsd\n127.0.0.1\tx.com\n"));
        assert!(!markers.both_present(b""));
        assert!(markers.both_present(b"# caf\xe9\n## start-gsd\n## end=gsd\n"));
    }

    #[test]
    fn test_hosts_mode_display() {
        assert_eq!(HostsMode::Work.to_string(), "WORK");
        assert_eq!(HostsMode::Play.to_string(), "PLAY");
    }
}
