//! Host capability flags
//!
//! Named facts about the machine running Stackwright (e.g. `docker` is
//! installed). Recipe rules can require a capability to be present.

use std::collections::BTreeSet;

/// Set of capability names available on the host.
///
/// Names are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    flags: BTreeSet<String>,
}

impl HostCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl AsRef<str>) -> Self {
        self.insert(name);
        self
    }

    pub fn insert(&mut self, name: impl AsRef<str>) {
        let name = name.as_ref().trim();
        if !name.is_empty() {
            self.flags.insert(name.to_ascii_lowercase());
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.flags.contains(&name.trim().to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for HostCapabilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut caps = HostCapabilities::new();
        for name in iter {
            caps.insert(name);
        }
        caps
    }
}
