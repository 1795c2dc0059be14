use derive_more::{Deref, Display, From, IntoIterator};

use crate::source::LegacyPathEntry;

/// A single item a scan task has to read.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{path} ({size} bytes)")]
pub struct PathEntry {
    pub path: String,
    pub size: u64,
    pub is_directory: bool,
}

impl PathEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            is_directory: false,
        }
    }
}

impl From<&LegacyPathEntry> for PathEntry {
    fn from(entry: &LegacyPathEntry) -> Self {
        Self::file(entry.path.clone(), entry.size)
    }
}

/// Ordered list of resolved entries, in the order they were discovered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deref, From, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct PathList(Vec<PathEntry>);

impl PathList {
    /// Sum of all sizes, saturating at `u64::MAX`.
    pub fn total_size(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |total, entry| total.saturating_add(entry.size))
    }
}

impl FromIterator<PathEntry> for PathList {
    fn from_iter<I: IntoIterator<Item = PathEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
