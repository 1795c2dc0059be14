use derive_more::From;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPathEntry {
    pub path: String,
    pub size: u64,
}

impl LegacyPathEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Flat listing of every item known to the planner for a scan.
///
/// `path` is expected to be unique within a description, it is the key an
/// override payload uses to select entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, From)]
pub struct SourceDescription {
    paths: Vec<LegacyPathEntry>,
}

impl SourceDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_path(&mut self, path: impl Into<String>, size: u64) -> &mut Self {
        self.paths.push(LegacyPathEntry::new(path, size));
        self
    }

    pub fn paths(&self) -> &[LegacyPathEntry] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for SourceDescription {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|(path, size)| LegacyPathEntry::new(path, size))
                .collect(),
        }
    }
}
