use std::collections::{HashMap, HashSet};

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::paths::{PathEntry, PathList};
use crate::range::{RangeCodecError, RangeSelection, decode_range, flatten_tree};
use crate::source::SourceDescription;

/// Provider key under which the coordinator stores range payloads.
pub const S3_PROVIDER_NAME: &str = "s3";

/// Opaque per-task parameters, keyed by provider.
pub type TaskParams = HashMap<String, Vec<u8>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub paths: PathList,
    pub start_path_index: u64,
}

/// Turns a source description and an optional range payload into the flat
/// list of items a single scan task reads.
#[derive(Debug, Clone)]
pub struct PathListResolver {
    provider: String,
}

impl Default for PathListResolver {
    fn default() -> Self {
        Self::new(S3_PROVIDER_NAME)
    }
}

impl PathListResolver {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Resolves the paths for one scan task.
    ///
    /// Without a payload under this resolver's provider key the legacy list is
    /// returned as is and `start_path_index` is passed through. Once a payload
    /// is present its start offset always replaces `start_path_index`.
    pub fn resolve(
        &self,
        source: &SourceDescription,
        task_params: Option<&TaskParams>,
        start_path_index: u64,
    ) -> Result<ResolvedPaths, PathListError> {
        let Some(payload) = task_params.and_then(|params| params.get(&self.provider)) else {
            debug!(
                "No range payload for provider '{}', using {} legacy paths",
                self.provider,
                source.paths().len()
            );
            return Ok(ResolvedPaths {
                paths: legacy_paths(source),
                start_path_index,
            });
        };

        let range = decode_range(payload).context(DecodeFailureSnafu {
            provider: self.provider.clone(),
        })?;
        let (start_path_index, selection) = range.into_selection();

        let paths = match selection {
            RangeSelection::Tree(roots) => {
                debug!("Flattening {} path tree roots", roots.len());
                flatten_tree(&roots)
            }
            RangeSelection::Names(names) => {
                debug!("Filtering legacy paths by {} selected names", names.len());
                select_by_names(source, &names)
            }
            RangeSelection::All => legacy_paths(source),
        };

        debug!(
            "Resolved {} paths starting at index {}",
            paths.len(),
            start_path_index
        );
        Ok(ResolvedPaths {
            paths,
            start_path_index,
        })
    }
}

/// Shorthand for [`PathListResolver::resolve`] with the default provider.
pub fn resolve_paths(
    source: &SourceDescription,
    task_params: Option<&TaskParams>,
    start_path_index: u64,
) -> Result<ResolvedPaths, PathListError> {
    PathListResolver::default().resolve(source, task_params, start_path_index)
}

fn legacy_paths(source: &SourceDescription) -> PathList {
    source.paths().iter().map(PathEntry::from).collect()
}

// Keeps the legacy order, the filter order is irrelevant.
fn select_by_names(source: &SourceDescription, names: &[String]) -> PathList {
    let selected: HashSet<&str> = names.iter().map(String::as_str).collect();
    source
        .paths()
        .iter()
        .filter(|entry| selected.contains(entry.path.as_str()))
        .map(PathEntry::from)
        .collect()
}

#[derive(Debug, Snafu)]
pub enum PathListError {
    #[snafu(display("Malformed range payload for provider '{}'", provider))]
    DecodeFailure {
        provider: String,
        source: RangeCodecError,
    },
}
