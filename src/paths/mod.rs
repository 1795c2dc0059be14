//! Resolution of the flat path list a scan task reads.

mod path_entry;
mod resolver;

pub use path_entry::{PathEntry, PathList};
pub use resolver::{
    PathListError, PathListResolver, ResolvedPaths, S3_PROVIDER_NAME, TaskParams, resolve_paths,
};
