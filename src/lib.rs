//! Resolution of the object paths a single scan task has to read.
//!
//! A scan task always receives the planner's flat [`SourceDescription`].
//! When work is partitioned, the coordinator may also attach an encoded
//! [`RangeOverride`] to the task parameters, which either narrows that
//! listing by name or replaces it with a tree of path fragments.
//! [`PathListResolver`] reconciles both into one ordered [`PathList`].
#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod config;
mod ext;
pub mod paths;
pub mod range;
pub mod source;

pub use paths::{
    PathEntry, PathList, PathListError, PathListResolver, ResolvedPaths, S3_PROVIDER_NAME,
    TaskParams, resolve_paths,
};
pub use range::{RangeOverride, TreeNode};
pub use source::{LegacyPathEntry, SourceDescription};
