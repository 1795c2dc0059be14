//! The legacy source description handed to a scan task by the planner.

mod source_description;

pub use source_description::{LegacyPathEntry, SourceDescription};
