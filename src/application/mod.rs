mod application;
pub mod data;
mod report;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use report::render_resolved;
pub use runtime_config::{EncodeRangeConfig, ResolveConfig};
