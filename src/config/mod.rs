//! YAML descriptions of scan sources and range overrides.

mod document;
mod range_config;
mod source_config;

pub use document::ConfigError;
pub use range_config::read_range_override;
pub use source_config::read_source_description;
