use std::path::PathBuf;

use supports_color::Stream;

use crate::cli::{EncodeRangeArgs, ResolveArgs};

#[derive(Debug, Clone)]
pub struct ResolveConfig {
    pub source: PathBuf,
    pub range: Option<PathBuf>,
    pub provider: String,
    pub start_path_index: u64,
    pub color: bool,
}

impl From<ResolveArgs> for ResolveConfig {
    fn from(args: ResolveArgs) -> Self {
        Self {
            color: !args.no_color && supports_color::on(Stream::Stdout).is_some(),
            source: args.source,
            range: args.range,
            provider: args.provider,
            start_path_index: args.start_path_index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EncodeRangeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compression_level: Option<i32>,
}

impl From<EncodeRangeArgs> for EncodeRangeConfig {
    fn from(args: EncodeRangeArgs) -> Self {
        Self {
            input: args.input,
            output: args.output,
            compression_level: args.compress.then_some(args.level),
        }
    }
}
