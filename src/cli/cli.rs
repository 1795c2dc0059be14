use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::data::LogLevel;
use crate::paths::S3_PROVIDER_NAME;
use crate::range::codec::DEFAULT_COMPRESSION_LEVEL;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Resolve the object paths a scan task has to read")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the resolved path list of a scan task
    Resolve(ResolveArgs),
    /// Encode a YAML range override into a task payload
    EncodeRange(EncodeRangeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// YAML source description with the legacy path list
    pub source: PathBuf,

    /// Encoded range payload, as written by `encode-range`
    #[clap(long, short)]
    pub range: Option<PathBuf>,

    /// Provider key the range payload is stored under
    #[clap(long, default_value = S3_PROVIDER_NAME)]
    pub provider: String,

    /// Start path index to use when no range payload applies
    #[clap(long, default_value_t = 0)]
    pub start_path_index: u64,

    #[clap(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EncodeRangeArgs {
    /// YAML range override description
    pub input: PathBuf,

    /// Where to write the encoded payload
    pub output: PathBuf,

    /// Wrap the payload in a zstd frame
    #[clap(long, short)]
    pub compress: bool,

    /// zstd compression level, only used with --compress
    #[clap(long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    pub level: i32,
}
