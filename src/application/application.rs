use std::path::Path;

use compio::fs;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::report::render_resolved;
use crate::application::{EncodeRangeConfig, ResolveConfig};
use crate::cli::{Cli, Command};
use crate::config::{ConfigError, read_range_override, read_source_description};
use crate::ext::BestEffortPathExt;
use crate::paths::{PathListError, PathListResolver, ResolvedPaths, TaskParams};
use crate::range::{RangeCodecError, encode_range, encode_range_compressed};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        match cli.command {
            Command::Resolve(args) => {
                let config = ResolveConfig::from(args);
                let resolved = Self::resolve(&config).await?;
                colored::control::set_override(config.color);
                print!("{}", render_resolved(&resolved, config.color));
                Ok(())
            }
            Command::EncodeRange(args) => Self::encode_range(&args.into()).await,
        }
    }

    pub async fn resolve(config: &ResolveConfig) -> Result<ResolvedPaths, ApplicationError> {
        let source = read_source_description(&config.source)
            .await
            .context(SourceSnafu)?;
        debug!("Loaded {} legacy paths", source.paths().len());

        let task_params = match &config.range {
            Some(range_path) => Some(Self::read_task_params(range_path, &config.provider).await?),
            None => None,
        };

        let resolved = PathListResolver::new(config.provider.as_str())
            .resolve(&source, task_params.as_ref(), config.start_path_index)
            .context(ResolveSnafu)?;
        info!(
            "Resolved {} paths starting at index {}",
            resolved.paths.len(),
            resolved.start_path_index
        );

        Ok(resolved)
    }

    pub async fn encode_range(config: &EncodeRangeConfig) -> Result<(), ApplicationError> {
        let range = read_range_override(&config.input)
            .await
            .context(RangeDescriptionSnafu)?;

        let payload = match config.compression_level {
            Some(level) => encode_range_compressed(&range, level),
            None => encode_range(&range),
        }
        .context(EncodeSnafu)?;

        let payload_len = payload.len();
        fs::write(&config.output, payload)
            .await
            .0
            .context(WritePayloadSnafu {
                file_path: config.output.best_effort_path_display(),
            })?;
        info!(
            "Wrote {} byte range payload to {}",
            payload_len,
            config.output.best_effort_path_display()
        );

        Ok(())
    }

    async fn read_task_params(path: &Path, provider: &str) -> Result<TaskParams, ApplicationError> {
        let payload = fs::read(path).await.context(ReadPayloadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!(
            "Read {} byte range payload for provider '{}'",
            payload.len(),
            provider
        );

        Ok(TaskParams::from([(provider.to_string(), payload)]))
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load the source description"))]
    SourceError { source: ConfigError },
    #[snafu(display("Failed to load the range override description"))]
    RangeDescriptionError { source: ConfigError },
    #[snafu(display("Failed to read range payload {}", file_path))]
    ReadPayloadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write range payload {}", file_path))]
    WritePayloadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to encode range payload"))]
    EncodeError { source: RangeCodecError },
    #[snafu(display("Failed to resolve the path list"))]
    ResolveError { source: PathListError },
}
