use std::{borrow::Cow, path::Path};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::{ext::BestEffortPathExt, range::PathTreeError};

pub(crate) type YamlMap<'y> = LinkedHashMap<Yaml<'y>, Yaml<'y>>;

pub(crate) async fn read_document(path: &Path) -> Result<String, ConfigError> {
    debug!("Reading config file: {}", path.best_effort_path_display());
    let bytes = fs::read(path).await.context(ReadSnafu {
        file_path: path.best_effort_path_display(),
    })?;
    debug!("Successfully read config file: {} bytes", bytes.len());

    String::from_utf8(bytes).context(EncodingSnafu {
        file_path: path.best_effort_path_display(),
    })
}

pub(crate) fn load_documents(contents: &str) -> Result<Vec<Yaml<'_>>, ConfigError> {
    Yaml::load_from_str(contents).context(ParseSnafu)
}

pub(crate) fn top_level_mapping<'a, 'y>(
    documents: &'a [Yaml<'y>],
) -> Result<&'a YamlMap<'y>, ConfigError> {
    documents
        .first()
        .ok_or(ConfigError::MalformedConfig)?
        .as_mapping()
        .ok_or(ConfigError::TopLevelNotMap)
}

pub(crate) fn child_entry(entry: &str, field: &str) -> String {
    if entry.is_empty() {
        field.to_string()
    } else {
        format!("{entry}.{field}")
    }
}

pub(crate) fn as_mapping<'a, 'y>(
    value: &'a Yaml<'y>,
    entry: &str,
) -> Result<&'a YamlMap<'y>, ConfigError> {
    value.as_mapping().ok_or_else(|| ConfigError::InvalidValue {
        entry: entry.to_string(),
        expected: "a map",
    })
}

fn field<'a, 'y>(map: &'a YamlMap<'y>, name: &'y str) -> Option<&'a Yaml<'y>> {
    map.get(&Yaml::Value(Scalar::String(Cow::Borrowed(name))))
}

pub(crate) fn required_str(
    map: &YamlMap<'_>,
    name: &'static str,
    entry: &str,
) -> Result<String, ConfigError> {
    let value = field(map, name).ok_or_else(|| ConfigError::MissingField {
        entry: child_entry(entry, name),
    })?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidValue {
            entry: child_entry(entry, name),
            expected: "a string",
        })
}

pub(crate) fn optional_u64(
    map: &YamlMap<'_>,
    name: &'static str,
    entry: &str,
) -> Result<Option<u64>, ConfigError> {
    match field(map, name) {
        None => Ok(None),
        Some(Yaml::Value(Scalar::Integer(value))) => u64::try_from(*value)
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                entry: child_entry(entry, name),
                expected: "a non-negative integer",
            }),
        Some(_) => InvalidValueSnafu {
            entry: child_entry(entry, name),
            expected: "a non-negative integer",
        }
        .fail(),
    }
}

pub(crate) fn required_u64(
    map: &YamlMap<'_>,
    name: &'static str,
    entry: &str,
) -> Result<u64, ConfigError> {
    optional_u64(map, name, entry)?.ok_or_else(|| ConfigError::MissingField {
        entry: child_entry(entry, name),
    })
}

pub(crate) fn optional_bool(
    map: &YamlMap<'_>,
    name: &'static str,
    entry: &str,
) -> Result<Option<bool>, ConfigError> {
    match field(map, name) {
        None => Ok(None),
        Some(Yaml::Value(Scalar::Boolean(value))) => Ok(Some(*value)),
        Some(_) => InvalidValueSnafu {
            entry: child_entry(entry, name),
            expected: "a boolean",
        }
        .fail(),
    }
}

/// A missing list reads as an empty one.
pub(crate) fn optional_sequence<'a, 'y>(
    map: &'a YamlMap<'y>,
    name: &'static str,
    entry: &str,
) -> Result<&'a [Yaml<'y>], ConfigError> {
    match field(map, name) {
        None => Ok(&[]),
        Some(value) => value
            .as_sequence()
            .map(Vec::as_slice)
            .ok_or_else(|| ConfigError::InvalidValue {
                entry: child_entry(entry, name),
                expected: "a list",
            }),
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'{}' is required", entry))]
    MissingField { entry: String },
    #[snafu(display("'{}' should be {}", entry, expected))]
    InvalidValue {
        entry: String,
        expected: &'static str,
    },
    #[snafu(display("Invalid path in '{}'", entry))]
    InvalidPath {
        entry: String,
        source: PathTreeError,
    },
}
