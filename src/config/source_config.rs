use std::path::Path;

use saphyr::Yaml;

use crate::config::document::{
    ConfigError, as_mapping, load_documents, optional_sequence, read_document, required_str,
    required_u64, top_level_mapping,
};
use crate::source::{LegacyPathEntry, SourceDescription};

/// Loads a source description from a YAML document of the form
///
/// ```yaml
/// paths:
///   - path: my/path
///     size: 100500
/// ```
pub async fn read_source_description(path: &Path) -> Result<SourceDescription, ConfigError> {
    let contents = read_document(path).await?;
    contents.as_str().try_into()
}

pub(crate) fn parse_path_entries(
    items: &[Yaml<'_>],
    entry: &str,
) -> Result<Vec<LegacyPathEntry>, ConfigError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let entry = format!("{entry}[{index}]");
            let map = as_mapping(item, &entry)?;
            Ok(LegacyPathEntry::new(
                required_str(map, "path", &entry)?,
                required_u64(map, "size", &entry)?,
            ))
        })
        .collect()
}

impl TryFrom<&str> for SourceDescription {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = load_documents(contents)?;
        let top_level = top_level_mapping(&documents)?;

        let paths = parse_path_entries(optional_sequence(top_level, "paths", "")?, "paths")?;
        Ok(paths.into())
    }
}
