use std::path::Path;

use saphyr::Yaml;
use snafu::ResultExt;
use tracing::debug;

use crate::config::document::{
    ConfigError, InvalidPathSnafu, as_mapping, child_entry, load_documents, optional_bool,
    optional_sequence, optional_u64, read_document, required_str, top_level_mapping,
};
use crate::config::source_config::parse_path_entries;
use crate::range::{PathTreeBuilder, RangeOverride, TreeNode};

/// Loads a range override description.
///
/// Besides an explicit `path_tree`, the document may list flat `files`
/// which are folded into tree roots appended after the explicit ones.
pub async fn read_range_override(path: &Path) -> Result<RangeOverride, ConfigError> {
    let contents = read_document(path).await?;
    contents.as_str().try_into()
}

fn parse_tree_nodes(items: &[Yaml<'_>], entry: &str) -> Result<Vec<TreeNode>, ConfigError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_tree_node(item, &format!("{entry}[{index}]")))
        .collect()
}

fn parse_tree_node(item: &Yaml<'_>, entry: &str) -> Result<TreeNode, ConfigError> {
    let map = as_mapping(item, entry)?;
    let children = optional_sequence(map, "children", entry)?;

    Ok(TreeNode {
        name: required_str(map, "name", entry)?,
        size: optional_u64(map, "size", entry)?.unwrap_or(0),
        readable: optional_bool(map, "read", entry)?.unwrap_or(false),
        children: parse_tree_nodes(children, &child_entry(entry, "children"))?,
    })
}

fn parse_selected_names(items: &[Yaml<'_>]) -> Result<Vec<String>, ConfigError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::InvalidValue {
                    entry: format!("selected_names[{index}]"),
                    expected: "a string",
                })
        })
        .collect()
}

impl TryFrom<&str> for RangeOverride {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = load_documents(contents)?;
        let top_level = top_level_mapping(&documents)?;

        let mut path_tree =
            parse_tree_nodes(optional_sequence(top_level, "path_tree", "")?, "path_tree")?;

        let files = parse_path_entries(optional_sequence(top_level, "files", "")?, "files")?;
        if !files.is_empty() {
            debug!("Folding {} flat files into the path tree", files.len());
            let mut builder = PathTreeBuilder::new();
            for (index, file) in files.iter().enumerate() {
                builder
                    .add_path(&file.path, file.size)
                    .context(InvalidPathSnafu {
                        entry: format!("files[{index}]"),
                    })?;
            }
            path_tree.extend(builder.build());
        }

        Ok(RangeOverride {
            start_offset: optional_u64(top_level, "start_offset", "")?.unwrap_or(0),
            selected_names: parse_selected_names(optional_sequence(
                top_level,
                "selected_names",
                "",
            )?)?,
            path_tree,
        })
    }
}
