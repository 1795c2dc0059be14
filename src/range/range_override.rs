use bincode::{Decode, Encode};
use tracing::warn;

use crate::range::TreeNode;

/// Per-task refinement of the legacy listing, sent by the coordinator when
/// work is partitioned across workers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct RangeOverride {
    pub start_offset: u64,
    pub selected_names: Vec<String>,
    pub path_tree: Vec<TreeNode>,
}

/// Which listing a decoded override asks the resolver to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelection {
    Tree(Vec<TreeNode>),
    Names(Vec<String>),
    All,
}

impl RangeOverride {
    pub fn new(start_offset: u64) -> Self {
        Self {
            start_offset,
            ..Self::default()
        }
    }

    pub fn with_selected_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.selected_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_path_tree(mut self, roots: impl IntoIterator<Item = TreeNode>) -> Self {
        self.path_tree.extend(roots);
        self
    }

    /// Splits the override into its resumption cursor and its selection.
    ///
    /// A non-empty tree takes precedence over the name filter.
    pub fn into_selection(self) -> (u64, RangeSelection) {
        let selection = match (self.path_tree.is_empty(), self.selected_names.is_empty()) {
            (false, names_empty) => {
                if !names_empty {
                    warn!(
                        "Range override carries both a path tree and {} selected names, ignoring the names",
                        self.selected_names.len()
                    );
                }
                RangeSelection::Tree(self.path_tree)
            }
            (true, false) => RangeSelection::Names(self.selected_names),
            (true, true) => RangeSelection::All,
        };

        (self.start_offset, selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_selects_everything() {
        let (offset, selection) = RangeOverride::new(0).into_selection();
        assert_eq!(offset, 0);
        assert_eq!(selection, RangeSelection::All);
    }

    #[test]
    fn names_without_tree_select_by_name() {
        let (offset, selection) = RangeOverride::new(42)
            .with_selected_names(["my/path"])
            .into_selection();

        assert_eq!(offset, 42);
        assert_eq!(selection, RangeSelection::Names(vec!["my/path".to_string()]));
    }

    #[test]
    fn tree_wins_over_names() {
        let tree = vec![TreeNode::readable("root", 1)];
        let (offset, selection) = RangeOverride::new(7)
            .with_selected_names(["my/path"])
            .with_path_tree(tree.clone())
            .into_selection();

        assert_eq!(offset, 7);
        assert_eq!(selection, RangeSelection::Tree(tree));
    }
}
