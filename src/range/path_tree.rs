use bincode::{Decode, Encode};
use hashlink::LinkedHashMap;
use hashlink::linked_hash_map::Entry;
use snafu::Snafu;

use crate::paths::{PathEntry, PathList};

/// One segment of the hierarchical override listing.
///
/// A node either denotes an item to read (`readable`) or only exists to
/// group its children. A non-readable node without children is inert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct TreeNode {
    pub name: String,
    pub size: u64,
    pub readable: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn readable(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            readable: true,
            children: Vec::new(),
        }
    }

    pub fn structural(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_inert(&self) -> bool {
        !self.readable && self.children.is_empty()
    }
}

/// Flattens a forest into the entries a scan task reads.
///
/// Pre-order, left to right: a readable parent is emitted before any of its
/// descendants, and siblings keep their given order.
pub fn flatten_tree(roots: &[TreeNode]) -> PathList {
    let mut entries = Vec::new();
    flatten_into(roots, "", &mut entries);
    entries.into()
}

fn flatten_into(nodes: &[TreeNode], prefix: &str, entries: &mut Vec<PathEntry>) {
    for node in nodes.iter().filter(|node| !node.is_inert()) {
        let full_path = if prefix.is_empty() {
            node.name.clone()
        } else {
            format!("{prefix}/{}", node.name)
        };

        if node.readable {
            entries.push(PathEntry::file(full_path.clone(), node.size));
        }
        flatten_into(&node.children, &full_path, entries);
    }
}

#[derive(Debug, Default)]
struct BuilderNode {
    size: u64,
    readable: bool,
    children: LinkedHashMap<String, BuilderNode>,
}

impl BuilderNode {
    fn into_tree_node(self, name: String) -> TreeNode {
        TreeNode {
            name,
            size: self.size,
            readable: self.readable,
            children: into_tree_nodes(self.children),
        }
    }
}

fn into_tree_nodes(nodes: LinkedHashMap<String, BuilderNode>) -> Vec<TreeNode> {
    nodes
        .into_iter()
        .map(|(name, node)| node.into_tree_node(name))
        .collect()
}

/// Folds flat `/`-separated paths into a forest of [`TreeNode`]s.
///
/// Shared prefixes become structural nodes. Siblings keep the order in which
/// their first path was added.
#[derive(Debug, Default)]
pub struct PathTreeBuilder {
    roots: LinkedHashMap<String, BuilderNode>,
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as readable with the given size, creating any missing
    /// ancestors. Adding the same path again overwrites its size.
    pub fn add_path(&mut self, path: &str, size: u64) -> Result<(), PathTreeError> {
        if path.split('/').any(str::is_empty) {
            return EmptySegmentSnafu { path }.fail();
        }

        let mut segments = path.split('/').peekable();
        let mut current = &mut self.roots;

        while let Some(segment) = segments.next() {
            // Siblings keep first-insertion order; `or_insert_with` moves hits to the back.
            let node = match current.entry(segment.to_string()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(BuilderNode::default()),
            };

            if segments.peek().is_none() {
                node.size = size;
                node.readable = true;
                break;
            }
            current = &mut node.children;
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn build(self) -> Vec<TreeNode> {
        into_tree_nodes(self.roots)
    }
}

#[derive(Debug, Snafu)]
pub enum PathTreeError {
    #[snafu(display("Path '{}' contains an empty segment", path))]
    EmptySegment { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn paths_of(list: &PathList) -> Vec<&str> {
        list.iter().map(|entry| entry.path.as_str()).collect()
    }

    #[fixture]
    fn forest() -> Vec<TreeNode> {
        vec![
            TreeNode::readable("root", 1).with_children([
                TreeNode::structural("folder").with_children([
                    TreeNode::readable("f1", 42),
                    TreeNode::readable("f2", 100500),
                ]),
                TreeNode::readable("f3", 0),
                TreeNode::structural("nothing"),
            ]),
            TreeNode::structural("root2").with_children([TreeNode::readable("f4", 42)]),
        ]
    }

    #[rstest]
    fn flattens_in_pre_order(forest: Vec<TreeNode>) {
        let flat = flatten_tree(&forest);

        assert_eq!(
            flat,
            PathList::from(vec![
                PathEntry::file("root", 1),
                PathEntry::file("root/folder/f1", 42),
                PathEntry::file("root/folder/f2", 100500),
                PathEntry::file("root/f3", 0),
                PathEntry::file("root2/f4", 42),
            ])
        );
        assert!(flat.iter().all(|entry| !entry.is_directory));
    }

    #[test]
    fn inert_nodes_do_not_disturb_siblings() {
        let forest = vec![
            TreeNode::structural("a"),
            TreeNode::readable("b", 1),
            TreeNode::structural("c"),
            TreeNode::readable("d", 2),
        ];

        assert_eq!(paths_of(&flatten_tree(&forest)), ["b", "d"]);
    }

    #[test]
    fn structural_chain_without_readable_leaves_yields_nothing() {
        let forest = vec![
            TreeNode::structural("a")
                .with_children([TreeNode::structural("b").with_children([TreeNode::structural("c")])]),
        ];

        assert!(flatten_tree(&forest).is_empty());
    }

    #[test]
    fn empty_forest_flattens_to_empty_list() {
        assert!(flatten_tree(&[]).is_empty());
    }

    #[test]
    fn sibling_order_is_not_sorted() {
        let forest = vec![TreeNode::structural("dir").with_children([
            TreeNode::readable("z", 1),
            TreeNode::readable("a", 2),
            TreeNode::readable("m", 3),
        ])];

        assert_eq!(paths_of(&flatten_tree(&forest)), ["dir/z", "dir/a", "dir/m"]);
    }

    #[test]
    fn builder_groups_shared_prefixes() {
        let mut builder = PathTreeBuilder::new();
        builder.add_path("root", 1).unwrap();
        builder.add_path("root/folder/f1", 42).unwrap();
        builder.add_path("root/folder/f2", 100500).unwrap();
        builder.add_path("root/f3", 0).unwrap();
        builder.add_path("root2/f4", 42).unwrap();

        let roots = builder.build();

        assert_eq!(roots.len(), 2);
        assert!(roots[0].readable);
        assert!(!roots[1].readable);
        assert!(!roots[0].children[0].readable);
        assert_eq!(roots[0].children[0].name, "folder");
        assert_eq!(
            paths_of(&flatten_tree(&roots)),
            ["root", "root/folder/f1", "root/folder/f2", "root/f3", "root2/f4"]
        );
    }

    #[test]
    fn builder_keeps_first_insertion_order_of_ancestors() {
        let mut builder = PathTreeBuilder::new();
        builder.add_path("a/x", 1).unwrap();
        builder.add_path("b/y", 2).unwrap();
        builder.add_path("a/z", 3).unwrap();

        assert_eq!(paths_of(&flatten_tree(&builder.build())), ["a/x", "a/z", "b/y"]);
    }

    #[test]
    fn builder_overwrites_size_of_repeated_path() {
        let mut builder = PathTreeBuilder::new();
        builder.add_path("a/b", 1).unwrap();
        builder.add_path("a/b", 5).unwrap();

        let flat = flatten_tree(&builder.build());
        assert_eq!(flat, PathList::from(vec![PathEntry::file("a/b", 5)]));
    }

    #[test]
    fn builder_keeps_sibling_order_when_revisiting_ancestor() {
        let mut builder = PathTreeBuilder::new();
        builder.add_path("dir/first", 1).unwrap();
        builder.add_path("other", 2).unwrap();
        builder.add_path("dir/second", 3).unwrap();
        builder.add_path("dir/first", 4).unwrap();

        let roots = builder.build();
        let names: Vec<_> = roots.iter().map(|node| node.name.as_str()).collect();
        let children: Vec<_> = roots[0].children.iter().map(|node| node.name.as_str()).collect();

        assert_eq!(names, ["dir", "other"]);
        assert_eq!(children, ["first", "second"]);
        assert_eq!(roots[0].children[0].size, 4);
    }

    #[rstest]
    #[case("")]
    #[case("/leading")]
    #[case("trailing/")]
    #[case("double//slash")]
    fn builder_rejects_empty_segments(#[case] path: &str) {
        let mut builder = PathTreeBuilder::new();

        let result = builder.add_path(path, 1);

        assert!(matches!(result, Err(PathTreeError::EmptySegment { .. })));
        assert!(builder.is_empty());
    }
}
