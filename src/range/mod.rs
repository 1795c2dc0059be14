//! Override payloads that narrow or replace the legacy listing of a scan task.

pub mod codec;
mod path_tree;
mod range_override;

pub use codec::{RangeCodecError, decode_range, encode_range, encode_range_compressed};
pub use path_tree::{PathTreeBuilder, PathTreeError, TreeNode, flatten_tree};
pub use range_override::{RangeOverride, RangeSelection};
