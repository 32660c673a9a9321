//! Field-level decoding: lenient coercions, the default table and the notices they produce.

pub(crate) mod coerce;
pub(crate) mod context;
pub mod defaults;
pub(crate) mod diagnostics;

use crate::foundation::error::SceneResult;
use crate::foundation::path::FieldPath;
use crate::tree::node::Node;
use context::DecodeContext;

/// Types built directly from a generic tree node.
pub trait FromNode: Sized {
    /// Decode `node`, located at `path` in the document.
    fn from_node(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> SceneResult<Self>;
}
