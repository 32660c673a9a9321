//! Generic value tree and the two dialect front ends that produce it.

pub(crate) mod node;
pub(crate) mod sniff;
pub(crate) mod xml;

use crate::foundation::error::{SceneResult, StructuralError};
use node::{Node, NodeMap};
use sniff::{Dialect, UTF8_BOM};
use xml::{XmlTextMode, xml_to_tree};

/// Normalize a document of a known dialect into a generic tree.
///
/// XML trees whose top level lacks `root_key` are wrapped as `{root_key: tree}` so both dialects
/// reach the scene decoder with the same root-keyed shape.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn parse_tree(
    bytes: &[u8],
    dialect: Dialect,
    xml_text: XmlTextMode,
    root_key: Option<&str>,
) -> SceneResult<Node> {
    match dialect {
        Dialect::Json => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            let node: Node = serde_json::from_slice(body).map_err(StructuralError::from)?;
            Ok(node)
        }
        Dialect::Xml => {
            let tree = xml_to_tree(bytes, xml_text)?;
            Ok(match root_key {
                Some(key) if tree.get(key).is_none() => {
                    let mut wrapped = NodeMap::new();
                    wrapped.insert(key.to_owned(), tree);
                    Node::Map(wrapped)
                }
                _ => tree,
            })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/parse.rs"]
mod tests;
