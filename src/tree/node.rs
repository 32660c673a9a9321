use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// Ordered string-keyed map used by [`Node::Map`].
pub type NodeMap = IndexMap<String, Node>;

/// Key under which a text-bearing XML element keeps its text next to promoted attributes.
///
/// The JSON dialect uses the same key for `VertexData` and `Faces`.
pub const TEXT_KEY: &str = "_data";
/// Key an XML `id` attribute is promoted to.
pub const ID_KEY: &str = "_id";
/// Key an XML `type` attribute is promoted to.
pub const TYPE_KEY: &str = "_type";

/// Format-agnostic intermediate value both wire dialects are normalized into.
///
/// Built once per document and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Node {
    /// JSON `null`.
    Null,
    /// Text leaf (JSON string, XML text content, JSON boolean as `"true"`/`"false"`).
    String(String),
    /// Numeric leaf (JSON numbers only; XML never produces numbers).
    Number(f64),
    /// Ordered list.
    List(Vec<Node>),
    /// Ordered map, insertion order preserved.
    Map(NodeMap),
}

impl Node {
    /// Look up a key when this node is a map.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(m) => m.get(key),
            _ => None,
        }
    }

    /// The map, if this node is one.
    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The list, if this node is one.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The string, if this node is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Leaf view of this node: a map carrying [`TEXT_KEY`] yields its text value,
    /// every other node yields itself.
    pub fn leaf(&self) -> &Node {
        match self {
            Self::Map(m) => m.get(TEXT_KEY).unwrap_or(self),
            _ => self,
        }
    }

    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut out = NodeMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((k, v)) = map.next_entry::<String, Node>()? {
            out.insert(k, v);
        }
        Ok(Node::Map(out))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/node.rs"]
mod tests;
