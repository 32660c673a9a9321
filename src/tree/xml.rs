//! XML front end: turns an XML byte stream into a [`Node`] tree shaped like the JSON dialect.
//!
//! Single pass over quick-xml's pull events; the only state is an explicit stack of open
//! elements, each with its own partially built map and text buffer.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::foundation::error::{SceneError, SceneResult};
use crate::tree::node::{ID_KEY, Node, NodeMap, TEXT_KEY, TYPE_KEY};
use crate::tree::sniff::UTF8_BOM;

/// How an element carrying both promoted attributes and text (but no child elements) is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XmlTextMode {
    /// Keep a map of the promoted attributes plus the trimmed text under `"_data"`,
    /// matching the JSON dialect (`<VertexData type="xyz">…</VertexData>` ≡
    /// `{"_type": "xyz", "_data": "…"}`).
    #[default]
    PreserveAttributes,
    /// Collapse to a bare string leaf, discarding the attributes.
    LossyText,
}

struct OpenElement {
    name: String,
    map: NodeMap,
    has_children: bool,
    text: String,
}

impl OpenElement {
    fn finish(self, mode: XmlTextMode) -> (String, Node) {
        let text = self.text.trim();
        let node = if self.has_children || text.is_empty() {
            Node::Map(self.map)
        } else if self.map.is_empty() || mode == XmlTextMode::LossyText {
            Node::String(text.to_owned())
        } else {
            let mut map = self.map;
            map.insert(TEXT_KEY.to_owned(), Node::String(text.to_owned()));
            Node::Map(map)
        };
        (self.name, node)
    }
}

/// Convert an XML document into a generic tree.
///
/// The returned map holds the document's top-level element under its tag name, e.g.
/// `<Scene>…</Scene>` becomes `{"Scene": {…}}`. Repeated sibling tags are promoted to a list
/// on their second occurrence.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn xml_to_tree(bytes: &[u8], mode: XmlTextMode) -> SceneResult<Node> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = Reader::from_reader(body);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root = NodeMap::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SceneError::xml(reader.error_position() as u64, e.to_string()))?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(start) => stack.push(open(&start, position)?),
            Event::Empty(start) => {
                let (name, node) = open(&start, position)?.finish(mode);
                attach(parent_map(&mut stack, &mut root), name, node);
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(SceneError::xml(position, "closing tag without an open element"));
                };
                let (name, node) = element.finish(mode);
                attach(parent_map(&mut stack, &mut root), name, node);
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| SceneError::xml(position, e.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    let text = std::str::from_utf8(&data)
                        .map_err(|e| SceneError::xml(position, format!("CDATA: {e}")))?;
                    top.text.push_str(text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no scene data.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SceneError::xml(
            reader.buffer_position() as u64,
            format!("unexpected end of document inside <{}>", open.name),
        ));
    }
    if root.is_empty() {
        return Err(SceneError::xml(
            reader.buffer_position() as u64,
            "document has no root element",
        ));
    }

    Ok(Node::Map(root))
}

fn open(start: &BytesStart<'_>, position: u64) -> SceneResult<OpenElement> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| SceneError::xml(position, format!("element name: {e}")))?
        .to_owned();

    let mut map = NodeMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SceneError::xml(position, e.to_string()))?;
        let key = match attr.key.as_ref() {
            b"id" => ID_KEY,
            b"type" => TYPE_KEY,
            other => {
                tracing::debug!(
                    element = %name,
                    attribute = %String::from_utf8_lossy(other),
                    "dropping unsupported XML attribute"
                );
                continue;
            }
        };
        let value: Cow<'_, str> = attr
            .unescape_value()
            .map_err(|e| SceneError::xml(position, e.to_string()))?;
        map.insert(key.to_owned(), Node::String(value.trim().to_owned()));
    }

    Ok(OpenElement {
        name,
        map,
        has_children: false,
        text: String::new(),
    })
}

fn parent_map<'a>(stack: &'a mut [OpenElement], root: &'a mut NodeMap) -> &'a mut NodeMap {
    match stack.last_mut() {
        Some(parent) => {
            parent.has_children = true;
            &mut parent.map
        }
        None => root,
    }
}

/// First occurrence stores the bare value; the second promotes to a list.
fn attach(parent: &mut NodeMap, name: String, node: Node) {
    match parent.get_mut(&name) {
        Some(Node::List(items)) => items.push(node),
        Some(existing) => {
            let first = std::mem::replace(existing, Node::Null);
            *existing = Node::List(vec![first, node]);
        }
        None => {
            parent.insert(name, node);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/xml.rs"]
mod tests;
