//! Shared vertex storage, addressed 1-based from wire data.

use serde::Serialize;

use crate::decode::coerce::{scalar_list, vec3};
use crate::decode::context::DecodeContext;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::Vec3;
use crate::foundation::path::FieldPath;
use crate::tree::node::{Node, TYPE_KEY};

/// Ordered vertex positions. Built once per document, before any object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VertexData {
    /// Wire `type` attribute (e.g. `xyz`), kept verbatim.
    pub kind: Option<String>,
    vertices: Vec<Vec3>,
}

impl VertexData {
    /// Store over `vertices`.
    pub fn new(kind: Option<String>, vertices: Vec<Vec3>) -> Self {
        Self { kind, vertices }
    }

    /// All vertices, 0-based.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the store holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Look up a 1-based wire index, returning the 0-based position and the vertex.
    ///
    /// Indices outside `1..=len` are an [`SceneError::InvalidVertexData`] at `path`.
    pub fn resolve(&self, index: i64, path: &FieldPath) -> SceneResult<(usize, Vec3)> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .filter(|i| *i < self.vertices.len());
        match slot {
            Some(i) => Ok((i, self.vertices[i])),
            None => Err(SceneError::invalid_vertex_data(
                path,
                format!(
                    "vertex index {index} out of range 1..={}",
                    self.vertices.len()
                ),
            )),
        }
    }

    /// Decode the `VertexData` section; an absent section is an empty store.
    ///
    /// Accepts whitespace-separated numbers (`"0 0 0\n1 0 0"`), a flat array, an array of rows,
    /// or any of these under `"_data"` next to a `"_type"` attribute.
    pub(crate) fn from_section(
        section: Option<&Node>,
        path: &FieldPath,
        ctx: &mut DecodeContext<'_>,
    ) -> SceneResult<Self> {
        let Some(section) = section else {
            return Ok(Self::default());
        };
        let kind = ctx.attr(section, path, TYPE_KEY);
        let vertices = match section.leaf() {
            Node::Null | Node::Map(_) => Vec::new(),
            data => rows(data, path, ctx.allow_non_finite())?,
        };
        tracing::debug!(count = vertices.len(), "vertex data decoded");
        Ok(Self { kind, vertices })
    }
}

fn rows(data: &Node, path: &FieldPath, allow_non_finite: bool) -> SceneResult<Vec<Vec3>> {
    if let Node::List(items) = data
        && items.iter().any(is_row)
    {
        return items
            .iter()
            .enumerate()
            .map(|(i, row)| {
                vec3(row, allow_non_finite).ok_or_else(|| {
                    SceneError::invalid_vertex_data(&path.index(i), "expected a row of 3 numbers")
                })
            })
            .collect();
    }

    let flat = scalar_list(data, allow_non_finite).ok_or_else(|| {
        SceneError::invalid_vertex_data(
            path,
            format!("expected vertex coordinates, found {}", data.kind_name()),
        )
    })?;
    if flat.len() % 3 != 0 {
        return Err(SceneError::invalid_vertex_data(
            path,
            format!("{} coordinates do not form rows of 3", flat.len()),
        ));
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

fn is_row(node: &Node) -> bool {
    match node {
        Node::List(_) | Node::Map(_) => true,
        Node::String(s) => s.split_whitespace().nth(1).is_some(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/vertex.rs"]
mod tests;
