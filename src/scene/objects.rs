//! Geometric primitives. A closed set: every consumer matches [`SceneObject`] exhaustively.

use std::sync::OnceLock;

use serde::Serialize;

use crate::decode::coerce::{VertexRef, integer_list, vertex_ref};
use crate::decode::context::{DecodeContext, required};
use crate::decode::defaults::objects;
use crate::decode::diagnostics::IssueKind;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::{Scalar, Vec3, face_normal};
use crate::foundation::path::FieldPath;
use crate::scene::vertex::VertexData;
use crate::tree::node::{ID_KEY, Node};

/// Fields every primitive carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ObjectCommon {
    /// Wire `id` attribute.
    pub id: Option<String>,
    /// Id of a [`Material`](crate::Material); not checked against the material list.
    pub material: Option<String>,
}

impl ObjectCommon {
    fn decode(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> Self {
        Self {
            id: ctx.attr(node, path, ID_KEY),
            material: ctx.attr(node, path, "Material"),
        }
    }
}

/// Any primitive the registry can build.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum SceneObject {
    /// Infinite plane.
    Plane(Plane),
    /// Sphere.
    Sphere(Sphere),
    /// Single triangle.
    Triangle(Triangle),
    /// Triangle mesh.
    Mesh(Mesh),
}

impl SceneObject {
    /// Shared id and material reference.
    pub fn common(&self) -> &ObjectCommon {
        match self {
            Self::Plane(p) => &p.common,
            Self::Sphere(s) => &s.common,
            Self::Triangle(t) => &t.common,
            Self::Mesh(m) => &m.common,
        }
    }

    /// Wire tag of this primitive.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Plane(_) => "Plane",
            Self::Sphere(_) => "Sphere",
            Self::Triangle(_) => "Triangle",
            Self::Mesh(_) => "Mesh",
        }
    }
}

/// Sphere given by center and radius.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sphere {
    /// Id and material.
    #[serde(flatten)]
    pub common: ObjectCommon,
    /// `Center` as written: a vertex index or inline coordinates.
    pub center_ref: VertexRef,
    /// Resolved center.
    pub center: Vec3,
    /// Radius.
    pub radius: Scalar,
}

impl Sphere {
    pub(crate) fn decode(
        node: &Node,
        path: &FieldPath,
        ctx: &mut DecodeContext<'_>,
        vertices: &VertexData,
    ) -> SceneResult<Self> {
        let common = ObjectCommon::decode(node, path, ctx);
        let (center_ref, center) = vertex_slot(node, path, "Center", ctx, vertices)?;
        let radius = ctx.opt_scalar(node, path, &objects::SPHERE_RADIUS);
        Ok(Self {
            common,
            center_ref,
            center,
            radius,
        })
    }
}

/// Plane given by a point and a normal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plane {
    /// Id and material.
    #[serde(flatten)]
    pub common: ObjectCommon,
    /// `Point` as written: a vertex index or inline coordinates.
    pub point_ref: VertexRef,
    /// Resolved point on the plane.
    pub point: Vec3,
    /// Normal as written; not normalized.
    pub normal: Vec3,
}

impl Plane {
    pub(crate) fn decode(
        node: &Node,
        path: &FieldPath,
        ctx: &mut DecodeContext<'_>,
        vertices: &VertexData,
    ) -> SceneResult<Self> {
        let common = ObjectCommon::decode(node, path, ctx);
        let (point_ref, point) = vertex_slot(node, path, "Point", ctx, vertices)?;
        let normal = ctx.opt_vec3(node, path, &objects::PLANE_NORMAL);
        Ok(Self {
            common,
            point_ref,
            point,
            normal,
        })
    }
}

/// Edge vectors and unit normal derived from a triangle's resolved vertices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TriangleGeometry {
    /// `v1 - v0`.
    pub e1: Vec3,
    /// `v2 - v0`.
    pub e2: Vec3,
    /// `normalize(e1 × e2)`; zero for a degenerate triangle.
    pub normal: Vec3,
}

impl TriangleGeometry {
    fn from_vertices([v0, v1, v2]: &[Vec3; 3]) -> Self {
        let e1 = *v1 - *v0;
        let e2 = *v2 - *v0;
        Self {
            e1,
            e2,
            normal: face_normal(e1, e2),
        }
    }
}

/// Triangle over three resolved vertices.
#[derive(Clone, Debug, Serialize)]
pub struct Triangle {
    /// Id and material.
    #[serde(flatten)]
    pub common: ObjectCommon,
    /// 0-based positions into [`VertexData`].
    pub indices: [usize; 3],
    /// Vertex positions, in index order.
    pub vertices: [Vec3; 3],
    #[serde(skip)]
    geometry: OnceLock<TriangleGeometry>,
}

impl Triangle {
    /// Unprepared triangle.
    pub fn new(common: ObjectCommon, indices: [usize; 3], vertices: [Vec3; 3]) -> Self {
        Self {
            common,
            indices,
            vertices,
            geometry: OnceLock::new(),
        }
    }

    /// Derived geometry, computed on first call and cached.
    pub fn prepare(&self) -> &TriangleGeometry {
        self.geometry
            .get_or_init(|| TriangleGeometry::from_vertices(&self.vertices))
    }

    /// Cached geometry, if [`prepare`](Self::prepare) has run.
    pub fn geometry(&self) -> Option<&TriangleGeometry> {
        self.geometry.get()
    }

    pub(crate) fn decode(
        node: &Node,
        path: &FieldPath,
        ctx: &mut DecodeContext<'_>,
        vertices: &VertexData,
    ) -> SceneResult<Self> {
        let common = ObjectCommon::decode(node, path, ctx);
        let value = required(node, path, "Indices")?;
        let at = path.field("Indices");
        let indices = integer_list(value)
            .filter(|ix| ix.len() >= 3)
            .ok_or_else(|| SceneError::expected_value(&at, "expected 3 vertex indices"))?;
        if indices.len() > 3 {
            ctx.notice(
                &at,
                IssueKind::Ignored,
                format!("{} surplus indices dropped", indices.len() - 3),
            );
        }
        resolve_face(common, [indices[0], indices[1], indices[2]], &at, vertices)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.common == other.common
            && self.indices == other.indices
            && self.vertices == other.vertices
    }
}

/// Indexed triangle list; each face inherits the mesh's id and material.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mesh {
    /// Id and material.
    #[serde(flatten)]
    pub common: ObjectCommon,
    /// One triangle per face, in face order.
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub(crate) fn decode(
        node: &Node,
        path: &FieldPath,
        ctx: &mut DecodeContext<'_>,
        vertices: &VertexData,
    ) -> SceneResult<Self> {
        let common = ObjectCommon::decode(node, path, ctx);
        let value = required(node, path, "Faces")?;
        let at = path.field("Faces");
        let faces = integer_list(value)
            .ok_or_else(|| SceneError::expected_value(&at, "expected a list of vertex indices"))?;
        if faces.len() % 3 != 0 {
            return Err(SceneError::expected_value(
                &at,
                format!("{} indices do not form triangles", faces.len()),
            ));
        }

        let triangles = faces
            .chunks_exact(3)
            .enumerate()
            .map(|(i, f)| resolve_face(common.clone(), [f[0], f[1], f[2]], &at.index(i), vertices))
            .collect::<SceneResult<Vec<_>>>()?;
        Ok(Self { common, triangles })
    }
}

fn resolve_face(
    common: ObjectCommon,
    face: [i64; 3],
    path: &FieldPath,
    vertices: &VertexData,
) -> SceneResult<Triangle> {
    let (i0, v0) = vertices.resolve(face[0], path)?;
    let (i1, v1) = vertices.resolve(face[1], path)?;
    let (i2, v2) = vertices.resolve(face[2], path)?;
    Ok(Triangle::new(common, [i0, i1, i2], [v0, v1, v2]))
}

/// Required index-or-vector slot (`Sphere.Center`, `Plane.Point`).
fn vertex_slot(
    node: &Node,
    path: &FieldPath,
    key: &str,
    ctx: &DecodeContext<'_>,
    vertices: &VertexData,
) -> SceneResult<(VertexRef, Vec3)> {
    let value = required(node, path, key)?;
    let at = path.field(key);
    match vertex_ref(value, ctx.allow_non_finite()) {
        Some(VertexRef::Index(i)) => Ok((VertexRef::Index(i), vertices.resolve(i, &at)?.1)),
        Some(VertexRef::Inline(v)) => Ok((VertexRef::Inline(v), v)),
        None => Err(SceneError::expected_vector(
            &at,
            format!(
                "expected a vertex index or 3-vector, found {}",
                value.leaf().kind_name()
            ),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/objects.rs"]
mod tests;
