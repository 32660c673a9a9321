//! Wire tag → primitive constructor table.

use crate::decode::context::DecodeContext;
use crate::foundation::error::SceneResult;
use crate::foundation::path::FieldPath;
use crate::scene::objects::{Mesh, Plane, SceneObject, Sphere, Triangle};
use crate::scene::vertex::VertexData;
use crate::tree::node::Node;

/// Builds one primitive from its node; vertex references resolve against the finished store.
pub(crate) type ObjectCtor =
    fn(&Node, &FieldPath, &mut DecodeContext<'_>, &VertexData) -> SceneResult<SceneObject>;

static REGISTRY: &[(&str, ObjectCtor)] = &[
    ("Plane", plane),
    ("Sphere", sphere),
    ("Triangle", triangle),
    ("Mesh", mesh),
];

/// Constructor for a case-sensitive wire tag.
pub(crate) fn lookup(tag: &str) -> Option<ObjectCtor> {
    REGISTRY
        .iter()
        .find_map(|(name, ctor)| (*name == tag).then_some(*ctor))
}

/// Every tag the registry knows, in registry order.
pub fn object_tags() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

fn plane(
    node: &Node,
    path: &FieldPath,
    ctx: &mut DecodeContext<'_>,
    vertices: &VertexData,
) -> SceneResult<SceneObject> {
    Plane::decode(node, path, ctx, vertices).map(SceneObject::Plane)
}

fn sphere(
    node: &Node,
    path: &FieldPath,
    ctx: &mut DecodeContext<'_>,
    vertices: &VertexData,
) -> SceneResult<SceneObject> {
    Sphere::decode(node, path, ctx, vertices).map(SceneObject::Sphere)
}

fn triangle(
    node: &Node,
    path: &FieldPath,
    ctx: &mut DecodeContext<'_>,
    vertices: &VertexData,
) -> SceneResult<SceneObject> {
    Triangle::decode(node, path, ctx, vertices).map(SceneObject::Triangle)
}

fn mesh(
    node: &Node,
    path: &FieldPath,
    ctx: &mut DecodeContext<'_>,
    vertices: &VertexData,
) -> SceneResult<SceneObject> {
    Mesh::decode(node, path, ctx, vertices).map(SceneObject::Mesh)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
