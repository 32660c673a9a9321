//! Scene assembly: globals, then cameras/lights/materials, then vertex data, then objects.

use crate::decode::FromNode;
use crate::decode::context::DecodeContext;
use crate::decode::defaults::scene;
use crate::decode::diagnostics::IssueKind;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::path::FieldPath;
use crate::scene::model::{Lights, Scene};
use crate::scene::objects::SceneObject;
use crate::scene::registry;
use crate::scene::vertex::VertexData;
use crate::tree::node::Node;

impl FromNode for Scene {
    fn from_node(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> SceneResult<Self> {
        if node.as_map().is_none() {
            return Err(SceneError::shape(
                path,
                format!("expected a scene map, found {}", node.kind_name()),
            ));
        }

        let max_recursion_depth = ctx.opt_u32(node, path, &scene::MAX_RECURSION_DEPTH);
        let background_color = ctx.opt_vec3(node, path, &scene::BACKGROUND_COLOR);
        let shadow_ray_epsilon = ctx.opt_scalar(node, path, &scene::SHADOW_RAY_EPSILON);
        let intersection_test_epsilon =
            ctx.opt_scalar(node, path, &scene::INTERSECTION_TEST_EPSILON);

        let cameras = collection(ctx, node.get("Cameras"), &path.field("Cameras"), "Camera")?;
        let empty = Node::Null;
        let lights = Lights::from_node(
            node.get("Lights").unwrap_or(&empty),
            &path.field("Lights"),
            ctx,
        )?;
        let materials = collection(
            ctx,
            node.get("Materials"),
            &path.field("Materials"),
            "Material",
        )?;

        let vertex_data =
            VertexData::from_section(node.get("VertexData"), &path.field("VertexData"), ctx)?;
        let objects = objects(
            node.get("Objects"),
            &path.field("Objects"),
            ctx,
            &vertex_data,
        )?;

        tracing::debug!(
            cameras = cameras.len(),
            point_lights = lights.point_lights.len(),
            materials = materials.len(),
            vertices = vertex_data.len(),
            objects = objects.len(),
            "scene assembled"
        );

        Ok(Self {
            max_recursion_depth,
            background_color,
            shadow_ray_epsilon,
            intersection_test_epsilon,
            cameras,
            lights,
            materials,
            vertex_data,
            objects,
        })
    }
}

fn collection<T: FromNode>(
    ctx: &mut DecodeContext<'_>,
    section: Option<&Node>,
    path: &FieldPath,
    key: &str,
) -> SceneResult<Vec<T>> {
    ctx.elements(section, path, key)
        .into_iter()
        .map(|(at, n)| T::from_node(n, &at, ctx))
        .collect()
}

/// Objects in tag order of first appearance, then document order within a tag.
fn objects(
    section: Option<&Node>,
    path: &FieldPath,
    ctx: &mut DecodeContext<'_>,
    vertices: &VertexData,
) -> SceneResult<Vec<SceneObject>> {
    let Some(section) = section else {
        return Ok(Vec::new());
    };
    let Some(map) = section.as_map() else {
        if !matches!(section, Node::Null) {
            ctx.notice(
                path,
                IssueKind::Ignored,
                format!("expected a map of object tags, found {}", section.kind_name()),
            );
        }
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for tag in map.keys() {
        let Some(ctor) = registry::lookup(tag) else {
            ctx.notice(&path.field(tag), IssueKind::Ignored, "unknown object tag");
            continue;
        };
        for (at, node) in ctx.elements(Some(section), path, tag) {
            out.push(ctor(node, &at, ctx, vertices)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/assembler.rs"]
mod tests;
