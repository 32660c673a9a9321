use serde::Serialize;

use crate::decode::FromNode;
use crate::decode::context::DecodeContext;
use crate::decode::defaults::{camera, lights, material};
use crate::foundation::error::SceneResult;
use crate::foundation::math::{Scalar, Vec3};
use crate::foundation::path::FieldPath;
use crate::scene::objects::SceneObject;
use crate::scene::vertex::VertexData;
use crate::tree::node::{ID_KEY, Node, TYPE_KEY};

/// Fully assembled scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    /// Bounce limit for reflected and refracted rays.
    pub max_recursion_depth: u32,
    /// Color of rays that hit nothing.
    pub background_color: Vec3,
    /// Offset applied to shadow ray origins.
    pub shadow_ray_epsilon: Scalar,
    /// Tolerance for intersection tests.
    pub intersection_test_epsilon: Scalar,
    /// Cameras in document order.
    pub cameras: Vec<Camera>,
    /// Ambient term and point lights.
    pub lights: Lights,
    /// Materials in document order.
    pub materials: Vec<Material>,
    /// Shared vertex storage referenced by objects.
    pub vertex_data: VertexData,
    /// Primitives, grouped by tag in order of first appearance.
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Material whose id is `id`.
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id.as_deref() == Some(id))
    }

    /// Number of objects per wire tag, in registry order, skipping absent kinds.
    pub fn object_counts(&self) -> Vec<(&'static str, usize)> {
        crate::scene::registry::object_tags()
            .map(|tag| {
                let n = self.objects.iter().filter(|o| o.tag() == tag).count();
                (tag, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

/// Pinhole camera.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Camera {
    /// Wire `id` attribute.
    pub id: Option<String>,
    /// Eye position.
    pub position: Vec3,
    /// Viewing direction.
    pub gaze: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// `[left, right, bottom, top]`.
    pub near_plane: [Scalar; 4],
    /// Distance from the eye to the image plane.
    pub near_distance: Scalar,
    /// `(width, height)`.
    pub image_resolution: (u32, u32),
    /// Samples per pixel.
    pub num_samples: u32,
    /// Output file name.
    pub image_name: String,
}

impl FromNode for Camera {
    fn from_node(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> SceneResult<Self> {
        Ok(Self {
            id: ctx.attr(node, path, ID_KEY),
            position: ctx.opt_vec3(node, path, &camera::POSITION),
            gaze: ctx.opt_vec3(node, path, &camera::GAZE),
            up: ctx.opt_vec3(node, path, &camera::UP),
            near_plane: ctx.opt_scalars(node, path, &camera::NEAR_PLANE),
            near_distance: ctx.opt_scalar(node, path, &camera::NEAR_DISTANCE),
            image_resolution: ctx.opt_u32_pair(node, path, &camera::IMAGE_RESOLUTION),
            num_samples: ctx.opt_u32(node, path, &camera::NUM_SAMPLES),
            image_name: ctx.opt_string(node, path, &camera::IMAGE_NAME),
        })
    }
}

/// Surface description referenced by objects through `Material`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Material {
    /// Wire `id` attribute, referenced by objects.
    pub id: Option<String>,
    /// Wire `type` attribute (e.g. `mirror`, `dielectric`), kept verbatim.
    pub kind: Option<String>,
    /// Ambient reflectance.
    pub ambient: Vec3,
    /// Diffuse reflectance.
    pub diffuse: Vec3,
    /// Specular reflectance.
    pub specular: Vec3,
    /// Specular highlight exponent.
    pub phong_exponent: Scalar,
    /// Mirror reflectance.
    pub mirror: Vec3,
    /// Index of refraction for dielectrics.
    pub refraction_index: Scalar,
    /// Per-channel absorption coefficient.
    pub absorption: Vec3,
}

impl FromNode for Material {
    fn from_node(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> SceneResult<Self> {
        let absorption = if node.get(material::ABSORPTION.key).is_none()
            && node.get(material::ABSORPTION_INDEX.key).is_some()
        {
            &material::ABSORPTION_INDEX
        } else {
            &material::ABSORPTION
        };

        Ok(Self {
            id: ctx.attr(node, path, ID_KEY),
            kind: ctx.attr(node, path, TYPE_KEY),
            ambient: ctx.opt_vec3(node, path, &material::AMBIENT),
            diffuse: ctx.opt_vec3(node, path, &material::DIFFUSE),
            specular: ctx.opt_vec3(node, path, &material::SPECULAR),
            phong_exponent: ctx.opt_scalar(node, path, &material::PHONG_EXPONENT),
            mirror: ctx.opt_vec3(node, path, &material::MIRROR),
            refraction_index: ctx.opt_scalar(node, path, &material::REFRACTION_INDEX),
            absorption: ctx.opt_vec3(node, path, absorption),
        })
    }
}

/// Isotropic point light.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointLight {
    /// Wire `id` attribute.
    pub id: Option<String>,
    /// Light position.
    pub position: Vec3,
    /// Radiant intensity per channel.
    pub intensity: Vec3,
}

impl FromNode for PointLight {
    fn from_node(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> SceneResult<Self> {
        Ok(Self {
            id: ctx.attr(node, path, ID_KEY),
            position: ctx.opt_vec3(node, path, &lights::POSITION),
            intensity: ctx.opt_vec3(node, path, &lights::INTENSITY),
        })
    }
}

/// The `Lights` section: one ambient term plus point lights.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Lights {
    /// `AmbientLight`.
    pub ambient: Vec3,
    /// Point lights in document order.
    pub point_lights: Vec<PointLight>,
}

impl FromNode for Lights {
    fn from_node(node: &Node, path: &FieldPath, ctx: &mut DecodeContext<'_>) -> SceneResult<Self> {
        let ambient = ctx.opt_vec3(node, path, &lights::AMBIENT_LIGHT);
        let point_lights = ctx
            .elements(Some(node), path, "PointLight")
            .into_iter()
            .map(|(at, n)| PointLight::from_node(n, &at, ctx))
            .collect::<SceneResult<Vec<_>>>()?;
        Ok(Self {
            ambient,
            point_lights,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
