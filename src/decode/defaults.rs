//! Field → default table for every optional wire field.
//!
//! Each optional field is one [`Field`] constant naming its owner, its wire key and the value
//! applied when the field is absent or unrecognizable. [`TABLE`] lists them all for auditing.

use std::fmt;

use crate::foundation::math::{Scalar, Vec3};

/// An optional wire field and its default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field<T: 'static> {
    /// Entity the field belongs to.
    pub owner: &'static str,
    /// Case-sensitive wire key.
    pub key: &'static str,
    /// Value used when the field is absent or malformed.
    pub default: T,
}

impl<T> Field<T> {
    const fn new(owner: &'static str, key: &'static str, default: T) -> Self {
        Self {
            owner,
            key,
            default,
        }
    }
}

/// Type-erased view of a [`Field`] used by [`TABLE`].
pub trait DescribeField: Sync {
    /// Entity the field belongs to.
    fn owner(&self) -> &'static str;
    /// Wire key.
    fn key(&self) -> &'static str;
    /// Default rendered for display.
    fn default_text(&self) -> String;
}

impl<T: fmt::Debug + Sync> DescribeField for Field<T> {
    fn owner(&self) -> &'static str {
        self.owner
    }

    fn key(&self) -> &'static str {
        self.key
    }

    fn default_text(&self) -> String {
        format!("{:?}", self.default)
    }
}

/// Scene-level globals.
pub mod scene {
    use super::*;

    /// `MaxRecursionDepth`.
    pub const MAX_RECURSION_DEPTH: Field<u32> = Field::new("Scene", "MaxRecursionDepth", 6);
    /// `BackgroundColor`.
    pub const BACKGROUND_COLOR: Field<Vec3> = Field::new("Scene", "BackgroundColor", Vec3::ZERO);
    /// `ShadowRayEpsilon`.
    pub const SHADOW_RAY_EPSILON: Field<Scalar> = Field::new("Scene", "ShadowRayEpsilon", 1e-3);
    /// `IntersectionTestEpsilon`.
    pub const INTERSECTION_TEST_EPSILON: Field<Scalar> =
        Field::new("Scene", "IntersectionTestEpsilon", 1e-6);
}

/// Camera fields.
pub mod camera {
    use super::*;

    /// `Position`.
    pub const POSITION: Field<Vec3> = Field::new("Camera", "Position", Vec3::ZERO);
    /// `Gaze`.
    pub const GAZE: Field<Vec3> = Field::new("Camera", "Gaze", Vec3::ZERO);
    /// `Up`.
    pub const UP: Field<Vec3> = Field::new("Camera", "Up", Vec3::ZERO);
    /// `NearPlane` as `l r b t`.
    pub const NEAR_PLANE: Field<[Scalar; 4]> =
        Field::new("Camera", "NearPlane", [-1.0, 1.0, -1.0, 1.0]);
    /// `NearDistance`.
    pub const NEAR_DISTANCE: Field<Scalar> = Field::new("Camera", "NearDistance", 1.0);
    /// `ImageResolution` as `w h`.
    pub const IMAGE_RESOLUTION: Field<(u32, u32)> =
        Field::new("Camera", "ImageResolution", (512, 512));
    /// `NumSamples`.
    pub const NUM_SAMPLES: Field<u32> = Field::new("Camera", "NumSamples", 1);
    /// `ImageName`.
    pub const IMAGE_NAME: Field<&'static str> = Field::new("Camera", "ImageName", "image.png");
}

/// Material fields.
pub mod material {
    use super::*;

    /// `AmbientReflectance`.
    pub const AMBIENT: Field<Vec3> = Field::new("Material", "AmbientReflectance", Vec3::ZERO);
    /// `DiffuseReflectance`.
    pub const DIFFUSE: Field<Vec3> = Field::new("Material", "DiffuseReflectance", Vec3::ZERO);
    /// `SpecularReflectance`.
    pub const SPECULAR: Field<Vec3> = Field::new("Material", "SpecularReflectance", Vec3::ZERO);
    /// `PhongExponent`.
    pub const PHONG_EXPONENT: Field<Scalar> = Field::new("Material", "PhongExponent", 1.0);
    /// `MirrorReflectance`.
    pub const MIRROR: Field<Vec3> = Field::new("Material", "MirrorReflectance", Vec3::ZERO);
    /// `RefractionIndex`.
    pub const REFRACTION_INDEX: Field<Scalar> = Field::new("Material", "RefractionIndex", 1.5);
    /// `AbsorptionCoefficient`; `AbsorptionIndex` is read when this key is absent.
    pub const ABSORPTION: Field<Vec3> =
        Field::new("Material", "AbsorptionCoefficient", Vec3::ZERO);
    /// Legacy spelling of [`ABSORPTION`].
    pub const ABSORPTION_INDEX: Field<Vec3> =
        Field::new("Material", "AbsorptionIndex", Vec3::ZERO);
}

/// Light fields.
pub mod lights {
    use super::*;

    /// `Lights.AmbientLight`.
    pub const AMBIENT_LIGHT: Field<Vec3> = Field::new("Lights", "AmbientLight", Vec3::ZERO);
    /// `PointLight.Position`.
    pub const POSITION: Field<Vec3> = Field::new("PointLight", "Position", Vec3::ZERO);
    /// `PointLight.Intensity`.
    pub const INTENSITY: Field<Vec3> = Field::new("PointLight", "Intensity", Vec3::ZERO);
}

/// Primitive fields.
pub mod objects {
    use super::*;

    /// `Sphere.Radius`.
    pub const SPHERE_RADIUS: Field<Scalar> = Field::new("Sphere", "Radius", 1.0);
    /// `Plane.Normal`.
    pub const PLANE_NORMAL: Field<Vec3> = Field::new("Plane", "Normal", Vec3::new(0.0, 0.0, 1.0));
}

/// Every optional field, grouped by owner.
pub static TABLE: &[&dyn DescribeField] = &[
    &scene::MAX_RECURSION_DEPTH,
    &scene::BACKGROUND_COLOR,
    &scene::SHADOW_RAY_EPSILON,
    &scene::INTERSECTION_TEST_EPSILON,
    &camera::POSITION,
    &camera::GAZE,
    &camera::UP,
    &camera::NEAR_PLANE,
    &camera::NEAR_DISTANCE,
    &camera::IMAGE_RESOLUTION,
    &camera::NUM_SAMPLES,
    &camera::IMAGE_NAME,
    &material::AMBIENT,
    &material::DIFFUSE,
    &material::SPECULAR,
    &material::PHONG_EXPONENT,
    &material::MIRROR,
    &material::REFRACTION_INDEX,
    &material::ABSORPTION,
    &material::ABSORPTION_INDEX,
    &lights::AMBIENT_LIGHT,
    &lights::POSITION,
    &lights::INTENSITY,
    &objects::SPHERE_RADIUS,
    &objects::PLANE_NORMAL,
];

/// Look up a field by owner and wire key.
pub fn lookup(owner: &str, key: &str) -> Option<&'static dyn DescribeField> {
    TABLE
        .iter()
        .copied()
        .find(|f| f.owner() == owner && f.key() == key)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/defaults.rs"]
mod tests;
