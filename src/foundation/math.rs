/// Floating-point type used for every decoded scalar.
pub type Scalar = f64;

/// Three-component vector used for positions, directions and colors.
pub use glam::DVec3 as Vec3;

/// Build a vector from the first three entries of `values`.
pub(crate) fn vec3_prefix(values: &[Scalar]) -> Option<Vec3> {
    match values {
        [x, y, z, ..] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Unit normal of the triangle spanned by the two edges, or zero for a degenerate triangle.
pub(crate) fn face_normal(e1: Vec3, e2: Vec3) -> Vec3 {
    e1.cross(e2).normalize_or_zero()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
