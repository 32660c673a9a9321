//! Lenient per-kind coercions over [`Node`]s.
//!
//! Every function returns `None` when no accepted representation matches; the caller decides
//! whether that means "apply the default" or "fail". All functions look through a map carrying
//! `"_data"` to its text (see [`Node::leaf`]).

use crate::foundation::math::{Scalar, Vec3, vec3_prefix};
use crate::tree::node::Node;

/// Inline coordinates or a 1-based back-reference into vertex storage, as written on the wire.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexRef {
    /// Coordinates given directly.
    Inline(Vec3),
    /// 1-based vertex index, not yet range-checked.
    Index(i64),
}

/// Scalar: native number, then numeric string (whitespace-trimmed).
///
/// Non-finite values are rejected unless `allow_non_finite` is set.
pub fn scalar(node: &Node, allow_non_finite: bool) -> Option<Scalar> {
    let v = match node.leaf() {
        Node::Number(v) => *v,
        Node::String(s) => parse_scalar(s)?,
        _ => return None,
    };
    (allow_non_finite || v.is_finite()).then_some(v)
}

/// Integer: native integral number, then integer string (whitespace-trimmed).
pub fn integer(node: &Node) -> Option<i64> {
    match node.leaf() {
        Node::Number(v) => integral(*v),
        Node::String(s) => parse_integer(s),
        _ => None,
    }
}

/// String: native string, then stringified number.
pub fn string(node: &Node) -> Option<String> {
    match node.leaf() {
        Node::String(s) => Some(s.clone()),
        Node::Number(v) => Some(match integral(*v) {
            Some(i) => i.to_string(),
            None => v.to_string(),
        }),
        _ => None,
    }
}

/// 3-vector: `"x y z"` string, then array of at least three scalars, then `{x, y, z}` map.
///
/// Only whitespace separates string components; extra components are ignored.
pub fn vec3(node: &Node, allow_non_finite: bool) -> Option<Vec3> {
    match node.leaf() {
        Node::String(s) => {
            let parts: Vec<Scalar> = s
                .split_whitespace()
                .take(3)
                .map(parse_scalar)
                .collect::<Option<_>>()?;
            vec3_prefix(&parts).filter(|v| allow_non_finite || v.is_finite())
        }
        Node::List(items) if items.len() >= 3 => {
            let parts: Vec<Scalar> = items[..3]
                .iter()
                .map(|n| scalar(n, allow_non_finite))
                .collect::<Option<_>>()?;
            vec3_prefix(&parts)
        }
        Node::Map(m) => {
            let x = scalar(m.get("x")?, allow_non_finite)?;
            let y = scalar(m.get("y")?, allow_non_finite)?;
            let z = scalar(m.get("z")?, allow_non_finite)?;
            Some(Vec3::new(x, y, z))
        }
        _ => None,
    }
}

/// List of scalars: whitespace-separated string, then array whose elements are coerced
/// individually. Nested arrays (rows) are flattened one level.
pub fn scalar_list(node: &Node, allow_non_finite: bool) -> Option<Vec<Scalar>> {
    flat_list(node, &|n: &Node| scalar(n, allow_non_finite), &|s: &str| {
        parse_scalar(s).filter(|v| allow_non_finite || v.is_finite())
    })
}

/// List of integers, same shapes as [`scalar_list`].
pub fn integer_list(node: &Node) -> Option<Vec<i64>> {
    flat_list(node, &integer, &parse_integer)
}

/// Index-or-vector slot: an integral number or integer string is a vertex back-reference,
/// anything else is tried as a 3-vector.
pub fn vertex_ref(node: &Node, allow_non_finite: bool) -> Option<VertexRef> {
    if let Some(i) = integer(node).or_else(|| oversized_index(node)) {
        return Some(VertexRef::Index(i));
    }
    vec3(node, allow_non_finite).map(VertexRef::Inline)
}

/// Integral values beyond `i64`, saturated so range checks still reject them as indices.
fn oversized_index(node: &Node) -> Option<i64> {
    let negative = match node.leaf() {
        Node::Number(v) if v.is_finite() && v.fract() == 0.0 => *v < 0.0,
        Node::String(s) => {
            let s = s.trim();
            let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.starts_with('-')
        }
        _ => return None,
    };
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn flat_list<T>(
    node: &Node,
    item: &dyn Fn(&Node) -> Option<T>,
    token: &dyn Fn(&str) -> Option<T>,
) -> Option<Vec<T>> {
    match node.leaf() {
        Node::String(s) => s.split_whitespace().map(token).collect(),
        Node::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for n in items {
                match n {
                    Node::List(row) => {
                        for cell in row {
                            out.push(item(cell)?);
                        }
                    }
                    other => out.push(item(other)?),
                }
            }
            Some(out)
        }
        _ => None,
    }
}

fn parse_scalar(s: &str) -> Option<Scalar> {
    s.trim().parse::<Scalar>().ok()
}

fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(integral))
}

fn integral(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15).then_some(v as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/coerce.rs"]
mod tests;
