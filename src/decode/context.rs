//! Per-document decoding state shared by every entity constructor.

use std::fmt::Debug;

use crate::decode::coerce::{integer, integer_list, scalar, scalar_list, string, vec3};
use crate::decode::defaults::Field;
use crate::decode::diagnostics::{Diagnostics, IssueKind};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::{Scalar, Vec3};
use crate::foundation::path::FieldPath;
use crate::tree::node::Node;

/// Options and the optional notice sink for one decode call.
pub struct DecodeContext<'a> {
    allow_non_finite: bool,
    diagnostics: Option<&'a mut Diagnostics>,
}

impl<'a> DecodeContext<'a> {
    /// Context reporting to `diagnostics`, if any.
    pub fn new(allow_non_finite: bool, diagnostics: Option<&'a mut Diagnostics>) -> Self {
        Self {
            allow_non_finite,
            diagnostics,
        }
    }

    /// Whether `nan`/`inf` are accepted.
    pub fn allow_non_finite(&self) -> bool {
        self.allow_non_finite
    }

    /// Log a non-fatal notice and record it when a collector is attached.
    pub fn notice(&mut self, path: &FieldPath, kind: IssueKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(path = %path, kind = %kind, "{message}");
        if let Some(diagnostics) = self.diagnostics.as_deref_mut() {
            diagnostics.record(path, kind, message);
        }
    }

    /// Optional field: the coerced value, or the field's default plus a notice.
    fn optional<T, D>(
        &mut self,
        node: &Node,
        path: &FieldPath,
        field: &Field<D>,
        expected: &str,
        coerce: impl FnOnce(&Node) -> Option<T>,
    ) -> T
    where
        D: Clone + Debug + Into<T>,
    {
        let at = path.field(field.key);
        match node.get(field.key) {
            None | Some(Node::Null) => {
                self.notice(
                    &at,
                    IssueKind::Defaulted,
                    format!("absent, using default {:?}", field.default),
                );
                field.default.clone().into()
            }
            Some(value) => match coerce(value) {
                Some(v) => v,
                None => {
                    self.notice(
                        &at,
                        IssueKind::Malformed,
                        format!(
                            "expected {expected}, found {}; using default {:?}",
                            value.leaf().kind_name(),
                            field.default
                        ),
                    );
                    field.default.clone().into()
                }
            },
        }
    }

    /// Optional number.
    pub fn opt_scalar(&mut self, node: &Node, path: &FieldPath, field: &Field<Scalar>) -> Scalar {
        let allow = self.allow_non_finite;
        self.optional(node, path, field, "a number", |n| scalar(n, allow))
    }

    /// Optional non-negative integer.
    pub fn opt_u32(&mut self, node: &Node, path: &FieldPath, field: &Field<u32>) -> u32 {
        self.optional(node, path, field, "a non-negative integer", |n| {
            integer(n).and_then(|i| u32::try_from(i).ok())
        })
    }

    /// Optional 3-vector.
    pub fn opt_vec3(&mut self, node: &Node, path: &FieldPath, field: &Field<Vec3>) -> Vec3 {
        let allow = self.allow_non_finite;
        self.optional(node, path, field, "a 3-vector", |n| vec3(n, allow))
    }

    /// Optional string.
    pub fn opt_string(
        &mut self,
        node: &Node,
        path: &FieldPath,
        field: &Field<&'static str>,
    ) -> String {
        self.optional(node, path, field, "a string", string)
    }

    /// At least `N` numbers; surplus values are ignored.
    pub fn opt_scalars<const N: usize>(
        &mut self,
        node: &Node,
        path: &FieldPath,
        field: &Field<[Scalar; N]>,
    ) -> [Scalar; N] {
        let allow = self.allow_non_finite;
        let expected = format!("at least {N} numbers");
        self.optional(node, path, field, &expected, |n| {
            let values = scalar_list(n, allow)?;
            <[Scalar; N]>::try_from(values.get(..N)?).ok()
        })
    }

    /// At least two non-negative integers; surplus values are ignored.
    pub fn opt_u32_pair(
        &mut self,
        node: &Node,
        path: &FieldPath,
        field: &Field<(u32, u32)>,
    ) -> (u32, u32) {
        self.optional(node, path, field, "two non-negative integers", |n| {
            match integer_list(n)?.as_slice() {
                [a, b, ..] => Some((u32::try_from(*a).ok()?, u32::try_from(*b).ok()?)),
                _ => None,
            }
        })
    }

    /// Optional identifier-like attribute (`_id`, `_type`, `Material`) with no default.
    ///
    /// Absence is silent; an unusable value is reported and treated as absent.
    pub fn attr(&mut self, node: &Node, path: &FieldPath, key: &str) -> Option<String> {
        let value = match node.get(key) {
            None | Some(Node::Null) => return None,
            Some(v) => v,
        };
        let out = string(value);
        if out.is_none() {
            self.notice(
                &path.field(key),
                IssueKind::Malformed,
                format!("expected a string, found {}", value.leaf().kind_name()),
            );
        }
        out
    }

    /// Members of a repeatable collection `parent.key`, each with its own path.
    ///
    /// A list of maps yields its elements, a single map yields one element, an absent section
    /// yields nothing. Any other shape is dropped with a notice.
    pub fn elements<'n>(
        &mut self,
        parent: Option<&'n Node>,
        path: &FieldPath,
        key: &str,
    ) -> Vec<(FieldPath, &'n Node)> {
        let at = path.field(key);
        let Some(value) = parent.and_then(|p| p.get(key)) else {
            return Vec::new();
        };
        match value {
            Node::Null => Vec::new(),
            Node::List(items) if items.iter().all(|n| matches!(n, Node::Map(_))) => items
                .iter()
                .enumerate()
                .map(|(i, n)| (at.index(i), n))
                .collect(),
            Node::Map(_) => vec![(at, value)],
            other => {
                self.notice(
                    &at,
                    IssueKind::Ignored,
                    format!(
                        "expected an element or a list of elements, found {}",
                        other.kind_name()
                    ),
                );
                Vec::new()
            }
        }
    }
}

/// Required field `node.key`; absence is an [`SceneError::ExpectedValue`].
pub fn required<'n>(node: &'n Node, path: &FieldPath, key: &str) -> SceneResult<&'n Node> {
    match node.get(key) {
        None | Some(Node::Null) => Err(SceneError::expected_value(
            &path.field(key),
            "missing required field",
        )),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/context.rs"]
mod tests;
