use std::fmt;

use crate::foundation::path::FieldPath;

/// Why a notice was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Optional field absent; its default was applied.
    Defaulted,
    /// Optional field present but unrecognizable; its default was applied.
    Malformed,
    /// Data that was dropped (unknown object tag, surplus entries, unsupported shape).
    Ignored,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Defaulted => "defaulted",
            Self::Malformed => "malformed",
            Self::Ignored => "ignored",
        })
    }
}

/// One non-fatal coercion notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    /// Field the notice refers to.
    pub path: FieldPath,
    /// Notice category.
    pub kind: IssueKind,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.path, self.kind, self.message)
    }
}

/// Append-only, insertion-ordered collector of non-fatal notices.
///
/// One collector per decode call; it is not meant to be shared between concurrent decodes.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
}

impl Diagnostics {
    /// Empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice.
    pub fn record(&mut self, path: &FieldPath, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.clone(),
            kind,
            message: message.into(),
        });
    }

    /// Notices in recording order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Notices of one kind, in recording order.
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Number of notices.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/diagnostics.rs"]
mod tests;
