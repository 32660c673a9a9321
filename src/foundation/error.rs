use crate::foundation::path::FieldPath;

/// Crate-wide result alias.
pub type SceneResult<T> = Result<T, SceneError>;

/// Failures surfaced by `decode`/`load`.
///
/// Optional fields never produce an error; every variant here is terminal for the
/// document being decoded.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// A required scalar or string field had no recognizable representation.
    #[error("expected value at {path}: {message}")]
    ExpectedValue {
        /// Location of the offending field.
        path: FieldPath,
        /// Human-readable detail.
        message: String,
    },

    /// A required vector field had no recognizable representation.
    #[error("expected vector at {path}: {message}")]
    ExpectedVector {
        /// Location of the offending field.
        path: FieldPath,
        /// Human-readable detail.
        message: String,
    },

    /// Vertex storage is malformed, or a primitive references a vertex that does not exist.
    #[error("invalid vertex data at {path}: {message}")]
    InvalidVertexData {
        /// Location of the offending field.
        path: FieldPath,
        /// Human-readable detail.
        message: String,
    },

    /// The byte-acquisition collaborator could not produce the document.
    #[error("unreadable source '{source_name}': {source}")]
    UnreadableSource {
        /// Display name of the source (usually a path).
        source_name: String,
        /// Underlying failure reported by the collaborator.
        source: anyhow::Error,
    },

    /// The document is not structurally well-formed.
    #[error("decoding failed: {0}")]
    DecodingFailed(#[from] StructuralError),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Lower-level structural parse failure wrapped by [`SceneError::DecodingFailed`].
#[derive(thiserror::Error, Debug)]
pub enum StructuralError {
    /// Malformed JSON.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed XML (mismatched tags, invalid bytes, truncated document).
    #[error("xml at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        /// Reader message.
        message: String,
    },

    /// The tree is well-formed but has the wrong shape (e.g. the scene body is not a map).
    #[error("{path}: {message}")]
    Shape {
        /// Location of the offending node.
        path: FieldPath,
        /// Human-readable detail.
        message: String,
    },
}

impl SceneError {
    /// Build an [`SceneError::ExpectedValue`].
    pub fn expected_value(path: &FieldPath, msg: impl Into<String>) -> Self {
        Self::ExpectedValue {
            path: path.clone(),
            message: msg.into(),
        }
    }

    /// Build an [`SceneError::ExpectedVector`].
    pub fn expected_vector(path: &FieldPath, msg: impl Into<String>) -> Self {
        Self::ExpectedVector {
            path: path.clone(),
            message: msg.into(),
        }
    }

    /// Build an [`SceneError::InvalidVertexData`].
    pub fn invalid_vertex_data(path: &FieldPath, msg: impl Into<String>) -> Self {
        Self::InvalidVertexData {
            path: path.clone(),
            message: msg.into(),
        }
    }

    /// Build an [`SceneError::UnreadableSource`].
    pub fn unreadable(source_name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::UnreadableSource {
            source_name: source_name.into(),
            source,
        }
    }

    /// Build a [`StructuralError::Shape`] wrapped in [`SceneError::DecodingFailed`].
    pub fn shape(path: &FieldPath, msg: impl Into<String>) -> Self {
        Self::DecodingFailed(StructuralError::Shape {
            path: path.clone(),
            message: msg.into(),
        })
    }

    /// Build a [`StructuralError::Xml`] wrapped in [`SceneError::DecodingFailed`].
    pub fn xml(position: u64, msg: impl Into<String>) -> Self {
        Self::DecodingFailed(StructuralError::Xml {
            position,
            message: msg.into(),
        })
    }

    /// Field path carried by the error, if any.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::ExpectedValue { path, .. }
            | Self::ExpectedVector { path, .. }
            | Self::InvalidVertexData { path, .. }
            | Self::DecodingFailed(StructuralError::Shape { path, .. }) => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
