//! tracescene decodes ray-tracing scene descriptions into a typed scene graph.
//!
//! Two wire dialects are accepted, JSON and an XML variant. Both are normalized into one generic
//! tree ([`Node`]) and decoded by a single set of lenient field coercions:
//!
//! - Load a document with [`load`] or a configured [`SceneLoader`]
//! - Decode bytes of a known dialect with [`decode`]
//! - Collect non-fatal notices (defaults applied, data ignored) in [`Diagnostics`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decode;
mod foundation;
mod loader;
mod scene;
mod tree;

pub use crate::decode::FromNode;
pub use crate::decode::coerce::VertexRef;
pub use crate::decode::context::DecodeContext;
pub use crate::decode::defaults;
pub use crate::decode::diagnostics::{Diagnostics, Issue, IssueKind};
pub use crate::foundation::error::{SceneError, SceneResult, StructuralError};
pub use crate::foundation::math::{Scalar, Vec3};
pub use crate::foundation::path::{FieldPath, PathElem};
pub use crate::loader::pipeline::{
    DEFAULT_ROOT_KEY, DecodeOptions, LoadOptions, LoadReport, SceneLoader, Source, decode,
    decode_with_diagnostics, load,
};
pub use crate::loader::source::{ByteSource, DEFAULT_MAX_BYTES, FsSource};
pub use crate::scene::model::{Camera, Lights, Material, PointLight, Scene};
pub use crate::scene::objects::{
    Mesh, ObjectCommon, Plane, SceneObject, Sphere, Triangle, TriangleGeometry,
};
pub use crate::scene::registry::object_tags;
pub use crate::scene::vertex::VertexData;
pub use crate::tree::node::{ID_KEY, Node, NodeMap, TEXT_KEY, TYPE_KEY};
pub use crate::tree::parse_tree;
pub use crate::tree::sniff::{Dialect, FormatHint, sniff};
pub use crate::tree::xml::{XmlTextMode, xml_to_tree};
