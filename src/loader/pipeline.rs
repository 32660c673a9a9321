//! Entry points: bytes or a storage reference in, typed scene out.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::decode::FromNode;
use crate::decode::context::DecodeContext;
use crate::decode::diagnostics::Diagnostics;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::path::FieldPath;
use crate::loader::source::{ByteSource, FsSource};
use crate::scene::model::Scene;
use crate::tree::node::Node;
use crate::tree::parse_tree;
use crate::tree::sniff::{Dialect, FormatHint};
use crate::tree::xml::XmlTextMode;

/// Canonical top-level key of a scene document.
pub const DEFAULT_ROOT_KEY: &str = "Scene";

/// Knobs for turning a tree into typed values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Top-level key holding the scene body.
    pub root_key: String,
    /// Accept `nan`/`inf` in numeric fields.
    pub allow_non_finite: bool,
    /// How XML elements with attributes and text are kept.
    pub xml_text: XmlTextMode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            root_key: DEFAULT_ROOT_KEY.to_owned(),
            allow_non_finite: false,
            xml_text: XmlTextMode::default(),
        }
    }
}

/// [`DecodeOptions`] plus how to pick a dialect and how many threads to use for batches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Tree-to-type options.
    pub decode: DecodeOptions,
    /// Overrides the file extension and sniffing when not `Auto`.
    pub format: FormatHint,
    /// Worker threads for [`SceneLoader::load_all`]. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Where a document comes from.
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    /// In-memory bytes with an explicit format tag.
    Bytes {
        /// Document bytes.
        data: &'a [u8],
        /// Dialect tag; `Auto` sniffs.
        format: FormatHint,
    },
    /// Storage reference handed to the loader's [`ByteSource`].
    Path(&'a Path),
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes { data, .. } => write!(f, "<{} bytes>", data.len()),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Decode bytes already known to be `dialect`.
pub fn decode<T: FromNode>(bytes: &[u8], dialect: Dialect, options: &DecodeOptions) -> SceneResult<T> {
    decode_inner(bytes, dialect, options, None)
}

/// [`decode`], recording non-fatal notices into `diagnostics`.
pub fn decode_with_diagnostics<T: FromNode>(
    bytes: &[u8],
    dialect: Dialect,
    options: &DecodeOptions,
    diagnostics: &mut Diagnostics,
) -> SceneResult<T> {
    decode_inner(bytes, dialect, options, Some(diagnostics))
}

#[tracing::instrument(level = "debug", skip(bytes, options, diagnostics), fields(len = bytes.len()))]
fn decode_inner<T: FromNode>(
    bytes: &[u8],
    dialect: Dialect,
    options: &DecodeOptions,
    diagnostics: Option<&mut Diagnostics>,
) -> SceneResult<T> {
    let tree = parse_tree(bytes, dialect, options.xml_text, Some(&options.root_key))?;
    let mut ctx = DecodeContext::new(options.allow_non_finite, diagnostics);
    extract_root(&tree, &options.root_key, &mut ctx)
}

/// Decode `tree[root_key]` when the key is present, otherwise the whole tree as a bare body.
pub(crate) fn extract_root<T: FromNode>(
    tree: &Node,
    root_key: &str,
    ctx: &mut DecodeContext<'_>,
) -> SceneResult<T> {
    match tree.get(root_key) {
        Some(body) => T::from_node(body, &FieldPath::root().field(root_key), ctx),
        None => {
            tracing::debug!(root_key, "root key absent, decoding document as a bare body");
            T::from_node(tree, &FieldPath::root(), ctx)
        }
    }
}

/// Load a scene with default options from the local filesystem or memory.
pub fn load(source: Source<'_>) -> SceneResult<Scene> {
    SceneLoader::new(LoadOptions::default()).load(source)
}

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct LoadReport {
    /// Document the report is about.
    pub path: PathBuf,
    /// Assembled scene or the first fatal error.
    pub result: SceneResult<Scene>,
    /// Notices recorded while decoding this document.
    pub diagnostics: Diagnostics,
}

/// Configured loader: a byte source plus options, reusable across documents and threads.
#[derive(Clone, Debug)]
pub struct SceneLoader<S = FsSource> {
    source: S,
    options: LoadOptions,
}

impl SceneLoader<FsSource> {
    /// Loader reading from the local filesystem with [`FsSource::default`].
    pub fn new(options: LoadOptions) -> Self {
        Self::with_source(FsSource::default(), options)
    }
}

impl<S: ByteSource> SceneLoader<S> {
    /// Loader over a custom byte source.
    pub fn with_source(source: S, options: LoadOptions) -> Self {
        Self { source, options }
    }

    /// Options this loader was built with.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Read, classify and decode one document.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %source))]
    pub fn load(&self, source: Source<'_>) -> SceneResult<Scene> {
        let (bytes, dialect) = self.acquire(source)?;
        decode(&bytes, dialect, &self.options.decode)
    }

    /// [`load`](Self::load), recording non-fatal notices into `diagnostics`.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %source))]
    pub fn load_with_diagnostics(
        &self,
        source: Source<'_>,
        diagnostics: &mut Diagnostics,
    ) -> SceneResult<Scene> {
        let (bytes, dialect) = self.acquire(source)?;
        decode_with_diagnostics(&bytes, dialect, &self.options.decode, diagnostics)
    }

    /// Generic tree of a document, after dialect normalization and before typed decoding.
    pub fn load_tree(&self, source: Source<'_>) -> SceneResult<Node> {
        let (bytes, dialect) = self.acquire(source)?;
        let opts = &self.options.decode;
        parse_tree(&bytes, dialect, opts.xml_text, Some(&opts.root_key))
    }

    /// Load independent documents in parallel, each with its own collector. Reports keep the
    /// order of `paths`.
    #[tracing::instrument(level = "debug", skip_all, fields(count = paths.len()))]
    pub fn load_all(&self, paths: &[PathBuf]) -> SceneResult<Vec<LoadReport>> {
        let pool = build_thread_pool(self.options.threads)?;
        Ok(pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let mut diagnostics = Diagnostics::new();
                    let result = self.load_with_diagnostics(Source::Path(path), &mut diagnostics);
                    LoadReport {
                        path: path.clone(),
                        result,
                        diagnostics,
                    }
                })
                .collect()
        }))
    }

    fn acquire<'a>(&self, source: Source<'a>) -> SceneResult<(Cow<'a, [u8]>, Dialect)> {
        match source {
            Source::Bytes { data, format } => Ok((Cow::Borrowed(data), format.resolve(data))),
            Source::Path(path) => {
                let bytes = self
                    .source
                    .read(path)
                    .map_err(|e| SceneError::unreadable(path.display().to_string(), e))?;
                let hint = match self.options.format {
                    FormatHint::Auto => FormatHint::from_path(path),
                    forced => forced,
                };
                let dialect = hint.resolve(&bytes);
                tracing::debug!(?dialect, len = bytes.len(), "document read");
                Ok((Cow::Owned(bytes), dialect))
            }
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(SceneError::Other(anyhow::anyhow!(
            "'threads' must be >= 1 when set"
        )));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SceneError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/loader/pipeline.rs"]
mod tests;
