use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};

/// Default cap on document size for [`FsSource`].
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Collaborator that turns a storage reference into the document's full byte content.
///
/// Size, permission and timeout policy belong to implementations; the decode layer imposes none.
pub trait ByteSource: Send + Sync {
    /// Full contents of `path`, or why they could not be read.
    fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>>;
}

/// Local filesystem reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsSource {
    /// Reject files larger than this many bytes; `None` disables the cap.
    pub max_bytes: Option<u64>,
    /// Reject directories, sockets and other non-regular files.
    pub require_regular_file: bool,
}

impl Default for FsSource {
    fn default() -> Self {
        Self {
            max_bytes: Some(DEFAULT_MAX_BYTES),
            require_regular_file: true,
        }
    }
}

impl ByteSource for FsSource {
    fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat '{}'", path.display()))?;
        if self.require_regular_file && !meta.is_file() {
            bail!("'{}' is not a regular file", path.display());
        }
        if let Some(max) = self.max_bytes
            && meta.len() > max
        {
            bail!(
                "'{}' is {} bytes, over the {max} byte limit",
                path.display(),
                meta.len()
            );
        }

        let file =
            std::fs::File::open(path).with_context(|| format!("open '{}'", path.display()))?;
        let mut bytes = Vec::with_capacity(usize::try_from(meta.len()).unwrap_or(0));
        // The file may grow between stat and read; never take more than the cap plus one byte.
        let limit = self.max_bytes.map_or(u64::MAX, |m| m.saturating_add(1));
        file.take(limit)
            .read_to_end(&mut bytes)
            .with_context(|| format!("read '{}'", path.display()))?;
        if let Some(max) = self.max_bytes
            && bytes.len() as u64 > max
        {
            bail!("'{}' grew past the {max} byte limit while reading", path.display());
        }
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/source.rs"]
mod tests;
