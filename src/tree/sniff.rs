use std::path::Path;
use std::str::FromStr;

pub(crate) const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Wire dialect of a scene document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// JSON document.
    Json,
    /// XML document.
    Xml,
}

/// Caller-supplied format choice; `Auto` defers to [`sniff`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormatHint {
    /// Classify the bytes.
    #[default]
    Auto,
    /// Force JSON.
    Json,
    /// Force XML.
    Xml,
}

impl FormatHint {
    /// Hint derived from a file extension (`.json`, `.xml`, case-insensitive); anything else is `Auto`.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("xml") => Self::Xml,
            _ => Self::Auto,
        }
    }

    /// Dialect for `bytes`: the hint itself unless it is `Auto`.
    pub fn resolve(self, bytes: &[u8]) -> Dialect {
        match self {
            Self::Json => Dialect::Json,
            Self::Xml => Dialect::Xml,
            Self::Auto => sniff(bytes),
        }
    }
}

impl FromStr for FormatHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(format!(
                "unknown format '{other}' (expected json, xml or auto)"
            )),
        }
    }
}

impl From<Dialect> for FormatHint {
    fn from(d: Dialect) -> Self {
        match d {
            Dialect::Json => Self::Json,
            Dialect::Xml => Self::Xml,
        }
    }
}

/// Classify a buffer: after a leading byte-order mark and whitespace, `<` means XML and
/// anything else (including an empty buffer) means JSON.
pub fn sniff(bytes: &[u8]) -> Dialect {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'<') => Dialect::Xml,
        _ => Dialect::Json,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/sniff.rs"]
mod tests;
