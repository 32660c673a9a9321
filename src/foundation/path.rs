use std::fmt;

/// One step into the generic value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElem {
    /// Map key.
    Field(String),
    /// List position (0-based).
    Index(usize),
}

/// Location of a field inside a document, rendered as `$.Scene.Objects.Sphere[1].Center`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    elems: Vec<PathElem>,
}

impl FieldPath {
    /// The document root (`$`).
    pub fn root() -> Self {
        Self::default()
    }

    /// A copy of this path extended by a map key.
    pub fn field(&self, name: &str) -> Self {
        let mut elems = self.elems.clone();
        elems.push(PathElem::Field(name.to_owned()));
        Self { elems }
    }

    /// A copy of this path extended by a list position.
    pub fn index(&self, i: usize) -> Self {
        let mut elems = self.elems.clone();
        elems.push(PathElem::Index(i));
        Self { elems }
    }

    /// Path elements from the root.
    pub fn elems(&self) -> &[PathElem] {
        &self.elems
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for e in &self.elems {
            match e {
                PathElem::Field(name) => write!(f, ".{name}")?,
                PathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/path.rs"]
mod tests;
