//! Template, layout and partial bodies, loaded once per generation run.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// What kind of template body is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A page template (`<templates>/<name>.html`)
    Template,
    /// A layout wrapping rendered pages (`<templates>/layouts/<name>.html`)
    Layout,
    /// A reusable fragment (`<templates>/partials/<name>.html`)
    Partial,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Template => "template",
            SourceKind::Layout => "layout",
            SourceKind::Partial => "partial",
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: SourceKind, name: String },

    #[error("failed to read {kind} {}: {source}", .path.display())]
    Io {
        kind: SourceKind,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where template bodies come from.
pub trait ContentLoader {
    /// Read the raw body of `name`. Called at most once per successful
    /// `(kind, name)` by [`SourceCache`].
    fn load(&self, kind: SourceKind, name: &str) -> Result<String, LoadError>;
}

/// Loads `.html` files from a templates directory.
#[derive(Debug, Clone)]
pub struct FsLoader {
    templates_dir: PathBuf,
}

impl FsLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// The file a given body is read from.
    pub fn path_for(&self, kind: SourceKind, name: &str) -> PathBuf {
        let file = format!("{name}.html");
        match kind {
            SourceKind::Template => self.templates_dir.join(file),
            SourceKind::Layout => self.templates_dir.join("layouts").join(file),
            SourceKind::Partial => self.templates_dir.join("partials").join(file),
        }
    }
}

impl ContentLoader for FsLoader {
    fn load(&self, kind: SourceKind, name: &str) -> Result<String, LoadError> {
        let path = self.path_for(kind, name);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    kind,
                    name: name.to_string(),
                }
            } else {
                LoadError::Io { kind, path, source }
            }
        })
    }
}

/// Serves bodies from memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<(SourceKind, String), String>,
}

#[cfg(test)]
impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: SourceKind, name: &str, body: &str) -> Self {
        self.insert(kind, name, body);
        self
    }

    pub fn insert(&mut self, kind: SourceKind, name: &str, body: &str) {
        self.sources
            .insert((kind, name.to_string()), body.to_string());
    }
}

#[cfg(test)]
impl ContentLoader for MemoryLoader {
    fn load(&self, kind: SourceKind, name: &str) -> Result<String, LoadError> {
        self.sources
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                kind,
                name: name.to_string(),
            })
    }
}

/// Read-through cache over a [`ContentLoader`].
///
/// Bodies are stored verbatim on first successful load and never
/// invalidated. Failed loads are not cached, so a missing partial is
/// looked up (and warned about) again on every request.
#[derive(Debug)]
pub struct SourceCache<L> {
    loader: L,
    bodies: HashMap<(SourceKind, String), String>,
}

impl<L: ContentLoader> SourceCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            bodies: HashMap::new(),
        }
    }

    /// Get the body of `name`, loading it on first use.
    pub fn load(&mut self, kind: SourceKind, name: &str) -> Result<&str, LoadError> {
        let key = (kind, name.to_string());
        if !self.bodies.contains_key(&key) {
            let body = self.loader.load(kind, name)?;
            tracing::debug!(%kind, name, len = body.len(), "loaded template source");
            self.bodies.insert(key.clone(), body);
        }
        Ok(self.bodies[&key].as_str())
    }

    /// Get a partial body. A missing partial contributes no text.
    pub fn load_partial(&mut self, name: &str) -> String {
        match self.load(SourceKind::Partial, name) {
            Ok(body) => body.to_string(),
            Err(e) => {
                tracing::warn!("partial {name} not found, removing placeholder ({e})");
                String::new()
            }
        }
    }

    #[cfg(test)]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Number of cached bodies.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
