//! Destinations for extracted diagram sources.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The two diagram languages this tool extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    /// Graphviz digraph source, written under `dots/` with no extension.
    Graphviz,
    /// `PlantUML` source, written under `umls/` with a `.uml` extension.
    Uml,
}

impl DiagramKind {
    /// Return the kind as a display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graphviz => "graphviz",
            Self::Uml => "uml",
        }
    }

    /// Relative path of the side file for a diagram named `name`.
    #[must_use]
    pub fn side_path(self, name: &str) -> PathBuf {
        match self {
            Self::Graphviz => PathBuf::from("dots").join(name),
            Self::Uml => PathBuf::from("umls").join(format!("{name}.uml")),
        }
    }
}

/// Diagram extraction error.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("failed to write diagram source {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Destination for extracted diagram sources.
///
/// The seam between segmentation and the filesystem: [`preprocess`] pushes
/// every extracted source through a sink, so tests can capture writes with
/// [`MemorySink`] while the generator uses [`FileSink`].
///
/// [`preprocess`]: crate::preprocess
pub trait DiagramSink {
    /// Write one diagram source under the given base name.
    fn write(&mut self, kind: DiagramKind, name: &str, source: &str) -> Result<(), DiagramError>;
}

/// Sink writing diagram sources below a root directory.
///
/// Writes are unconditional overwrites; the `dots/` and `umls/`
/// subdirectories are created on demand.
#[derive(Debug)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    /// Create a sink rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory the side files are written under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DiagramSink for FileSink {
    fn write(&mut self, kind: DiagramKind, name: &str, source: &str) -> Result<(), DiagramError> {
        let path = self.root.join(kind.side_path(name));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| DiagramError::Write {
                path: path.clone(),
                source,
            })?;
        }

        fs::write(&path, source).map_err(|source| DiagramError::Write { path, source })
    }
}

/// Sink recording writes in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    written: Vec<(DiagramKind, String, String)>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(kind, name, source)` writes, in order.
    #[must_use]
    pub fn written(&self) -> &[(DiagramKind, String, String)] {
        &self.written
    }
}

impl DiagramSink for MemorySink {
    fn write(&mut self, kind: DiagramKind, name: &str, source: &str) -> Result<(), DiagramError> {
        self.written
            .push((kind, name.to_owned(), source.to_owned()));
        Ok(())
    }
}
