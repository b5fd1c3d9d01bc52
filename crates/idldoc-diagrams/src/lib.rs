//! Diagram extraction for idldoc.
//!
//! Description strings may embed diagram sources in two forms: fenced code
//! blocks marked `graphviz` or `uml`, and bare `digraph G { .. }` /
//! `@startuml .. @enduml` spans. This crate turns both into side files plus a
//! markdown image reference in the rendered text:
//!
//! - [`preprocess`] segments the input (via `idldoc-segments`), extracts each
//!   diagram through a [`DiagramSink`], escapes underscores in the remaining
//!   narrative text and returns the stitched-together string.
//! - [`FileSink`] writes graphviz sources to `dots/<name>` and UML sources to
//!   `umls/<name>.uml`; [`MemorySink`] records writes for tests.
//! - [`DiagramContext`] carries the per-entity image counter, reset by the
//!   caller for each entity so filenames restart at `<entity>_0`.
//!
//! Rendering the referenced `images/<name>.png` files is an external step;
//! this crate only emits sources and references.

mod consts;
mod preprocess;
mod sink;

pub use consts::GRAPHVIZ_DEFAULT_STYLE;
pub use preprocess::{DiagramContext, preprocess};
pub use sink::{DiagramError, DiagramKind, DiagramSink, FileSink, MemorySink};
