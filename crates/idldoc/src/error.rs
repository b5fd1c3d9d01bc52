//! CLI error types.

use idldoc_diagrams::DiagramError;
use idldoc_model::ModelError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Diagram(#[from] DiagramError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
