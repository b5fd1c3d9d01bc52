//! The generation pipeline: entity list in, markdown files out.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use idldoc_diagrams::{DiagramContext, FileSink, preprocess};
use idldoc_model::{Entity, load_entities};
use idldoc_renderer::render_entity;

use crate::error::CliError;

/// Sequential generator writing `docs/`, `dots/` and `umls/` below a root
/// directory.
///
/// Entities are processed independently in input order; each gets a fresh
/// diagram counter. All writes are blocking overwrites, and the first failure
/// aborts the run with no cleanup of files already written.
pub(crate) struct Generator {
    root: PathBuf,
}

impl Generator {
    /// Create a generator writing below `root`.
    pub(crate) fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Load the entity list from `input` and generate every document.
    pub(crate) fn generate(&self, input: &Path) -> Result<(), CliError> {
        let entities = load_entities(input)?;
        info!(count = entities.len(), "loaded entity list");

        for entity in &entities {
            self.generate_one(entity)?;
        }

        Ok(())
    }

    /// Render, preprocess and write one entity's document.
    fn generate_one(&self, entity: &Entity) -> Result<(), CliError> {
        let Some(markdown) = render_entity(entity) else {
            debug!(name = %entity.name, "skipping entity of unrecognized kind");
            return Ok(());
        };

        let mut ctx = DiagramContext::new(&entity.name);
        let mut sink = FileSink::new(&self.root);
        let document = preprocess(&markdown, &mut ctx, &mut sink)?;

        let docs = self.root.join("docs");
        fs::create_dir_all(&docs)?;
        let path = docs.join(format!("{}.md", entity.name));
        fs::write(&path, document)?;
        info!(path = %path.display(), "wrote entity document");

        Ok(())
    }
}
