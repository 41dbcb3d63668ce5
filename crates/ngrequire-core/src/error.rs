//! Error types for configuration, generation, and post-generation steps

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the scaffolding pipeline
///
/// Every variant is fatal for the current run. Errors while reading an
/// existing `bower.json` during app-path resolution never reach this type;
/// they fall back to the default app path.
#[derive(Debug, Error)]
pub enum Error {
    /// The prompt collaborator failed (e.g. no interactive terminal)
    #[error("Prompt failed: {0}")]
    Interaction(#[source] io::Error),

    #[error("Failed to read answers file {}: {source}", path.display())]
    AnswersRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid answers file {}: {source}", path.display())]
    AnswersParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Template '{0}' not found")]
    TemplateMissing(String),

    #[error("Failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Failed to build template context: {0}")]
    Context(#[from] serde_json::Error),

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Installation failed: {0}")]
    Install(String),

    /// The dependency manifest could not be read or parsed during injection
    #[error("Failed to parse dependency manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Build a closure mapping an I/O error onto [`Error::Io`] for `path`
    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Error::Io {
            action,
            path,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
