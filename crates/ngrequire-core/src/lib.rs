//! ngrequire core - scaffolding for AngularJS applications loaded with RequireJS
//!
//! Builds a project configuration through a staged question pipeline, derives
//! dependency lists from it, writes the project files, installs packages, and
//! wires the installed packages into the markup and the module-loader config.
//!
//! # Architecture
//!
//! - **Configuration** - [`Configuration`] record, name normalization, app-path resolution
//! - **Interaction** - [`Pipeline`] of stages asking questions through a [`Prompter`]
//! - **Generation** - [`resolver`], templates, the [`Orchestrator`] and its generation units
//! - **Post-generation** - package installation and the dependency injector
//! - **CLI/TUI** - optional cliclack-based flow (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack prompter and the interactive flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use ngrequire_core::{
//!     Configuration, InitialContext, Orchestrator, Pipeline, ScriptedPrompter, Workspace,
//! };
//!
//! let initial = Configuration::initial(&InitialContext::default());
//! let config = Pipeline::standard().run(initial, &mut ScriptedPrompter::defaults())?;
//! let orchestrator = Orchestrator::new(
//!     Workspace::new("."),
//!     Arc::new(HandlebarsRenderer::embedded()),
//!     Arc::new(ProcessInstaller),
//! );
//! orchestrator.generate(&config, InstallOptions::default()).await?;
//! ```

pub mod components;
pub mod config;
pub mod error;
pub mod generate;
pub mod inject;
pub mod install;
pub mod pipeline;
pub mod resolver;
pub mod templates;
pub mod units;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Configuration, FeatureModule, FeatureSet, InitialContext};
pub use error::{Error, Result};
pub use generate::{ExistingFiles, GenerationReport, Orchestrator, Workspace};
pub use install::{InstallOptions, InstallOutcome, Installer, ProcessInstaller};
pub use pipeline::{Answers, Pipeline, Prompter, ScriptedPrompter};
pub use templates::{HandlebarsRenderer, Renderer, TemplateSource};
pub use units::{Task, TaskRunner};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
