//! Project generation
//!
//! This module provides:
//! - The [`GenerationPlan`] of file actions for a configuration
//! - A [`Workspace`] rooted at the project directory
//! - The [`Orchestrator`] that runs the plan, the units, and installation

pub mod fs;
pub mod orchestrator;
pub mod plan;
pub mod report;

pub use fs::{Emitted, ExistingFiles, Workspace};
pub use orchestrator::{
    post_install_tasks, setup_tasks, Orchestrator, GUIDANCE, MANUAL_INJECT_HINT,
};
pub use plan::{FileAction, GenerationPlan, PostProcess};
pub use report::GenerationReport;
