//! Configuration model
//!
//! This module provides:
//! - The [`Configuration`] record and the [`FeatureModule`] lookup table
//! - Project-name normalization
//! - One-shot app-path resolution

pub mod app_path;
pub mod model;
pub mod naming;

use std::path::{Path, PathBuf};
use tracing::warn;

pub use app_path::{resolve_app_path, DEFAULT_APP_PATH};
pub use model::{Configuration, FeatureModule, FeatureSet, ModuleArtifacts};

/// Inputs known before any question is asked
#[derive(Debug, Clone, Default)]
pub struct InitialContext {
    /// Raw project name; defaults to the project directory name
    pub app_name: Option<String>,
    /// Value of `--app-suffix`, if the flag was given
    pub app_suffix: Option<String>,
    /// Value of `--app-path`, if the flag was given
    pub app_path: Option<String>,
    /// Directory the project is generated into
    pub project_root: PathBuf,
}

impl Configuration {
    /// Build the starting configuration, resolving name, suffix and app path once
    pub fn initial(ctx: &InitialContext) -> Self {
        let raw = ctx
            .app_name
            .clone()
            .unwrap_or_else(|| directory_name(&ctx.project_root));

        let mut project_name = naming::project_name(&raw);
        if project_name.is_empty() {
            warn!(raw = %raw, "project name normalizes to nothing, using fallback");
            project_name = naming::FALLBACK_PROJECT_NAME.to_string();
        }

        Configuration::new(
            project_name,
            naming::humanize(&raw),
            naming::module_suffix(ctx.app_suffix.as_deref()),
            resolve_app_path(ctx.app_path.as_deref(), &ctx.project_root),
        )
    }
}

fn directory_name(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    absolute
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .last()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default()
}
