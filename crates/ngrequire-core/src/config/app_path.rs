//! App-path resolution
//!
//! The app directory comes from, in order: an explicit override, the
//! `appPath` field of an existing `bower.json` in the project root, or
//! [`DEFAULT_APP_PATH`].

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_APP_PATH: &str = "app";

/// File name of the dependency manifest consulted for `appPath`
pub const DEPENDENCY_MANIFEST: &str = "bower.json";

#[derive(Debug, Deserialize)]
struct ManifestAppPath {
    #[serde(rename = "appPath")]
    app_path: Option<String>,
}

/// Resolve the app path for a project rooted at `project_root`
///
/// A missing or malformed manifest is not an error; resolution falls through
/// to the default.
pub fn resolve_app_path(override_path: Option<&str>, project_root: &Path) -> String {
    if let Some(path) = override_path.filter(|p| !p.trim().is_empty()) {
        debug!(app_path = path, "using app path override");
        return path.trim_end_matches('/').to_string();
    }

    if let Some(path) = read_manifest_app_path(project_root) {
        debug!(app_path = %path, "using appPath from existing manifest");
        return path;
    }

    DEFAULT_APP_PATH.to_string()
}

fn read_manifest_app_path(project_root: &Path) -> Option<String> {
    let manifest_path = project_root.join(DEPENDENCY_MANIFEST);
    let content = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %manifest_path.display(), error = %e, "no readable manifest");
            return None;
        }
    };

    match serde_json::from_str::<ManifestAppPath>(&content) {
        Ok(manifest) => manifest
            .app_path
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty()),
        Err(e) => {
            debug!(path = %manifest_path.display(), error = %e, "ignoring malformed manifest");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bower.json"), r#"{"appPath": "client"}"#).unwrap();
        assert_eq!(resolve_app_path(Some("src/"), dir.path()), "src");
    }

    #[test]
    fn test_manifest_app_path_used_without_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bower.json"), r#"{"name": "x", "appPath": "client"}"#)
            .unwrap();
        assert_eq!(resolve_app_path(None, dir.path()), "client");
    }

    #[test]
    fn test_missing_manifest_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_app_path(None, dir.path()), DEFAULT_APP_PATH);
    }

    #[test]
    fn test_malformed_manifest_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bower.json"), "{ not json").unwrap();
        assert_eq!(resolve_app_path(None, dir.path()), DEFAULT_APP_PATH);
    }

    #[test]
    fn test_manifest_without_app_path_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bower.json"), r#"{"name": "x"}"#).unwrap();
        assert_eq!(resolve_app_path(None, dir.path()), DEFAULT_APP_PATH);
    }
}
