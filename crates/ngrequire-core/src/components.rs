//! Installed bower components
//!
//! Reads the components directory named by `.bowerrc` and orders installed
//! packages so every package follows its own dependencies. Both the
//! dependency injector and the loader-config unit read from here.

use crate::templates::COMPONENTS_DIR;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Settings file naming the components directory
pub const BOWER_SETTINGS: &str = ".bowerrc";

/// Manifests an installed package may carry, in lookup order
const PACKAGE_MANIFESTS: [&str; 2] = ["bower.json", ".bower.json"];

/// An installed package and its main files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageAssets {
    pub name: String,
    /// Absolute or root-relative paths, in manifest order
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Components {
    dir: PathBuf,
}

impl Components {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Components directory for the project at `root`
    ///
    /// Honors `.bowerrc`'s `directory`, otherwise `bower_components`.
    pub fn for_project(root: &Path) -> Self {
        let configured = std::fs::read_to_string(root.join(BOWER_SETTINGS))
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|settings| {
                settings
                    .get("directory")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });

        let dir = configured.unwrap_or_else(|| COMPONENTS_DIR.to_string());
        debug!(%dir, "components directory");
        Self::new(root.join(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn package_manifest(&self, name: &str) -> Option<Value> {
        let package_dir = self.dir.join(name);
        for file in PACKAGE_MANIFESTS {
            let path = package_dir.join(file);
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str(&content) {
                Ok(manifest) => return Some(manifest),
                Err(e) => warn!(path = %path.display(), error = %e, "unreadable package manifest"),
            }
        }
        None
    }

    /// Every package reachable from the project manifest's `dependencies`
    ///
    /// Depth-first, so a package always appears after the packages it depends
    /// on. `overrides.<name>.main` in the project manifest replaces a
    /// package's own `main`. Packages that are not installed are skipped.
    pub fn resolve(&self, project_manifest: &Value) -> Vec<PackageAssets> {
        let overrides = project_manifest.get("overrides");
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for name in dependency_names(project_manifest) {
            self.visit(&name, overrides, &mut seen, &mut ordered);
        }
        ordered
    }

    fn visit(
        &self,
        name: &str,
        overrides: Option<&Value>,
        seen: &mut HashSet<String>,
        ordered: &mut Vec<PackageAssets>,
    ) {
        if !seen.insert(name.to_string()) {
            return;
        }

        let Some(manifest) = self.package_manifest(name) else {
            warn!(package = %name, "package not installed, skipping");
            return;
        };

        for dependency in dependency_names(&manifest) {
            self.visit(&dependency, overrides, seen, ordered);
        }

        let main = overrides
            .and_then(|o| o.get(name))
            .and_then(|o| o.get("main"))
            .or_else(|| manifest.get("main"));

        let package_dir = self.dir.join(name);
        let files = main_entries(main)
            .into_iter()
            .map(|entry| package_dir.join(entry))
            .collect();

        ordered.push(PackageAssets {
            name: name.to_string(),
            files,
        });
    }
}

fn dependency_names(manifest: &Value) -> Vec<String> {
    manifest
        .get("dependencies")
        .and_then(Value::as_object)
        .map(|deps| deps.keys().cloned().collect())
        .unwrap_or_default()
}

/// `main` may be a single path or a list of paths
fn main_entries(main: Option<&Value>) -> Vec<String> {
    match main {
        Some(Value::String(path)) => vec![path.clone()],
        Some(Value::Array(paths)) => paths
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts
}

/// Forward-slash path from directory `from` to `to`, computed lexically
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat("..").take(from.len() - common);
    let downs = to[common..]
        .iter()
        .map(|c| c.as_os_str().to_str().unwrap_or_default());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn install_package(root: &Path, name: &str, manifest: Value) {
        let dir = root.join("bower_components").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("bower.json"), manifest.to_string()).unwrap();
    }

    #[test]
    fn test_dependencies_precede_dependents() {
        let dir = TempDir::new().unwrap();
        install_package(dir.path(), "angular", json!({"main": "./angular.js"}));
        install_package(
            dir.path(),
            "angular-route",
            json!({"main": "./angular-route.js", "dependencies": {"angular": "1.2.16"}}),
        );

        let project = json!({"dependencies": {"angular-route": "1.2.16", "angular": "1.2.16"}});
        let packages = Components::for_project(dir.path()).resolve(&project);
        let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["angular", "angular-route"]);
        assert!(packages[1].files[0].ends_with("angular-route/angular-route.js"));
    }

    #[test]
    fn test_overrides_replace_main() {
        let dir = TempDir::new().unwrap();
        install_package(
            dir.path(),
            "bootstrap",
            json!({"main": ["less/bootstrap.less", "dist/js/bootstrap.js"]}),
        );

        let project = json!({
            "dependencies": {"bootstrap": "~3.1.1"},
            "overrides": {"bootstrap": {"main": ["dist/css/bootstrap.css"]}}
        });
        let packages = Components::for_project(dir.path()).resolve(&project);
        assert_eq!(packages[0].files.len(), 1);
        assert!(packages[0].files[0].ends_with("dist/css/bootstrap.css"));
    }

    #[test]
    fn test_missing_packages_are_skipped() {
        let dir = TempDir::new().unwrap();
        let project = json!({"dependencies": {"nothing-here": "*"}});
        assert!(Components::for_project(dir.path()).resolve(&project).is_empty());
    }

    #[test]
    fn test_bowerrc_directory_is_honored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".bowerrc"), r#"{"directory": "vendor"}"#).unwrap();
        assert_eq!(Components::for_project(dir.path()).dir(), dir.path().join("vendor"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/p/app"), Path::new("/p/bower_components/a/a.js")),
            "../bower_components/a/a.js"
        );
        assert_eq!(
            relative_path(Path::new("/p/./app/scripts"), Path::new("/p/app/scripts/app.js")),
            "app.js"
        );
    }
}
