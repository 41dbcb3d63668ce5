//! Template context built from the configuration and resolved artifacts

use crate::config::{Configuration, FeatureModule};
use crate::resolver::{BowerDependency, Resolved};
use serde::Serialize;

/// Directory bower installs packages into, relative to the project root
pub const COMPONENTS_DIR: &str = "bower_components";

/// A `paths` entry of the module-loader config
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoaderPath {
    pub name: String,
    pub path: String,
}

/// Every value the project templates reference
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub app_name: String,
    pub title: String,
    pub script_app_name: String,
    pub app_path: String,
    pub compass: bool,
    pub bootstrap: bool,
    pub compass_bootstrap: bool,
    pub resource_module: bool,
    pub cookies_module: bool,
    pub sanitize_module: bool,
    pub route_module: bool,
    pub animate_module: bool,
    pub touch_module: bool,
    pub module_dependencies: Vec<&'static str>,
    pub module_packages: Vec<&'static str>,
    pub test_components: Vec<&'static str>,
    pub stylesheet_extension: &'static str,
    pub bower_dependencies: Vec<BowerDependency>,
    pub bower_dev_dependencies: Vec<BowerDependency>,
    /// Path from the app scripts directory to the components directory
    pub components_prefix: String,
    pub loader_paths: Vec<LoaderPath>,
}

impl RenderContext {
    pub fn new(config: &Configuration, resolved: &Resolved) -> Self {
        let components_prefix = components_prefix(config.app_path());
        let loader_paths = std::iter::once("angular")
            .chain(resolved.module_packages.iter().copied())
            .map(|package| LoaderPath {
                name: package.to_string(),
                path: format!("{components_prefix}/{package}/{package}"),
            })
            .collect();

        Self {
            app_name: config.project_name().to_string(),
            title: config.title().to_string(),
            script_app_name: config.root_module(),
            app_path: config.app_path().to_string(),
            compass: config.use_style_preprocessor(),
            bootstrap: config.include_ui_framework(),
            compass_bootstrap: config.use_style_preprocessor_framework(),
            resource_module: config.has_module(FeatureModule::Resource),
            cookies_module: config.has_module(FeatureModule::Cookies),
            sanitize_module: config.has_module(FeatureModule::Sanitize),
            route_module: config.has_module(FeatureModule::Route),
            animate_module: config.has_module(FeatureModule::Animate),
            touch_module: config.has_module(FeatureModule::Touch),
            module_dependencies: resolved.module_dependencies.clone(),
            module_packages: resolved.module_packages.clone(),
            test_components: resolved.test_components.clone(),
            stylesheet_extension: resolved.stylesheet_extension,
            bower_dependencies: resolved.bower_dependencies.clone(),
            bower_dev_dependencies: resolved.bower_dev_dependencies.clone(),
            components_prefix,
            loader_paths,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// `"app"` -> `"../../bower_components"`
///
/// The scripts directory sits one level below the app path.
pub fn components_prefix(app_path: &str) -> String {
    let depth = app_path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .count()
        + 1;
    let mut prefix = "../".repeat(depth);
    prefix.push_str(COMPONENTS_DIR);
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureSet;
    use crate::resolver;

    #[test]
    fn test_components_prefix_tracks_app_depth() {
        assert_eq!(components_prefix("app"), "../../bower_components");
        assert_eq!(components_prefix("src/client/"), "../../../bower_components");
        assert_eq!(components_prefix("./app"), "../../bower_components");
    }

    #[test]
    fn test_context_exposes_flags_and_paths() {
        let mut config = Configuration::new("demo", "Demo", "App", "app");
        config.record_style_preprocessor(false);
        config.record_ui_framework(true);
        config.record_style_preprocessor_framework(false);
        config.record_feature_modules([FeatureModule::Route].into_iter().collect::<FeatureSet>());

        let ctx = RenderContext::new(&config, &resolver::resolve(&config));
        assert_eq!(ctx.script_app_name, "demoApp");
        assert!(ctx.route_module);
        assert!(!ctx.touch_module);
        assert_eq!(
            ctx.loader_paths,
            vec![
                LoaderPath {
                    name: "angular".to_string(),
                    path: "../../bower_components/angular/angular".to_string(),
                },
                LoaderPath {
                    name: "angular-route".to_string(),
                    path: "../../bower_components/angular-route/angular-route".to_string(),
                },
            ]
        );
    }
}
