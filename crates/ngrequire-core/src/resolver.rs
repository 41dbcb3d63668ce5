//! Feature resolution
//!
//! Pure derivations from a completed [`Configuration`]. Nothing here performs
//! I/O or keeps state, so every function returns the same output for the same
//! configuration.

use crate::config::Configuration;
use serde::Serialize;

/// Test-runner components that precede the per-module entries
pub const CORE_TEST_COMPONENTS: [&str; 2] =
    ["angular/angular.js", "angular-mocks/angular-mocks.js"];

pub const STYLESHEET_EXTENSION: &str = "css";
pub const PREPROCESSOR_STYLESHEET_EXTENSION: &str = "scss";

const ANGULAR_VERSION: &str = "1.2.16";

/// A package entry in the generated dependency manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowerDependency {
    pub name: &'static str,
    pub version: &'static str,
}

impl BowerDependency {
    const fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }
}

/// AngularJS module identifiers of the enabled feature modules, canonical order
pub fn module_dependencies(config: &Configuration) -> Vec<&'static str> {
    config
        .feature_modules()
        .iter()
        .map(|m| m.artifacts().ng_module)
        .collect()
}

/// Bower packages of the enabled feature modules, canonical order
pub fn module_packages(config: &Configuration) -> Vec<&'static str> {
    config
        .feature_modules()
        .iter()
        .map(|m| m.artifacts().package)
        .collect()
}

/// Core test components followed by one entry per enabled module
pub fn test_components(config: &Configuration) -> Vec<&'static str> {
    CORE_TEST_COMPONENTS
        .into_iter()
        .chain(
            config
                .feature_modules()
                .iter()
                .map(|m| m.artifacts().test_component),
        )
        .collect()
}

pub fn stylesheet_extension(config: &Configuration) -> &'static str {
    if config.use_style_preprocessor() {
        PREPROCESSOR_STYLESHEET_EXTENSION
    } else {
        STYLESHEET_EXTENSION
    }
}

/// Runtime packages for the dependency manifest
///
/// Core packages first, then the UI framework (when included), then feature
/// module packages in canonical order.
pub fn bower_dependencies(config: &Configuration) -> Vec<BowerDependency> {
    let mut deps = vec![
        BowerDependency::new("angular", ANGULAR_VERSION),
        BowerDependency::new("json3", "~3.3.1"),
        BowerDependency::new("es5-shim", "~3.1.0"),
        BowerDependency::new("requirejs", "~2.1.11"),
    ];

    if config.include_ui_framework() {
        if config.use_style_preprocessor_framework() {
            deps.push(BowerDependency::new("bootstrap-sass-official", "~3.1.1"));
        } else {
            deps.push(BowerDependency::new("bootstrap", "~3.1.1"));
        }
    }

    deps.extend(
        module_packages(config)
            .into_iter()
            .map(|name| BowerDependency::new(name, ANGULAR_VERSION)),
    );
    deps
}

pub fn bower_dev_dependencies() -> Vec<BowerDependency> {
    vec![
        BowerDependency::new("angular-mocks", ANGULAR_VERSION),
        BowerDependency::new("angular-scenario", ANGULAR_VERSION),
    ]
}

/// Everything the generation step derives from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub module_dependencies: Vec<&'static str>,
    pub module_packages: Vec<&'static str>,
    pub test_components: Vec<&'static str>,
    pub stylesheet_extension: &'static str,
    pub bower_dependencies: Vec<BowerDependency>,
    pub bower_dev_dependencies: Vec<BowerDependency>,
}

pub fn resolve(config: &Configuration) -> Resolved {
    Resolved {
        module_dependencies: module_dependencies(config),
        module_packages: module_packages(config),
        test_components: test_components(config),
        stylesheet_extension: stylesheet_extension(config),
        bower_dependencies: bower_dependencies(config),
        bower_dev_dependencies: bower_dev_dependencies(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureModule, FeatureSet};

    fn config_with(modules: FeatureSet) -> Configuration {
        let mut config = Configuration::new("demo", "Demo", "App", "app");
        config.record_style_preprocessor(true);
        config.record_ui_framework(true);
        config.record_style_preprocessor_framework(false);
        config.record_feature_modules(modules);
        config
    }

    /// Subset of the six modules selected by the bits of `mask`
    fn subset(mask: u8) -> Vec<FeatureModule> {
        FeatureModule::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, m)| m)
            .collect()
    }

    #[test]
    fn test_all_subsets_list_enabled_modules_canonically() {
        for mask in 0u8..64 {
            let expected = subset(mask);
            // Feed the selection reversed to show input order does not matter
            let config = config_with(expected.iter().rev().copied().collect());

            let deps = module_dependencies(&config);
            let want: Vec<_> = expected.iter().map(|m| m.artifacts().ng_module).collect();
            assert_eq!(deps, want, "module dependencies for mask {mask:#08b}");

            let components = test_components(&config);
            assert_eq!(&components[..2], &CORE_TEST_COMPONENTS);
            let want: Vec<_> = expected
                .iter()
                .map(|m| m.artifacts().test_component)
                .collect();
            assert_eq!(&components[2..], &want[..], "test components for mask {mask:#08b}");
        }
    }

    #[test]
    fn test_each_module_gated_on_its_own_flag() {
        let config = config_with([FeatureModule::Route].into_iter().collect());
        assert_eq!(module_dependencies(&config), vec!["ngRoute"]);

        let config = config_with(
            [FeatureModule::Animate, FeatureModule::Touch]
                .into_iter()
                .collect(),
        );
        assert_eq!(module_dependencies(&config), vec!["ngAnimate", "ngTouch"]);
    }

    #[test]
    fn test_stylesheet_extension_follows_preprocessor() {
        for ui in [false, true] {
            let mut config = Configuration::new("demo", "Demo", "App", "app");
            config.record_style_preprocessor(true);
            config.record_ui_framework(ui);
            assert_eq!(stylesheet_extension(&config), "scss");

            let mut config = Configuration::new("demo", "Demo", "App", "app");
            config.record_style_preprocessor(false);
            config.record_ui_framework(ui);
            assert_eq!(stylesheet_extension(&config), "css");
        }
    }

    #[test]
    fn test_bower_dependencies_pick_ui_framework_flavour() {
        let mut config = Configuration::new("demo", "Demo", "App", "app");
        config.record_style_preprocessor(true);
        config.record_ui_framework(true);
        config.record_style_preprocessor_framework(true);
        config.record_feature_modules(FeatureSet::empty());
        let names: Vec<_> = bower_dependencies(&config).iter().map(|d| d.name).collect();
        assert!(names.contains(&"bootstrap-sass-official"));
        assert!(!names.contains(&"bootstrap"));
    }

    #[test]
    fn test_bower_dependencies_end_with_modules() {
        let config = config_with(
            [FeatureModule::Route, FeatureModule::Sanitize]
                .into_iter()
                .collect(),
        );
        let names: Vec<_> = bower_dependencies(&config).iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "angular",
                "json3",
                "es5-shim",
                "requirejs",
                "bootstrap",
                "angular-sanitize",
                "angular-route",
            ]
        );
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let config = config_with(FeatureSet::all());
        assert_eq!(resolve(&config), resolve(&config));
    }
}
