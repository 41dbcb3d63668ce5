//! Configuration record accumulated across the interaction stages

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// Optional AngularJS capability the user may enable
///
/// Variants are declared in canonical order; `Ord` follows that order, so any
/// sorted collection of modules lists them canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureModule {
    Resource,
    Cookies,
    Sanitize,
    Route,
    Animate,
    Touch,
}

/// Fixed artifacts attached to a feature module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleArtifacts {
    /// AngularJS module identifier listed as an app dependency
    pub ng_module: &'static str,
    /// Bower package providing the module
    pub package: &'static str,
    /// Entry added to the test runner's component list
    pub test_component: &'static str,
    /// Label shown in the module selection prompt
    pub label: &'static str,
}

const MODULE_TABLE: [(FeatureModule, ModuleArtifacts); 6] = [
    (
        FeatureModule::Resource,
        ModuleArtifacts {
            ng_module: "ngResource",
            package: "angular-resource",
            test_component: "angular-resource/angular-resource.js",
            label: "angular-resource.js",
        },
    ),
    (
        FeatureModule::Cookies,
        ModuleArtifacts {
            ng_module: "ngCookies",
            package: "angular-cookies",
            test_component: "angular-cookies/angular-cookies.js",
            label: "angular-cookies.js",
        },
    ),
    (
        FeatureModule::Sanitize,
        ModuleArtifacts {
            ng_module: "ngSanitize",
            package: "angular-sanitize",
            test_component: "angular-sanitize/angular-sanitize.js",
            label: "angular-sanitize.js",
        },
    ),
    (
        FeatureModule::Route,
        ModuleArtifacts {
            ng_module: "ngRoute",
            package: "angular-route",
            test_component: "angular-route/angular-route.js",
            label: "angular-route.js",
        },
    ),
    (
        FeatureModule::Animate,
        ModuleArtifacts {
            ng_module: "ngAnimate",
            package: "angular-animate",
            test_component: "angular-animate/angular-animate.js",
            label: "angular-animate.js",
        },
    ),
    (
        FeatureModule::Touch,
        ModuleArtifacts {
            ng_module: "ngTouch",
            package: "angular-touch",
            test_component: "angular-touch/angular-touch.js",
            label: "angular-touch.js",
        },
    ),
];

impl FeatureModule {
    /// All modules in canonical order
    pub const ALL: [FeatureModule; 6] = [
        FeatureModule::Resource,
        FeatureModule::Cookies,
        FeatureModule::Sanitize,
        FeatureModule::Route,
        FeatureModule::Animate,
        FeatureModule::Touch,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FeatureModule::Resource => "resource",
            FeatureModule::Cookies => "cookies",
            FeatureModule::Sanitize => "sanitize",
            FeatureModule::Route => "route",
            FeatureModule::Animate => "animate",
            FeatureModule::Touch => "touch",
        }
    }

    pub fn artifacts(self) -> &'static ModuleArtifacts {
        &MODULE_TABLE[self as usize].1
    }
}

impl fmt::Display for FeatureModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Set of enabled feature modules, always iterated in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(BTreeSet<FeatureModule>);

impl FeatureSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        FeatureModule::ALL.into_iter().collect()
    }

    pub fn contains(&self, module: FeatureModule) -> bool {
        self.0.contains(&module)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate enabled modules in canonical order
    pub fn iter(&self) -> impl Iterator<Item = FeatureModule> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<FeatureModule> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureModule>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Accumulated choices and path resolutions for one generation run
///
/// Identity fields (name, suffix, app path) are fixed at construction. Stage
/// answers start unset and are each recorded once; unset answers read as
/// `false` / empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    project_name: String,
    title: String,
    module_suffix: String,
    app_path: String,
    use_style_preprocessor: Option<bool>,
    include_ui_framework: Option<bool>,
    use_style_preprocessor_framework: Option<bool>,
    feature_modules: Option<FeatureSet>,
}

impl Configuration {
    pub fn new(
        project_name: impl Into<String>,
        title: impl Into<String>,
        module_suffix: impl Into<String>,
        app_path: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            title: title.into(),
            module_suffix: module_suffix.into(),
            app_path: app_path.into(),
            use_style_preprocessor: None,
            include_ui_framework: None,
            use_style_preprocessor_framework: None,
            feature_modules: None,
        }
    }

    /// Normalized (camelized) project name
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Human-readable project title, used for the page title
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn module_suffix(&self) -> &str {
        &self.module_suffix
    }

    /// Root AngularJS module identifier: project name followed by the suffix
    pub fn root_module(&self) -> String {
        format!("{}{}", self.project_name, self.module_suffix)
    }

    /// Directory (relative to the project root) that holds the app sources
    pub fn app_path(&self) -> &str {
        &self.app_path
    }

    pub fn use_style_preprocessor(&self) -> bool {
        self.use_style_preprocessor.unwrap_or(false)
    }

    pub fn include_ui_framework(&self) -> bool {
        self.include_ui_framework.unwrap_or(false)
    }

    pub fn use_style_preprocessor_framework(&self) -> bool {
        self.use_style_preprocessor_framework.unwrap_or(false)
    }

    pub fn feature_modules(&self) -> &FeatureSet {
        static EMPTY: FeatureSet = FeatureSet(BTreeSet::new());
        self.feature_modules.as_ref().unwrap_or(&EMPTY)
    }

    pub fn has_module(&self, module: FeatureModule) -> bool {
        self.feature_modules().contains(module)
    }

    pub(crate) fn record_style_preprocessor(&mut self, enabled: bool) {
        record_once(&mut self.use_style_preprocessor, enabled, "style preprocessor");
    }

    pub(crate) fn record_ui_framework(&mut self, enabled: bool) {
        record_once(&mut self.include_ui_framework, enabled, "UI framework");
    }

    /// Record the preprocessor flavour of the UI framework
    ///
    /// Stored as `false` unless both the preprocessor and the UI framework
    /// are enabled, so the flag never holds without its prerequisites.
    pub(crate) fn record_style_preprocessor_framework(&mut self, enabled: bool) {
        let allowed = self.use_style_preprocessor() && self.include_ui_framework();
        record_once(
            &mut self.use_style_preprocessor_framework,
            enabled && allowed,
            "preprocessor framework",
        );
    }

    pub(crate) fn record_feature_modules(&mut self, modules: FeatureSet) {
        record_once(&mut self.feature_modules, modules, "feature modules");
    }
}

/// Store `value` unless the answer was recorded before; the first one stands
fn record_once<T>(slot: &mut Option<T>, value: T, answer: &str) {
    if slot.is_some() {
        warn!(answer, "answer already recorded, keeping the first");
        return;
    }
    *slot = Some(value);
}
