//! Shared setup, application module, and controller units

use super::BuiltinUnits;
use crate::config::Configuration;
use crate::error::Result;
use crate::generate::GenerationReport;
use std::path::{Path, PathBuf};

/// Dotfiles written by the shared setup unit
const COMMON_FILES: [(&str, &str); 4] = [
    ("common/editorconfig", ".editorconfig"),
    ("common/gitattributes", ".gitattributes"),
    ("common/gitignore", ".gitignore"),
    ("common/jshintrc", ".jshintrc"),
];

/// Controller script, view, and spec destinations for `name`
fn controller_files(app_path: &str, name: &str) -> [(&'static str, PathBuf); 3] {
    let app = Path::new(app_path);
    [
        (
            "scripts/controller.js",
            app.join(format!("scripts/controllers/{name}.js")),
        ),
        ("views/view.html", app.join(format!("views/{name}.html"))),
        (
            "spec/controller.js",
            PathBuf::from(format!("test/spec/controllers/{name}.js")),
        ),
    ]
}

impl BuiltinUnits {
    pub(super) async fn common(&self) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        for (asset, dest) in COMMON_FILES {
            let contents = self.renderer.raw(asset)?;
            self.emit(&mut report, PathBuf::from(dest), contents).await?;
        }
        Ok(report)
    }

    pub(super) async fn main(&self, config: &Configuration) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        let context = Self::context(config, &[])?;
        let contents = self.renderer.render("scripts/app.js", &context)?;
        let dest = Path::new(config.app_path()).join("scripts/app.js");
        self.emit(&mut report, dest, contents).await?;
        Ok(report)
    }

    pub(super) async fn controller(
        &self,
        config: &Configuration,
        name: &str,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        let context = Self::controller_context(config, name)?;
        for (template, dest) in controller_files(config.app_path(), name) {
            let contents = self.renderer.render(template, &context)?;
            self.emit(&mut report, dest, contents).await?;
        }
        Ok(report)
    }
}
