//! Generation plan: the ordered file actions for one run

use crate::config::Configuration;
use crate::resolver::{Resolved, PREPROCESSOR_STYLESHEET_EXTENSION, STYLESHEET_EXTENSION};
use std::path::{Path, PathBuf};

/// Correction applied to rendered text before it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    None,
    /// Turn escaped-quote markers back into `'`
    NormalizeQuotes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Write a template verbatim
    Copy { asset: &'static str, dest: PathBuf },
    /// Render a template with the project context
    Render {
        template: &'static str,
        dest: PathBuf,
        post: PostProcess,
    },
    /// Not written for this configuration
    Skip { dest: PathBuf, reason: &'static str },
}

impl FileAction {
    pub fn dest(&self) -> &Path {
        match self {
            FileAction::Copy { dest, .. }
            | FileAction::Render { dest, .. }
            | FileAction::Skip { dest, .. } => dest,
        }
    }
}

/// Ordered file actions built once from a completed configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    actions: Vec<FileAction>,
}

/// Stylesheet asset for the preprocessor / UI-framework combination
fn stylesheet_asset(preprocessor: bool, ui_framework: bool) -> &'static str {
    match (preprocessor, ui_framework) {
        (false, false) => "styles/main.css",
        (false, true) => "styles/main.bootstrap.css",
        (true, false) => "styles/main.scss",
        (true, true) => "styles/main.bootstrap.scss",
    }
}

impl GenerationPlan {
    pub fn build(config: &Configuration, resolved: &Resolved) -> Self {
        let app = Path::new(config.app_path());
        let mut actions = Vec::new();

        // Static per-project files
        actions.push(FileAction::Copy {
            asset: "app/404.html",
            dest: app.join("404.html"),
        });
        actions.push(FileAction::Copy {
            asset: "app/robots.txt",
            dest: app.join("robots.txt"),
        });

        let preprocessor = config.use_style_preprocessor();
        let ui_framework = config.include_ui_framework();
        let chosen = stylesheet_asset(preprocessor, ui_framework);
        actions.push(FileAction::Copy {
            asset: chosen,
            dest: app.join(format!("styles/main.{}", resolved.stylesheet_extension)),
        });
        let other_extension = if preprocessor {
            STYLESHEET_EXTENSION
        } else {
            PREPROCESSOR_STYLESHEET_EXTENSION
        };
        actions.push(FileAction::Skip {
            dest: app.join(format!("styles/main.{other_extension}")),
            reason: "stylesheet variant not selected",
        });

        // Markup entry file
        actions.push(FileAction::Render {
            template: "app/index.html",
            dest: app.join("index.html"),
            post: PostProcess::NormalizeQuotes,
        });

        // Manifests and build config
        for (template, dest) in [
            ("root/bower.json", PathBuf::from("bower.json")),
            ("root/bowerrc", PathBuf::from(".bowerrc")),
            ("root/package.json", PathBuf::from("package.json")),
            ("root/Gruntfile.js", PathBuf::from("Gruntfile.js")),
            ("scripts/main.js", app.join("scripts/main.js")),
            ("scripts/test-main.js", PathBuf::from("test/test-main.js")),
        ] {
            actions.push(FileAction::Render {
                template,
                dest,
                post: PostProcess::None,
            });
        }

        Self { actions }
    }

    pub fn actions(&self) -> &[FileAction] {
        &self.actions
    }

    /// Destinations that will be written, in order
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.actions
            .iter()
            .filter(|a| !matches!(a, FileAction::Skip { .. }))
            .map(FileAction::dest)
    }
}

impl IntoIterator for GenerationPlan {
    type Item = FileAction;
    type IntoIter = std::vec::IntoIter<FileAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}
