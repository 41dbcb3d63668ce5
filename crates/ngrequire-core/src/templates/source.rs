//! Template sources
//!
//! Templates are compiled into the binary. A local template directory can
//! override any of them by name, which is handy while editing templates.

use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Embedded templates, keyed by their path under `templates/`
const EMBEDDED: &[(&str, &str)] = &[
    ("app/index.html", include_str!("../../templates/app/index.html")),
    ("app/404.html", include_str!("../../templates/app/404.html")),
    ("app/robots.txt", include_str!("../../templates/app/robots.txt")),
    ("styles/main.css", include_str!("../../templates/styles/main.css")),
    (
        "styles/main.bootstrap.css",
        include_str!("../../templates/styles/main.bootstrap.css"),
    ),
    ("styles/main.scss", include_str!("../../templates/styles/main.scss")),
    (
        "styles/main.bootstrap.scss",
        include_str!("../../templates/styles/main.bootstrap.scss"),
    ),
    ("root/bower.json", include_str!("../../templates/root/bower.json")),
    ("root/bowerrc", include_str!("../../templates/root/bowerrc")),
    ("root/package.json", include_str!("../../templates/root/package.json")),
    ("root/Gruntfile.js", include_str!("../../templates/root/Gruntfile.js")),
    ("scripts/main.js", include_str!("../../templates/scripts/main.js")),
    ("scripts/test-main.js", include_str!("../../templates/scripts/test-main.js")),
    ("scripts/app.js", include_str!("../../templates/scripts/app.js")),
    ("scripts/controller.js", include_str!("../../templates/scripts/controller.js")),
    ("views/view.html", include_str!("../../templates/views/view.html")),
    ("spec/controller.js", include_str!("../../templates/spec/controller.js")),
    ("test/karma.conf.js", include_str!("../../templates/test/karma.conf.js")),
    ("test/travis.yml", include_str!("../../templates/test/travis.yml")),
    ("common/editorconfig", include_str!("../../templates/common/editorconfig")),
    ("common/gitattributes", include_str!("../../templates/common/gitattributes")),
    ("common/gitignore", include_str!("../../templates/common/gitignore")),
    ("common/jshintrc", include_str!("../../templates/common/jshintrc")),
];

/// Where templates are loaded from
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    #[default]
    Embedded,
    /// Files under this directory take precedence over embedded templates
    Local(PathBuf),
}

impl TemplateSource {
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Names of every template known to the embedded set
    pub fn names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }

    /// Load a template's text by name
    pub fn load(&self, name: &str) -> Result<String> {
        if let TemplateSource::Local(dir) = self {
            let path = dir.join(name);
            if path.is_file() {
                debug!(path = %path.display(), "loading local template");
                return std::fs::read_to_string(&path).map_err(Error::io("read", &path));
            }
            debug!(template = name, "no local override, using embedded");
        }

        EMBEDDED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, content)| (*content).to_string())
            .ok_or_else(|| Error::TemplateMissing(name.to_string()))
    }
}
