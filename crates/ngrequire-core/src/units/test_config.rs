//! Test-runner configuration unit

use super::{BuiltinUnits, TestConfigOptions};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::generate::{Emitted, GenerationReport};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Dev dependencies the test runner needs in `package.json`
const RUNNER_DEV_DEPENDENCIES: [(&str, &str); 6] = [
    ("grunt-karma", "~0.8.0"),
    ("karma", "~0.12.0"),
    ("karma-jasmine", "~0.1.5"),
    ("karma-phantomjs-launcher", "~0.1.3"),
    ("karma-requirejs", "~0.2.1"),
    ("requirejs", "~2.1.11"),
];

const PACKAGE_MANIFEST: &str = "package.json";

/// Add the runner's dev dependencies to a `package.json` document
///
/// Versions already pinned in the document are kept. Returns whether
/// anything was added.
fn merge_dev_dependencies(package: &mut Value) -> bool {
    let Value::Object(root) = package else {
        return false;
    };
    let dev = root
        .entry("devDependencies")
        .or_insert_with(|| Value::Object(Default::default()));
    let Value::Object(dev) = dev else {
        return false;
    };

    let mut changed = false;
    for (name, version) in RUNNER_DEV_DEPENDENCIES {
        if !dev.contains_key(name) {
            dev.insert(name.to_string(), Value::from(version));
            changed = true;
        }
    }
    changed
}

impl BuiltinUnits {
    pub(super) async fn test_config(
        &self,
        config: &Configuration,
        options: &TestConfigOptions,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        let context = Self::context(
            config,
            &[
                ("components", Value::from(options.components.clone())),
                ("travis", Value::from(options.travis)),
            ],
        )?;

        let karma = self.renderer.render("test/karma.conf.js", &context)?;
        self.emit(&mut report, PathBuf::from("karma.conf.js"), karma).await?;

        if options.travis {
            let travis = self.renderer.render("test/travis.yml", &context)?;
            self.emit(&mut report, PathBuf::from(".travis.yml"), travis).await?;
        }

        let content = self.workspace.read_to_string(PACKAGE_MANIFEST).await?;
        let mut package: Value =
            serde_json::from_str(&content).map_err(|source| Error::Manifest {
                path: self.workspace.path(PACKAGE_MANIFEST),
                source,
            })?;

        if !merge_dev_dependencies(&mut package) {
            return Ok(report);
        }
        let mut updated = serde_json::to_string_pretty(&package)?;
        updated.push('\n');

        match self.workspace.update(PACKAGE_MANIFEST, updated).await? {
            Emitted::Kept => {
                let names: Vec<&str> = RUNNER_DEV_DEPENDENCIES
                    .iter()
                    .map(|(name, _)| *name)
                    .collect();
                report.notices.push(format!(
                    "{PACKAGE_MANIFEST} was kept; make sure its devDependencies include {}",
                    names.join(", ")
                ));
            }
            Emitted::Written => {
                report.written.push(PathBuf::from(PACKAGE_MANIFEST));
                if options.skip_install {
                    debug!("skipping test runner install");
                } else {
                    self.installer
                        .run(self.workspace.root(), "npm", &["install"])
                        .await?;
                }
            }
        }

        Ok(report)
    }
}
