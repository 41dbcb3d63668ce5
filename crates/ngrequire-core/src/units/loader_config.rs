//! Module-loader configuration unit
//!
//! Brings the `paths` block of the loader config in line with the packages
//! actually installed in the components directory.

use super::{BuiltinUnits, LoaderConfigOptions};
use crate::components::{relative_path, Components};
use crate::error::{Error, Result};
use crate::generate::{Emitted, GenerationReport};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

const PROJECT_MANIFEST: &str = "bower.json";

/// Merge `installed` entries into the `paths` block of a loader config
///
/// Existing entries keep their position and get their path updated; new
/// packages are appended. A config without a `paths` block is returned as is.
pub fn reconcile_paths(source: &str, installed: &[(String, String)]) -> Result<String> {
    let block = Regex::new(r"(?s)paths:\s*\{(.*?)\n([ \t]*)\}")?;
    let entry = Regex::new(r#"['"]([^'"]+)['"]\s*:\s*['"]([^'"]*)['"]"#)?;

    let Some(caps) = block.captures(source) else {
        warn!("no paths block in loader config");
        return Ok(source.to_string());
    };
    let (Some(body), Some(closing)) = (caps.get(1), caps.get(2)) else {
        return Ok(source.to_string());
    };

    let mut entries: Vec<(String, String)> = entry
        .captures_iter(body.as_str())
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();

    for (name, path) in installed {
        match entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = path.clone(),
            None => entries.push((name.clone(), path.clone())),
        }
    }

    let indent = format!("{}  ", closing.as_str());
    let lines: Vec<String> = entries
        .iter()
        .map(|(name, path)| format!("{indent}'{name}': '{path}'"))
        .collect();

    let mut out = String::with_capacity(source.len());
    out.push_str(&source[..body.start()]);
    out.push('\n');
    out.push_str(&lines.join(",\n"));
    out.push_str(&source[body.end()..]);
    Ok(out)
}

impl BuiltinUnits {
    pub(super) async fn loader_config(
        &self,
        options: &LoaderConfigOptions,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        let manifest_path = self.workspace.path(PROJECT_MANIFEST);
        let content = self.workspace.read_to_string(PROJECT_MANIFEST).await?;
        let manifest: Value = serde_json::from_str(&content).map_err(|source| Error::Manifest {
            path: manifest_path,
            source,
        })?;

        let config_path = self.workspace.path(&options.config);
        let config_dir = config_path.parent().unwrap_or(Path::new("."));

        let installed: Vec<(String, String)> = Components::for_project(self.workspace.root())
            .resolve(&manifest)
            .into_iter()
            .filter(|package| !options.exclude.contains(&package.name))
            .filter_map(|package| {
                let script = package
                    .files
                    .iter()
                    .find(|f| f.extension().and_then(|e| e.to_str()) == Some("js"))?;
                let relative = relative_path(config_dir, script);
                let module = relative.strip_suffix(".js").unwrap_or(&relative).to_string();
                Some((package.name, module))
            })
            .collect();

        if installed.is_empty() {
            debug!("no installed packages for loader config");
            return Ok(report);
        }

        let source = self.workspace.read_to_string(&options.config).await?;
        let updated = reconcile_paths(&source, &installed)?;
        if updated == source {
            return Ok(report);
        }
        match self.workspace.update(&options.config, updated).await? {
            Emitted::Written => {
                info!(packages = installed.len(), "loader paths updated");
                report.written.push(options.config.clone());
            }
            Emitted::Kept => report.notices.push(format!(
                "{} was kept, so its paths were not updated for the installed packages",
                options.config.display()
            )),
        }
        Ok(report)
    }
}
