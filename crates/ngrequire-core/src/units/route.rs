//! Route scaffold: a controller plus its entry in the application module

use super::BuiltinUnits;
use crate::config::{naming, Configuration};
use crate::error::Result;
use crate::generate::{Emitted, GenerationReport};
use std::path::Path;
use tracing::{info, warn};

const DEPS_NEEDLE: &str = "]/*deps*/";
const INVOKE_NEEDLE: &str = ")/*invoke*/";
const MODULES_NEEDLE: &str = "/*angJSDeps*/";
const ROUTES_NEEDLE: &str = ".otherwise({";

/// Insert `insertion` immediately before the first `needle`
fn insert_before(source: &str, needle: &str, insertion: &str) -> Option<String> {
    let at = source.find(needle)?;
    let mut out = String::with_capacity(source.len() + insertion.len());
    out.push_str(&source[..at]);
    out.push_str(insertion);
    out.push_str(&source[at..]);
    Some(out)
}

/// Wire the controller for route `name` into an application module script
///
/// Adds the controller to the define dependencies, the factory arguments and
/// the module list, and a `.when('/<name>', ...)` entry before the fallback
/// route. A script that already references the controller is returned as is.
pub fn insert_route(app_js: &str, script_app_name: &str, name: &str) -> String {
    let class_name = naming::classify(name);
    let dependency = format!("'controllers/{name}'");
    if app_js.contains(&dependency) {
        return app_js.to_string();
    }

    let line_indent = |needle: &str| -> String {
        app_js
            .find(needle)
            .map(|at| {
                let line_start = app_js[..at].rfind('\n').map_or(0, |i| i + 1);
                app_js[line_start..at]
                    .chars()
                    .take_while(|c| c.is_whitespace())
                    .collect()
            })
            .unwrap_or_default()
    };
    let modules_indent = line_indent(MODULES_NEEDLE);
    let routes_indent = line_indent(ROUTES_NEEDLE);

    let edits = [
        (DEPS_NEEDLE, format!(", {dependency}")),
        (INVOKE_NEEDLE, format!(", {class_name}Ctrl")),
        (
            MODULES_NEEDLE,
            format!("'{script_app_name}.controllers.{class_name}Ctrl',\n{modules_indent}"),
        ),
        (
            ROUTES_NEEDLE,
            format!(
                ".when('/{name}', {{\n{routes_indent}  templateUrl: 'views/{name}.html',\n{routes_indent}  controller: '{class_name}Ctrl'\n{routes_indent}}})\n{routes_indent}"
            ),
        ),
    ];

    let mut out = app_js.to_string();
    for (needle, insertion) in edits {
        match insert_before(&out, needle, &insertion) {
            Some(updated) => out = updated,
            None => warn!(needle, route = name, "needle not found in application module"),
        }
    }
    out
}

impl BuiltinUnits {
    pub(super) async fn route(
        &self,
        config: &Configuration,
        name: &str,
    ) -> Result<GenerationReport> {
        let mut report = self.controller(config, name).await?;

        let app_js = Path::new(config.app_path()).join("scripts/app.js");
        let source = self.workspace.read_to_string(&app_js).await?;
        let updated = insert_route(&source, &config.root_module(), name);
        if updated == source {
            return Ok(report);
        }
        match self.workspace.update(&app_js, updated).await? {
            Emitted::Written => {
                info!(route = name, "route added");
                report.written.push(app_js);
            }
            Emitted::Kept => report.notices.push(format!(
                "{} was kept, so the '{name}' route was not added to it",
                app_js.display()
            )),
        }
        Ok(report)
    }
}
