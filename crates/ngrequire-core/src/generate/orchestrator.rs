//! Generation orchestrator
//!
//! Writes the file set for a completed configuration, hands off to the
//! generation units, installs dependencies and runs the post-install steps.

use super::fs::Workspace;
use super::plan::{FileAction, GenerationPlan, PostProcess};
use super::report::GenerationReport;
use crate::config::{Configuration, FeatureModule};
use crate::error::Result;
use crate::inject::{ignore_pattern, inject};
use crate::install::{install, InstallOptions, InstallOutcome, Installer};
use crate::resolver;
use crate::templates::{normalize_quotes, RenderContext, Renderer};
use crate::units::{BuiltinUnits, LoaderConfigOptions, Task, TaskRunner, TestConfigOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Shown when installation was skipped, instead of injecting
pub const MANUAL_INJECT_HINT: &str = "After running `npm install & bower install`, inject your front end dependencies\ninto your source code by running:\n\n  grunt wiredep";

/// Closing instructions for the user
pub const GUIDANCE: &str = "Everything is set up. Build the project by running\n  grunt build\n\n\
Work on your files with\n  grunt serve\n\n\
which watches your files and opens the project in a browser with live-reload,\n\
so your changes show up as soon as you save them.";

/// Name of the route the route unit scaffolds
pub const DEFAULT_ROUTE: &str = "about";

/// Packages the loader config never lists
pub const LOADER_EXCLUDES: [&str; 3] = ["requirejs", "json3", "es5-shim"];

const MANIFEST: &str = "bower.json";

/// Units run straight after the plan, before installation
pub fn setup_tasks() -> Vec<Task> {
    vec![
        Task::Common,
        Task::Main,
        Task::Controller {
            name: "main".to_string(),
        },
    ]
}

/// Units run after installation, in order
pub fn post_install_tasks(config: &Configuration, options: InstallOptions) -> Vec<Task> {
    let mut tasks = vec![Task::TestConfig(TestConfigOptions {
        travis: true,
        skip_install: options.skip_install,
        components: resolver::test_components(config)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })];

    if config.has_module(FeatureModule::Route) {
        tasks.push(Task::Route {
            name: DEFAULT_ROUTE.to_string(),
        });
    }

    tasks.push(Task::LoaderConfig(LoaderConfigOptions {
        config: Path::new(config.app_path()).join("scripts/main.js"),
        exclude: LOADER_EXCLUDES.iter().map(|s| s.to_string()).collect(),
    }));
    tasks
}

pub struct Orchestrator {
    workspace: Workspace,
    renderer: Arc<dyn Renderer>,
    installer: Arc<dyn Installer>,
    runner: Arc<dyn TaskRunner>,
}

impl Orchestrator {
    /// Orchestrator running the built-in units
    pub fn new(
        workspace: Workspace,
        renderer: Arc<dyn Renderer>,
        installer: Arc<dyn Installer>,
    ) -> Self {
        let runner = Arc::new(BuiltinUnits::new(
            workspace.clone(),
            renderer.clone(),
            installer.clone(),
        ));
        Self {
            workspace,
            renderer,
            installer,
            runner,
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn TaskRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Generate the project for `config`
    pub async fn generate(
        &self,
        config: &Configuration,
        options: InstallOptions,
    ) -> Result<GenerationReport> {
        let mut report = self.write_plan(config).await?;

        for task in setup_tasks() {
            report.merge(self.runner.run(&task, config).await?);
        }

        let manifest = self.workspace.path(MANIFEST);
        let markup_rel = Path::new(config.app_path()).join("index.html");
        let markup = self.workspace.path(&markup_rel);
        let markup_kept = self.workspace.is_kept(&markup_rel);
        let ignore = ignore_pattern(config.app_path())?;
        let mut notices = Vec::new();

        install(
            self.installer.as_ref(),
            self.workspace.root(),
            options,
            |outcome| match outcome {
                InstallOutcome::Installed if markup_kept => {
                    info!(markup = %markup_rel.display(), "markup was kept, not injecting");
                    notices.push(MANUAL_INJECT_HINT.to_string());
                    Ok(())
                }
                InstallOutcome::Installed => inject(&manifest, &markup, &ignore),
                InstallOutcome::Skipped => {
                    notices.push(MANUAL_INJECT_HINT.to_string());
                    Ok(())
                }
            },
        )
        .await?;
        report.notices.extend(notices);

        for task in post_install_tasks(config, options) {
            report.merge(self.runner.run(&task, config).await?);
        }

        report.notices.push(GUIDANCE.to_string());
        info!(
            written = report.written.len(),
            kept = report.kept.len(),
            "generation complete"
        );
        Ok(report)
    }

    /// Execute the plan's file actions in order
    async fn write_plan(&self, config: &Configuration) -> Result<GenerationReport> {
        let resolved = resolver::resolve(config);
        let context = RenderContext::new(config, &resolved).to_value()?;
        let plan = GenerationPlan::build(config, &resolved);
        let mut report = GenerationReport::default();

        for action in plan {
            match action {
                FileAction::Copy { asset, dest } => {
                    let contents = self.renderer.raw(asset)?;
                    self.emit(&mut report, dest, contents).await?;
                }
                FileAction::Render {
                    template,
                    dest,
                    post,
                } => {
                    let rendered = self.renderer.render(template, &context)?;
                    let contents = match post {
                        PostProcess::None => rendered,
                        PostProcess::NormalizeQuotes => normalize_quotes(&rendered),
                    };
                    self.emit(&mut report, dest, contents).await?;
                }
                FileAction::Skip { dest, reason } => {
                    debug!(dest = %dest.display(), reason, "skipped");
                    report.skipped.push((dest, reason));
                }
            }
        }
        Ok(report)
    }

    async fn emit(
        &self,
        report: &mut GenerationReport,
        dest: PathBuf,
        contents: String,
    ) -> Result<()> {
        let emitted = self.workspace.emit(&dest, contents).await?;
        report.record(dest, emitted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureSet;
    use crate::error::Error;
    use crate::templates::HandlebarsRenderer;
    use crate::units::testing::RecordingInstaller;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn configured(modules: &[FeatureModule]) -> Configuration {
        let mut config = Configuration::new("demo", "Demo", "App", "app");
        config.record_style_preprocessor(false);
        config.record_ui_framework(false);
        config.record_style_preprocessor_framework(false);
        config.record_feature_modules(modules.iter().copied().collect::<FeatureSet>());
        config
    }

    /// Records task names instead of running units
    #[derive(Default)]
    struct RecordingRunner {
        tasks: Mutex<Vec<Task>>,
    }

    #[async_trait]
    impl TaskRunner for RecordingRunner {
        async fn run(&self, task: &Task, _config: &Configuration) -> Result<GenerationReport> {
            self.tasks.lock().unwrap().push(task.clone());
            Ok(GenerationReport::default())
        }
    }

    fn orchestrator(root: &Path) -> (Orchestrator, Arc<RecordingRunner>) {
        let runner = Arc::new(RecordingRunner::default());
        let orchestrator = Orchestrator::new(
            Workspace::new(root),
            Arc::new(HandlebarsRenderer::embedded()),
            Arc::new(RecordingInstaller::default()),
        )
        .with_runner(runner.clone());
        (orchestrator, runner)
    }

    #[test]
    fn test_post_install_tasks_order() {
        let options = InstallOptions {
            skip_install: true,
            skip_message: false,
        };
        let names: Vec<_> = post_install_tasks(&configured(&[FeatureModule::Route]), options)
            .iter()
            .map(Task::name)
            .collect();
        assert_eq!(names, vec!["test-config", "route", "loader-config"]);

        let names: Vec<_> = post_install_tasks(&configured(&[]), options)
            .iter()
            .map(Task::name)
            .collect();
        assert_eq!(names, vec!["test-config", "loader-config"]);
    }

    #[test]
    fn test_test_config_receives_components_and_skip_flag() {
        let options = InstallOptions {
            skip_install: true,
            skip_message: true,
        };
        let tasks = post_install_tasks(&configured(&[FeatureModule::Cookies]), options);
        assert_eq!(
            tasks[0],
            Task::TestConfig(TestConfigOptions {
                travis: true,
                skip_install: true,
                components: vec![
                    "angular/angular.js".to_string(),
                    "angular-mocks/angular-mocks.js".to_string(),
                    "angular-cookies/angular-cookies.js".to_string(),
                ],
            })
        );
    }

    #[tokio::test]
    async fn test_skip_install_emits_hint_and_runs_units_in_order() {
        let dir = TempDir::new().unwrap();
        let (orchestrator, runner) = orchestrator(dir.path());
        let options = InstallOptions {
            skip_install: true,
            skip_message: true,
        };

        let report = orchestrator
            .generate(&configured(&[FeatureModule::Route]), options)
            .await
            .unwrap();

        assert_eq!(report.notices, vec![MANUAL_INJECT_HINT.to_string(), GUIDANCE.to_string()]);
        let names: Vec<_> = runner.tasks.lock().unwrap().iter().map(Task::name).collect();
        assert_eq!(
            names,
            vec!["common", "main", "controller", "test-config", "route", "loader-config"]
        );
        assert!(dir.path().join("app/index.html").is_file());
        assert!(dir.path().join("app/styles/main.css").is_file());
        assert!(!dir.path().join("app/styles/main.scss").exists());
    }

    #[tokio::test]
    async fn test_index_quotes_are_normalized() {
        let dir = TempDir::new().unwrap();
        let (orchestrator, _) = orchestrator(dir.path());
        let mut config = Configuration::new("bobsShop", "Bob's shop", "App", "app");
        config.record_style_preprocessor(false);
        config.record_ui_framework(true);
        config.record_style_preprocessor_framework(false);
        config.record_feature_modules(FeatureSet::empty());

        let options = InstallOptions {
            skip_install: true,
            skip_message: true,
        };
        orchestrator.generate(&config, options).await.unwrap();

        let index = std::fs::read_to_string(dir.path().join("app/index.html")).unwrap();
        assert!(index.contains("<title>Bob's shop</title>"));
        assert!(!index.contains("&apos;"));
    }

    #[tokio::test]
    async fn test_installed_run_injects_without_hint() {
        let dir = TempDir::new().unwrap();
        let (orchestrator, _) = orchestrator(dir.path());
        let options = InstallOptions {
            skip_install: false,
            skip_message: true,
        };

        let report = orchestrator.generate(&configured(&[]), options).await.unwrap();
        assert_eq!(report.notices, vec![GUIDANCE.to_string()]);

        // Nothing is installed, so the injected block stays empty
        let index = std::fs::read_to_string(dir.path().join("app/index.html")).unwrap();
        assert!(index.contains("    <!-- bower:css -->\n    <!-- endbower -->"));
    }

    #[tokio::test]
    async fn test_broken_manifest_fails_after_install() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(BrokenManifestRenderer(HandlebarsRenderer::embedded()));
        let orchestrator = Orchestrator::new(
            Workspace::new(dir.path()),
            renderer,
            Arc::new(RecordingInstaller::default()),
        )
        .with_runner(Arc::new(RecordingRunner::default()));
        let options = InstallOptions {
            skip_install: false,
            skip_message: true,
        };

        let err = orchestrator.generate(&configured(&[]), options).await.unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    /// Renders every template normally except the dependency manifest
    struct BrokenManifestRenderer(HandlebarsRenderer);

    impl Renderer for BrokenManifestRenderer {
        fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
            if template == "root/bower.json" {
                return Ok("{ not json".to_string());
            }
            self.0.render(template, context)
        }

        fn raw(&self, template: &str) -> Result<String> {
            self.0.raw(template)
        }
    }
}
