//! Built-in generation units
//!
//! Follow-up scaffolding the generator hands off to after the main file set
//! is written. Each unit is a [`Task`] value run by a [`TaskRunner`];
//! [`BuiltinUnits`] runs them in-process against the project workspace.

mod loader_config;
mod route;
mod scaffold;
mod test_config;

use crate::config::{naming, Configuration};
use crate::error::Result;
use crate::generate::{GenerationReport, Workspace};
use crate::install::Installer;
use crate::resolver;
use crate::templates::{RenderContext, Renderer};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub use loader_config::reconcile_paths;
pub use route::insert_route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfigOptions {
    /// Also write a CI config
    pub travis: bool,
    pub skip_install: bool,
    /// Component files the test runner serves, relative to the components dir
    pub components: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfigOptions {
    /// Loader config file, relative to the project root
    pub config: PathBuf,
    /// Packages never added to the loader paths
    pub exclude: Vec<String>,
}

/// One generation unit invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Editor, VCS and lint settings
    Common,
    /// The application module script
    Main,
    Controller { name: String },
    /// Controller plus a route entry in the application module
    Route { name: String },
    TestConfig(TestConfigOptions),
    LoaderConfig(LoaderConfigOptions),
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::Common => "common",
            Task::Main => "main",
            Task::Controller { .. } => "controller",
            Task::Route { .. } => "route",
            Task::TestConfig(_) => "test-config",
            Task::LoaderConfig(_) => "loader-config",
        }
    }
}

#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self, task: &Task, config: &Configuration) -> Result<GenerationReport>;
}

/// Runs every [`Task`] in-process
pub struct BuiltinUnits {
    workspace: Workspace,
    renderer: Arc<dyn Renderer>,
    installer: Arc<dyn Installer>,
}

impl BuiltinUnits {
    pub fn new(
        workspace: Workspace,
        renderer: Arc<dyn Renderer>,
        installer: Arc<dyn Installer>,
    ) -> Self {
        Self {
            workspace,
            renderer,
            installer,
        }
    }

    /// Project context with unit-specific values layered on top
    fn context(config: &Configuration, extra: &[(&str, Value)]) -> Result<Value> {
        let mut value = RenderContext::new(config, &resolver::resolve(config)).to_value()?;
        if let Value::Object(map) = &mut value {
            for (key, v) in extra {
                map.insert((*key).to_string(), v.clone());
            }
        }
        Ok(value)
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

    fn controller_context(config: &Configuration, name: &str) -> Result<Value> {
        Self::context(
            config,
            &[
                ("name", Value::from(name)),
                ("class_name", Value::from(naming::classify(name))),
            ],
        )
    }
}

#[async_trait]
impl TaskRunner for BuiltinUnits {
    async fn run(&self, task: &Task, config: &Configuration) -> Result<GenerationReport> {
        debug!(unit = task.name(), "running generation unit");
        match task {
            Task::Common => self.common().await,
            Task::Main => self.main(config).await,
            Task::Controller { name } => self.controller(config, name).await,
            Task::Route { name } => self.route(config, name).await,
            Task::TestConfig(options) => self.test_config(config, options).await,
            Task::LoaderConfig(options) => self.loader_config(options).await,
        }
    }
}
