//! Charm-style CLI flow using cliclack

use crate::config::{Configuration, InitialContext};
use crate::generate::{ExistingFiles, Orchestrator, Workspace, GUIDANCE};
use crate::install::{InstallOptions, ProcessInstaller};
use crate::pipeline::{Answers, ClackPrompter, Pipeline, Prompter, ScriptedPrompter};
use crate::templates::{HandlebarsRenderer, TemplateSource};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

const WELCOME: &str = "Out of the box I include Bootstrap and some AngularJS recommended modules.";

const MINSAFE_REMOVED: &str = "The --minsafe flag has been removed. For more information, see\n\
https://github.com/yeoman/generator-angular#minification-safe.";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name; defaults to the project directory name
    pub app_name: Option<String>,

    /// Suffix appended to the root module name
    pub app_suffix: Option<String>,

    /// Application source directory, overriding `bower.json`'s `appPath`
    pub app_path: Option<PathBuf>,

    /// Project directory to generate into
    pub directory: Option<PathBuf>,

    /// Local directory with template overrides
    pub template_dir: Option<PathBuf>,

    /// YAML file answering the configuration questions
    pub answers: Option<PathBuf>,

    /// Accept every default answer (non-interactive mode)
    pub yes: bool,

    pub skip_install: bool,
    pub skip_message: bool,
    pub skip_welcome_message: bool,

    /// Removed option, only reported
    pub minsafe: bool,

    /// Leave existing files untouched instead of overwriting them
    pub keep_existing: bool,
}

/// Run the generator with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("AngularJS + RequireJS")?;

    if !args.skip_welcome_message {
        cliclack::note("Welcome", WELCOME)?;
    }

    if args.minsafe {
        cliclack::log::error(MINSAFE_REMOVED)?;
    }

    // Step 1: Project directory
    let project_dir = project_directory(&args)?;

    // Step 2: Templates
    let renderer = setup_renderer(&args.template_dir)?;

    // Step 3: Name, suffix and app path
    let initial = Configuration::initial(&InitialContext {
        app_name: args.app_name.clone(),
        app_suffix: args.app_suffix.clone(),
        app_path: args
            .app_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        project_root: project_dir.clone(),
    });
    cliclack::log::info(format!(
        "Module {} in {}/",
        initial.root_module(),
        initial.app_path()
    ))?;

    // Step 4: Questions
    let config = collect_configuration(initial, &args)?;

    // Step 5: Generate, install, wire up
    let existing = if args.keep_existing {
        ExistingFiles::Keep
    } else {
        ExistingFiles::Overwrite
    };
    let orchestrator = Orchestrator::new(
        Workspace::new(&project_dir).with_existing(existing),
        Arc::new(renderer),
        Arc::new(ProcessInstaller),
    );
    let options = InstallOptions {
        skip_install: args.skip_install,
        skip_message: args.skip_message,
    };

    cliclack::log::step(format!("Creating project in {}", project_dir.display()))?;
    let report = orchestrator.generate(&config, options).await?;

    cliclack::log::success(format!("Created {} files", report.written.len()))?;
    if !report.kept.is_empty() {
        cliclack::log::warning(format!(
            "Kept {} existing files unchanged",
            report.kept.len()
        ))?;
    }

    // Step 6: Next steps
    for notice in report.notices.iter().filter(|n| n.as_str() != GUIDANCE) {
        cliclack::log::info(notice)?;
    }
    println!();
    for line in GUIDANCE.lines() {
        println!("  {}", line);
    }
    println!();

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn project_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.exists() {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        cliclack::log::info(format!("Created directory {}", path.display()))?;
    }

    Ok(path)
}

fn setup_renderer(template_dir: &Option<PathBuf>) -> Result<HandlebarsRenderer> {
    let renderer = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            HandlebarsRenderer::new(TemplateSource::local(path.clone()))
        }
        None => HandlebarsRenderer::embedded(),
    };
    Ok(renderer)
}

fn collect_configuration(initial: Configuration, args: &CreateArgs) -> Result<Configuration> {
    let mut prompter: Box<dyn Prompter> = match (&args.answers, args.yes) {
        (Some(path), _) => {
            cliclack::log::info(format!("Using answers from {}", path.display()))?;
            Box::new(ScriptedPrompter::new(Answers::from_yaml_file(path)?))
        }
        (None, true) => Box::new(ScriptedPrompter::defaults()),
        (None, false) => Box::new(ClackPrompter),
    };

    let config = Pipeline::standard().run(initial, prompter.as_mut())?;
    Ok(config)
}
