use anyhow::Result;
use clap::Parser;
use ngrequire_core::CreateArgs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "NGREQUIRE_LOG";

#[derive(Parser, Debug)]
#[command(name = "ngrequire")]
#[command(about = "Scaffold AngularJS applications wired together with RequireJS")]
#[command(version)]
pub struct Args {
    /// Application name (defaults to the project directory name)
    pub app_name: Option<String>,

    /// Suffix appended to the root module name
    #[arg(long = "app-suffix")]
    pub app_suffix: Option<String>,

    /// Application source directory (defaults to bower.json's appPath, then "app")
    #[arg(long = "app-path", alias = "appPath")]
    pub app_path: Option<PathBuf>,

    /// Project directory to generate into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory with template overrides (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// YAML file answering the configuration questions
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Accept every default answer (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Do not run npm install and bower install
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Do not print the install notice
    #[arg(long = "skip-message")]
    pub skip_message: bool,

    /// Do not print the welcome message
    #[arg(long = "skip-welcome-message")]
    pub skip_welcome_message: bool,

    /// Removed; only reports that it has no effect
    #[arg(long, hide = true)]
    pub minsafe: bool,

    /// Leave existing files untouched instead of overwriting them
    #[arg(long = "keep-existing")]
    pub keep_existing: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        Self {
            app_name: args.app_name,
            app_suffix: args.app_suffix,
            app_path: args.app_path,
            directory: args.directory,
            template_dir: args.template_dir,
            answers: args.answers,
            yes: args.yes,
            skip_install: args.skip_install,
            skip_message: args.skip_message,
            skip_welcome_message: args.skip_welcome_message,
            minsafe: args.minsafe,
            keep_existing: args.keep_existing,
        }
    }
}

/// Diagnostics go to stderr so they never mix with prompts on stdout
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    setup_logging(args.verbose);

    let result = ngrequire_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
