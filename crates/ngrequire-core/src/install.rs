//! Package installation
//!
//! [`install`] runs `npm install` then `bower install` through an
//! [`Installer`] and hands the outcome to a completion callback. The callback
//! fires exactly once when installation succeeds or is skipped; a failed
//! command returns its error instead and the callback never fires.

use crate::error::{Error, Result};
use async_trait::async_trait;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// Commands run, in order, by a non-skipped installation
pub const INSTALL_COMMANDS: [(&str, &[&str]); 2] = [("npm", &["install"]), ("bower", &["install"])];

/// Shown before installing unless the message is suppressed
pub const INSTALL_NOTICE: &str = "I'm all done. Running npm install & bower install for you to install \
the required dependencies. If this fails, try running the command yourself.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub skip_install: bool,
    pub skip_message: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Skipped,
}

/// Runs package-manager commands in the project directory
#[async_trait]
pub trait Installer: Send + Sync {
    async fn run(&self, root: &Path, program: &str, args: &[&str]) -> Result<()>;
}

/// Install project dependencies, then call `on_complete` with the outcome
pub async fn install<F>(
    installer: &dyn Installer,
    root: &Path,
    options: InstallOptions,
    on_complete: F,
) -> Result<()>
where
    F: FnOnce(InstallOutcome) -> Result<()>,
{
    if options.skip_install {
        debug!("installation skipped");
        return on_complete(InstallOutcome::Skipped);
    }

    if !options.skip_message {
        println!();
        println!("{}", INSTALL_NOTICE.yellow());
        println!();
    }

    for (program, args) in INSTALL_COMMANDS {
        installer.run(root, program, args).await?;
    }

    info!("dependencies installed");
    on_complete(InstallOutcome::Installed)
}

/// Runs commands as child processes, streaming their output
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessInstaller;

#[async_trait]
impl Installer for ProcessInstaller {
    async fn run(&self, root: &Path, program: &str, args: &[&str]) -> Result<()> {
        let cmd = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{} {}", "Running:".dimmed(), cmd.yellow());

        let mut child = Command::new(program)
            .args(args)
            .current_dir(root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Install(format!("failed to start `{cmd}`: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Install(format!("`{cmd}`: stdout not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Install(format!("`{cmd}`: stderr not captured")))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                },
                line = stderr_reader.next_line(), if stderr_open => match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                },
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| Error::Install(format!("failed to wait for `{cmd}`: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Install(format!(
                "`{}` exited with code {}",
                cmd,
                status.code().unwrap_or(-1)
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingInstaller {
        commands: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl Installer for RecordingInstaller {
        async fn run(&self, _root: &Path, program: &str, _args: &[&str]) -> Result<()> {
            self.commands.lock().unwrap().push(program.to_string());
            if self.fail_on == Some(program) {
                return Err(Error::Install(format!("{program} failed")));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_skip_still_fires_callback() {
        let installer = RecordingInstaller::default();
        let mut outcomes = Vec::new();
        let options = InstallOptions {
            skip_install: true,
            skip_message: true,
        };

        install(&installer, Path::new("."), options, |outcome| {
            outcomes.push(outcome);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(outcomes, vec![InstallOutcome::Skipped]);
        assert!(installer.commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_install_runs_npm_then_bower() {
        let installer = RecordingInstaller::default();
        let mut outcomes = Vec::new();
        let options = InstallOptions {
            skip_install: false,
            skip_message: true,
        };

        install(&installer, Path::new("."), options, |outcome| {
            outcomes.push(outcome);
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(outcomes, vec![InstallOutcome::Installed]);
        assert_eq!(*installer.commands.lock().unwrap(), vec!["npm", "bower"]);
    }

    #[tokio::test]
    async fn test_failed_command_skips_callback() {
        let installer = RecordingInstaller {
            fail_on: Some("npm"),
            ..Default::default()
        };
        let mut fired = false;
        let options = InstallOptions {
            skip_install: false,
            skip_message: true,
        };

        let result = install(&installer, Path::new("."), options, |_| {
            fired = true;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Install(_))));
        assert!(!fired);
        assert_eq!(*installer.commands.lock().unwrap(), vec!["npm"]);
    }

    #[tokio::test]
    async fn test_process_installer_reports_exit_code() {
        let err = ProcessInstaller
            .run(Path::new("."), "sh", &["-c", "exit 3"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[tokio::test]
    async fn test_process_installer_missing_program() {
        let err = ProcessInstaller
            .run(Path::new("."), "definitely-not-a-real-program-xyz", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Install(_)));
    }
}
