// src/utils/shell.rs
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::config::ShellConfig;
use crate::error::{FlowError, FlowResult};

/// Something that can run a command line and hand back its stdout
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` with the extra environment variables in `env`
    async fn run(&self, command: &str, env: Vec<(String, String)>) -> FlowResult<String>;
}

/// Runs commands through the configured shell (`sh -c` by default)
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: String,
    args: Vec<String>,
    trim_output: bool,
}

impl ShellRunner {
    /// Create a new shell runner from configuration
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            trim_output: config.trim_output,
        }
    }

    /// Execute a shell command
    pub async fn execute_command(&self, cmd: &str, env: Vec<(String, String)>) -> FlowResult<Output> {
        debug!("Executing command: {}", cmd);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(cmd)
            .envs(env)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| FlowError::CommandSpawn {
                command: cmd.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Command failed: {}\nStderr: {}", cmd, stderr);
        } else {
            trace!("Command succeeded: {}", cmd);
        }

        Ok(output)
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(&ShellConfig::default())
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, env: Vec<(String, String)>) -> FlowResult<String> {
        let output = self.execute_command(command, env).await?;

        if !output.status.success() {
            return Err(FlowError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(if self.trim_output {
            stdout.trim_end().to_string()
        } else {
            stdout.into_owned()
        })
    }
}
