use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::FlowResult;
use crate::plan::{Plan, PlanReport, PlanRunner};
use crate::utils::shell::{CommandRunner, ShellRunner};

use super::commands::Commands;

/// The main application struct
pub struct App {
    config: Config,
    config_path: Option<std::path::PathBuf>,
    runner: PlanRunner,
}

impl App {
    /// Create an application that runs commands through the configured shell
    pub fn new(config: Config, config_path: Option<&Path>) -> Self {
        let shell: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new(&config.shell));
        Self::with_runner(config, config_path, shell)
    }

    /// Create an application with a custom command runner
    pub fn with_runner(config: Config, config_path: Option<&Path>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            config_path: config_path.map(Path::to_path_buf),
            runner: PlanRunner::new(runner),
        }
    }

    /// Execute a command; returns `false` when a plan ran but reported an error
    pub async fn run_command(&self, command: &Commands) -> FlowResult<bool> {
        match command {
            Commands::Run { plan, output } => {
                let plan = Plan::load(plan)?;
                self.run_plan(&plan, output.as_deref()).await
            }
            Commands::Serial { commands, output } => {
                let plan = Plan::serial("serial", commands.clone());
                self.run_plan(&plan, output.as_deref()).await
            }
            Commands::Parallel { commands, output } => {
                let plan = Plan::parallel("parallel", commands.clone());
                self.run_plan(&plan, output.as_deref()).await
            }
            Commands::Map { template, values, output } => {
                let plan = Plan::map("map", template.clone(), values.clone());
                self.run_plan(&plan, output.as_deref()).await
            }
            Commands::Check { plan } => {
                let plan = Plan::load(plan)?;
                println!("Plan '{}' is valid: {} mode, {} commands", plan.name, plan.mode, plan.len());
                Ok(true)
            }
            Commands::Init { force } => {
                let config_path = Config::init(self.config_path.as_deref(), *force)?;
                println!("Configuration initialized at {}", config_path.display());
                Ok(true)
            }
        }
    }

    async fn run_plan(&self, plan: &Plan, output: Option<&Path>) -> FlowResult<bool> {
        let report = self.runner.execute(plan).await?;
        self.emit(&report, output)?;
        Ok(report.succeeded())
    }

    fn emit(&self, report: &PlanReport, output: Option<&Path>) -> FlowResult<()> {
        let pretty = self.config.global.pretty_output;
        match output {
            Some(path) => {
                report.save(path, pretty)?;
                info!("Report written to {}", path.display());
            }
            None => {
                debug!("Writing report {} to stdout", report.id);
                println!("{}", report.to_json(pretty)?);
            }
        }
        Ok(())
    }
}
