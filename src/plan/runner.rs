// src/plan/runner.rs
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info};

use super::{render, Plan, PlanMode, PlanReport, INPUT_ENV, VALUE_ENV};
use crate::engine::{self, ParallelTask, SerialTask};
use crate::error::{FlowError, FlowResult};
use crate::utils::shell::CommandRunner;

/// Executes plans through the engine combinators
pub struct PlanRunner {
    runner: Arc<dyn CommandRunner>,
}

impl PlanRunner {
    /// Create a new plan runner
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Execute a plan and summarize it.
    ///
    /// Command failures end up in the report; only an invalid plan is
    /// returned as an error.
    pub async fn execute(&self, plan: &Plan) -> FlowResult<PlanReport> {
        plan.validate()?;

        info!("Running plan {} ({} mode, {} commands)", plan.name, plan.mode, plan.len());
        let started_at = Utc::now();

        let (error, result) = match plan.mode {
            PlanMode::Serial => {
                let tasks = plan.commands.iter().map(|command| self.serial_step(command)).collect();
                let outcome = engine::serial(tasks).await;
                outcome.map_value(|value| json!(value)).into_parts()
            }
            PlanMode::Parallel => {
                let tasks = plan.commands.iter().map(|command| self.parallel_step(command)).collect();
                let outcome = engine::parallel(tasks).await;
                outcome.map_value(|value| json!(value)).into_parts()
            }
            PlanMode::Map => {
                let template = plan.template.as_deref().unwrap_or_default();
                let outcome = engine::map(plan.values.clone(), |value| {
                    let command = render(template, "value", &value);
                    let runner = self.runner.clone();
                    async move { runner.run(&command, vec![(VALUE_ENV.to_string(), value)]).await }
                })
                .await;
                outcome.map_value(|value| json!(value)).into_parts()
            }
        };

        if let Some(e) = &error {
            error!("Plan {} failed: {}", plan.name, e);
        } else {
            info!("Plan {} completed", plan.name);
        }

        Ok(PlanReport::new(
            plan,
            started_at,
            error.map(|e| e.to_string()),
            result.unwrap_or(Value::Null),
        ))
    }

    fn serial_step(&self, command: &str) -> SerialTask<String, FlowError> {
        let runner = self.runner.clone();
        let command = command.to_string();

        engine::serial_task(move |input: Option<String>| async move {
            let rendered = render(&command, "input", input.as_deref().unwrap_or_default());
            let env = input
                .map(|input| vec![(INPUT_ENV.to_string(), input)])
                .unwrap_or_default();
            runner.run(&rendered, env).await
        })
    }

    fn parallel_step(&self, command: &str) -> ParallelTask<String, FlowError> {
        let runner = self.runner.clone();
        let command = command.to_string();

        engine::parallel_task(move || async move { runner.run(&command, Vec::new()).await })
    }
}
