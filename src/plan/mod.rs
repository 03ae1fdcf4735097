// src/plan/mod.rs
mod report;
mod runner;

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FlowError, FlowResult};

pub use report::PlanReport;
pub use runner::PlanRunner;

/// Environment variable carrying the previous command's stdout in serial plans
pub const INPUT_ENV: &str = "TASKFLOW_INPUT";

/// Environment variable carrying the current value in map plans
pub const VALUE_ENV: &str = "TASKFLOW_VALUE";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("placeholder pattern is valid"));

/// Which combinator a plan runs its commands through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Serial,
    Parallel,
    Map,
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMode::Serial => write!(f, "serial"),
            PlanMode::Parallel => write!(f, "parallel"),
            PlanMode::Map => write!(f, "map"),
        }
    }
}

/// A flow of shell commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub name: String,
    pub mode: PlanMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Plan {
    pub fn serial(name: impl Into<String>, commands: Vec<String>) -> Self {
        Self {
            name: name.into(),
            mode: PlanMode::Serial,
            commands,
            template: None,
            values: Vec::new(),
        }
    }

    pub fn parallel(name: impl Into<String>, commands: Vec<String>) -> Self {
        Self {
            mode: PlanMode::Parallel,
            ..Self::serial(name, commands)
        }
    }

    pub fn map(name: impl Into<String>, template: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            mode: PlanMode::Map,
            commands: Vec::new(),
            template: Some(template.into()),
            values,
        }
    }

    /// Load a plan from a TOML (`.toml`) or JSON file and validate it
    pub fn load(path: &Path) -> FlowResult<Self> {
        debug!("Loading plan from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| FlowError::FileError {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;

        let mut plan: Plan = if is_toml(path) {
            toml::from_str(&content)
                .map_err(|e| FlowError::SerializationError(format!("Failed to parse TOML: {}", e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| FlowError::SerializationError(format!("Failed to parse JSON: {}", e)))?
        };

        if plan.name.is_empty() {
            plan.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "plan".to_string());
        }

        plan.validate()?;
        Ok(plan)
    }

    /// Save the plan, picking the format from the file extension
    pub fn save(&self, path: &Path) -> FlowResult<()> {
        debug!("Saving plan {} to {}", self.name, path.display());
        let content = if is_toml(path) {
            toml::to_string_pretty(self)
                .map_err(|e| FlowError::SerializationError(format!("Failed to serialize plan: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| FlowError::SerializationError(format!("Failed to serialize plan: {}", e)))?
        };

        std::fs::write(path, content).map_err(|e| FlowError::FileError {
            path: path.to_path_buf(),
            message: format!("Failed to write file: {}", e),
        })
    }

    /// Check that the fields present match the plan's mode
    pub fn validate(&self) -> FlowResult<()> {
        match self.mode {
            PlanMode::Serial | PlanMode::Parallel => {
                if self.template.is_some() || !self.values.is_empty() {
                    return Err(FlowError::InvalidPlan(format!(
                        "plan '{}': template and values only apply to map mode",
                        self.name
                    )));
                }
            }
            PlanMode::Map => {
                if self.template.is_none() {
                    return Err(FlowError::InvalidPlan(format!(
                        "plan '{}': map mode needs a template",
                        self.name
                    )));
                }
                if !self.commands.is_empty() {
                    return Err(FlowError::InvalidPlan(format!(
                        "plan '{}': map mode takes a template, not commands",
                        self.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Number of commands the plan will run
    pub fn len(&self) -> usize {
        match self.mode {
            PlanMode::Map => self.values.len(),
            _ => self.commands.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Replace every `{{ key }}` placeholder in `template` with `replacement`,
/// quoted as a single shell word.
///
/// Placeholders naming other keys are left untouched.
pub fn render(template: &str, key: &str, replacement: &str) -> String {
    let quoted = shell_words::quote(replacement);
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            if &caps[1] == key {
                quoted.to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("toml"))
}
