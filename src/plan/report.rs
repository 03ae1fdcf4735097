// src/plan/report.rs
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Plan, PlanMode};
use crate::error::{FlowError, FlowResult};

/// Summary of one plan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub id: Uuid,
    pub plan: String,
    pub mode: PlanMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub error: Option<String>,
    /// `null`, the last stdout (serial) or one entry per command (parallel, map)
    pub result: serde_json::Value,
}

impl PlanReport {
    pub fn new(
        plan: &Plan,
        started_at: DateTime<Utc>,
        error: Option<String>,
        result: serde_json::Value,
    ) -> Self {
        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;

        Self {
            id: Uuid::new_v4(),
            plan: plan.name.clone(),
            mode: plan.mode,
            started_at,
            finished_at,
            duration_ms,
            error,
            result,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn to_json(&self, pretty: bool) -> FlowResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| FlowError::SerializationError(format!("Failed to serialize report: {}", e)))
    }

    /// Save the report as JSON
    pub fn save(&self, path: &Path, pretty: bool) -> FlowResult<()> {
        std::fs::write(path, self.to_json(pretty)?).map_err(|e| FlowError::FileError {
            path: path.to_path_buf(),
            message: format!("Failed to write report: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_json_shape() {
        let plan = Plan::parallel("build", vec!["true".to_string(), "false".to_string()]);
        let report = PlanReport::new(
            &plan,
            Utc::now(),
            Some("Command failed".to_string()),
            json!(["", null]),
        );

        let value: serde_json::Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(value["plan"], "build");
        assert_eq!(value["mode"], "parallel");
        assert_eq!(value["error"], "Command failed");
        assert_eq!(value["result"], json!(["", null]));
        assert!(!report.succeeded());
    }
}
