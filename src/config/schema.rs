use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

/// Global application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Filter directive used when neither `RUST_LOG` nor `--verbose` is given
    pub log_level: String,

    /// Pretty-print JSON reports
    pub pretty_output: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pretty_output: true,
        }
    }
}

/// How plan commands are handed to the operating system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub program: String,
    pub args: Vec<String>,

    /// Strip trailing whitespace from captured stdout
    pub trim_output: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string()],
            trim_output: true,
        }
    }
}
