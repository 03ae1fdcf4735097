use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(about = "Run shell commands in series, in parallel, or mapped over values")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long, short, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run a plan file (TOML or JSON)
    Run {
        #[arg(help = "Path to plan file")]
        plan: PathBuf,

        #[arg(short, long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Run commands one after another, feeding each the previous output
    Serial {
        #[arg(required = true, help = "Commands to run, {{input}} is the previous output")]
        commands: Vec<String>,

        #[arg(short, long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Run commands all at once
    Parallel {
        #[arg(required = true, help = "Commands to run")]
        commands: Vec<String>,

        #[arg(short, long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Run a command template once per value
    Map {
        #[arg(short, long, help = "Command template, {{value}} is the current value")]
        template: String,

        #[arg(required = true, help = "Values to map over")]
        values: Vec<String>,

        #[arg(short, long, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Load and validate a plan file without running it
    Check {
        #[arg(help = "Path to plan file")]
        plan: PathBuf,
    },

    /// Initialize config
    Init {
        #[arg(short, long, help = "Force overwrite existing configuration")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_map() {
        let args = Args::try_parse_from([
            "taskflow", "--verbose", "map", "--template", "echo {{value}}", "a", "b",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(
            args.command,
            Commands::Map {
                template: "echo {{value}}".to_string(),
                values: vec!["a".to_string(), "b".to_string()],
                output: None,
            }
        );
    }

    #[test]
    fn test_serial_needs_a_command() {
        assert!(Args::try_parse_from(["taskflow", "serial"]).is_err());
    }
}
