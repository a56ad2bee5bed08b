//! Command-line arguments.
//!
//! ```text
//! xbench [FILTER] [--config|-c PATH] [--env|-e ENV] [--results|-r PATH]
//! xbench --version | --help
//! ```

use std::path::PathBuf;

use crate::error::{HarnessError, Result};

pub const DEFAULT_ENV: &str = "dev";

pub const USAGE: &str =
    "usage: xbench [FILTER] [--config|-c PATH] [--env|-e ENV] [--results|-r PATH]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Case-insensitive substring of workload names to run.
    pub filter: Option<String>,
    /// Overrides `suite_config` from the settings file.
    pub config_path: Option<PathBuf>,
    /// Selects `config/{env}.yaml`.
    pub env: String,
    /// Overrides `results_path` from the settings file.
    pub results_path: Option<PathBuf>,
    pub help: bool,
    pub version: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            filter: None,
            config_path: None,
            env: DEFAULT_ENV.to_string(),
            results_path: None,
            help: false,
            version: false,
        }
    }
}

impl CliArgs {
    /// Parse arguments, program name excluded.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config_path = Some(value(&arg, args.next())?.into()),
                "--env" | "-e" => parsed.env = value(&arg, args.next())?,
                "--results" | "-r" => parsed.results_path = Some(value(&arg, args.next())?.into()),
                "--help" | "-h" => parsed.help = true,
                "--version" | "-V" => parsed.version = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(HarnessError::Usage(format!("unknown option '{flag}'")));
                }
                _ if parsed.filter.is_some() => {
                    return Err(HarnessError::Usage(format!("unexpected argument '{arg}'")));
                }
                _ => parsed.filter = Some(arg),
            }
        }

        Ok(parsed)
    }

    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1))
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String> {
    next.ok_or_else(|| HarnessError::Usage(format!("option '{flag}' needs a value")))
}
