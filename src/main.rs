use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use xbench::cli::{CliArgs, USAGE};
use xbench::report::write_results;
use xbench::{HarnessConfig, Reporter, Runner, Selector, SuiteConfig, standard_registry};

/// Exit status for configuration, usage and registration errors.
const EXIT_FATAL: u8 = 2;

fn version() -> String {
    format!(
        "xbench {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("XBENCH_GIT_HASH"),
        env!("XBENCH_PROFILE")
    )
}

fn run(args: CliArgs, reporter: Reporter<io::Stdout>) -> anyhow::Result<u8> {
    let settings = HarnessConfig::load(&args.env)
        .with_context(|| format!("loading settings for env '{}'", args.env))?;
    let _log_guard = xbench::logging::init_logging(&settings);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("XBENCH_GIT_HASH"),
        profile = env!("XBENCH_PROFILE"),
        env = %args.env,
        "Starting xbench"
    );

    let config_path = args
        .config_path
        .unwrap_or_else(|| PathBuf::from(&settings.suite_config));
    let suite = SuiteConfig::load(&config_path)
        .with_context(|| format!("loading suite config {}", config_path.display()))?;
    let registry = standard_registry().context("building workload registry")?;

    let selector = Selector::new(args.filter.as_deref());
    let summary = Runner::new(&registry, &suite, reporter).run_all(&selector)?;

    let results_path = args
        .results_path
        .or_else(|| settings.results_path.as_ref().map(PathBuf::from));
    if let Some(path) = results_path {
        write_results(&path, &summary)
            .with_context(|| format!("writing results to {}", path.display()))?;
    }

    Ok(summary.exit_code())
}

fn main() -> ExitCode {
    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(EXIT_FATAL);
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.version {
        println!("{}", version());
        return ExitCode::SUCCESS;
    }

    // The start marker precedes everything else on stdout.
    let mut reporter = Reporter::new(io::stdout());
    if let Err(e) = reporter.start_marker(chrono::Utc::now().timestamp_millis()) {
        eprintln!("Error: {e}");
        return ExitCode::from(EXIT_FATAL);
    }

    match run(args, reporter) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
