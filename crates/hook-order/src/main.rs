use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use hook_order::discovery::discover_files;
use hook_order::lint::lint_files;
use hook_order::report::{Summary, render_json, render_text};
use hook_order_config::{HookOrderConfig, RuntimeOverrides, Severity, validate_config};
use hook_order_core::OrderPolicy;

/// Check that test lifecycle hooks appear in canonical order.
#[derive(Parser)]
#[command(name = "hook-order", version, about)]
struct Cli {
    /// Files or directories to check.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "text")]
    format: Format,

    /// Reorder out-of-order hooks in place.
    #[arg(long)]
    fix: bool,

    /// Accept ALIAS in place of CANON (e.g. `test=it`). Repeatable.
    #[arg(long = "alias", value_name = "CANON=ALIAS", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// Ordering policy (lexical or reset-on-call).
    #[arg(long)]
    policy: Option<OrderPolicy>,

    /// Project config file (default: ./.hook-order.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_alias(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=').map(|(c, a)| (c.trim(), a.trim())) {
        Some((canonical, alias)) if !canonical.is_empty() && !alias.is_empty() => {
            Ok((canonical.to_string(), alias.to_string()))
        }
        _ => Err(format!("expected CANON=ALIAS, got '{raw}'")),
    }
}

fn load_config(cli: &Cli) -> Result<HookOrderConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            let user_path = HookOrderConfig::user_config_path();
            HookOrderConfig::load_with_paths(user_path.as_deref(), path)?
        }
        None => {
            let project_root = std::env::current_dir().context("cannot determine CWD")?;
            HookOrderConfig::load(&project_root)?
        }
    };
    config.apply_overrides(&RuntimeOverrides {
        aliases: cli.aliases.clone(),
        policy: cli.policy,
    });
    validate_config(&config).context("invalid configuration")?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let severity = config.rule.severity;
    if !severity.is_enabled() {
        tracing::debug!("rule disabled by configuration");
        return Ok(ExitCode::SUCCESS);
    }

    let files = discover_files(&cli.paths, &config.files)?;
    let options = config.check_options();
    tracing::debug!(
        files = files.len(),
        policy = %options.policy,
        fix = cli.fix,
        "checking hook order"
    );
    let run = lint_files(&files, &options, cli.fix);
    let summary = Summary::from_reports(&run.reports);

    match cli.format {
        Format::Text => print!("{}", render_text(&run.reports, severity)),
        Format::Json => println!("{}", render_json(&run.reports, severity)?),
    }
    eprintln!("{}", summary.describe());

    if run.has_failures() {
        for err in &run.failures {
            eprintln!("error: {err:#}");
        }
        Ok(ExitCode::from(2))
    } else if summary.problems > 0 && severity == Severity::Error {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new(
            "hook_order=debug,hook_order_core=debug,hook_order_config=debug",
        )
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
