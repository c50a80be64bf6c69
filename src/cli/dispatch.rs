// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::{style, Term};
use dialoguer::Confirm;
use std::path::Path;

use crate::config::{example_config, LintConfig};
use crate::error::{ConfigError, LintError, Result, ResultExt, ValidationError};
use crate::hooks::HookManager;
use crate::rules::{LintReport, Linter};

use super::args::{Cli, Commands, HooksAction, HooksArgs, InitArgs, LintArgs, LintTarget, OutputFormat};

/// File written by `cklint init`.
const INIT_FILE: &str = ".cklint.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Lint(args) => run_lint(&cli, &load_config(&cli)?, args),
        Commands::Hooks(args) => run_hooks(&load_config(&cli)?, args),
        Commands::Init(args) => run_init(args),
        Commands::PrintConfig => run_print_config(&cli, &load_config(&cli)?),
        Commands::Version => run_version(),
    }
}

/// Load configuration from `--config` or the default locations.
fn load_config(cli: &Cli) -> Result<LintConfig> {
    match &cli.config {
        Some(config_path) => LintConfig::load_from(config_path),
        None => LintConfig::load(),
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: &LintConfig, args: &LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let linter = Linter::new(config.rule_set()?)?;
    let strict = args.strict || config.lint.strict;

    let target = args.target();
    let reports = match &target {
        LintTarget::Message(source) => {
            tracing::debug!("Reading message from {}", source.describe());
            vec![linter.lint(&source.read()?)]
        }
        LintTarget::Commit(reference) => vec![linter.lint_commit(reference)?],
        LintTarget::Range(range) => linter.lint_range(range)?,
    };

    let as_list = matches!(target, LintTarget::Range(_));
    print_reports(&reports, cli.format, as_list);

    let failed = reports.iter().any(|report| !report.passes(strict));
    if failed && cli.format != Some(OutputFormat::Json) {
        if let Some(ref url) = config.lint.help_url {
            println!("\n{} {}", style("ⓘ Get help:").dim(), url);
        }
    }

    match reports.as_slice() {
        [report] if !as_list => {
            report.clone().into_result(strict)?;
            Ok(())
        }
        _ if failed => Err(LintError::Validation(ValidationError::Failed {
            errors: reports.iter().map(|r| r.errors.len()).sum(),
            warnings: reports.iter().map(|r| r.warnings.len()).sum(),
        })),
        _ => Ok(()),
    }
}

/// Print reports. A range is always rendered as a JSON array, even when empty.
fn print_reports(reports: &[LintReport], format: Option<OutputFormat>, as_list: bool) {
    match format {
        Some(OutputFormat::Json) if as_list => {
            let values: Vec<_> = reports.iter().map(LintReport::to_json).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&values).unwrap_or_default()
            );
        }
        _ => {
            for report in reports {
                report.print(format);
            }
        }
    }
}

/// Run the hooks command.
fn run_hooks(config: &LintConfig, args: &HooksArgs) -> Result<()> {
    tracing::debug!("Running hooks command");

    let manager = HookManager::new(config.hooks.clone())?;

    match args.action {
        HooksAction::Install { force } => {
            manager.install_all(force)?;
            println!("{} Installed commit-msg hook", style("✓").green());
        }
        HooksAction::Uninstall => {
            manager.uninstall_all()?;
            println!("{} Uninstalled commit-msg hook", style("✓").green());
        }
        HooksAction::Status => {
            for (hook, installed) in manager.status()? {
                let icon = if installed {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                println!("{} {}", icon, hook);
            }
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(INIT_FILE);

    if config_path.exists() && !args.force {
        if !Term::stdout().is_term() {
            return Err(LintError::Config(ConfigError::AlreadyExists {
                path: config_path.to_path_buf(),
            }));
        }

        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", INIT_FILE))
            .default(false)
            .interact()?;
        if !overwrite {
            return Err(LintError::Cancelled);
        }
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("{} Created {}", style("✓").green(), INIT_FILE);

    Ok(())
}

/// Run the print-config command.
fn run_print_config(cli: &Cli, config: &LintConfig) -> Result<()> {
    let rule_set = config.rule_set()?;

    let output = match cli.format {
        Some(OutputFormat::Json) => {
            serde_json::to_string_pretty(&rule_set).context("Failed to render configuration")?
        }
        _ => toml::to_string_pretty(&rule_set).context("Failed to render configuration")?,
    };

    println!("{}", output);
    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cklint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
