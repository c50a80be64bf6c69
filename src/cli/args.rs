// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commit::MessageSource;

/// cklint - Conventional commit message linter
///
/// Checks commit messages against a configurable rule set.
#[derive(Parser, Debug)]
#[command(name = "cklint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CKLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint commit messages
    Lint(LintArgs),

    /// Manage the commit-msg git hook
    Hooks(HooksArgs),

    /// Write a starter configuration file
    Init(InitArgs),

    /// Print the effective rule set
    PrintConfig,

    /// Print version information
    Version,
}

/// Arguments for the lint command.
///
/// With no source flag the message is read from stdin.
#[derive(Args, Debug, Default, Clone)]
pub struct LintArgs {
    /// Read the message from a file (e.g. .git/COMMIT_EDITMSG)
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["message", "commit", "from", "to"])]
    pub edit: Option<PathBuf>,

    /// Lint the given message text
    #[arg(short, long, conflicts_with_all = ["commit", "from", "to"])]
    pub message: Option<String>,

    /// Lint an existing commit
    #[arg(long, value_name = "REF", conflicts_with_all = ["from", "to"])]
    pub commit: Option<String>,

    /// Lint commits after this reference
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,

    /// Lint commits up to this reference (default: HEAD)
    #[arg(long, value_name = "REF", requires = "from")]
    pub to: Option<String>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Where the lint command takes its input from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintTarget {
    /// A single message from stdin, a file or an argument.
    Message(MessageSource),
    /// One commit in the current repository.
    Commit(String),
    /// A `from..to` range of commits.
    Range(String),
}

impl LintArgs {
    /// Resolve the flags into a single input.
    pub fn target(&self) -> LintTarget {
        if let Some(ref path) = self.edit {
            LintTarget::Message(MessageSource::File(path.clone()))
        } else if let Some(ref text) = self.message {
            LintTarget::Message(MessageSource::Text(text.clone()))
        } else if let Some(ref reference) = self.commit {
            LintTarget::Commit(reference.clone())
        } else if let Some(ref from) = self.from {
            let to = self.to.as_deref().unwrap_or("HEAD");
            LintTarget::Range(format!("{}..{}", from, to))
        } else {
            LintTarget::Message(MessageSource::Stdin)
        }
    }
}

/// Arguments for the hooks command.
#[derive(Args, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install the commit-msg hook
    Install {
        /// Replace an existing hook (it is kept as a backup)
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall the commit-msg hook
    Uninstall,

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration without asking
    #[arg(short, long)]
    pub force: bool,
}
