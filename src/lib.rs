// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cklint - Conventional commit message linter
//!
//! Checks commit messages against a configurable rule set in the style of
//! commitlint's conventional configuration.
//!
//! # Features
//!
//! - **Rule Set**: `type-enum`, `type-case`, length and full-stop rules with
//!   OFF/WARNING/ERROR severities, configured in TOML
//! - **Ignore Predicates**: merge, revert and fixup commits are exempted
//!   before any rule runs
//! - **Git Integration**: lint single commits or `from..to` ranges
//! - **Git Hooks**: install a `commit-msg` hook that runs the linter
//!
//! # Example
//!
//! ```no_run
//! use cklint::config::LintConfig;
//! use cklint::rules::Linter;
//!
//! let config = LintConfig::load().unwrap();
//! let linter = Linter::new(config.rule_set().unwrap()).unwrap();
//!
//! let report = linter.lint("Feat: add login flow");
//! assert!(!report.is_valid());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod ignore;
pub mod rules;

// Re-exports for convenience
pub use config::{LintConfig, RuleSet};
pub use error::{LintError, Result};
pub use rules::{LintReport, Linter};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cklint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
