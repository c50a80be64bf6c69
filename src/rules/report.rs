// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint result types.

use crate::cli::args::OutputFormat;
use crate::config::{RuleName, Severity};
use crate::error::ValidationError;
use console::{style, Style};

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Rule that failed.
    pub rule: RuleName,
    /// Severity the rule is configured with.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Line number where the issue was found.
    pub line: Option<usize>,
}

impl LintIssue {
    /// Whether this issue blocks the commit.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let rule_style = if self.is_error() {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} [{}]",
            prefix,
            self.message,
            rule_style.apply_to(self.rule.as_str())
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.rule.as_str(),
            "severity": self.severity.as_str(),
            "message": self.message,
            "suggestion": self.suggestion,
            "line": self.line,
        })
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    /// The message as it was linted.
    pub input: String,
    /// Commit SHA if linting an existing commit.
    pub commit_sha: Option<String>,
    /// Name of the ignore predicate that exempted the message.
    pub ignored_by: Option<String>,
    /// Whether the message declares a breaking change.
    pub breaking: bool,
    /// Error-severity violations.
    pub errors: Vec<LintIssue>,
    /// Warning-severity violations.
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    /// Create a new, empty report.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Create a report for an exempted message.
    pub fn ignored(input: impl Into<String>, predicate: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ignored_by: Some(predicate.into()),
            ..Self::default()
        }
    }

    /// Record an issue under its severity.
    pub fn push(&mut self, issue: LintIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Off => {}
        }
    }

    /// Whether the message was exempted from linting.
    pub fn is_ignored(&self) -> bool {
        self.ignored_by.is_some()
    }

    /// Check if linting passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the report passes, treating warnings as errors in strict mode.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && !(strict && !self.warnings.is_empty())
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &LintIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Check whether a given rule was violated.
    pub fn violates(&self, rule: RuleName) -> bool {
        self.issues().any(|issue| issue.rule == rule)
    }

    /// Turn a failing report into the error the CLI exits with.
    pub fn into_result(self, strict: bool) -> Result<Self, ValidationError> {
        if self.passes(strict) {
            return Ok(self);
        }

        let mut blocking = self
            .issues()
            .filter(|issue| strict || issue.is_error())
            .map(|issue| (issue.rule, issue.severity));

        match (blocking.next(), blocking.next()) {
            (Some((rule, severity)), None) => Err(ValidationError::RuleViolation {
                rule: rule.to_string(),
                severity,
            }),
            _ => Err(ValidationError::Failed {
                errors: self.errors.len(),
                warnings: self.warnings.len(),
            }),
        }
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => println!(
                "{}",
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            ),
            _ => self.print_text(),
        }
    }

    /// Print in text format.
    fn print_text(&self) {
        let first_line = self.input.lines().next().unwrap_or("");

        let status = if self.is_ignored() {
            style("○").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                println!("{} {} {}", status, style(short_sha).cyan(), first_line);
            }
            None => println!("{} {}", status, first_line),
        }

        if let Some(ref predicate) = self.ignored_by {
            println!("  {}", style(format!("ignored ({})", predicate)).dim());
            return;
        }

        for issue in self.issues() {
            println!("  {}", issue.format());
        }

        if self.issue_count() > 0 {
            println!("  {}", style(self.summary()).bold());
        }
    }

    /// Render the report as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.is_ignored(),
            "ignored_by": self.ignored_by,
            "commit": self.commit_sha,
            "breaking": self.breaking,
            "input": self.input,
            "errors": self.errors.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_ignored() {
            "Ignored".to_string()
        } else if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}
