// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures that can be loaded from `.cklint.toml`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rule_set::{RuleSet, RuleSpec};
use crate::error::ConfigError;

/// The main configuration structure for cklint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Whether `rules` are layered over the built-in rule set.
    pub extends_defaults: bool,

    /// Whether the built-in ignore heuristics (merges, reverts, fixups) apply.
    pub default_ignores: bool,

    /// Custom ignore predicates.
    pub ignores: Vec<IgnoreSpec>,

    /// Rule configuration, keyed by rule name.
    pub rules: BTreeMap<String, RuleSpec>,

    /// Lint behaviour options.
    pub lint: LintOptions,

    /// Hook configuration.
    pub hooks: HooksConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            extends_defaults: true,
            default_ignores: true,
            ignores: vec![IgnoreSpec::Prefix("Merge".to_string())],
            rules: BTreeMap::new(),
            lint: LintOptions::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Resolve the rule set this configuration describes.
    pub fn rule_set(&self) -> crate::error::Result<RuleSet> {
        Ok(RuleSet::from_config(self)?)
    }
}

/// A custom ignore predicate as written in the configuration.
///
/// ```toml
/// [[ignores]]
/// prefix = "Merge"
///
/// [[ignores]]
/// pattern = "^WIP\\b"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreSpec {
    /// Exempt messages starting with this literal (case-sensitive).
    Prefix(String),
    /// Exempt messages matching this regular expression.
    Pattern(String),
}

impl IgnoreSpec {
    /// Check that the predicate can be compiled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            IgnoreSpec::Prefix(_) => Ok(()),
            IgnoreSpec::Pattern(pattern) => Regex::new(pattern)
                .map(|_| ())
                .map_err(|e| ConfigError::InvalidValue {
                    key: "ignores.pattern".to_string(),
                    message: e.to_string(),
                }),
        }
    }
}

/// Lint behaviour options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LintOptions {
    /// Treat warnings as errors.
    pub strict: bool,

    /// Help text printed below a failing report.
    pub help_url: Option<String>,
}

/// Hooks configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Command the commit-msg hook invokes.
    pub command: String,

    /// Additional arguments passed to `cklint lint` from the hook.
    pub args: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            command: "cklint".to_string(),
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert!(config.extends_defaults);
        assert!(config.default_ignores);
        assert!(config.rules.is_empty());
        assert!(!config.lint.strict);
        assert_eq!(config.hooks.command, "cklint");
    }

    #[test]
    fn test_ignore_spec_from_toml() {
        let config: LintConfig = toml::from_str(
            r#"
[[ignores]]
prefix = "Merge"

[[ignores]]
pattern = "^WIP"
"#,
        )
        .unwrap();

        assert_eq!(
            config.ignores,
            vec![
                IgnoreSpec::Prefix("Merge".into()),
                IgnoreSpec::Pattern("^WIP".into())
            ]
        );
    }

    #[test]
    fn test_ignore_spec_validate() {
        assert!(IgnoreSpec::Pattern("(".into()).validate().is_err());
        assert!(IgnoreSpec::Pattern("^Merge".into()).validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = LintConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("default_ignores"));
    }
}
