// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ConfigError, LintError, Result};
use std::path::{Path, PathBuf};

use super::rule_set::RuleSet;
use super::schema::LintConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["cklint.toml", ".cklint.toml", ".config/cklint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(found) = find_in_dir(&current) {
            return Some(found);
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(found) = find_in_dir(&home) {
            return Some(found);
        }
    }

    // XDG config directory
    let xdg = dirs::config_dir()?.join("cklint").join("config.toml");
    xdg.exists().then_some(xdg)
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<LintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(LintConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse and validate configuration from a TOML string.
///
/// Unknown rules and ill-typed parameters are rejected here, before any
/// message is linted.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    let config: LintConfig = toml::from_str(content).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    RuleSet::from_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IgnoreSpec, RuleName, Severity};
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        let rule_set = config.rule_set().unwrap();
        assert_eq!(rule_set, RuleSet::default());
    }

    #[test]
    fn test_parse_overrides_single_rule() {
        let toml = r#"
[rules]
subject-max-length = [1, "always", 50]
"#;
        let rule_set = parse_config(toml).unwrap().rule_set().unwrap();
        let spec = rule_set.get(RuleName::SubjectMaxLength).unwrap();
        assert_eq!(spec.severity, Severity::Warning);
        assert_eq!(spec.number(), Some(50));
        // Untouched defaults survive.
        assert!(rule_set.get(RuleName::TypeEnum).is_some());
    }

    #[test]
    fn test_parse_without_defaults() {
        let toml = r#"
extends_defaults = false

[rules]
type-empty = [2, "never"]
"#;
        let rule_set = parse_config(toml).unwrap().rule_set().unwrap();
        assert_eq!(rule_set.rules.len(), 1);
    }

    #[test]
    fn test_parse_unrecognized_rule() {
        let toml = r#"
[rules]
type-enumm = [2, "always", ["feat"]]
"#;
        let err = parse_config(toml).unwrap_err();
        assert!(matches!(
            err,
            LintError::Config(ConfigError::UnrecognizedRule { ref rule }) if rule == "type-enumm"
        ));
    }

    #[test]
    fn test_parse_wrong_param_kind() {
        let toml = r#"
[rules]
header-max-length = [2, "always", "seventy-two"]
"#;
        assert!(matches!(
            parse_config(toml),
            Err(LintError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_parse_ignores() {
        let toml = r#"
default_ignores = false

[[ignores]]
pattern = "^release:"
"#;
        let rule_set = parse_config(toml).unwrap().rule_set().unwrap();
        assert!(!rule_set.default_ignores);
        assert_eq!(
            rule_set.ignores,
            vec![IgnoreSpec::Pattern("^release:".into())]
        );
    }

    #[test]
    fn test_parse_invalid_ignore_pattern() {
        let toml = r#"
[[ignores]]
pattern = "(unclosed"
"#;
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("nope.toml"));
        assert!(matches!(
            result,
            Err(LintError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".cklint.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".cklint.toml"));
    }
}
