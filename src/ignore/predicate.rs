// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled ignore predicates.

use regex::Regex;

use super::defaults::default_ignores;
use crate::config::{IgnoreSpec, RuleSet};
use crate::error::{ConfigError, Result};

/// A pure predicate over the raw commit message.
#[derive(Debug, Clone)]
pub enum IgnorePredicate {
    /// Literal, case-sensitive prefix anchored at the start of the message.
    Prefix { name: String, prefix: String },
    /// Regular expression searched in the message.
    Pattern { name: String, regex: Regex },
}

impl IgnorePredicate {
    /// Compile a configured predicate.
    pub fn compile(spec: &IgnoreSpec) -> Result<Self> {
        match spec {
            IgnoreSpec::Prefix(prefix) => Ok(IgnorePredicate::Prefix {
                name: format!("prefix:{}", prefix),
                prefix: prefix.clone(),
            }),
            IgnoreSpec::Pattern(pattern) => {
                let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    key: "ignores.pattern".to_string(),
                    message: e.to_string(),
                })?;
                Ok(IgnorePredicate::Pattern {
                    name: format!("pattern:{}", pattern),
                    regex,
                })
            }
        }
    }

    /// Whether the predicate exempts this message.
    pub fn matches(&self, message: &str) -> bool {
        match self {
            IgnorePredicate::Prefix { prefix, .. } => message.starts_with(prefix.as_str()),
            IgnorePredicate::Pattern { regex, .. } => regex.is_match(message),
        }
    }

    /// Name used when reporting why a message was skipped.
    pub fn name(&self) -> &str {
        match self {
            IgnorePredicate::Prefix { name, .. } | IgnorePredicate::Pattern { name, .. } => name,
        }
    }
}

/// The ordered ignore predicates of a rule set.
#[derive(Debug, Clone, Default)]
pub struct Ignores {
    use_defaults: bool,
    custom: Vec<IgnorePredicate>,
}

impl Ignores {
    /// Build the predicates described by a rule set.
    pub fn from_rule_set(rule_set: &RuleSet) -> Result<Self> {
        let custom = rule_set
            .ignores
            .iter()
            .map(IgnorePredicate::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            use_defaults: rule_set.default_ignores,
            custom,
        })
    }

    /// Iterate over all active predicates: built-ins first, then custom ones.
    pub fn iter(&self) -> impl Iterator<Item = &IgnorePredicate> {
        let defaults: &[IgnorePredicate] = if self.use_defaults {
            default_ignores()
        } else {
            &[]
        };
        defaults.iter().chain(self.custom.iter())
    }

    /// The first predicate that exempts the message, if any.
    pub fn matching(&self, message: &str) -> Option<&IgnorePredicate> {
        self.iter().find(|predicate| predicate.matches(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_set(default_ignores: bool, ignores: Vec<IgnoreSpec>) -> RuleSet {
        RuleSet {
            default_ignores,
            ignores,
            ..RuleSet::default()
        }
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let predicate = IgnorePredicate::compile(&IgnoreSpec::Prefix("Merge".into())).unwrap();
        assert!(predicate.matches("Merge branch 'main' into feature"));
        assert!(predicate.matches("Merged it"));
        assert!(!predicate.matches("merge branch 'main'"));
        assert!(!predicate.matches(" Merge branch"));
    }

    #[test]
    fn test_custom_only() {
        let ignores =
            Ignores::from_rule_set(&rule_set(false, vec![IgnoreSpec::Prefix("Merge".into())]))
                .unwrap();

        // A revert is only skipped by the built-ins.
        assert!(ignores.matching("Revert \"feat: x\"").is_none());
        assert_eq!(
            ignores.matching("Merge branch 'main'").map(|p| p.name()),
            Some("prefix:Merge")
        );
    }

    #[test]
    fn test_defaults_run_first() {
        let ignores = Ignores::from_rule_set(&RuleSet::default()).unwrap();
        let hit = ignores.matching("Merge branch 'main' into feature").unwrap();
        assert_eq!(hit.name(), "merge-branch");
    }

    #[test]
    fn test_pattern_predicate() {
        let ignores =
            Ignores::from_rule_set(&rule_set(false, vec![IgnoreSpec::Pattern(r"^WIP\b".into())]))
                .unwrap();
        assert!(ignores.matching("WIP do not merge").is_some());
        assert!(ignores.matching("feat: WIP").is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = Ignores::from_rule_set(&rule_set(false, vec![IgnoreSpec::Pattern("(".into())]));
        assert!(result.is_err());
    }

    #[test]
    fn test_no_predicates() {
        let ignores = Ignores::from_rule_set(&rule_set(false, Vec::new())).unwrap();
        assert_eq!(ignores.iter().count(), 0);
        assert!(ignores.matching("Merge branch 'main'").is_none());
    }
}
