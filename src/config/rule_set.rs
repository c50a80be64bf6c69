// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule set definitions.
//!
//! A rule is configured with the tuple form `[severity, applicability, parameter]`:
//!
//! ```toml
//! [rules]
//! type-enum = [2, "always", ["feat", "fix"]]
//! subject-full-stop = [2, "never", "."]
//! body-max-line-length = [0]
//! ```

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::schema::{IgnoreSpec, LintConfig};
use crate::error::ConfigError;
use crate::rules::CaseMode;

/// How strongly a rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Severity {
    /// The rule is disabled and never evaluated.
    Off = 0,
    /// Violations are reported but do not block.
    Warning = 1,
    /// Violations block the commit.
    Error = 2,
}

impl Severity {
    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, ConfigError> {
        match value {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            _ => Err(ConfigError::InvalidSeverity { value }),
        }
    }
}

impl From<Severity> for i64 {
    fn from(severity: Severity) -> Self {
        severity as i64
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a rule's parameter describes a required or a forbidden condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Get the string representation of the applicability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

/// A rule-specific parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    /// A numeric bound (length rules).
    Number(usize),
    /// A single string: a case mode or a literal.
    Text(String),
    /// A set of allowed strings (enum rules, or several case modes).
    List(Vec<String>),
}

/// The kind of parameter a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    None,
    List,
    Case,
    Literal,
    Number,
}

impl ParamKind {
    fn describe(&self) -> &'static str {
        match self {
            ParamKind::None => "no parameter",
            ParamKind::List => "a list of strings",
            ParamKind::Case => "a case name or a list of case names",
            ParamKind::Literal => "a string",
            ParamKind::Number => "a non-negative integer",
        }
    }
}

/// Rules understood by the linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleName {
    TypeEnum,
    TypeEmpty,
    TypeCase,
    TypeMaxLength,
    TypeMinLength,
    ScopeEnum,
    ScopeEmpty,
    ScopeCase,
    ScopeMaxLength,
    SubjectEmpty,
    SubjectCase,
    SubjectFullStop,
    SubjectMaxLength,
    SubjectMinLength,
    HeaderMaxLength,
    HeaderMinLength,
    HeaderFullStop,
    BodyLeadingBlank,
    BodyEmpty,
    BodyMaxLength,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterEmpty,
    FooterMaxLength,
    FooterMaxLineLength,
}

impl RuleName {
    /// Get the rule identifier as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::TypeEnum => "type-enum",
            RuleName::TypeEmpty => "type-empty",
            RuleName::TypeCase => "type-case",
            RuleName::TypeMaxLength => "type-max-length",
            RuleName::TypeMinLength => "type-min-length",
            RuleName::ScopeEnum => "scope-enum",
            RuleName::ScopeEmpty => "scope-empty",
            RuleName::ScopeCase => "scope-case",
            RuleName::ScopeMaxLength => "scope-max-length",
            RuleName::SubjectEmpty => "subject-empty",
            RuleName::SubjectCase => "subject-case",
            RuleName::SubjectFullStop => "subject-full-stop",
            RuleName::SubjectMaxLength => "subject-max-length",
            RuleName::SubjectMinLength => "subject-min-length",
            RuleName::HeaderMaxLength => "header-max-length",
            RuleName::HeaderMinLength => "header-min-length",
            RuleName::HeaderFullStop => "header-full-stop",
            RuleName::BodyLeadingBlank => "body-leading-blank",
            RuleName::BodyEmpty => "body-empty",
            RuleName::BodyMaxLength => "body-max-length",
            RuleName::BodyMaxLineLength => "body-max-line-length",
            RuleName::FooterLeadingBlank => "footer-leading-blank",
            RuleName::FooterEmpty => "footer-empty",
            RuleName::FooterMaxLength => "footer-max-length",
            RuleName::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    /// Get all known rules.
    pub fn all() -> &'static [RuleName] {
        &[
            RuleName::TypeEnum,
            RuleName::TypeEmpty,
            RuleName::TypeCase,
            RuleName::TypeMaxLength,
            RuleName::TypeMinLength,
            RuleName::ScopeEnum,
            RuleName::ScopeEmpty,
            RuleName::ScopeCase,
            RuleName::ScopeMaxLength,
            RuleName::SubjectEmpty,
            RuleName::SubjectCase,
            RuleName::SubjectFullStop,
            RuleName::SubjectMaxLength,
            RuleName::SubjectMinLength,
            RuleName::HeaderMaxLength,
            RuleName::HeaderMinLength,
            RuleName::HeaderFullStop,
            RuleName::BodyLeadingBlank,
            RuleName::BodyEmpty,
            RuleName::BodyMaxLength,
            RuleName::BodyMaxLineLength,
            RuleName::FooterLeadingBlank,
            RuleName::FooterEmpty,
            RuleName::FooterMaxLength,
            RuleName::FooterMaxLineLength,
        ]
    }

    /// The parameter kind this rule expects when enabled.
    pub fn param_kind(&self) -> ParamKind {
        match self {
            RuleName::TypeEnum | RuleName::ScopeEnum => ParamKind::List,
            RuleName::TypeCase | RuleName::ScopeCase | RuleName::SubjectCase => ParamKind::Case,
            RuleName::SubjectFullStop | RuleName::HeaderFullStop => ParamKind::Literal,
            RuleName::TypeMaxLength
            | RuleName::TypeMinLength
            | RuleName::ScopeMaxLength
            | RuleName::SubjectMaxLength
            | RuleName::SubjectMinLength
            | RuleName::HeaderMaxLength
            | RuleName::HeaderMinLength
            | RuleName::BodyMaxLength
            | RuleName::BodyMaxLineLength
            | RuleName::FooterMaxLength
            | RuleName::FooterMaxLineLength => ParamKind::Number,
            RuleName::TypeEmpty
            | RuleName::ScopeEmpty
            | RuleName::SubjectEmpty
            | RuleName::BodyLeadingBlank
            | RuleName::BodyEmpty
            | RuleName::FooterLeadingBlank
            | RuleName::FooterEmpty => ParamKind::None,
        }
    }
}

impl std::str::FromStr for RuleName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleName::all()
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| ConfigError::UnrecognizedRule {
                rule: s.to_string(),
            })
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RuleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Configuration of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub severity: Severity,
    pub applicability: Applicability,
    pub parameter: Option<RuleParam>,
}

impl RuleSpec {
    /// Create a rule spec without a parameter.
    pub fn new(severity: Severity, applicability: Applicability) -> Self {
        Self {
            severity,
            applicability,
            parameter: None,
        }
    }

    /// A disabled rule.
    pub fn off() -> Self {
        Self::new(Severity::Off, Applicability::Always)
    }

    /// Set the parameter.
    pub fn with_param(mut self, parameter: RuleParam) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Whether the rule takes part in evaluation.
    pub fn is_enabled(&self) -> bool {
        self.severity > Severity::Off
    }

    /// Check that the parameter fits the rule. Disabled rules are not checked.
    pub fn validate_for(&self, rule: RuleName) -> Result<(), ConfigError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let kind = rule.param_kind();
        let ok = match (kind, &self.parameter) {
            (ParamKind::None, None) => true,
            (ParamKind::List, Some(RuleParam::List(_))) => true,
            (ParamKind::Literal, Some(RuleParam::Text(_))) => true,
            (ParamKind::Number, Some(RuleParam::Number(_))) => true,
            (ParamKind::Case, Some(RuleParam::Text(case))) => {
                case.parse::<CaseMode>().map_err(|_| unknown_case(rule, case))?;
                true
            }
            (ParamKind::Case, Some(RuleParam::List(cases))) if !cases.is_empty() => {
                for case in cases {
                    case.parse::<CaseMode>().map_err(|_| unknown_case(rule, case))?;
                }
                true
            }
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                key: format!("rules.{}", rule),
                message: format!("expected {}", kind.describe()),
            })
        }
    }

    /// The parameter as a list of strings, if it is one.
    pub fn list(&self) -> Option<&[String]> {
        match &self.parameter {
            Some(RuleParam::List(values)) => Some(values),
            _ => None,
        }
    }

    /// The parameter as a single string, if it is one.
    pub fn text(&self) -> Option<&str> {
        match &self.parameter {
            Some(RuleParam::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// The parameter as a number, if it is one.
    pub fn number(&self) -> Option<usize> {
        match &self.parameter {
            Some(RuleParam::Number(value)) => Some(*value),
            _ => None,
        }
    }
}

fn unknown_case(rule: RuleName, case: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: format!("rules.{}", rule),
        message: format!("unknown case '{}'", case),
    }
}

impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bare = !self.is_enabled()
            && self.applicability == Applicability::Always
            && self.parameter.is_none();

        let len = if bare {
            1
        } else if self.parameter.is_some() {
            3
        } else {
            2
        };

        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        if !bare {
            seq.serialize_element(&self.applicability)?;
        }
        if let Some(ref parameter) = self.parameter {
            seq.serialize_element(parameter)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleSpecVisitor;

        impl<'de> Visitor<'de> for RuleSpecVisitor {
            type Value = RuleSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array [severity, applicability?, parameter?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleSpec, A::Error> {
                let severity: Severity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let applicability: Applicability = seq.next_element()?.unwrap_or_default();
                let parameter: Option<RuleParam> = seq.next_element()?;

                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }

                Ok(RuleSpec {
                    severity,
                    applicability,
                    parameter,
                })
            }
        }

        deserializer.deserialize_seq(RuleSpecVisitor)
    }
}

/// The resolved, validated rule configuration handed to the linter.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    /// Whether the built-in ignore heuristics apply.
    pub default_ignores: bool,

    /// Custom ignore predicates, evaluated in order.
    pub ignores: Vec<IgnoreSpec>,

    /// Rule configuration keyed by rule.
    pub rules: BTreeMap<RuleName, RuleSpec>,
}

impl Default for RuleSet {
    fn default() -> Self {
        use Applicability::{Always, Never};
        use Severity::{Error, Off, Warning};

        let types = ["feat", "fix", "docs", "style", "refactor", "test", "chore"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        let rules = BTreeMap::from([
            (
                RuleName::TypeEnum,
                RuleSpec::new(Error, Always).with_param(RuleParam::List(types)),
            ),
            (RuleName::TypeEmpty, RuleSpec::new(Error, Never)),
            (
                RuleName::TypeCase,
                RuleSpec::new(Error, Always).with_param(RuleParam::Text("lower-case".into())),
            ),
            (RuleName::SubjectEmpty, RuleSpec::new(Error, Never)),
            (
                RuleName::SubjectFullStop,
                RuleSpec::new(Error, Never).with_param(RuleParam::Text(".".into())),
            ),
            (
                RuleName::SubjectMaxLength,
                RuleSpec::new(Error, Always).with_param(RuleParam::Number(72)),
            ),
            (
                RuleName::HeaderMaxLength,
                RuleSpec::new(Error, Always).with_param(RuleParam::Number(72)),
            ),
            (RuleName::BodyLeadingBlank, RuleSpec::new(Warning, Always)),
            (RuleName::FooterLeadingBlank, RuleSpec::new(Warning, Always)),
            (RuleName::BodyMaxLineLength, RuleSpec::off()),
            (RuleName::FooterMaxLineLength, RuleSpec::off()),
            (RuleName::ScopeEmpty, RuleSpec::new(Off, Never)),
        ]);

        Self {
            default_ignores: true,
            ignores: vec![IgnoreSpec::Prefix("Merge".to_string())],
            rules,
        }
    }
}

impl RuleSet {
    /// Resolve a loaded configuration into a validated rule set.
    ///
    /// Rules from the configuration override the defaults one by one unless
    /// `extends_defaults` is turned off.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        let mut rules = if config.extends_defaults {
            RuleSet::default().rules
        } else {
            BTreeMap::new()
        };

        for (key, spec) in &config.rules {
            let name: RuleName = key.parse()?;
            spec.validate_for(name)?;
            rules.insert(name, spec.clone());
        }

        for ignore in &config.ignores {
            ignore.validate()?;
        }

        Ok(Self {
            default_ignores: config.default_ignores,
            ignores: config.ignores.clone(),
            rules,
        })
    }

    /// Get the configuration of a rule.
    pub fn get(&self, rule: RuleName) -> Option<&RuleSpec> {
        self.rules.get(&rule)
    }

    /// Iterate over the rules that take part in evaluation.
    pub fn enabled(&self) -> impl Iterator<Item = (RuleName, &RuleSpec)> {
        self.rules
            .iter()
            .filter(|(_, spec)| spec.is_enabled())
            .map(|(name, spec)| (*name, spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        rule: RuleSpec,
    }

    fn parse_spec(value: &str) -> Result<RuleSpec, toml::de::Error> {
        toml::from_str::<Wrapper>(&format!("rule = {}", value)).map(|w| w.rule)
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Off);
    }

    #[test]
    fn test_severity_from_int() {
        assert_eq!(Severity::try_from(2).unwrap(), Severity::Error);
        assert!(Severity::try_from(3).is_err());
    }

    #[test]
    fn test_rule_name_round_trip() {
        for rule in RuleName::all() {
            assert_eq!(rule.as_str().parse::<RuleName>().unwrap(), *rule);
        }
        assert!(matches!(
            "type-enumm".parse::<RuleName>(),
            Err(ConfigError::UnrecognizedRule { .. })
        ));
    }

    #[test]
    fn test_parse_full_tuple() {
        let spec = parse_spec(r#"[2, "always", ["feat", "fix"]]"#).unwrap();
        assert_eq!(spec.severity, Severity::Error);
        assert_eq!(spec.applicability, Applicability::Always);
        assert_eq!(spec.list().unwrap(), ["feat", "fix"]);
    }

    #[test]
    fn test_parse_severity_only() {
        let spec = parse_spec("[0]").unwrap();
        assert_eq!(spec, RuleSpec::off());
    }

    #[test]
    fn test_parse_number_param() {
        let spec = parse_spec(r#"[1, "always", 50]"#).unwrap();
        assert_eq!(spec.number(), Some(50));
    }

    #[test]
    fn test_parse_rejects_bad_severity() {
        assert!(parse_spec(r#"[5, "always"]"#).is_err());
        assert!(parse_spec("[]").is_err());
        assert!(parse_spec(r#"[2, "sometimes"]"#).is_err());
    }

    #[test]
    fn test_validate_param_kind() {
        let spec = RuleSpec::new(Severity::Error, Applicability::Always)
            .with_param(RuleParam::Text("72".into()));
        assert!(spec.validate_for(RuleName::HeaderMaxLength).is_err());

        let spec = RuleSpec::new(Severity::Error, Applicability::Always)
            .with_param(RuleParam::Text("shouty-case".into()));
        assert!(spec.validate_for(RuleName::TypeCase).is_err());

        let spec = RuleSpec::new(Severity::Error, Applicability::Always);
        assert!(spec.validate_for(RuleName::TypeEnum).is_err());

        // Disabled rules may omit their parameter.
        assert!(RuleSpec::off().validate_for(RuleName::TypeEnum).is_ok());
    }

    #[test]
    fn test_default_rule_set_is_valid() {
        let rule_set = RuleSet::default();
        assert_eq!(rule_set.rules.len(), 12);
        for (name, spec) in &rule_set.rules {
            spec.validate_for(*name).unwrap();
        }
        assert!(rule_set.default_ignores);
        assert_eq!(rule_set.ignores, vec![IgnoreSpec::Prefix("Merge".into())]);
    }

    #[test]
    fn test_default_rule_set_values() {
        let rule_set = RuleSet::default();
        let type_enum = rule_set.get(RuleName::TypeEnum).unwrap();
        assert_eq!(type_enum.list().unwrap().len(), 7);
        assert_eq!(
            rule_set.get(RuleName::SubjectMaxLength).unwrap().number(),
            Some(72)
        );
        assert_eq!(
            rule_set.get(RuleName::BodyLeadingBlank).unwrap().severity,
            Severity::Warning
        );
        assert!(!rule_set.get(RuleName::ScopeEmpty).unwrap().is_enabled());
        assert_eq!(rule_set.enabled().count(), 9);
    }

    #[test]
    fn test_spec_serialization() {
        #[derive(Serialize)]
        struct Out<'a> {
            rule: &'a RuleSpec,
        }

        let off = toml::to_string(&Out {
            rule: &RuleSpec::off(),
        })
        .unwrap();
        assert_eq!(off.trim(), "rule = [0]");

        let spec = RuleSpec::new(Severity::Error, Applicability::Never)
            .with_param(RuleParam::Text(".".into()));
        let out = toml::to_string(&Out { rule: &spec }).unwrap();
        assert_eq!(out.trim(), r#"rule = [2, "never", "."]"#);
    }
}
