// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Case modes for the `*-case` rules.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref CAMEL: Regex = Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap();
    static ref PASCAL: Regex = Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap();
    static ref KEBAB: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    static ref SNAKE: Regex = Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();
}

/// A casing convention a field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMode {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl CaseMode {
    /// Get the case name as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::LowerCase => "lower-case",
            CaseMode::UpperCase => "upper-case",
            CaseMode::CamelCase => "camel-case",
            CaseMode::KebabCase => "kebab-case",
            CaseMode::PascalCase => "pascal-case",
            CaseMode::SentenceCase => "sentence-case",
            CaseMode::SnakeCase => "snake-case",
            CaseMode::StartCase => "start-case",
        }
    }

    /// Whether the value is written in this case.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            CaseMode::LowerCase => value == value.to_lowercase(),
            CaseMode::UpperCase => value == value.to_uppercase(),
            CaseMode::CamelCase => CAMEL.is_match(value),
            CaseMode::KebabCase => KEBAB.is_match(value),
            CaseMode::PascalCase => PASCAL.is_match(value),
            CaseMode::SnakeCase => SNAKE.is_match(value),
            CaseMode::SentenceCase => starts_upper(value),
            CaseMode::StartCase => value.split_whitespace().all(starts_upper),
        }
    }
}

/// Non-alphabetic first characters count as upper case.
fn starts_upper(word: &str) -> bool {
    word.chars()
        .next()
        .map(|c| !c.is_lowercase())
        .unwrap_or(true)
}

impl std::str::FromStr for CaseMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(CaseMode::LowerCase),
            "upper-case" | "uppercase" => Ok(CaseMode::UpperCase),
            "camel-case" => Ok(CaseMode::CamelCase),
            "kebab-case" => Ok(CaseMode::KebabCase),
            "pascal-case" => Ok(CaseMode::PascalCase),
            "sentence-case" | "sentencecase" => Ok(CaseMode::SentenceCase),
            "snake-case" => Ok(CaseMode::SnakeCase),
            "start-case" => Ok(CaseMode::StartCase),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_and_upper() {
        assert!(CaseMode::LowerCase.matches("feat"));
        assert!(!CaseMode::LowerCase.matches("Feat"));
        assert!(!CaseMode::LowerCase.matches("fEat"));
        assert!(CaseMode::UpperCase.matches("FEAT"));
        assert!(!CaseMode::UpperCase.matches("Feat"));
    }

    #[test]
    fn test_word_cases() {
        assert!(CaseMode::CamelCase.matches("parseHeader"));
        assert!(!CaseMode::CamelCase.matches("ParseHeader"));
        assert!(CaseMode::PascalCase.matches("ParseHeader"));
        assert!(CaseMode::KebabCase.matches("rule-engine"));
        assert!(!CaseMode::KebabCase.matches("rule_engine"));
        assert!(CaseMode::SnakeCase.matches("rule_engine"));
    }

    #[test]
    fn test_sentence_and_start_case() {
        assert!(CaseMode::SentenceCase.matches("Add login flow"));
        assert!(!CaseMode::SentenceCase.matches("add login flow"));
        assert!(CaseMode::StartCase.matches("Add Login Flow"));
        assert!(!CaseMode::StartCase.matches("Add login Flow"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("lower-case".parse::<CaseMode>(), Ok(CaseMode::LowerCase));
        assert!("shouty-case".parse::<CaseMode>().is_err());
    }
}
