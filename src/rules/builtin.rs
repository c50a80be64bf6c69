// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in rule checks.
//!
//! Each rule tests one condition on one field of the parsed message.
//! `always` requires the condition, `never` forbids it. Length rules are
//! plain bounds and ignore applicability. Rules other than `*-empty` pass
//! when their field is absent.

use crate::commit::CommitMessage;
use crate::config::{Applicability, RuleName, RuleSpec};

use super::case::CaseMode;
use super::report::LintIssue;

/// A failed check before severity is attached.
struct Finding {
    message: String,
    suggestion: Option<String>,
    line: Option<usize>,
}

impl Finding {
    fn new(message: String) -> Self {
        Self {
            message,
            suggestion: None,
            line: Some(1),
        }
    }

    fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

/// Evaluate one enabled rule against a parsed message.
pub fn check_rule(rule: RuleName, spec: &RuleSpec, message: &CommitMessage) -> Option<LintIssue> {
    if !spec.is_enabled() {
        return None;
    }

    let when = spec.applicability;
    let finding = match rule {
        RuleName::TypeEnum => check_enum("type", message.commit_type.as_deref(), spec, when),
        RuleName::TypeEmpty => check_empty("type", message.commit_type.as_deref(), when),
        RuleName::TypeCase => check_case("type", message.commit_type.as_deref(), spec, when),
        RuleName::TypeMaxLength => check_max_length("type", message.commit_type.as_deref(), spec),
        RuleName::TypeMinLength => check_min_length("type", message.commit_type.as_deref(), spec),
        RuleName::ScopeEnum => check_enum("scope", message.scope.as_deref(), spec, when),
        RuleName::ScopeEmpty => check_empty("scope", message.scope.as_deref(), when),
        RuleName::ScopeCase => check_case("scope", message.scope.as_deref(), spec, when),
        RuleName::ScopeMaxLength => check_max_length("scope", message.scope.as_deref(), spec),
        RuleName::SubjectEmpty => check_empty("subject", message.subject.as_deref(), when),
        RuleName::SubjectCase => check_case("subject", message.subject.as_deref(), spec, when),
        RuleName::SubjectFullStop => {
            check_full_stop("subject", message.subject.as_deref(), spec, when)
        }
        RuleName::SubjectMaxLength => {
            check_max_length("subject", message.subject.as_deref(), spec)
        }
        RuleName::SubjectMinLength => {
            check_min_length("subject", message.subject.as_deref(), spec)
        }
        RuleName::HeaderMaxLength => check_max_length("header", Some(message.header.as_str()), spec),
        RuleName::HeaderMinLength => check_min_length("header", Some(message.header.as_str()), spec),
        RuleName::HeaderFullStop => {
            check_full_stop("header", Some(message.header.as_str()), spec, when)
        }
        RuleName::BodyLeadingBlank => check_leading_blank(
            "body",
            message.body.is_some(),
            message.has_body_leading_blank(),
            when,
        ),
        RuleName::BodyEmpty => check_empty("body", message.body.as_deref(), when),
        RuleName::BodyMaxLength => check_max_length("body", message.body.as_deref(), spec),
        RuleName::BodyMaxLineLength => {
            check_max_line_length("body", message.body.as_deref(), spec)
        }
        RuleName::FooterLeadingBlank => check_leading_blank(
            "footer",
            message.footer.is_some(),
            message.has_footer_leading_blank(),
            when,
        ),
        RuleName::FooterEmpty => check_empty("footer", message.footer.as_deref(), when),
        RuleName::FooterMaxLength => check_max_length("footer", message.footer.as_deref(), spec),
        RuleName::FooterMaxLineLength => {
            check_max_line_length("footer", message.footer.as_deref(), spec)
        }
    }?;

    let line = finding.line.map(|offset| line_of(rule, message, offset));

    Some(LintIssue {
        rule,
        severity: spec.severity,
        message: finding.message,
        suggestion: finding.suggestion,
        line,
    })
}

/// Map a field-relative line to a line in the message.
fn line_of(rule: RuleName, message: &CommitMessage, offset: usize) -> usize {
    let field = match rule {
        RuleName::BodyMaxLineLength => message.body.as_deref(),
        RuleName::FooterMaxLineLength => message.footer.as_deref(),
        _ => return offset,
    };

    let start = field
        .and_then(|text| text.lines().next())
        .and_then(|first| message.raw.lines().position(|l| l == first))
        .unwrap_or(0);
    start + offset + 1
}

/// Whether a condition is violated under the given applicability.
fn violated(when: Applicability, holds: bool) -> bool {
    match when {
        Applicability::Always => !holds,
        Applicability::Never => holds,
    }
}

fn must(when: Applicability) -> &'static str {
    match when {
        Applicability::Always => "must",
        Applicability::Never => "must not",
    }
}

fn check_enum(
    field: &str,
    value: Option<&str>,
    spec: &RuleSpec,
    when: Applicability,
) -> Option<Finding> {
    let value = value?;
    let allowed = spec.list()?;
    let listed = allowed.iter().any(|a| a == value);

    violated(when, listed).then(|| {
        Finding::new(format!(
            "{} {} be one of [{}]",
            field,
            must(when),
            allowed.join(", ")
        ))
        .suggest(match when {
            Applicability::Always => format!("Use one of: {}", allowed.join(", ")),
            Applicability::Never => format!("'{}' is not permitted as {}", value, field),
        })
    })
}

fn check_empty(field: &str, value: Option<&str>, when: Applicability) -> Option<Finding> {
    let empty = value.map(|v| v.trim().is_empty()).unwrap_or(true);

    violated(when, empty).then(|| match when {
        Applicability::Never => {
            let finding = Finding::new(format!("{} may not be empty", field));
            match field {
                "type" | "subject" => {
                    finding.suggest("Use the format: type(scope): subject, e.g. 'feat: add login'")
                }
                "scope" => finding.suggest("Add a scope in parentheses: type(scope): subject"),
                _ => finding,
            }
        }
        Applicability::Always => Finding::new(format!("{} must be empty", field)),
    })
}

fn check_case(
    field: &str,
    value: Option<&str>,
    spec: &RuleSpec,
    when: Applicability,
) -> Option<Finding> {
    let value = value?;
    let cases: Vec<CaseMode> = match (spec.text(), spec.list()) {
        (Some(case), _) => vec![case.parse().ok()?],
        (None, Some(cases)) => cases.iter().filter_map(|c| c.parse().ok()).collect(),
        (None, None) => return None,
    };

    let matches = cases.iter().any(|case| case.matches(value));
    let names: Vec<&str> = cases.iter().map(CaseMode::as_str).collect();

    violated(when, matches).then(|| {
        let finding = Finding::new(format!("{} {} be {}", field, must(when), names.join(" or ")));
        if when == Applicability::Always && cases.contains(&CaseMode::LowerCase) {
            finding.suggest(format!("Use '{}'", value.to_lowercase()))
        } else {
            finding
        }
    })
}

fn check_full_stop(
    field: &str,
    value: Option<&str>,
    spec: &RuleSpec,
    when: Applicability,
) -> Option<Finding> {
    let value = value?;
    let stop = spec.text()?;
    let ends = value.ends_with(stop);

    violated(when, ends).then(|| match when {
        Applicability::Never => Finding::new(format!("{} may not end with full stop", field))
            .suggest(format!("Remove the trailing '{}'", stop)),
        Applicability::Always => Finding::new(format!("{} must end with full stop", field))
            .suggest(format!("End the {} with '{}'", field, stop)),
    })
}

fn check_max_length(field: &str, value: Option<&str>, spec: &RuleSpec) -> Option<Finding> {
    let max = spec.number()?;
    let len = value?.chars().count();

    (len > max).then(|| {
        Finding::new(format!(
            "{} must not be longer than {} characters, current length is {}",
            field, max, len
        ))
        .suggest(format!("Shorten the {} to {} characters or less", field, max))
    })
}

fn check_min_length(field: &str, value: Option<&str>, spec: &RuleSpec) -> Option<Finding> {
    let min = spec.number()?;
    let len = value?.chars().count();

    (len < min).then(|| {
        Finding::new(format!(
            "{} must not be shorter than {} characters, current length is {}",
            field, min, len
        ))
        .suggest(format!("Add more detail to the {}", field))
    })
}

fn check_max_line_length(field: &str, value: Option<&str>, spec: &RuleSpec) -> Option<Finding> {
    let max = spec.number()?;
    let (index, len) = value?
        .lines()
        .map(|line| line.chars().count())
        .enumerate()
        .find(|(_, len)| *len > max)?;

    Some(
        Finding::new(format!(
            "{}'s lines must not be longer than {} characters",
            field, max
        ))
        .suggest(format!("Wrap line {} ({} characters)", index + 1, len))
        .at_line(Some(index)),
    )
}

fn check_leading_blank(
    field: &str,
    present: bool,
    has_blank: bool,
    when: Applicability,
) -> Option<Finding> {
    if !present {
        return None;
    }

    violated(when, has_blank).then(|| {
        Finding::new(format!("{} {} have leading blank line", field, must(when)))
            .suggest(format!("Separate the {} with an empty line", field))
            .at_line(None)
    })
}
