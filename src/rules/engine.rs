// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit message linting.

use crate::commit::CommitMessage;
use crate::config::RuleSet;
use crate::error::Result;
use crate::git;
use crate::ignore::Ignores;

use super::builtin::check_rule;
use super::report::LintReport;

/// Lints commit messages against a rule set.
#[derive(Debug, Clone)]
pub struct Linter {
    rule_set: RuleSet,
    ignores: Ignores,
}

impl Linter {
    /// Create a linter for the given rule set.
    pub fn new(rule_set: RuleSet) -> Result<Self> {
        let ignores = Ignores::from_rule_set(&rule_set)?;
        Ok(Self { rule_set, ignores })
    }

    /// The rule set this linter applies.
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Lint a raw commit message.
    ///
    /// Ignore predicates are consulted first, on the text as received
    /// (before comment stripping); an exempted message is not parsed and
    /// carries no issues.
    pub fn lint(&self, raw: &str) -> LintReport {
        if let Some(predicate) = self.ignores.matching(raw) {
            tracing::debug!("Message ignored by {}", predicate.name());
            return LintReport::ignored(raw.trim_end(), predicate.name());
        }

        self.lint_message(&CommitMessage::parse(raw))
    }

    /// Lint an already parsed message, without ignore predicates.
    pub fn lint_message(&self, message: &CommitMessage) -> LintReport {
        let mut report = LintReport::new(message.raw.clone());
        report.breaking = message.is_breaking;

        for (rule, spec) in self.rule_set.enabled() {
            if let Some(issue) = check_rule(rule, spec, message) {
                tracing::debug!("{} failed: {}", rule, issue.message);
                report.push(issue);
            }
        }

        report
    }

    /// Lint a specific commit by reference.
    pub fn lint_commit(&self, reference: &str) -> Result<LintReport> {
        let (sha, message) = git::get_commit(reference)?;
        let mut report = self.lint(&message);
        report.commit_sha = Some(sha);
        Ok(report)
    }

    /// Lint every commit in a `from..to` range.
    pub fn lint_range(&self, range: &str) -> Result<Vec<LintReport>> {
        let commits = git::get_commit_range(range)?;
        tracing::debug!("Linting {} commits in {}", commits.len(), range);

        Ok(commits
            .into_iter()
            .map(|(sha, message)| {
                let mut report = self.lint(&message);
                report.commit_sha = Some(sha);
                report
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IgnoreSpec, RuleName, Severity};

    fn linter() -> Linter {
        Linter::new(RuleSet::default()).unwrap()
    }

    #[test]
    fn test_valid_message_passes_every_rule() {
        let report = linter().lint("feat: add login flow");
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
        assert!(!report.is_ignored());
    }

    #[test]
    fn test_uppercase_type() {
        let report = linter().lint("Feat: add login flow");
        assert!(report.violates(RuleName::TypeCase));
        assert!(report.errors.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_uppercase_type_is_not_in_enum() {
        // Enum membership is case-sensitive, so both rules report.
        let report = linter().lint("Feat: add login flow");
        let rules: Vec<RuleName> = report.errors.iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec![RuleName::TypeEnum, RuleName::TypeCase]);
    }

    #[test]
    fn test_footer_after_body_line_warns() {
        for raw in [
            "feat: x\n\nsome body text\nBREAKING CHANGE: removed old api",
            "fix: x\n\nbody\nCloses #12",
        ] {
            let report = linter().lint(raw);
            assert!(report.is_valid(), "{}", raw);
            assert!(report.violates(RuleName::FooterLeadingBlank), "{}", raw);
            assert_eq!(report.warnings.len(), 1, "{}", raw);
        }

        let report = linter().lint("fix: x\n\nbody\n\nCloses #12");
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn test_breaking_change_is_reported() {
        assert!(linter().lint("feat(api)!: drop v1").breaking);
        assert!(linter().lint("feat: x\n\nBREAKING CHANGE: gone").breaking);
        assert!(!linter().lint("feat: x").breaking);
    }

    #[test]
    fn test_trailing_period() {
        let report = linter().lint("feat: add login flow.");
        assert!(!report.is_valid());
        assert!(report.violates(RuleName::SubjectFullStop));
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_header_too_long() {
        let report = linter().lint(&format!("chore: {}", "x".repeat(70)));
        assert!(report.violates(RuleName::HeaderMaxLength));
        assert!(!report.violates(RuleName::SubjectMaxLength));
    }

    #[test]
    fn test_merge_commit_is_exempt() {
        let report = linter().lint("Merge branch 'main' into feature");
        assert!(report.is_ignored());
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn test_merge_prefix_without_defaults() {
        let rule_set = RuleSet {
            default_ignores: false,
            ..RuleSet::default()
        };
        let linter = Linter::new(rule_set).unwrap();

        // Would violate several rules, but the custom prefix exempts it.
        let report = linter.lint("Merge whatever. Totally Not Conventional.");
        assert_eq!(report.ignored_by.as_deref(), Some("prefix:Merge"));

        let report = linter.lint("merge whatever");
        assert!(!report.is_ignored());
    }

    #[test]
    fn test_missing_type() {
        let report = linter().lint("update docs");
        assert!(report.violates(RuleName::TypeEmpty));
        assert!(report.violates(RuleName::SubjectEmpty));
        assert!(!report.violates(RuleName::TypeEnum));
    }

    #[test]
    fn test_unknown_type() {
        for raw in ["perf: faster", "build: bump", "wip: stuff"] {
            let report = linter().lint(raw);
            assert!(report.violates(RuleName::TypeEnum), "{}", raw);
        }
        for raw in [
            "feat: a", "fix: a", "docs: a", "style: a", "refactor: a", "test: a", "chore: a",
        ] {
            assert!(linter().lint(raw).is_valid(), "{}", raw);
        }
    }

    #[test]
    fn test_warnings_do_not_block() {
        let report = linter().lint("fix: handle timeouts\nRetry once.");
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.violates(RuleName::BodyLeadingBlank));
    }

    #[test]
    fn test_ignores_match_unstripped_text() {
        let report = linter().lint("\nMerge branch 'main' into feature");
        assert!(!report.is_ignored());
        assert!(report.violates(RuleName::TypeEmpty));
    }

    #[test]
    fn test_revert_ignored_by_default() {
        let report = linter().lint("Revert \"feat: add login flow\"");
        assert_eq!(report.ignored_by.as_deref(), Some("revert"));
    }

    #[test]
    fn test_custom_pattern_ignore() {
        let rule_set = RuleSet {
            ignores: vec![IgnoreSpec::Pattern(r"^\[skip lint\]".into())],
            ..RuleSet::default()
        };
        let report = Linter::new(rule_set).unwrap().lint("[skip lint] Anything.");
        assert!(report.is_ignored());
    }
}
