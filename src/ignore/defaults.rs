// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in ignore heuristics.

use lazy_static::lazy_static;
use regex::Regex;

use super::predicate::IgnorePredicate;

lazy_static! {
    static ref DEFAULT_IGNORES: Vec<IgnorePredicate> = vec![
        pattern("merge-pull-request", r"^Merge pull request"),
        pattern("merge-branch", r"^Merge (?:remote-tracking )?branch"),
        pattern("merge-tag", r"^Merge tag"),
        pattern("merge-into", r"^Merge .+ into .+"),
        pattern("merged-into", r"^Merged (?:.+ (?:in|into) .+|PR .+: .+)"),
        pattern("revert", r"^(?:R|r)evert "),
        pattern("reapply", r"^(?:R|r)eapply "),
        pattern("fixup", r"^(?:amend|fixup|squash)!"),
        pattern("automatic-merge", r"^Automatic merge"),
        pattern("auto-merged", r"^Auto-merged .+ into .+"),
        // Release commits: a bare version, optionally as `chore(release): 1.2.3`
        pattern(
            "semver-release",
            r"^(?:chore(?:\([^)]+\))?:)?[ \t]*v?(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?[ \t]*(?:\r?\n|$)",
        ),
    ];
}

fn pattern(name: &str, regex: &str) -> IgnorePredicate {
    IgnorePredicate::Pattern {
        name: name.to_string(),
        regex: Regex::new(regex).unwrap(),
    }
}

/// The built-in ignore predicates, in evaluation order.
pub fn default_ignores() -> &'static [IgnorePredicate] {
    &DEFAULT_IGNORES
}
