// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Conventional commit header: `type(scope)!: subject`.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\w*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?:(?:[ \t]+(?P<subject>.*))?$"
    ).unwrap();

    /// Footer trailer line: `Token: value`, `Token #value` or `BREAKING CHANGE: value`.
    static ref TRAILER_REGEX: Regex = Regex::new(
        r"^(?:BREAKING[ -]CHANGE: |[A-Za-z][A-Za-z0-9-]*(?:: | #))"
    ).unwrap();

    /// Breaking-change notes and issue references, which open the footer
    /// wherever they appear.
    static ref NOTE_REGEX: Regex = Regex::new(
        r"^(?:BREAKING[ -]CHANGE: |(?i:close[sd]?|fix(?:e[sd])?|resolve[sd]?|refs?) #\d+)"
    ).unwrap();
}

/// Line git writes above the diff in `commit --verbose`; everything below is dropped.
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// A commit message split into its conventional parts.
///
/// Parsing never fails: a header that does not follow the convention yields
/// empty type, scope and subject, which the `*-empty` rules then report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// The message after comment stripping.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Commit type (feat, fix, etc.).
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer (references, breaking changes, trailers).
    pub footer: Option<String>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    body_leading_blank: bool,
    footer_leading_blank: bool,
}

impl CommitMessage {
    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Self {
        let text = strip_comments(message);
        let lines: Vec<&str> = text.lines().collect();
        let header = lines.first().copied().unwrap_or("").trim_end().to_string();

        let (commit_type, scope, subject, marker) = match HEADER_REGEX.captures(&header) {
            Some(captures) => (
                non_empty(captures.name("type").map(|m| m.as_str())),
                non_empty(captures.name("scope").map(|m| m.as_str())),
                non_empty(captures.name("subject").map(|m| m.as_str())),
                captures.name("breaking").is_some(),
            ),
            None => (None, None, None, false),
        };

        let footer_start = (1..lines.len()).find(|&i| {
            NOTE_REGEX.is_match(lines[i])
                || (TRAILER_REGEX.is_match(lines[i])
                    && (i == 1 || lines[i - 1].trim().is_empty()))
        });
        let body_end = footer_start.unwrap_or(lines.len());

        let body = join_trimmed(lines.get(1..body_end).unwrap_or_default());
        let footer = footer_start.and_then(|start| join_trimmed(&lines[start..]));

        let body_leading_blank = body.is_none() || lines[1].trim().is_empty();
        let footer_leading_blank = match footer_start {
            Some(start) if footer.is_some() => lines[start - 1].trim().is_empty(),
            _ => true,
        };

        let is_breaking = marker
            || footer
                .as_ref()
                .map(|f| f.contains("BREAKING CHANGE") || f.contains("BREAKING-CHANGE"))
                .unwrap_or(false);

        tracing::debug!(
            "Parsed header {:?}: type={:?} scope={:?} subject={:?}",
            header,
            commit_type,
            scope,
            subject
        );

        Self {
            raw: text,
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            is_breaking,
            body_leading_blank,
            footer_leading_blank,
        }
    }

    /// Whether the body, if any, is separated from the header by a blank line.
    pub fn has_body_leading_blank(&self) -> bool {
        self.body_leading_blank
    }

    /// Whether the footer, if any, is separated from what precedes it by a blank line.
    pub fn has_footer_leading_blank(&self) -> bool {
        self.footer_leading_blank
    }
}

/// Remove git comment lines and anything below the scissors line.
fn strip_comments(message: &str) -> String {
    let mut kept = Vec::new();
    for line in message.lines() {
        if line == SCISSORS {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        kept.push(line);
    }

    let text = kept.join("\n");
    text.trim_start_matches(['\n', '\r']).trim_end().to_string()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim_matches(['\n', '\r', ' ', '\t']);
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
