// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit linting.
//!
//! Evaluates a [`RuleSet`](crate::config::RuleSet) against parsed commit
//! messages and collects the violations into a [`LintReport`].

mod builtin;
mod case;
mod engine;
mod report;

pub use builtin::check_rule;
pub use case::CaseMode;
pub use engine::Linter;
pub use report::{LintIssue, LintReport};
