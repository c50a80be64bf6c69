// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from history for linting.

mod repo;

pub use repo::{get_commit, get_commit_range, open_repo, Repository};
