// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ignore predicates that exempt whole commit messages from linting.

mod defaults;
mod predicate;

pub use defaults::default_ignores;
pub use predicate::{IgnorePredicate, Ignores};
