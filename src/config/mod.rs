// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cklint.
//!
//! Loads `.cklint.toml`, layers its rules over the built-in rule set and
//! validates the result before anything is linted.

pub mod default;
mod loader;
mod rule_set;
mod schema;

pub use default::example_config;
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use rule_set::*;
pub use schema::*;
