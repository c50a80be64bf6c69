// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

use handlebars::Handlebars;
use serde::Serialize;

use crate::config::HooksConfig;
use crate::error::{HookError, LintError, Result};

/// Marker line identifying hooks written by cklint.
pub const HOOK_MARKER: &str = "# cklint Git Hook";

const COMMIT_MSG_TEMPLATE: &str = r#"#!/bin/sh
{{marker}}
# Generated by cklint v{{version}}. Do not edit; run `cklint hooks uninstall` to remove.

{{command}} lint --edit "$1"{{#each args}} {{this}}{{/each}}
"#;

/// Hooks cklint knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    CommitMsg,
}

#[derive(Serialize)]
struct TemplateContext<'a> {
    marker: &'a str,
    version: &'a str,
    command: &'a str,
    args: &'a [String],
}

impl HookTemplate {
    /// All installable hooks.
    pub fn all() -> &'static [HookTemplate] {
        &[HookTemplate::CommitMsg]
    }

    /// File name inside the hooks directory.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => "commit-msg",
        }
    }

    /// Render the hook script.
    pub fn generate(&self, config: &HooksConfig) -> Result<String> {
        let template = match self {
            HookTemplate::CommitMsg => COMMIT_MSG_TEMPLATE,
        };

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        let context = TemplateContext {
            marker: HOOK_MARKER,
            version: crate::version::VERSION,
            command: &config.command,
            args: &config.args,
        };

        handlebars
            .render_template(template, &context)
            .map_err(|e| {
                LintError::Hook(HookError::InstallFailed {
                    hook: self.filename().to_string(),
                    message: format!("Failed to render hook template: {}", e),
                })
            })
    }
}

impl std::str::FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "commit-msg" | "commit_msg" => Ok(HookTemplate::CommitMsg),
            _ => Err(()),
        }
    }
}
