// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

/// Generate an example configuration file.
///
/// The rules listed here are the built-in defaults, spelled out.
pub fn example_config() -> &'static str {
    r#"# cklint configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT
#
# Rules take the form [severity, applicability, parameter]
#   severity:      0 = off, 1 = warning, 2 = error
#   applicability: "always" or "never"

# Layer these rules over the built-in rule set.
extends_defaults = true

# Skip merge, revert and fixup commits.
default_ignores = true

# Merge commits are not expected to follow the convention.
[[ignores]]
prefix = "Merge"

[rules]
type-enum = [2, "always", [
    "feat",     # New feature
    "fix",      # Bug fix
    "docs",     # Documentation changes
    "style",    # Code style changes (formatting, etc.)
    "refactor", # Code refactoring
    "test",     # Adding or updating tests
    "chore",    # Maintenance tasks
]]
type-empty = [2, "never"]
type-case = [2, "always", "lower-case"]
subject-empty = [2, "never"]
subject-full-stop = [2, "never", "."]
subject-max-length = [2, "always", 72]
header-max-length = [2, "always", 72]
body-leading-blank = [1, "always"]
footer-leading-blank = [1, "always"]
body-max-line-length = [0]
footer-max-line-length = [0]
scope-empty = [0, "never"]

[lint]
strict = false

[hooks]
command = "cklint"
"#
}
