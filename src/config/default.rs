// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Example configuration written by `convlint init`.

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# convlint configuration

# Maximum length of the subject line
max-subject-length = 80

# Report ticket references in the subject as errors instead of warnings
require-ticket = false

# Refuse to compute a bump level when any message in the range is invalid
strict = false

# Rules to skip, by id (see `convlint rules`)
disable = []

# Additional type tags; feat and fix are always accepted
[tags]
improvement = "Improvement of existing behavior without a new feature"
"#
}
