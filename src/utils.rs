//!
//! Utility functions shared by configuration loading.
//!
//! - [`replace_handlebars_with_env`] - Template substitution for environment variables
//!

use {
    regex::{Captures, Regex},
    std::{env, sync::LazyLock},
};

/// Regular expression pattern for matching handlebars-style environment variable references.
/// Matches patterns like `{{ VAR_NAME }}` with optional whitespace around the variable name.
/// Variable names must be uppercase letters, digits, or underscores (standard env var naming).
static HANDLEBAR_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Z0-9_]+)\s*\}\}").unwrap());

/// Replaces handlebars-style placeholders with environment variable values.
///
/// Searches through the input string for patterns like `{{ VAR_NAME }}` and replaces
/// them with the corresponding environment variable value. Whitespace around the
/// variable name is allowed: `{{VAR}}`, `{{ VAR }}`, and `{{  VAR  }}` are equivalent.
///
/// If an environment variable is not set, it is replaced with an empty string
/// and a warning is logged.
///
/// # Examples
///
/// ```
/// use forge_router::replace_handlebars_with_env;
///
/// let template = "Path: {{ HOME }}/config";
/// let result = replace_handlebars_with_env(template);
/// assert!(result.starts_with("Path: "));
///
/// let result = replace_handlebars_with_env("Value: {{ SURELY_NOT_SET_ANYWHERE }}");
/// assert_eq!(result, "Value: ");
/// ```
pub fn replace_handlebars_with_env(input: &str) -> String {
    HANDLEBAR_REGEXP
        .replace_all(input, |caps: &Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!(
                    variable = %var_name,
                    "Environment variable not found, substituting with empty string"
                );
                String::new()
            })
        })
        .to_string()
}
