//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_DB_DIR, DEFAULT_PARENT_TABLE};
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the range tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub parent_table: String,
    pub auto_create_db: bool,
}

/// Expand tilde (~) in paths against `home`.
fn expand_tilde(path: String, home: Option<PathBuf>) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Some(home) = lookup("HOME").filter(|home| !home.trim().is_empty()) {
        return Some(PathBuf::from(home));
    }

    // Windows USERPROFILE (standard)
    if let Some(profile) = lookup("USERPROFILE").filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(profile));
    }

    None
}

/// Read an on/off switch such as `AUTO_CREATE_DB`.
///
/// Accepts `1/true/yes/on` and `0/false/no/off` in any case, surrounded by any
/// whitespace. A blank value counts as off. Anything else yields `None`, and the
/// caller keeps its default.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    const ON: [&str; 4] = ["1", "true", "yes", "on"];
    const OFF: [&str; 4] = ["0", "false", "no", "off"];

    let value = value.trim();
    if value.is_empty() || OFF.iter().any(|word| value.eq_ignore_ascii_case(word)) {
        Some(false)
    } else if ON.iter().any(|word| value.eq_ignore_ascii_case(word)) {
        Some(true)
    } else {
        None
    }
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup`: Returns the value of a variable, or `None` when unset.
    ///
    /// # Returns
    /// A populated [`Config`]. Unrecognized flag values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = resolve_home_dir(&lookup);
        let db_path = match lookup("DB_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => expand_tilde(path, home),
            None => home
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_DB_DIR)
                .to_string_lossy()
                .to_string(),
        };

        Self {
            db_path,
            parent_table: lookup("RANGE_PARENT_TABLE")
                .map(|table| table.trim().to_string())
                .filter(|table| !table.is_empty())
                .unwrap_or_else(|| DEFAULT_PARENT_TABLE.to_string()),
            auto_create_db: lookup("AUTO_CREATE_DB")
                .and_then(|value| parse_env_flag(&value))
                .unwrap_or(true),
        }
    }
}
