//! Environment variable readers shared by the `from_env` loaders
//!
//! Unset and unparsable values both fall back to the caller's default;
//! unparsable ones are logged at warn so a typo does not go unnoticed.

use std::fmt::Display;
use std::str::FromStr;

/// `key` parsed as `T`, or `default`
pub(crate) fn parsed_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match parse_setting(key, &raw) {
        Ok(value) => value,
        Err(reason) => {
            tracing::warn!(key, value = %raw, "{}, using default", reason);
            default
        }
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| format!("Ignoring invalid {}={:?}: {}", key, raw, e))
}

/// `key` as a string, or `default`
pub(crate) fn string_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Value of the first of `keys` that is set and non-empty
pub(crate) fn first_set(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}
