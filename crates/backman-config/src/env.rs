//! Environment variable access
//!
//! Configuration reads the environment through [`EnvSource`] so callers can
//! substitute a fixed map for the process environment.

use std::collections::HashMap;
use std::ffi::OsString;

use crate::{Error, Result};

/// Variable holding a full JSON configuration document.
pub const BACKMAN_CONFIG: &str = "BACKMAN_CONFIG";
/// Basic-auth username.
pub const BACKMAN_USERNAME: &str = "BACKMAN_USERNAME";
/// Basic-auth password.
pub const BACKMAN_PASSWORD: &str = "BACKMAN_PASSWORD";
/// Object-store encryption key.
pub const BACKMAN_ENCRYPTION_KEY: &str = "BACKMAN_ENCRYPTION_KEY";
/// Teams webhook URL.
pub const BACKMAN_TEAMS_WEBHOOK: &str = "BACKMAN_TEAMS_WEBHOOK";
/// Comma-separated list of notification events.
pub const BACKMAN_TEAMS_EVENTS: &str = "BACKMAN_TEAMS_EVENTS";

/// A source of environment variables.
pub trait EnvSource {
    /// Look up `key`, returning `None` when it is not set.
    ///
    /// A value that is set but not valid unicode is an error.
    fn var(&self, key: &str) -> Result<Option<String>>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Result<Option<String>> {
        from_os(key, std::env::var_os(key))
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).cloned())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, key: &str) -> Result<Option<String>> {
        (**self).var(key)
    }
}

/// Convert a raw OS value for `key` into a string.
pub(crate) fn from_os(key: &str, value: Option<OsString>) -> Result<Option<String>> {
    value
        .map(|raw| {
            raw.into_string().map_err(|_| Error::NonUnicodeEnv {
                key: key.to_string(),
            })
        })
        .transpose()
}

/// Read `key`, falling back to `fallback` when it is unset or empty.
pub fn get_or(env: &impl EnvSource, key: &str, fallback: &str) -> Result<String> {
    match env.var(key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Ok(fallback.to_string()),
    }
}

/// Read `key`, failing when it is unset or empty.
pub fn must_get(env: &impl EnvSource, key: &str) -> Result<String> {
    match env.var(key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingRequiredEnv {
            key: key.to_string(),
        }),
    }
}

/// Split a comma-separated event list. An empty string yields no events.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
