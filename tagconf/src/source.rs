//! Key/value sources consulted for field values.

use std::collections::{BTreeMap, HashMap};
use std::env;

/// A key/value lookup.
///
/// The resolver treats an empty value exactly like a missing one, so sources
/// do not need to filter empty strings themselves.
pub trait Source {
    /// Kind of source, used in error messages (e.g. `"environment"`).
    fn kind(&self) -> &'static str {
        "environment"
    }

    /// Look up `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Source for Environment {
    fn get(&self, key: &str) -> Option<String> {
        let value = env::var_os(key)?;
        match value.into_string() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, "ignoring environment variable with a non-Unicode value");
                None
            }
        }
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl Source for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}
