//! Environment variable access.
//!
//! Resolution never reads `std::env` directly; it goes through [`EnvSource`]
//! so callers and tests can supply an explicit environment.

use std::collections::HashMap;

/// Read-only view of an environment.
pub trait EnvSource {
    /// Value of `name`, or `None` if unset. An empty value is still `Some`.
    fn var(&self, name: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Non-UTF-8 values still count as set.
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_empty_value_is_present() {
        let mut env = HashMap::new();
        env.insert("SET_BUT_EMPTY".to_string(), String::new());
        assert_eq!(env.var("SET_BUT_EMPTY"), Some(String::new()));
        assert_eq!(env.var("NOT_SET"), None);
    }

    #[test]
    fn test_process_env_unset_variable() {
        assert!(ProcessEnv.var("MOMO_PI_SURELY_NOT_SET_ANYWHERE").is_none());
    }
}
