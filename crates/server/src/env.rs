use crate::ConfigError;
use std::fmt;
use userop_primitives::constants::stackup::{API_KEY_VAR, SIGNING_KEY_VAR};

/// Credentials read from the environment
#[derive(Clone, PartialEq, Eq)]
pub struct Environment {
    /// Stackup API key (`STACKUP_API_KEY`)
    pub api_key: String,
    /// Hex encoded private key of the account owner (`STACKUP_SIGNING_KEY`)
    pub signing_key: String,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("api_key", &self.api_key)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

impl Environment {
    /// Reads the credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the credentials with `lookup`. The API key is checked first, a variable set to an
    /// empty string counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let signing_key = required(&lookup, SIGNING_KEY_VAR)?;
        Ok(Self { api_key, signing_key })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty()).ok_or(ConfigError::MissingEnvVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn both_set() {
        let env = Environment::from_lookup(lookup(&[
            ("STACKUP_API_KEY", "not-a-real-key"),
            ("STACKUP_SIGNING_KEY", "0x01"),
        ]))
        .unwrap();
        assert_eq!(env.api_key, "not-a-real-key");
        assert_eq!(env.signing_key, "0x01");
        assert!(!format!("{env:?}").contains("0x01"));
    }

    #[test]
    fn api_key_checked_first() {
        let err = Environment::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("STACKUP_API_KEY"));
        assert_eq!(err.to_string(), "STACKUP_API_KEY is not defined");

        let err =
            Environment::from_lookup(lookup(&[("STACKUP_SIGNING_KEY", "0x01")])).unwrap_err();
        assert_eq!(err.to_string(), "STACKUP_API_KEY is not defined");
    }

    #[test]
    fn missing_signing_key() {
        let err = Environment::from_lookup(lookup(&[("STACKUP_API_KEY", "not-a-real-key")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "STACKUP_SIGNING_KEY is not defined");
    }

    #[test]
    fn empty_counts_as_missing() {
        let err = Environment::from_lookup(lookup(&[
            ("STACKUP_API_KEY", ""),
            ("STACKUP_SIGNING_KEY", "0x01"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("STACKUP_API_KEY"));
    }
}
