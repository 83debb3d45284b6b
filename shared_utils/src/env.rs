use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Errors raised while reading configuration from the process environment.
#[derive(Debug, Error)]
pub enum EnvVarError {
    /// The variable is set but its value does not parse into the expected type.
    #[error("Invalid value {value:?} for environment variable {name}: {message}")]
    Invalid {
        name: String,
        value: String,
        message: String,
    },
}

/// Reads an optional override. Unset and blank values are both `None`.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an optional override.
///
/// Returns `Ok(None)` when the variable is unset, and an
/// [`EnvVarError::Invalid`] when it is set to something `T` cannot parse.
pub fn parse_env_var<T>(name: &str) -> Result<Option<T>, EnvVarError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = get_env_var_opt(name) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| EnvVarError::Invalid {
            name: name.to_string(),
            value: raw,
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VAR: &str = "SHARED_UTILS_TEST_VAR";

    #[test]
    #[serial]
    fn unset_var_is_none() {
        // SAFETY: serialised with the other env tests in this module.
        unsafe { std::env::remove_var(VAR) };
        assert!(get_env_var_opt(VAR).is_none());
        assert!(parse_env_var::<u64>(VAR).unwrap().is_none());
    }

    #[test]
    #[serial]
    fn blank_var_counts_as_unset() {
        unsafe { std::env::set_var(VAR, "   ") };
        assert!(get_env_var_opt(VAR).is_none());
        assert!(parse_env_var::<u64>(VAR).unwrap().is_none());
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn parses_and_rejects_values() {
        unsafe { std::env::set_var(VAR, " 42 ") };
        assert_eq!(parse_env_var::<u64>(VAR).unwrap(), Some(42));

        unsafe { std::env::set_var(VAR, "forty-two") };
        match parse_env_var::<u64>(VAR) {
            Err(EnvVarError::Invalid { name, value, .. }) => {
                assert_eq!(name, VAR);
                assert_eq!(value, "forty-two");
            }
            Ok(v) => panic!("expected Invalid, got {v:?}"),
        }
        unsafe { std::env::remove_var(VAR) };
    }
}
