//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// - `${VAR}` expands to the value of VAR and errors if it is unset
/// - `${VAR:-default}` falls back to `default` when VAR is unset
///
/// Strings without `${` are returned unchanged, so a bare `$` in a URL is
/// left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("EMBEDKIT_TEST_EXPAND_HOST", "proxy.internal:9000");
        }
        let result = expand_env(
            "http://${EMBEDKIT_TEST_EXPAND_HOST}/oembed",
            "providers.mixcloud.discovery_url",
        )
        .unwrap();
        assert_eq!(result, "http://proxy.internal:9000/oembed");
        unsafe {
            std::env::remove_var("EMBEDKIT_TEST_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("EMBEDKIT_TEST_EXPAND_UNSET");
        }
        let result = expand_env("${EMBEDKIT_TEST_EXPAND_UNSET:-https://d.test/o}", "f").unwrap();
        assert_eq!(result, "https://d.test/o");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("EMBEDKIT_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${EMBEDKIT_TEST_EXPAND_MISSING}", "http.user_agent").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("EMBEDKIT_TEST_EXPAND_MISSING"));
        assert!(err.to_string().contains("http.user_agent"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("https://d.test/$path", "f").unwrap(), "https://d.test/$path");
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }
}
