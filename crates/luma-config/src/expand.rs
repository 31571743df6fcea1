//! `${VAR}` and `${VAR:-default}` expansion for configuration values.

use crate::ConfigError;

/// Variable referenced without a default and not present in the environment.
struct UnsetVar(String);

/// Expand braced environment references in `value`.
///
/// `${VAR}` must be set; `${VAR:-default}` falls back to `default`. Bare
/// `$VAR` and any text outside `${…}` are copied verbatim, so literal dollar
/// signs survive next to expanded references.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('}') else {
            rest = &rest[start..];
            break;
        };
        let reference = &rest[start..=start + len];
        out.push_str(&expand_reference(reference, field)?);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Expand a single `${…}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    let lookup = |name: &str| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    };

    match shellexpand::env_with_context(reference, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} is not set", err.cause.0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_untouched() {
        assert_eq!(expand_env("1.2.0", "release_version").unwrap(), "1.2.0");
    }

    #[test]
    fn test_set_variable_expanded() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("LUMA_TEST_EXPAND_SET", "2.0");
        }
        let result = expand_env("v${LUMA_TEST_EXPAND_SET}", "release_version").unwrap();
        assert_eq!(result, "v2.0");
        unsafe {
            std::env::remove_var("LUMA_TEST_EXPAND_SET");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("LUMA_TEST_EXPAND_DEFAULT");
        }
        let result = expand_env("${LUMA_TEST_EXPAND_DEFAULT:-dev}", "release_version").unwrap();
        assert_eq!(result, "dev");
    }

    #[test]
    fn test_empty_default() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("LUMA_TEST_EXPAND_EMPTY");
        }
        let result = expand_env("${LUMA_TEST_EXPAND_EMPTY:-}", "release_version").unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_unset_without_default_errors() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("LUMA_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${LUMA_TEST_EXPAND_MISSING}", "release_version").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("LUMA_TEST_EXPAND_MISSING"));
        assert!(message.contains("release_version"));
    }

    #[test]
    fn test_bare_dollar_kept() {
        assert_eq!(expand_env("$HOME/x", "favicon").unwrap(), "$HOME/x");
    }

    #[test]
    fn test_bare_dollar_kept_beside_braced_reference() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("LUMA_TEST_EXPAND_MIXED");
        }
        let result = expand_env("$HOME ${LUMA_TEST_EXPAND_MIXED:-a} $5", "favicon").unwrap();
        assert_eq!(result, "$HOME a $5");
    }

    #[test]
    fn test_unterminated_reference_kept() {
        assert_eq!(expand_env("cost ${oops", "name").unwrap(), "cost ${oops");
    }
}
