//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// An unset variable without a default is an error naming `field`. Only
/// braced references are expanded: bare `$name` and an unterminated `${` are
/// copied through as written, so URL paths containing `$` survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        out.push_str(&rest[..start]);
        out.push_str(&expand_reference(&rest[start..end], field)?);
        rest = &rest[end..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SX_TEST_HOST", "example.com");
        }
        let result = expand_env("https://${SX_TEST_HOST}/site", "server.base_url").unwrap();
        assert_eq!(result, "https://example.com/site");
        unsafe {
            std::env::remove_var("SX_TEST_HOST");
        }
    }

    #[test]
    fn test_braced_var_next_to_bare_dollar() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SX_TEST_MIXED_HOST", "example.com");
        }
        let result =
            expand_env("https://${SX_TEST_MIXED_HOST}/$path", "server.base_url").unwrap();
        assert_eq!(result, "https://example.com/$path");
        unsafe {
            std::env::remove_var("SX_TEST_MIXED_HOST");
        }
    }

    #[test]
    fn test_expand_several_references() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("SX_TEST_SCHEME", "https");
            std::env::remove_var("SX_TEST_PORT");
        }
        let result = expand_env(
            "${SX_TEST_SCHEME}://host:${SX_TEST_PORT:-8080}/a$b",
            "server.base_url",
        )
        .unwrap();
        assert_eq!(result, "https://host:8080/a$b");
        unsafe {
            std::env::remove_var("SX_TEST_SCHEME");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SX_TEST_UNSET_HOST");
        }
        let result = expand_env("${SX_TEST_UNSET_HOST:-http://localhost}", "server.base_url")
            .unwrap();
        assert_eq!(result, "http://localhost");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SX_TEST_MISSING");
        }
        let err = expand_env("${SX_TEST_MISSING}", "server.base_url").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SX_TEST_MISSING"));
        assert!(err.to_string().contains("server.base_url"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(
            expand_env("https://example.com/$path", "server.base_url").unwrap(),
            "https://example.com/$path"
        );
    }

    #[test]
    fn test_unterminated_reference_unchanged() {
        assert_eq!(
            expand_env("https://example.com/${oops", "server.base_url").unwrap(),
            "https://example.com/${oops"
        );
    }
}
