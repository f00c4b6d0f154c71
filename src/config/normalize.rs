//! Coercion of raw field values into their typed form.
//!
//! Everything here is lenient except [`interpolate`], which rejects
//! placeholders naming unset variables.

use super::env::EnvSource;
use super::types::Field;
use crate::error::{ConfigError, ConfigResult};
use regex_lite::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Replace every `${NAME}` in `input` with the value of `NAME`.
///
/// Fails with [`ConfigError::MissingInterpolationVariable`] on the first
/// placeholder whose variable is unset. Substituted values are not rescanned.
pub fn interpolate(field: Field, input: &str, env: &dyn EnvSource) -> ConfigResult<String> {
    let mut missing: Option<String> = None;
    let output = PLACEHOLDER.replace_all(input, |caps: &Captures<'_>| {
        let name = &caps[1];
        match env.var(name) {
            Some(value) => value,
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(variable) => Err(ConfigError::missing_variable(field, variable)),
        None => Ok(output.into_owned()),
    }
}

/// Text form of a raw string-typed value.
///
/// Numbers and booleans are stringified; `null`, arrays and objects have no
/// text form.
pub fn raw_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a raw value to a boolean, falling back to `default`.
pub fn coerce_bool(raw: &Value, default: bool) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Coerce a raw value to an integer clamped into `min..=max`.
///
/// Numbers are rounded to the nearest integer. Strings are read as a base-10
/// integer prefix, so `"12abc"` is `12`. Anything unusable becomes `default`
/// before clamping.
pub fn coerce_bounded_int(raw: &Value, default: u32, min: u32, max: u32) -> u32 {
    let parsed = match raw {
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    };
    let value = parsed.unwrap_or(i64::from(default));
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// Parse a leading base-10 integer, ignoring leading whitespace and any
/// trailing characters. Overflow saturates.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Restrict a tag to `[A-Za-z0-9_]` with single, inner underscores only.
///
/// Idempotent: sanitizing an already sanitized tag returns it unchanged.
pub fn sanitize_container_tag(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_interpolate_replaces_placeholders() {
        let env = env(&[("MY_URL", "http://x"), ("PORT", "8080")]);
        assert_eq!(
            interpolate(Field::BaseUrl, "${MY_URL}", &env).unwrap(),
            "http://x"
        );
        assert_eq!(
            interpolate(Field::BaseUrl, "${MY_URL}:${PORT}/api", &env).unwrap(),
            "http://x:8080/api"
        );
    }

    #[test]
    fn test_interpolate_without_placeholders() {
        let env = env(&[]);
        assert_eq!(
            interpolate(Field::ApiKey, "plain $HOME {x}", &env).unwrap(),
            "plain $HOME {x}"
        );
    }

    #[test]
    fn test_interpolate_missing_variable_fails() {
        let env = env(&[("SET", "1")]);
        let err = interpolate(Field::ContainerTag, "${SET}-${UNSET}", &env).unwrap_err();
        match err {
            ConfigError::MissingInterpolationVariable { field, variable } => {
                assert_eq!(field, Field::ContainerTag);
                assert_eq!(variable, "UNSET");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_interpolate_empty_variable_is_set() {
        let env = env(&[("EMPTY", "")]);
        assert_eq!(interpolate(Field::ApiKey, "${EMPTY}", &env).unwrap(), "");
    }

    #[test]
    fn test_interpolated_value_not_rescanned() {
        let env = env(&[("A", "${B}")]);
        assert_eq!(interpolate(Field::BaseUrl, "${A}", &env).unwrap(), "${B}");
    }

    #[test]
    fn test_raw_string() {
        assert_eq!(raw_string(&json!("x")), Some("x".to_string()));
        assert_eq!(raw_string(&json!(42)), Some("42".to_string()));
        assert_eq!(raw_string(&json!(true)), Some("true".to_string()));
        assert_eq!(raw_string(&Value::Null), None);
        assert_eq!(raw_string(&json!(["x"])), None);
    }

    #[test]
    fn test_coerce_bool() {
        assert!(coerce_bool(&json!(true), false));
        assert!(!coerce_bool(&json!(false), true));
        for s in ["true", "TRUE", "1", "yes", "Yes"] {
            assert!(coerce_bool(&json!(s), false), "{s}");
        }
        for s in ["false", "False", "0", "no", "NO"] {
            assert!(!coerce_bool(&json!(s), true), "{s}");
        }
    }

    #[test]
    fn test_coerce_bool_falls_back_to_default() {
        assert!(coerce_bool(&json!("maybe"), true));
        assert!(!coerce_bool(&json!(""), false));
        assert!(coerce_bool(&json!(1), true));
        assert!(!coerce_bool(&Value::Null, false));
    }

    #[test]
    fn test_bounded_int_clamps() {
        assert_eq!(coerce_bounded_int(&json!(-5), 5, 1, 20), 1);
        assert_eq!(coerce_bounded_int(&json!(100), 5, 1, 20), 20);
        assert_eq!(coerce_bounded_int(&json!(-5), 50, 1, 500), 1);
        assert_eq!(coerce_bounded_int(&json!(1000), 50, 1, 500), 500);
        assert_eq!(coerce_bounded_int(&json!(7), 5, 1, 20), 7);
    }

    #[test]
    fn test_bounded_int_rounds_numbers() {
        assert_eq!(coerce_bounded_int(&json!(7.4), 5, 1, 20), 7);
        assert_eq!(coerce_bounded_int(&json!(7.5), 5, 1, 20), 8);
        assert_eq!(coerce_bounded_int(&json!(1e300), 5, 1, 20), 20);
    }

    #[test]
    fn test_bounded_int_parses_strings() {
        assert_eq!(coerce_bounded_int(&json!("12"), 5, 1, 20), 12);
        assert_eq!(coerce_bounded_int(&json!("  12abc"), 5, 1, 20), 12);
        assert_eq!(coerce_bounded_int(&json!("-5"), 5, 1, 20), 1);
        assert_eq!(coerce_bounded_int(&json!("100"), 5, 1, 20), 20);
        assert_eq!(
            coerce_bounded_int(&json!("99999999999999999999999"), 50, 1, 500),
            500
        );
    }

    #[test]
    fn test_bounded_int_falls_back_to_default() {
        assert_eq!(coerce_bounded_int(&json!("abc"), 5, 1, 20), 5);
        assert_eq!(coerce_bounded_int(&json!(""), 5, 1, 20), 5);
        assert_eq!(coerce_bounded_int(&json!(true), 5, 1, 20), 5);
        assert_eq!(coerce_bounded_int(&Value::Null, 50, 1, 500), 50);
    }

    #[test]
    fn test_sanitize_container_tag() {
        assert_eq!(
            sanitize_container_tag("my-project/name with spaces"),
            "my_project_name_with_spaces"
        );
        assert_eq!(sanitize_container_tag("__a__b__"), "a_b");
        assert_eq!(sanitize_container_tag("--weird!!tag--"), "weird_tag");
        assert_eq!(sanitize_container_tag("caf\u{e9}"), "caf");
        assert_eq!(sanitize_container_tag("///"), "");
    }

    #[test]
    fn test_sanitize_container_tag_idempotent() {
        for input in ["my-project/name with spaces", "a__b", "_x_", "plain"] {
            let once = sanitize_container_tag(input);
            assert_eq!(sanitize_container_tag(&once), once);
        }
    }
}
