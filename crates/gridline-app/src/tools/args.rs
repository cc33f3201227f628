// Typed access to the JSON arguments a model supplies with a tool call.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgError {
    #[error("missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("parameter '{name}' must be {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
}

/// A non-blank string argument.
pub fn required_str<'a>(input: &'a Value, name: &'static str) -> Result<&'a str, ArgError> {
    match input.get(name) {
        None | Some(Value::Null) => Err(ArgError::Missing(name)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ArgError::Missing(name)),
        Some(Value::String(s)) => Ok(s.trim()),
        Some(_) => Err(ArgError::WrongType {
            name,
            expected: "a string",
        }),
    }
}

/// A string argument; blank or non-string values count as absent.
pub fn optional_str<'a>(input: &'a Value, name: &str) -> Option<&'a str> {
    input
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// A number. Numeric strings are accepted since models sometimes quote them.
pub fn required_f64(input: &Value, name: &'static str) -> Result<f64, ArgError> {
    match input.get(name) {
        None | Some(Value::Null) => Err(ArgError::Missing(name)),
        Some(v) => number(v).ok_or(ArgError::WrongType {
            name,
            expected: "a number",
        }),
    }
}

pub fn optional_f64(input: &Value, name: &'static str) -> Result<Option<f64>, ArgError> {
    match input.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => number(v).map(Some).ok_or(ArgError::WrongType {
            name,
            expected: "a number",
        }),
    }
}

/// An integer; whole-valued floats and numeric strings are accepted.
pub fn optional_i64(input: &Value, name: &'static str) -> Result<Option<i64>, ArgError> {
    let wrong = ArgError::WrongType {
        name,
        expected: "an integer",
    };
    match input.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            if let Some(i) = v.as_i64() {
                return Ok(Some(i));
            }
            match number(v) {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok(Some(f as i64)),
                _ => Err(wrong),
            }
        }
    }
}

fn number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_start_matches('+').parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_str_rejects_missing_blank_and_non_strings() {
        let input = json!({"player_name": "  Sam Darnold ", "blank": " ", "n": 3});
        assert_eq!(required_str(&input, "player_name"), Ok("Sam Darnold"));
        assert_eq!(required_str(&input, "team"), Err(ArgError::Missing("team")));
        assert_eq!(required_str(&input, "blank"), Err(ArgError::Missing("blank")));
        assert!(matches!(
            required_str(&input, "n"),
            Err(ArgError::WrongType { name: "n", .. })
        ));
    }

    #[test]
    fn optional_str_treats_blank_as_absent() {
        let input = json!({"prop_type": "", "player_name": "Walker"});
        assert_eq!(optional_str(&input, "prop_type"), None);
        assert_eq!(optional_str(&input, "player_name"), Some("Walker"));
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let input = json!({"line": "249.5", "odds": "+120", "raw": 59.5, "bad": "lots"});
        assert_eq!(required_f64(&input, "line"), Ok(249.5));
        assert_eq!(required_f64(&input, "raw"), Ok(59.5));
        assert_eq!(optional_i64(&input, "odds"), Ok(Some(120)));
        assert!(required_f64(&input, "bad").is_err());
        assert_eq!(required_f64(&input, "none"), Err(ArgError::Missing("none")));
    }

    #[test]
    fn integers_reject_fractions() {
        let input = json!({"a": -110, "b": -110.0, "c": -110.5});
        assert_eq!(optional_i64(&input, "a"), Ok(Some(-110)));
        assert_eq!(optional_i64(&input, "b"), Ok(Some(-110)));
        assert!(optional_i64(&input, "c").is_err());
        assert_eq!(optional_i64(&input, "d"), Ok(None));
    }

    #[test]
    fn error_messages_name_the_parameter() {
        assert_eq!(
            ArgError::Missing("line").to_string(),
            "missing required parameter 'line'"
        );
        assert_eq!(
            ArgError::WrongType {
                name: "line",
                expected: "a number"
            }
            .to_string(),
            "parameter 'line' must be a number"
        );
    }
}
