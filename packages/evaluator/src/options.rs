use codex_parser::{ParseError, ParseNode, ParseResult};
use std::collections::HashMap;

/// Typed access to a node's bound options, producing the element's own
/// error messages on malformed values
pub struct OptionReader<'a> {
    element: &'static str,
    variables: &'a HashMap<String, String>,
}

impl<'a> OptionReader<'a> {
    pub fn new(node: &'a ParseNode) -> Self {
        Self {
            element: node.kind.name(),
            variables: &node.variables,
        }
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn required(&self, key: &str) -> ParseResult<&'a str> {
        match self.str(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ParseError::missing_option(self.element, key)),
        }
    }

    pub fn int(&self, key: &str) -> ParseResult<Option<i64>> {
        self.str(key)
            .map(|value| {
                value
                    .parse::<i64>()
                    .map_err(|_| self.invalid(key, value, "expected an integer"))
            })
            .transpose()
    }

    /// Integer no smaller than `min`
    pub fn int_at_least(&self, key: &str, min: i64) -> ParseResult<Option<i64>> {
        match self.int(key)? {
            Some(n) if n < min => Err(self.invalid(key, &n.to_string(), &format!("must be at least {}", min))),
            other => Ok(other),
        }
    }

    pub fn int_in(&self, key: &str, min: i64, max: i64) -> ParseResult<Option<i64>> {
        match self.int(key)? {
            Some(n) if n < min || n > max => Err(self.invalid(
                key,
                &n.to_string(),
                &format!("must be between {} and {}", min, max),
            )),
            other => Ok(other),
        }
    }

    pub fn float(&self, key: &str) -> ParseResult<Option<f64>> {
        self.str(key)
            .map(|value| match value.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(self.invalid(key, value, "expected a number")),
            })
            .transpose()
    }

    pub fn positive_float(&self, key: &str) -> ParseResult<Option<f64>> {
        match self.float(key)? {
            Some(n) if n <= 0.0 => Err(self.invalid(key, &n.to_string(), "must be greater than 0")),
            other => Ok(other),
        }
    }

    pub fn non_negative_float(&self, key: &str) -> ParseResult<Option<f64>> {
        match self.float(key)? {
            Some(n) if n < 0.0 => Err(self.invalid(key, &n.to_string(), "must not be negative")),
            other => Ok(other),
        }
    }

    pub fn bool(&self, key: &str) -> ParseResult<Option<bool>> {
        self.str(key)
            .map(|value| match value {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(self.invalid(key, value, "expected 'true' or 'false'")),
            })
            .transpose()
    }

    /// A value from a fixed set
    pub fn one_of(&self, key: &str, allowed: &[&str]) -> ParseResult<Option<&'a str>> {
        match self.str(key) {
            Some(value) if !allowed.contains(&value) => Err(self.invalid(
                key,
                value,
                &format!("expected one of {}", allowed.join(", ")),
            )),
            other => Ok(other),
        }
    }

    pub fn invalid(&self, key: &str, value: &str, reason: &str) -> ParseError {
        ParseError::invalid_value(self.element, key, value, reason)
    }
}
