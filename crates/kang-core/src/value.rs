//! Runtime values and resolution of expression text to a value.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Decimal literal: optional sign, digits with an optional fraction.
static NUMBER_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap());

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// A KANG value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Rendering for variable listings: strings are quoted, everything else
    /// prints as its literal text.
    pub fn display_literal(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }

    /// `+`: numeric sum, or concatenation when either side is a string.
    pub fn add(&self, rhs: &Value) -> Result<Value, ErrorKind> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{}{}", self, rhs)))
            }
            _ => Err(self.mismatch("add", rhs)),
        }
    }

    pub fn sub(&self, rhs: &Value) -> Result<Value, ErrorKind> {
        let (a, b) = self.numeric_operands("sub", rhs)?;
        Ok(Value::Number(a - b))
    }

    pub fn mult(&self, rhs: &Value) -> Result<Value, ErrorKind> {
        let (a, b) = self.numeric_operands("mult", rhs)?;
        Ok(Value::Number(a * b))
    }

    /// Division. A zero divisor is reported before operand types are checked.
    pub fn div(&self, rhs: &Value) -> Result<Value, ErrorKind> {
        if rhs.as_number() == Some(0.0) {
            return Err(ErrorKind::DivisionByZero);
        }
        let (a, b) = self.numeric_operands("div", rhs)?;
        Ok(Value::Number(a / b))
    }

    /// Equality by value and type; never coerces.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => false,
        }
    }

    fn numeric_operands(&self, op: &'static str, rhs: &Value) -> Result<(f64, f64), ErrorKind> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(self.mismatch(op, rhs)),
        }
    }

    fn mismatch(&self, op: &'static str, rhs: &Value) -> ErrorKind {
        ErrorKind::TypeMismatch {
            op,
            left: self.type_name(),
            right: rhs.type_name(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        n.to_string()
    }
}

/// Shortest digits with a signed exponent, e.g. `1e-7`, `1.5e+23`.
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// A named binding in the variable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(flatten)]
    pub value: Value,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Variable table keyed by name.
pub type Variables = HashMap<String, Variable>;

/// Whether `text` is a quoted string literal, returning its inner text.
pub fn string_literal(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

/// Resolve an expression's text to a value.
///
/// Rules are tried in order: quoted string, decimal number, boolean, then
/// variable lookup. A quoted `"5"` is therefore a string and `true` is never
/// looked up as a variable.
pub fn parse_value(text: &str, variables: &Variables) -> Result<Value, ErrorKind> {
    let text = text.trim();

    if let Some(inner) = string_literal(text) {
        return Ok(Value::String(inner.to_string()));
    }

    if NUMBER_LITERAL.is_match(text) {
        if let Ok(n) = text.parse::<f64>() {
            return Ok(Value::Number(n));
        }
    }

    match text {
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        _ => {}
    }

    if is_identifier(text) {
        return variables
            .get(text)
            .map(|v| v.value.clone())
            .ok_or_else(|| ErrorKind::UnboundVariable {
                name: text.to_string(),
            });
    }

    Err(ErrorKind::UnresolvedValue {
        text: text.to_string(),
    })
}
