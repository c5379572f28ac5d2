use std::fmt::{Display, Formatter, Result as FmtResult};

/// A runtime value that can be passed as a render parameter.
///
/// Numbers drive plural selection, any value can drive a select block, and
/// every value can be substituted into a placeholder.
///
/// # Example
///
/// ```
/// use lokal::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let markup = Value::safe("<b>bold</b>");
/// assert!(markup.is_safe());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value, escaped on substitution.
    String(String),

    /// A string the caller has already made safe for HTML. Never escaped.
    Safe(String),
}

impl Value {
    /// Wrap pre-escaped text so that it is substituted verbatim.
    pub fn safe(text: impl Into<String>) -> Self {
        Value::Safe(text.into())
    }

    /// Returns true if this value is marked as pre-escaped.
    pub fn is_safe(&self) -> bool {
        matches!(self, Value::Safe(_))
    }

    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Safe(s) => Some(s),
            Value::Number(_) | Value::Float(_) => None,
        }
    }

    /// Interpret this value as a plural count.
    ///
    /// Integers are used directly. Floats and numeric strings are accepted
    /// when they hold a whole number.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(f) => whole_number(*f),
            Value::String(s) | Value::Safe(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_number))
            }
        }
    }

    /// Interpret this value as a number for plural selection.
    ///
    /// Numbers are used directly and strings are parsed after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n as f64,
            Value::Float(f) => *f,
            Value::String(s) | Value::Safe(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// The plain decimal text of a numeric value, as `#` renders it.
    pub fn number_text(&self) -> Option<String> {
        match self {
            Value::Number(n) => Some(n.to_string()),
            Value::Float(f) => f.is_finite().then(|| unsigned_zero(*f).to_string()),
            Value::String(s) | Value::Safe(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|_| trimmed.to_string())
            }
        }
    }

    /// The name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Safe(_) => "safe string",
        }
    }
}

fn whole_number(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

/// Negative zero prints as `-0`; show it as `0`.
fn unsigned_zero(f: f64) -> f64 {
    if f == 0.0 { 0.0 } else { f }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{}", unsigned_zero(*n)),
            Value::String(s) | Value::Safe(s) => f.write_str(s),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Value::String(n.to_string()), Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::String(b.to_string())
    }
}
