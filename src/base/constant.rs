//! Compile-time constant values.

use std::fmt;

/// A compile-time constant, as written in source or stored in a compiled
/// annotation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstValue {
    Boolean(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Null,
}

impl ConstValue {
    /// Parse an integer literal such as `42`, `1_000L` or `0xFF`.
    pub fn parse_integer(text: &str) -> Option<ConstValue> {
        let cleaned: String = text.chars().filter(|c| *c != '_').collect();
        let (digits, is_long) = match cleaned.strip_suffix(['l', 'L']) {
            Some(rest) => (rest.to_string(), true),
            None => (cleaned, false),
        };
        let value = match digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            Some(hex) => i64::from_str_radix(hex, 16).ok()?,
            None => digits.parse::<i64>().ok()?,
        };
        if is_long {
            return Some(ConstValue::Long(value));
        }
        Some(match i32::try_from(value) {
            Ok(int) => ConstValue::Int(int),
            Err(_) => ConstValue::Long(value),
        })
    }

    /// Parse a floating point literal such as `1.5` or `2.0f`.
    pub fn parse_decimal(text: &str) -> Option<ConstValue> {
        match text.strip_suffix(['f', 'F']) {
            Some(rest) => rest.parse::<f32>().ok().map(ConstValue::Float),
            None => text.parse::<f64>().ok().map(ConstValue::Double),
        }
    }

    /// Negate a numeric constant; other kinds are returned unchanged.
    pub fn negate(self) -> ConstValue {
        match self {
            ConstValue::Int(v) => ConstValue::Int(v.wrapping_neg()),
            ConstValue::Long(v) => ConstValue::Long(v.wrapping_neg()),
            ConstValue::Float(v) => ConstValue::Float(-v),
            ConstValue::Double(v) => ConstValue::Double(-v),
            other => other,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Boolean(v) => write!(f, "{v}"),
            ConstValue::Char(v) => write!(f, "'{v}'"),
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Long(v) => write!(f, "{v}L"),
            ConstValue::Float(v) => write!(f, "{v}f"),
            ConstValue::Double(v) => write!(f, "{v}"),
            ConstValue::String(v) => write!(f, "{v:?}"),
            ConstValue::Null => f.write_str("null"),
        }
    }
}

/// Resolve backslash escapes in the body of a string or char literal.
///
/// Returns `None` for malformed escapes.
pub fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            '$' => '$',
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}
