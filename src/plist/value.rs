//! Typed plist values and the string decoder.
use std::collections::BTreeMap;
use std::fmt;

use super::PlistError;

/// A typed plist value.
///
/// Tree-shaped and finite: dictionaries map string keys to values, arrays
/// hold values, and there are no cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    /// A boolean.
    Boolean(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating-point number.
    Real(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Vec<PlistValue>),
    /// A mapping from string keys to values.
    Dict(BTreeMap<String, PlistValue>),
}

impl PlistValue {
    /// The `PlistBuddy` type tag for this value's shape.
    ///
    /// Pure function of shape, independent of content: any array maps to
    /// `array`, any dictionary to `dict`.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            PlistValue::Boolean(_) => "bool",
            PlistValue::Integer(_) => "integer",
            PlistValue::Real(_) => "float",
            PlistValue::String(_) => "string",
            PlistValue::Array(_) => "array",
            PlistValue::Dict(_) => "dict",
        }
    }

    /// Render this value as a literal `PlistBuddy` command segment.
    ///
    /// Booleans render as `true`/`false`, numbers in their natural form,
    /// strings unchanged. Containers have no literal form in a command
    /// segment and fail closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlistError::UnsupportedDataType`] for arrays and
    /// dictionaries.
    pub fn render(&self) -> Result<String, PlistError> {
        match self {
            PlistValue::Boolean(b) => Ok(b.to_string()),
            PlistValue::Integer(i) => Ok(i.to_string()),
            PlistValue::Real(r) => Ok(r.to_string()),
            PlistValue::String(s) => Ok(s.clone()),
            PlistValue::Array(_) | PlistValue::Dict(_) => {
                Err(PlistError::UnsupportedDataType {
                    value: self.to_string(),
                    type_name: self.type_tag().to_string(),
                })
            }
        }
    }
}

impl fmt::Display for PlistValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlistValue::Boolean(b) => write!(f, "{b}"),
            PlistValue::Integer(i) => write!(f, "{i}"),
            PlistValue::Real(r) => write!(f, "{r}"),
            PlistValue::String(s) => write!(f, "{s}"),
            PlistValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            PlistValue::Dict(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {val}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Decode a raw string read back from `defaults` into a typed value.
///
/// The numeric parses are deliberately permissive, matching the read-back
/// tool's own coercion: a leading sign-and-digit prefix is parsed and
/// anything else (including garbage) yields zero. Booleans are true iff the
/// lenient integer parse yields exactly 1.
///
/// # Errors
///
/// Returns [`PlistError::UnsupportedTypeTag`] for an unrecognised tag.
pub fn decode(type_tag: Option<&str>, raw: &str) -> Result<PlistValue, PlistError> {
    match type_tag {
        None => Ok(PlistValue::String(String::new())),
        Some("boolean") => Ok(PlistValue::Boolean(lenient_i64(raw) == 1)),
        Some("integer") => Ok(PlistValue::Integer(lenient_i64(raw))),
        Some("float") => Ok(PlistValue::Real(lenient_f64(raw))),
        Some("string" | "dictionary") => Ok(PlistValue::String(raw.to_string())),
        Some(other) => Err(PlistError::UnsupportedTypeTag(other.to_string())),
    }
}

/// Parse the leading integer prefix of `raw`, defaulting to 0.
fn lenient_i64(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }
    trimmed
        .get(..end)
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(0)
}

/// Parse the leading floating-point prefix of `raw`, defaulting to 0.0.
fn lenient_f64(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut saw_digit = false;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        saw_digit = true;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        let mut saw_frac = false;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
            saw_frac = true;
        }
        // "5." parses, "." alone does not
        if saw_digit || saw_frac {
            end = frac_end;
            saw_digit = true;
        }
    }
    if saw_digit && matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let mut saw_exp = false;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
            saw_exp = true;
        }
        if saw_exp {
            end = exp_end;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    trimmed
        .get(..end)
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(0.0)
}

impl TryFrom<&toml::Value> for PlistValue {
    type Error = PlistError;

    fn try_from(value: &toml::Value) -> Result<Self, Self::Error> {
        match value {
            toml::Value::Boolean(b) => Ok(PlistValue::Boolean(*b)),
            toml::Value::Integer(i) => Ok(PlistValue::Integer(*i)),
            toml::Value::Float(f) => Ok(PlistValue::Real(*f)),
            toml::Value::String(s) => Ok(PlistValue::String(s.clone())),
            toml::Value::Array(items) => Ok(PlistValue::Array(
                items.iter().map(PlistValue::try_from).collect::<Result<_, _>>()?,
            )),
            toml::Value::Table(table) => Ok(PlistValue::Dict(
                table
                    .iter()
                    .map(|(key, val)| Ok((key.clone(), PlistValue::try_from(val)?)))
                    .collect::<Result<_, PlistError>>()?,
            )),
            toml::Value::Datetime(dt) => Err(PlistError::UnsupportedDataType {
                value: dt.to_string(),
                type_name: "datetime".to_string(),
            }),
        }
    }
}

impl TryFrom<plist::Value> for PlistValue {
    type Error = PlistError;

    fn try_from(value: plist::Value) -> Result<Self, Self::Error> {
        match value {
            plist::Value::Boolean(b) => Ok(PlistValue::Boolean(b)),
            plist::Value::Integer(i) => i.as_signed().map(PlistValue::Integer).ok_or_else(|| {
                PlistError::UnsupportedDataType {
                    value: i.to_string(),
                    type_name: "integer".to_string(),
                }
            }),
            plist::Value::Real(r) => Ok(PlistValue::Real(r)),
            plist::Value::String(s) => Ok(PlistValue::String(s)),
            plist::Value::Array(items) => Ok(PlistValue::Array(
                items
                    .into_iter()
                    .map(PlistValue::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            plist::Value::Dictionary(dict) => Ok(PlistValue::Dict(
                dict.into_iter()
                    .map(|(key, val)| Ok((key, PlistValue::try_from(val)?)))
                    .collect::<Result<_, PlistError>>()?,
            )),
            plist::Value::Data(_) => Err(PlistError::UnsupportedTypeTag("data".to_string())),
            plist::Value::Date(_) => Err(PlistError::UnsupportedTypeTag("date".to_string())),
            other => Err(PlistError::UnsupportedTypeTag(format!("{other:?}"))),
        }
    }
}

impl From<&PlistValue> for plist::Value {
    fn from(value: &PlistValue) -> Self {
        match value {
            PlistValue::Boolean(b) => plist::Value::Boolean(*b),
            PlistValue::Integer(i) => plist::Value::Integer((*i).into()),
            PlistValue::Real(r) => plist::Value::Real(*r),
            PlistValue::String(s) => plist::Value::String(s.clone()),
            PlistValue::Array(items) => {
                plist::Value::Array(items.iter().map(plist::Value::from).collect())
            }
            PlistValue::Dict(map) => {
                let mut dict = plist::Dictionary::new();
                for (key, val) in map {
                    dict.insert(key.clone(), plist::Value::from(val));
                }
                plist::Value::Dictionary(dict)
            }
        }
    }
}
