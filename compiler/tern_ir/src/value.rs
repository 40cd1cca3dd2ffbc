//! Runtime values.
//!
//! `Value` is the closed set of runtime values produced by tokens and
//! consumed by the reducers. Numeric coercion is lazy: literals keep the
//! representation they were written in until an arithmetic, equality or
//! ordering operator consumes them, at which point `normalize` promotes
//! them to `Decimal`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use rustc_hash::FxHashMap;

/// Runtime value.
///
/// Heap variants are `Arc`-backed: cloning a value never copies a string or
/// collection, and values may be shared across threads.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Decimal(BigDecimal),
    Str(Arc<str>),
    List(Arc<Vec<Value>>),
    Map(Arc<FxHashMap<String, Value>>),
    /// A type reference, the right operand of `instanceof` / `convertable_to`.
    Type(ValueType),
}

/// Named value types recognised by `instanceof` and `convertable_to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Boolean,
    Integer,
    Decimal,
    Number,
    List,
    Map,
}

impl ValueType {
    /// Resolve a type by name.
    pub fn from_name(name: &str) -> Option<ValueType> {
        let ty = match name {
            "String" => ValueType::String,
            "Boolean" => ValueType::Boolean,
            "Integer" | "Long" => ValueType::Integer,
            "Decimal" | "BigDecimal" => ValueType::Decimal,
            "Number" => ValueType::Number,
            "List" => ValueType::List,
            "Map" => ValueType::Map,
            _ => return None,
        };
        Some(ty)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ValueType::String => "String",
            ValueType::Boolean => "Boolean",
            ValueType::Integer => "Integer",
            ValueType::Decimal => "Decimal",
            ValueType::Number => "Number",
            ValueType::List => "List",
            ValueType::Map => "Map",
        }
    }

    /// Check whether `value` is an instance of this type. `null` is never an instance.
    pub fn is_instance(self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::String, Value::Str(_))
            | (ValueType::Boolean, Value::Bool(_))
            | (ValueType::Integer, Value::Int(_))
            | (ValueType::Decimal, Value::Decimal(_))
            | (ValueType::Number, Value::Int(_) | Value::Decimal(_))
            | (ValueType::List, Value::List(_))
            | (ValueType::Map, Value::Map(_)) => true,
            _ => false,
        }
    }

    /// Check whether `value` can be converted to this type.
    pub fn can_convert(self, value: &Value) -> bool {
        if self.is_instance(value) {
            return true;
        }
        match (self, value) {
            (_, Value::Null) => false,
            (ValueType::String, _) => true,
            (ValueType::Boolean, Value::Str(s)) => {
                s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
            }
            (ValueType::Boolean, Value::Int(_) | Value::Decimal(_)) => true,
            (ValueType::Integer | ValueType::Decimal | ValueType::Number, Value::Str(s)) => {
                is_number_text(s)
            }
            (ValueType::Integer | ValueType::Decimal | ValueType::Number, Value::Int(_) | Value::Decimal(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if `text` looks like a number: `-?digits(.digits)?`.
pub fn is_number_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<Arc<str>>) -> Value {
        Value::Str(s.into())
    }

    /// Create a list value.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Arc::new(items))
    }

    /// Create a map value.
    pub fn map<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Name of this value's runtime type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Type(_) => "type",
        }
    }

    /// Numeric coercion.
    ///
    /// Integers and numeric-looking strings become `Decimal`; everything else
    /// passes through unchanged.
    #[must_use]
    pub fn normalize(self) -> Value {
        match self {
            Value::Int(i) => Value::Decimal(BigDecimal::from(i)),
            Value::Str(ref s) if is_number_text(s) => match BigDecimal::from_str(s) {
                Ok(d) => Value::Decimal(d),
                Err(_) => self,
            },
            other => other,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// 32-bit integer view used by the bitwise operators.
    ///
    /// Decimals are truncated toward zero and then wrapped to 32 bits.
    pub fn as_int32(&self) -> Option<i32> {
        let wide = match self {
            Value::Int(i) => i128::from(*i),
            Value::Decimal(d) => d.with_scale_round(0, RoundingMode::Down).to_i128()?,
            Value::Str(s) if is_number_text(s) => BigDecimal::from_str(s)
                .ok()?
                .with_scale_round(0, RoundingMode::Down)
                .to_i128()?,
            _ => return None,
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "bitwise operators work on the low 32 bits"
        )]
        let low = wide as i32;
        Some(low)
    }

    /// Textual form used by concatenation, regex and projection.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Check for the empty value: `null`, `""`, or an empty collection.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Boolean-mode coercion.
    ///
    /// Booleans pass through; `null`, zero, `""` and empty collections are
    /// false; everything else is true.
    pub fn truthiness(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Decimal(d) => !d.is_zero(),
            Value::Type(_) => true,
            other => !other.is_empty_value(),
        }
    }

    /// Narrow an integral decimal that fits `i64` back to `Int`.
    #[must_use]
    pub fn narrow(self) -> Value {
        match self {
            Value::Decimal(ref d) if d.is_integer() => match d.to_i64() {
                Some(i) => Value::Int(i),
                None => self,
            },
            other => other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Int(a), Value::Decimal(b)) | (Value::Decimal(b), Value::Int(a)) => {
                BigDecimal::from(*a) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Decimal(d) => f.write_str(&d.to_plain_string()),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}=")?;
                    if let Some(v) = entries.get(key) {
                        write!(f, "{v}")?;
                    }
                }
                f.write_str("}")
            }
            Value::Type(ty) => write!(f, "{ty}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}
