use core::fmt::{self, Display, Formatter};

use compact_str::CompactString;

/// Dynamically typed element for heterogeneous containers.
///
/// Two values are equal when both are [`Value::Null`] or when they hold the
/// same variant with equal payloads. Floats compare by bit pattern, so `NaN`
/// equals itself and `0.0` differs from `-0.0`. Values of different variants
/// are never equal, e.g. `Int(20) != Float(20.0)`.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(CompactString),
}

impl Value {

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline(always)]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "str",
        }
    }
}

impl PartialEq for Value {

    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialEq<str> for Value {

    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {

    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {

    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Value {

    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some(*other as i64)
    }
}

impl PartialEq<f64> for Value {

    fn eq(&self, other: &f64) -> bool {
        self == &Self::Float(*other)
    }
}

impl PartialEq<bool> for Value {

    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl Display for Value {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            // Debug keeps the fractional part: 4.0 instead of 4
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {

    fn from(value: &str) -> Self {
        Self::Str(CompactString::new(value))
    }
}

impl From<String> for Value {

    fn from(value: String) -> Self {
        Self::Str(CompactString::from(value))
    }
}

impl From<CompactString> for Value {

    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for Value {

    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for Value {

    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {

    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {

    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {

    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {

    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn null_equals_only_null() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Null, Value::Int(0));
        assert_ne!(Value::from(""), Value::Null);
    }

    #[test]
    fn variants_never_cross_compare() {
        assert_ne!(Value::Int(20), Value::Float(20.0));
        assert_ne!(Value::from("1"), Value::Int(1));
        assert_ne!(Value::Char('a'), Value::from("a"));
    }

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(4.5), 4.5);
    }

    #[test]
    fn primitive_comparisons() {
        assert_eq!(Value::from("B"), "B");
        assert!(Value::from("B") == *"B");
        assert_eq!(Value::from(20), 20);
        assert_eq!(Value::from(20), 20i64);
        assert_eq!(Value::from(true), true);
        assert_ne!(Value::from(false), true);
    }

    #[test]
    fn options_map_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")), "x");
    }

    #[test]
    fn display_uses_natural_form() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(100).to_string(), "100");
        assert_eq!(Value::from(4.5).to_string(), "4.5");
        assert_eq!(Value::from(4.0).to_string(), "4.0");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::from('c').to_string(), "c");
    }

    #[test]
    fn runtime_type_recovery() {
        let v = Value::from("Ivanov");
        assert_eq!(v.as_str(), Some("Ivanov"));
        assert_eq!(v.as_int(), None);
        assert_eq!(v.type_name(), "str");
        assert_eq!(Value::from(20).as_int(), Some(20));
        assert_eq!(Value::from(4.5).as_float(), Some(4.5));
        assert_eq!(Value::from('z').as_char(), Some('z'));
        assert_eq!(Value::from(true).as_bool(), Some(true));
    }
}
