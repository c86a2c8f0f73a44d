use std::fmt;

use kindle_type::value::KindleLiteralValue;
use ordered_float::OrderedFloat;

/// Opaque reference to an object owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u32);

impl fmt::Display for ObjectHandle {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{:x}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i32),
  Long(i64),
  Double(OrderedFloat<f64>),
  Char(char),
  Str(String),
  Object(ObjectHandle),
}

impl Value {
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn str(value: &str) -> Self {
    Value::Str(value.to_string())
  }
}

impl From<&KindleLiteralValue> for Value {
  fn from(lit: &KindleLiteralValue) -> Self {
    match lit {
      KindleLiteralValue::Int(v) => Value::Int(*v),
      KindleLiteralValue::Long(v) => Value::Long(*v),
      KindleLiteralValue::Double(v) => Value::Double(*v),
      KindleLiteralValue::Boolean(v) => Value::Bool(*v),
      KindleLiteralValue::Char(v) => Value::Char(*v),
      KindleLiteralValue::String(v) => Value::Str(v.clone()),
      KindleLiteralValue::Null => Value::Null,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Value::Null => write!(f, "null"),
      Value::Bool(v) => write!(f, "{}", v),
      Value::Int(v) => write!(f, "{}", v),
      Value::Long(v) => write!(f, "{}", v),
      Value::Double(v) => write!(f, "{:?}", v.0),
      Value::Char(v) => write!(f, "{}", v),
      Value::Str(v) => write!(f, "{}", v),
      Value::Object(handle) => write!(f, "object@{}", handle),
    }
  }
}
