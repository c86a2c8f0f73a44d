use std::fmt::Display;

use ordered_float::OrderedFloat;

fn escape_special_characters(value: &str) -> String {
  value
    .replace("\\", "\\\\")
    .replace("\"", "\\\"")
    .replace("\n", "\\n")
    .replace("\r", "\\r")
    .replace("\t", "\\t")
}

#[derive(Debug, PartialEq, Clone, Hash, Eq)]
pub enum KindleLiteralValue {
  Int(i32),
  Long(i64),
  Double(OrderedFloat<f64>),
  Boolean(bool),
  Char(char),
  String(String),
  Null,
}

impl Display for KindleLiteralValue {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    match self {
      KindleLiteralValue::Int(i) => write!(f, "{}", i),
      KindleLiteralValue::Long(i) => write!(f, "{}L", i),
      KindleLiteralValue::Double(x) => write!(f, "{:?}", x.0),
      KindleLiteralValue::Boolean(x) => write!(f, "{}", x),
      KindleLiteralValue::Char(x) => write!(f, "'{}'", x.escape_default()),
      KindleLiteralValue::String(x) => write!(f, "\"{}\"", escape_special_characters(x)),
      KindleLiteralValue::Null => write!(f, "null"),
    }
  }
}
