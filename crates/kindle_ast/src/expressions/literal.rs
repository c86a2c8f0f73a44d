use kindle_type::{span::Span, value::KindleLiteralValue};

#[derive(Debug, Clone, PartialEq, Hash, Eq)]
pub struct ASTLiteral {
  pub value: KindleLiteralValue,
  pub span: Span,
}

impl ASTLiteral {
  pub fn new(
    value: KindleLiteralValue,
    span: Span,
  ) -> Self {
    Self { value, span }
  }
}
