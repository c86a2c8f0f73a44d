use kindle_type::{span::Span, symbol::SymbolId};

use crate::NodeId;

/// `let name: Type = value;` or `let name = value;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ASTLet {
  pub name: SymbolId,
  /// Declared type name, resolved against the type store during analysis.
  pub type_name: Option<SymbolId>,
  pub value: NodeId,
  pub span: Span,
}

impl ASTLet {
  pub fn new(
    name: SymbolId,
    type_name: Option<SymbolId>,
    value: NodeId,
    span: Span,
  ) -> Self {
    Self {
      name,
      type_name,
      value,
      span,
    }
  }
}
