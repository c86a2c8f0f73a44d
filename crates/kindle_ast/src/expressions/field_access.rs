use kindle_type::{span::Span, symbol::SymbolId};

use crate::NodeId;

/// Field read: `object.field`
#[derive(Debug, Clone, PartialEq, Hash, Eq)]
pub struct ASTFieldAccess {
  pub object: NodeId,
  pub field: SymbolId,
  pub span: Span,
}

impl ASTFieldAccess {
  pub fn new(
    object: NodeId,
    field: SymbolId,
    span: Span,
  ) -> Self {
    Self { object, field, span }
  }
}
