use kindle_type::{span::Span, symbol::SymbolId};

use crate::NodeId;

/// Method invocation: `receiver.method(arg1, arg2)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ASTCallExpression {
  pub receiver: NodeId,
  pub method: SymbolId,
  pub arguments: Vec<NodeId>,
  pub span: Span,
}

impl ASTCallExpression {
  pub fn new(
    receiver: NodeId,
    method: SymbolId,
    arguments: Vec<NodeId>,
    span: Span,
  ) -> Self {
    Self {
      receiver,
      method,
      arguments,
      span,
    }
  }
}
