use kindle_type::span::Span;

pub mod let_statement;
pub mod return_statement;

pub use let_statement::ASTLet;
pub use return_statement::ASTReturn;

use crate::NodeId;

#[derive(Debug, PartialEq, Clone, Hash, Eq)]
pub enum ASTStatement {
  Let(ASTLet),
  Expression(ASTExpressionStatement),
  Return(ASTReturn),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ASTExpressionStatement {
  pub expression: NodeId,
  pub span: Span,
}

impl ASTStatement {
  pub fn span(&self) -> &Span {
    match self {
      ASTStatement::Let(stmt) => &stmt.span,
      ASTStatement::Expression(stmt) => &stmt.span,
      ASTStatement::Return(stmt) => &stmt.span,
    }
  }
}
