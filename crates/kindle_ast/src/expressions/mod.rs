use kindle_type::span::Span;

pub mod call;
pub mod field_access;
pub mod literal;
pub mod null_safe;
pub mod variable;

pub use call::ASTCallExpression;
pub use field_access::ASTFieldAccess;
pub use literal::ASTLiteral;
pub use null_safe::{ASTGuardTemp, ASTNullSafe, ASTNullSafeSub};
pub use variable::ASTVariableExpression;

#[derive(Debug, PartialEq, Clone, Hash, Eq)]
pub enum ASTExpression {
  Literal(ASTLiteral),
  Variable(ASTVariableExpression),
  FieldAccess(ASTFieldAccess),
  Call(ASTCallExpression),
  /// Guard root of a `?.` segment: owns the base and the null test.
  NullSafe(ASTNullSafe),
  /// Suffix evaluated only once the guard proved the base non-null.
  NullSafeSub(ASTNullSafeSub),
  /// Read of the guard root's temporary.
  GuardTemp(ASTGuardTemp),
}

impl ASTExpression {
  pub fn span(&self) -> &Span {
    match self {
      ASTExpression::Literal(expr) => &expr.span,
      ASTExpression::Variable(expr) => &expr.span,
      ASTExpression::FieldAccess(expr) => &expr.span,
      ASTExpression::Call(expr) => &expr.span,
      ASTExpression::NullSafe(expr) => &expr.span,
      ASTExpression::NullSafeSub(expr) => &expr.span,
      ASTExpression::GuardTemp(expr) => &expr.span,
    }
  }
}
