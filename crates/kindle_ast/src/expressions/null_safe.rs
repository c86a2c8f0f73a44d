use kindle_type::{definition::GuardTempId, span::Span};

use crate::NodeId;

/// Guard root of one `?.` segment.
///
/// `base` is evaluated once into `temp`; when it is null the whole node
/// yields null and `guarded` is never evaluated. `guarded` must be an
/// [`ASTNullSafeSub`] whose subtree reads the base through
/// [`ASTGuardTemp`] nodes bound to the same `temp`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ASTNullSafe {
  pub base: NodeId,
  pub temp: GuardTempId,
  pub guarded: NodeId,
  pub span: Span,
}

impl ASTNullSafe {
  pub fn new(
    base: NodeId,
    temp: GuardTempId,
    guarded: NodeId,
    span: Span,
  ) -> Self {
    Self {
      base,
      temp,
      guarded,
      span,
    }
  }
}

/// The guarded suffix of a null-safe chain.
///
/// Only reachable through its guard root: generic traversals that land on
/// this node indicate a malformed tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ASTNullSafeSub {
  pub guarded: NodeId,
  pub span: Span,
}

impl ASTNullSafeSub {
  pub fn new(
    guarded: NodeId,
    span: Span,
  ) -> Self {
    Self { guarded, span }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ASTGuardTemp {
  pub temp: GuardTempId,
  pub span: Span,
}

impl ASTGuardTemp {
  pub fn new(
    temp: GuardTempId,
    span: Span,
  ) -> Self {
    Self { temp, span }
  }
}
