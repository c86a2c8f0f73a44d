pub mod display;

use kindle_type::{
  Id, Store,
  definition::{GuardTempId, LocalId},
  span::Span,
  types::{FieldRef, MethodRef, TypeId},
  value::KindleLiteralValue,
};

pub type IRId = Id<IRNode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRKind {
  // Expression
  Literal(KindleLiteralValue),
  Local(LocalId),
  FieldAccess {
    base: IRId,
    field: FieldRef,
  },
  MethodCall {
    receiver: IRId,
    method: MethodRef,
    args: Vec<IRId>,
  },
  /// Guard root: evaluate `base` once into `temp`; yield null of the node's
  /// type when it is null, otherwise the value of `guarded`.
  NullSafe {
    base: IRId,
    temp: GuardTempId,
    guarded: IRId,
  },
  /// Guarded suffix. Only evaluated after the enclosing guard proved its
  /// base non-null; carries no null test of its own.
  NullSafeSub {
    child: IRId,
  },
  GuardTemp(GuardTempId),

  // Statement
  Let {
    local: LocalId,
    value: IRId,
  },
  ExpressionStatement(IRId),
  Return(Option<IRId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRNode {
  pub kind: IRKind,
  pub span: Span,
  pub type_id: TypeId,
}

/// Lowered script. Nodes are immutable once allocated and every node is
/// referenced by exactly one parent (or listed once in `roots`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IR {
  nodes: Store<IRNode>,
  pub roots: Vec<IRId>,
}

impl IR {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn alloc(
    &mut self,
    node: IRNode,
  ) -> IRId {
    self.nodes.alloc(node)
  }

  pub fn get(
    &self,
    id: IRId,
  ) -> &IRNode {
    self.nodes.get(&id)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Direct children of `id`, in evaluation order.
  pub fn children(
    &self,
    id: IRId,
  ) -> Vec<IRId> {
    match &self.get(id).kind {
      IRKind::Literal(_) | IRKind::Local(_) | IRKind::GuardTemp(_) | IRKind::Return(None) => vec![],
      IRKind::FieldAccess { base, .. } => vec![*base],
      IRKind::MethodCall { receiver, args, .. } => std::iter::once(*receiver).chain(args.iter().copied()).collect(),
      IRKind::NullSafe { base, guarded, .. } => vec![*base, *guarded],
      IRKind::NullSafeSub { child } => vec![*child],
      IRKind::Let { value, .. } => vec![*value],
      IRKind::ExpressionStatement(expr) | IRKind::Return(Some(expr)) => vec![*expr],
    }
  }
}
