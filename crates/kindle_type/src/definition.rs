use crate::{Id, span::Span, symbol::SymbolId, types::TypeId};

pub type LocalId = Id<LocalDefinition>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalKind {
  /// Supplied by the host when the script runs.
  Parameter,
  /// Declared by a `let` statement inside the script.
  Variable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDefinition {
  pub name: SymbolId,
  pub type_id: TypeId,
  pub kind: LocalKind,
  pub span: Span,
}

/// Synthetic temporary owned by a null-safe guard. Holds the already
/// evaluated base of the chain while the guarded suffix runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuardTempId(pub u32);

impl std::fmt::Display for GuardTempId {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "$guard{}", self.0)
  }
}
