use std::fmt;

use kindle_diagnostics::{diagnostic_report::Diagnostic, message::DiagnosticMessage};
use kindle_type::span::Span;

/// Tree shapes the front end must never produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalShape {
  /// A generic traversal reached a null-safe suffix without going through its guard.
  NullSafeSuffixOutsideGuard,
  /// A guard root whose guarded child is not a null-safe suffix.
  GuardWithoutSuffix,
  /// A guard temporary read outside the guard that binds it.
  GuardTempOutsideGuard,
  /// Two nested guards bound the same temporary.
  GuardTempReused,
  /// Lowering reached a node that analysis never resolved.
  UnanalyzedNode,
}

impl IllegalShape {
  pub fn description(&self) -> &'static str {
    match self {
      IllegalShape::NullSafeSuffixOutsideGuard => "null safe suffix reached outside of its guard",
      IllegalShape::GuardWithoutSuffix => "null safe guard does not wrap a null safe suffix",
      IllegalShape::GuardTempOutsideGuard => "guard temporary read outside of its guard",
      IllegalShape::GuardTempReused => "guard temporary bound by more than one guard",
      IllegalShape::UnanalyzedNode => "node lowered before analysis",
    }
  }
}

/// Internal invariant violation. Never a user error: the tree was built or
/// traversed incorrectly.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralError {
  pub shape: IllegalShape,
  pub span: Span,
}

impl StructuralError {
  pub fn new(
    shape: IllegalShape,
    span: Span,
  ) -> Self {
    Self { shape, span }
  }
}

impl fmt::Display for StructuralError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "illegal tree structure: {} {}", self.shape.description(), self.span)
  }
}

impl std::error::Error for StructuralError {}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
  /// Compiler defect; aborts the current compilation unit.
  Structural(StructuralError),
  /// User-facing failure; the script does not compile.
  Diagnostic(Diagnostic),
}

impl AnalyzeError {
  pub fn is_structural(&self) -> bool {
    matches!(self, AnalyzeError::Structural(_))
  }

  pub fn structural(&self) -> Option<&StructuralError> {
    match self {
      AnalyzeError::Structural(err) => Some(err),
      AnalyzeError::Diagnostic(_) => None,
    }
  }

  pub fn diagnostic(&self) -> Option<&Diagnostic> {
    match self {
      AnalyzeError::Diagnostic(diag) => Some(diag),
      AnalyzeError::Structural(_) => None,
    }
  }

  pub fn span(&self) -> &Span {
    match self {
      AnalyzeError::Structural(err) => &err.span,
      AnalyzeError::Diagnostic(diag) => &diag.primary_span,
    }
  }
}

impl From<StructuralError> for AnalyzeError {
  fn from(err: StructuralError) -> Self {
    AnalyzeError::Structural(err)
  }
}

impl From<DiagnosticMessage> for AnalyzeError {
  fn from(message: DiagnosticMessage) -> Self {
    AnalyzeError::Diagnostic(message.report())
  }
}

impl From<Diagnostic> for AnalyzeError {
  fn from(diag: Diagnostic) -> Self {
    AnalyzeError::Diagnostic(diag)
  }
}

impl fmt::Display for AnalyzeError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      AnalyzeError::Structural(err) => write!(f, "{}", err),
      AnalyzeError::Diagnostic(diag) => write!(f, "error[{}]: {}", diag.error_code, diag.message),
    }
  }
}

impl std::error::Error for AnalyzeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      AnalyzeError::Structural(err) => Some(err),
      AnalyzeError::Diagnostic(_) => None,
    }
  }
}
