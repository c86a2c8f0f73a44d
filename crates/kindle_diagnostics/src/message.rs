use std::fmt;

use kindle_type::span::Span;

use super::diagnostic_report::Diagnostic;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticMessage {
  UndeclaredVariable {
    name: String,
    span: Span,
  },
  UndefinedType {
    name: String,
    span: Span,
  },
  TypeMismatch {
    expected: String,
    got: String,
    span: Span,
  },
  VariableAlreadyDefined {
    name: String,
    span: Span,
    previous_span: Span,
  },
  FieldNotFound {
    field: String,
    type_name: String,
    span: Span,
  },
  MethodNotFound {
    method: String,
    type_name: String,
    arity: usize,
    span: Span,
  },
  MemberAccessOnPrimitive {
    type_name: String,
    span: Span,
  },
  ArgumentTypeMismatch {
    method: String,
    position: usize,
    expected: String,
    got: String,
    span: Span,
  },
  NullSafeResultNotNullable {
    type_name: String,
    span: Span,
  },
}

impl fmt::Display for DiagnosticMessage {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      DiagnosticMessage::UndeclaredVariable { name, .. } => write!(f, "Undeclared variable '{}'", name),
      DiagnosticMessage::UndefinedType { name, .. } => write!(f, "Undefined type '{}'", name),
      DiagnosticMessage::TypeMismatch { expected, got, .. } => {
        write!(f, "Type mismatch: expected '{}', found '{}'", expected, got)
      },
      DiagnosticMessage::VariableAlreadyDefined { name, .. } => write!(f, "Variable '{}' is already defined", name),
      DiagnosticMessage::FieldNotFound { field, type_name, .. } => {
        write!(f, "Field '{}' not found on type '{}'", field, type_name)
      },
      DiagnosticMessage::MethodNotFound {
        method,
        type_name,
        arity,
        ..
      } => write!(f, "Method '{}/{}' not found on type '{}'", method, arity, type_name),
      DiagnosticMessage::MemberAccessOnPrimitive { type_name, .. } => {
        write!(f, "Cannot access members of primitive type '{}'", type_name)
      },
      DiagnosticMessage::ArgumentTypeMismatch {
        method,
        position,
        expected,
        got,
        ..
      } => write!(
        f,
        "Argument {} of '{}' expects '{}', found '{}'",
        position, method, expected, got
      ),
      DiagnosticMessage::NullSafeResultNotNullable { type_name, .. } => {
        write!(f, "Result of null safe operator must be nullable, found '{}'", type_name)
      },
    }
  }
}

impl DiagnosticMessage {
  pub fn primary_span(&self) -> Span {
    match self {
      DiagnosticMessage::UndeclaredVariable { span, .. }
      | DiagnosticMessage::UndefinedType { span, .. }
      | DiagnosticMessage::TypeMismatch { span, .. }
      | DiagnosticMessage::VariableAlreadyDefined { span, .. }
      | DiagnosticMessage::FieldNotFound { span, .. }
      | DiagnosticMessage::MethodNotFound { span, .. }
      | DiagnosticMessage::MemberAccessOnPrimitive { span, .. }
      | DiagnosticMessage::ArgumentTypeMismatch { span, .. }
      | DiagnosticMessage::NullSafeResultNotNullable { span, .. } => span.clone(),
    }
  }

  pub fn code(&self) -> String {
    match self {
      DiagnosticMessage::UndeclaredVariable { .. } => "A0001",
      DiagnosticMessage::UndefinedType { .. } => "A0002",
      DiagnosticMessage::TypeMismatch { .. } => "A0003",
      DiagnosticMessage::VariableAlreadyDefined { .. } => "A0004",
      DiagnosticMessage::FieldNotFound { .. } => "A0010",
      DiagnosticMessage::MethodNotFound { .. } => "A0011",
      DiagnosticMessage::MemberAccessOnPrimitive { .. } => "A0012",
      DiagnosticMessage::ArgumentTypeMismatch { .. } => "A0013",
      DiagnosticMessage::NullSafeResultNotNullable { .. } => "A0040",
    }
    .to_string()
  }

  fn secondary_labels(&self) -> Vec<(Span, String)> {
    match self {
      DiagnosticMessage::VariableAlreadyDefined { previous_span, .. } => {
        vec![(previous_span.clone(), "Previous definition here".to_string())]
      },
      _ => vec![],
    }
  }

  pub fn report(&self) -> Diagnostic {
    let mut diagnostic = Diagnostic::error(self.code(), self.to_string(), self.primary_span());
    for (span, message) in self.secondary_labels() {
      diagnostic = diagnostic.with_label(span, message);
    }
    diagnostic
  }
}
