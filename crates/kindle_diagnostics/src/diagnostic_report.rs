use kindle_type::span::Span;

/// The analyzer only emits `Error`; `Warning` is available to host checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Error,
  Warning,
}

/// Secondary location attached to a diagnostic, e.g. a previous definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
  pub span: Span,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
  pub severity: Severity,
  pub error_code: String,
  pub message: String,
  pub primary_span: Span,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn error(
    error_code: impl Into<String>,
    message: impl Into<String>,
    primary_span: Span,
  ) -> Self {
    Self {
      severity: Severity::Error,
      error_code: error_code.into(),
      message: message.into(),
      primary_span,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn warning(
    error_code: impl Into<String>,
    message: impl Into<String>,
    primary_span: Span,
  ) -> Self {
    Self {
      severity: Severity::Warning,
      ..Self::error(error_code, message, primary_span)
    }
  }

  pub fn with_label(
    mut self,
    span: Span,
    message: impl Into<String>,
  ) -> Self {
    self.labels.push(Label {
      span,
      message: message.into(),
    });
    self
  }

  pub fn with_note(
    mut self,
    note: impl Into<String>,
  ) -> Self {
    self.notes.push(note.into());
    self
  }
}
