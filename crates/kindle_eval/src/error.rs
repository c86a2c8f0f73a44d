use std::fmt;

use kindle_type::{definition::GuardTempId, span::Span};

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
  /// Member access or call on a null receiver outside a null-safe chain.
  NullReceiver {
    member: String,
    span: Span,
  },
  NullArgument {
    method: String,
    position: usize,
    span: Span,
  },
  ArityMismatch {
    expected: usize,
    got: usize,
  },
  /// The host does not know the member the script was compiled against.
  UnknownMember {
    class: String,
    member: String,
  },
  /// Failure reported by the host while running a member.
  Host(String),
  /// Read of a slot that was never written. Indicates malformed IR.
  UnboundSlot {
    slot: String,
    span: Span,
  },
}

impl EvalError {
  pub fn unbound_temp(
    temp: GuardTempId,
    span: &Span,
  ) -> Self {
    EvalError::UnboundSlot {
      slot: temp.to_string(),
      span: span.clone(),
    }
  }
}

impl fmt::Display for EvalError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      EvalError::NullReceiver { member, span } => write!(f, "cannot access '{}' on null {}", member, span),
      EvalError::NullArgument { method, position, span } => {
        write!(f, "argument {} of '{}' is null {}", position, method, span)
      },
      EvalError::ArityMismatch { expected, got } => {
        write!(f, "script expects {} arguments, got {}", expected, got)
      },
      EvalError::UnknownMember { class, member } => write!(f, "host has no member '{}.{}'", class, member),
      EvalError::Host(message) => write!(f, "host error: {}", message),
      EvalError::UnboundSlot { slot, span } => write!(f, "read of unbound slot '{}' {}", slot, span),
    }
  }
}

impl std::error::Error for EvalError {}
