//! Reference evaluator for lowered scripts.
//!
//! Walks the IR directly. Null-safe chains follow the guard discipline: the
//! base of each guard is evaluated once into its temporary and the guarded
//! suffix only runs when that value is not null.

pub mod error;
pub mod value;

use std::collections::HashMap;

use kindle_analyzer::CompiledScript;
use kindle_config::{DebugTrace, KindleConfig};
use kindle_ir::{IRId, IRKind};
use kindle_log::{log_trc, trace_dbg};
use kindle_type::{
  definition::{GuardTempId, LocalId},
  span::Span,
  types::{FieldRef, MethodRef, TypeId, format_type_name},
};

pub use error::EvalError;
pub use value::{ObjectHandle, Value};

/// Host side of a script: owns the objects scripts operate on.
pub trait HostRuntime {
  fn get_field(
    &mut self,
    object: ObjectHandle,
    class: &str,
    field: &str,
  ) -> Result<Value, EvalError>;

  fn invoke(
    &mut self,
    object: ObjectHandle,
    class: &str,
    method: &str,
    args: Vec<Value>,
  ) -> Result<Value, EvalError>;
}

pub struct Evaluator<'s> {
  script: &'s CompiledScript,
  host: &'s mut dyn HostRuntime,
  config: &'s KindleConfig,
  locals: HashMap<LocalId, Value>,
  temps: HashMap<GuardTempId, Value>,
}

impl<'s> Evaluator<'s> {
  pub fn new(
    script: &'s CompiledScript,
    host: &'s mut dyn HostRuntime,
    config: &'s KindleConfig,
  ) -> Self {
    Self {
      script,
      host,
      config,
      locals: HashMap::new(),
      temps: HashMap::new(),
    }
  }

  /// Run the script with `args` bound to its parameters. Yields the value of
  /// the first executed `return`, or null when the script falls off the end.
  pub fn run(
    &mut self,
    args: Vec<Value>,
  ) -> Result<Value, EvalError> {
    if args.len() != self.script.parameters.len() {
      return Err(EvalError::ArityMismatch {
        expected: self.script.parameters.len(),
        got: args.len(),
      });
    }

    self.locals.clear();
    self.temps.clear();
    for (local, value) in self.script.parameters.iter().zip(args) {
      self.locals.insert(*local, value);
    }

    let ir = &self.script.ir;
    for root in &ir.roots {
      match &ir.get(*root).kind {
        IRKind::Return(Some(value)) => return self.eval(*value),
        IRKind::Return(None) => return Ok(Value::Null),
        _ => {
          self.eval(*root)?;
        },
      }
    }

    Ok(Value::Null)
  }

  fn eval(
    &mut self,
    id: IRId,
  ) -> Result<Value, EvalError> {
    let script = self.script;
    let node = script.ir.get(id);
    log_trc!(self.config, "eval {:?} {}", node.kind, node.span);

    match &node.kind {
      IRKind::Literal(lit) => Ok(Value::from(lit)),
      IRKind::Local(local) => self.locals.get(local).cloned().ok_or_else(|| EvalError::UnboundSlot {
        slot: format!("local {:?}", local),
        span: node.span.clone(),
      }),
      IRKind::FieldAccess { base, field } => {
        let receiver = self.eval(*base)?;
        self.get_field(receiver, field, &node.span)
      },
      IRKind::MethodCall { receiver, method, args } => {
        let receiver_ty = script.ir.get(*receiver).type_id;
        let receiver = self.eval(*receiver)?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
          values.push(self.eval(*arg)?);
        }

        self.invoke(receiver, &receiver_ty, method, values, &node.span)
      },
      IRKind::NullSafe { base, temp, guarded } => {
        let base = self.eval(*base)?;
        if base.is_null() {
          trace_dbg!(self.config, DebugTrace::Eval, "{} is null, chain yields null {}", temp, node.span);
          return Ok(Value::Null);
        }

        self.temps.insert(*temp, base);
        let result = self.eval(*guarded);
        self.temps.remove(temp);

        result
      },
      IRKind::NullSafeSub { child } => self.eval(*child),
      IRKind::GuardTemp(temp) => self
        .temps
        .get(temp)
        .cloned()
        .ok_or_else(|| EvalError::unbound_temp(*temp, &node.span)),
      IRKind::Let { local, value } => {
        let value = self.eval(*value)?;
        self.locals.insert(*local, value);
        Ok(Value::Null)
      },
      IRKind::ExpressionStatement(expr) => {
        self.eval(*expr)?;
        Ok(Value::Null)
      },
      // Only reachable as a script root, handled by `run`.
      IRKind::Return(value) => match value {
        Some(value) => self.eval(*value),
        None => Ok(Value::Null),
      },
    }
  }

  fn get_field(
    &mut self,
    receiver: Value,
    field: &FieldRef,
    span: &Span,
  ) -> Result<Value, EvalError> {
    let script = self.script;
    let types = &script.types;
    let class = &types.class(&field.class).name;
    let name = &types.field(field).name;

    match receiver {
      Value::Null => Err(EvalError::NullReceiver {
        member: name.clone(),
        span: span.clone(),
      }),
      Value::Object(handle) => self.host.get_field(handle, class, name),
      _ => Err(EvalError::UnknownMember {
        class: class.clone(),
        member: name.clone(),
      }),
    }
  }

  fn invoke(
    &mut self,
    receiver: Value,
    receiver_ty: &TypeId,
    method: &MethodRef,
    args: Vec<Value>,
    span: &Span,
  ) -> Result<Value, EvalError> {
    let script = self.script;
    let types = &script.types;
    let owner = types.class(&method.class);
    let name = types.method(method).name.as_str();

    if receiver.is_null() {
      return Err(EvalError::NullReceiver {
        member: name.to_string(),
        span: span.clone(),
      });
    }

    if !owner.builtin {
      let Value::Object(handle) = receiver else {
        return Err(EvalError::UnknownMember {
          class: owner.name.clone(),
          member: name.to_string(),
        });
      };
      return self.host.invoke(handle, &owner.name, name, args);
    }

    builtin_method(&receiver, &format_type_name(types, receiver_ty), name, &args, span)
  }
}

/// Methods of the builtin `Object` and `String` classes.
fn builtin_method(
  receiver: &Value,
  type_name: &str,
  method: &str,
  args: &[Value],
  span: &Span,
) -> Result<Value, EvalError> {
  let value = match (receiver, method, args) {
    (Value::Str(s), "length", []) => Value::Int(s.encode_utf16().count() as i32),
    (Value::Str(s), "isEmpty", []) => Value::Bool(s.is_empty()),
    (Value::Str(s), "trim", []) => Value::Str(s.trim().to_string()),
    (Value::Str(s), "concat", [arg]) => match arg {
      Value::Str(other) => Value::Str(format!("{}{}", s, other)),
      _ => {
        return Err(EvalError::NullArgument {
          method: method.to_string(),
          position: 1,
          span: span.clone(),
        });
      },
    },
    (Value::Str(s), "hashCode", []) => Value::Int(string_hash(s)),
    (Value::Object(handle), "toString", []) => Value::Str(format!("{}@{}", type_name, handle)),
    (Value::Object(handle), "hashCode", []) => Value::Int(handle.0 as i32),
    (_, "toString", []) => Value::Str(receiver.to_string()),
    (_, "equals", [other]) => Value::Bool(receiver == other),
    _ => {
      return Err(EvalError::UnknownMember {
        class: type_name.to_string(),
        member: method.to_string(),
      });
    },
  };

  Ok(value)
}

/// `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 code units, wrapping.
fn string_hash(s: &str) -> i32 {
  s.encode_utf16().fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}
