use kindle_ast::{
  ASTNode, NodeId,
  expressions::{
    ASTCallExpression, ASTExpression, ASTFieldAccess, ASTGuardTemp, ASTLiteral, ASTNullSafe, ASTNullSafeSub,
    ASTVariableExpression,
  },
  statements::{ASTLet, ASTStatement},
};
use kindle_config::DebugTrace;
use kindle_diagnostics::message::DiagnosticMessage;
use kindle_log::trace_dbg;
use kindle_type::{definition::LocalKind, types::TypeId, value::KindleLiteralValue};

use crate::{
  Analyzer,
  error::{AnalyzeError, IllegalShape, StructuralError},
};

impl<'a> Analyzer<'a> {
  /// Resolve the type of `node_id` and its subtree, children first.
  ///
  /// The type is recorded only when analysis of the node succeeds; a failing
  /// node keeps no resolved type.
  pub fn analyze_node(
    &mut self,
    node_id: &NodeId,
  ) -> Result<TypeId, AnalyzeError> {
    let ast = self.ast;

    let ty = match ast.get(node_id) {
      ASTNode::Expression(expr) => self.analyze_expression(node_id, expr)?,
      ASTNode::Statement(stmt) => self.analyze_statement(node_id, stmt)?,
    };

    self.node_types.insert(*node_id, ty);
    Ok(ty)
  }

  fn analyze_expression(
    &mut self,
    node_id: &NodeId,
    expr: &ASTExpression,
  ) -> Result<TypeId, AnalyzeError> {
    match expr {
      ASTExpression::Literal(lit) => Ok(self.analyze_literal(lit)),
      ASTExpression::Variable(var) => self.analyze_variable(node_id, var),
      ASTExpression::FieldAccess(access) => self.analyze_field_access(node_id, access),
      ASTExpression::Call(call) => self.analyze_call(node_id, call),
      ASTExpression::NullSafe(guard) => self.analyze_null_safe(guard),
      ASTExpression::NullSafeSub(sub) => self.analyze_null_safe_sub(sub),
      ASTExpression::GuardTemp(temp) => self.analyze_guard_temp(temp),
    }
  }

  fn analyze_literal(
    &self,
    lit: &ASTLiteral,
  ) -> TypeId {
    match &lit.value {
      KindleLiteralValue::Int(_) => self.types.int(),
      KindleLiteralValue::Long(_) => self.types.long(),
      KindleLiteralValue::Double(_) => self.types.double(),
      KindleLiteralValue::Boolean(_) => self.types.boolean(),
      KindleLiteralValue::Char(_) => self.types.char(),
      KindleLiteralValue::String(_) => self.types.string(),
      KindleLiteralValue::Null => self.types.null(),
    }
  }

  fn analyze_variable(
    &mut self,
    node_id: &NodeId,
    var: &ASTVariableExpression,
  ) -> Result<TypeId, AnalyzeError> {
    let Some(local) = self.scopes.lookup(&var.name).copied() else {
      return Err(
        DiagnosticMessage::UndeclaredVariable {
          name: self.symbol_name(&var.name),
          span: var.span.clone(),
        }
        .into(),
      );
    };

    self.node_locals.insert(*node_id, local);
    Ok(self.locals.get(&local).type_id)
  }

  /// Members are only reachable through reference types.
  fn check_member_receiver(
    &self,
    receiver: &TypeId,
    span: &kindle_type::span::Span,
  ) -> Result<(), AnalyzeError> {
    if self.types.is_primitive(receiver) {
      return Err(
        DiagnosticMessage::MemberAccessOnPrimitive {
          type_name: self.type_name(receiver),
          span: span.clone(),
        }
        .into(),
      );
    }

    Ok(())
  }

  fn analyze_field_access(
    &mut self,
    node_id: &NodeId,
    access: &ASTFieldAccess,
  ) -> Result<TypeId, AnalyzeError> {
    let object_ty = self.analyze_node(&access.object)?;
    self.check_member_receiver(&object_ty, &access.span)?;

    let field_name = self.symbol_name(&access.field);
    let Some(field) = self.types.find_field(&object_ty, &field_name) else {
      return Err(
        DiagnosticMessage::FieldNotFound {
          field: field_name,
          type_name: self.type_name(&object_ty),
          span: access.span.clone(),
        }
        .into(),
      );
    };

    self.node_fields.insert(*node_id, field);
    Ok(self.types.field(&field).type_id)
  }

  fn analyze_call(
    &mut self,
    node_id: &NodeId,
    call: &ASTCallExpression,
  ) -> Result<TypeId, AnalyzeError> {
    let receiver_ty = self.analyze_node(&call.receiver)?;
    self.check_member_receiver(&receiver_ty, &call.span)?;

    let mut arg_types = Vec::with_capacity(call.arguments.len());
    for arg in &call.arguments {
      arg_types.push(self.analyze_node(arg)?);
    }

    let method_name = self.symbol_name(&call.method);
    let Some(method) = self.types.find_method(&receiver_ty, &method_name, arg_types.len()) else {
      return Err(
        DiagnosticMessage::MethodNotFound {
          method: method_name,
          type_name: self.type_name(&receiver_ty),
          arity: arg_types.len(),
          span: call.span.clone(),
        }
        .into(),
      );
    };

    let def = self.types.method(&method);
    for (position, (arg_ty, param_ty)) in arg_types.iter().zip(&def.params).enumerate() {
      if !self.types.is_assignable(arg_ty, param_ty) {
        return Err(
          DiagnosticMessage::ArgumentTypeMismatch {
            method: method_name,
            position: position + 1,
            expected: self.type_name(param_ty),
            got: self.type_name(arg_ty),
            span: self.ast.get(&call.arguments[position]).span().clone(),
          }
          .into(),
        );
      }
    }

    let return_type = def.return_type;
    self.node_methods.insert(*node_id, method);
    Ok(return_type)
  }

  /// Guard root: the base is analyzed once and bound to the guard's
  /// temporary for the duration of the suffix.
  fn analyze_null_safe(
    &mut self,
    guard: &ASTNullSafe,
  ) -> Result<TypeId, AnalyzeError> {
    let ast = self.ast;
    let base_ty = self.analyze_node(&guard.base)?;

    let suffix = ast.get(&guard.guarded);
    if !matches!(suffix, ASTNode::Expression(ASTExpression::NullSafeSub(_))) {
      return Err(StructuralError::new(IllegalShape::GuardWithoutSuffix, guard.span.clone()).into());
    }

    if self.types.is_primitive(&base_ty) {
      let type_name = self.type_name(&base_ty);
      let diagnostic = DiagnosticMessage::NullSafeResultNotNullable {
        type_name: type_name.clone(),
        span: suffix.span().clone(),
      }
      .report()
      .with_note(format!(
        "the receiver of '?.' has primitive type '{}' and can never be null",
        type_name
      ));

      return Err(diagnostic.into());
    }

    if self.guard_temps.contains_key(&guard.temp) {
      return Err(StructuralError::new(IllegalShape::GuardTempReused, guard.span.clone()).into());
    }
    self.guard_temps.insert(guard.temp, base_ty);

    trace_dbg!(
      self.config,
      DebugTrace::Analyzer,
      "bound {} to '{}'",
      guard.temp,
      self.type_name(&base_ty)
    );

    let result = self.analyze_node(&guard.guarded);
    self.guard_temps.remove(&guard.temp);

    result
  }

  fn analyze_null_safe_sub(
    &mut self,
    sub: &ASTNullSafeSub,
  ) -> Result<TypeId, AnalyzeError> {
    let ty = self.analyze_node(&sub.guarded)?;

    if self.types.is_primitive(&ty) {
      return Err(
        DiagnosticMessage::NullSafeResultNotNullable {
          type_name: self.type_name(&ty),
          span: sub.span.clone(),
        }
        .into(),
      );
    }

    trace_dbg!(
      self.config,
      DebugTrace::Analyzer,
      "null safe suffix resolved to '{}'",
      self.type_name(&ty)
    );

    Ok(ty)
  }

  fn analyze_guard_temp(
    &self,
    temp: &ASTGuardTemp,
  ) -> Result<TypeId, AnalyzeError> {
    match self.guard_temps.get(&temp.temp) {
      Some(ty) => Ok(*ty),
      None => Err(StructuralError::new(IllegalShape::GuardTempOutsideGuard, temp.span.clone()).into()),
    }
  }

  fn analyze_statement(
    &mut self,
    node_id: &NodeId,
    stmt: &ASTStatement,
  ) -> Result<TypeId, AnalyzeError> {
    match stmt {
      ASTStatement::Let(let_) => self.analyze_let(node_id, let_)?,
      ASTStatement::Expression(stmt) => {
        self.analyze_node(&stmt.expression)?;
      },
      ASTStatement::Return(ret) => {
        if let Some(expr) = &ret.expression {
          self.analyze_node(expr)?;
        }
      },
    }

    Ok(self.types.void())
  }

  fn analyze_let(
    &mut self,
    node_id: &NodeId,
    let_: &ASTLet,
  ) -> Result<(), AnalyzeError> {
    let value_ty = self.analyze_node(&let_.value)?;

    let local_ty = match &let_.type_name {
      Some(type_name) => {
        let name = self.symbol_name(type_name);
        let Some(declared) = self.types.lookup_by_name(&name) else {
          return Err(DiagnosticMessage::UndefinedType { name, span: let_.span.clone() }.into());
        };

        if !self.types.is_assignable(&value_ty, &declared) {
          return Err(
            DiagnosticMessage::TypeMismatch {
              expected: name,
              got: self.type_name(&value_ty),
              span: self.ast.get(&let_.value).span().clone(),
            }
            .into(),
          );
        }

        declared
      },
      None => value_ty,
    };

    let name = self.symbol_name(&let_.name);
    let local = self.declare_local(&name, local_ty, LocalKind::Variable, let_.span.clone())?;
    self.node_locals.insert(*node_id, local);

    Ok(())
  }
}
