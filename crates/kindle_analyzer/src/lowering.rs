use std::collections::HashMap;

use kindle_ast::{ASTNode, NodeId, expressions::ASTExpression, statements::ASTStatement};
use kindle_config::DebugTrace;
use kindle_ir::{IR, IRId, IRKind, IRNode};
use kindle_log::trace_dbg;
use kindle_type::span::Span;

use crate::{
  Analyzer,
  error::{AnalyzeError, IllegalShape, StructuralError},
};

impl<'a> Analyzer<'a> {
  /// Lower an analyzed subtree into `ir`, children before their parent.
  ///
  /// Only reads analysis results, so lowering the same node into fresh IR
  /// arenas yields identical trees.
  pub fn lower_node(
    &self,
    node_id: &NodeId,
    ir: &mut IR,
  ) -> Result<IRId, AnalyzeError> {
    let node = self.ast.get(node_id);
    let span = node.span();
    let type_id = self.resolved(&self.node_types, node_id, span)?;

    let kind = match node {
      ASTNode::Expression(expr) => self.lower_expression(node_id, expr, ir)?,
      ASTNode::Statement(stmt) => self.lower_statement(node_id, stmt, ir)?,
    };

    let id = ir.alloc(IRNode {
      kind,
      span: span.clone(),
      type_id,
    });

    Ok(id)
  }

  fn lower_expression(
    &self,
    node_id: &NodeId,
    expr: &ASTExpression,
    ir: &mut IR,
  ) -> Result<IRKind, AnalyzeError> {
    let span = expr.span();

    let kind = match expr {
      ASTExpression::Literal(lit) => IRKind::Literal(lit.value.clone()),
      ASTExpression::Variable(_) => IRKind::Local(self.resolved(&self.node_locals, node_id, span)?),
      ASTExpression::FieldAccess(access) => IRKind::FieldAccess {
        base: self.lower_node(&access.object, ir)?,
        field: self.resolved(&self.node_fields, node_id, span)?,
      },
      ASTExpression::Call(call) => {
        let receiver = self.lower_node(&call.receiver, ir)?;
        let mut args = Vec::with_capacity(call.arguments.len());
        for arg in &call.arguments {
          args.push(self.lower_node(arg, ir)?);
        }

        IRKind::MethodCall {
          receiver,
          method: self.resolved(&self.node_methods, node_id, span)?,
          args,
        }
      },
      ASTExpression::NullSafe(guard) => {
        let base = self.lower_node(&guard.base, ir)?;
        let guarded = self.lower_node(&guard.guarded, ir)?;

        trace_dbg!(self.config, DebugTrace::Lowering, "guard {} at {}", guard.temp, span);

        IRKind::NullSafe {
          base,
          temp: guard.temp,
          guarded,
        }
      },
      ASTExpression::NullSafeSub(sub) => IRKind::NullSafeSub {
        child: self.lower_node(&sub.guarded, ir)?,
      },
      ASTExpression::GuardTemp(temp) => IRKind::GuardTemp(temp.temp),
    };

    Ok(kind)
  }

  fn lower_statement(
    &self,
    node_id: &NodeId,
    stmt: &ASTStatement,
    ir: &mut IR,
  ) -> Result<IRKind, AnalyzeError> {
    let kind = match stmt {
      ASTStatement::Let(let_) => IRKind::Let {
        local: self.resolved(&self.node_locals, node_id, &let_.span)?,
        value: self.lower_node(&let_.value, ir)?,
      },
      ASTStatement::Expression(stmt) => IRKind::ExpressionStatement(self.lower_node(&stmt.expression, ir)?),
      ASTStatement::Return(ret) => match &ret.expression {
        Some(expr) => IRKind::Return(Some(self.lower_node(expr, ir)?)),
        None => IRKind::Return(None),
      },
    };

    Ok(kind)
  }

  fn resolved<T: Copy>(
    &self,
    table: &HashMap<NodeId, T>,
    node_id: &NodeId,
    span: &Span,
  ) -> Result<T, AnalyzeError> {
    table
      .get(node_id)
      .copied()
      .ok_or_else(|| StructuralError::new(IllegalShape::UnanalyzedNode, span.clone()).into())
  }
}
