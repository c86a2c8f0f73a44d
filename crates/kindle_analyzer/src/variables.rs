//! Free-variable collection over script trees.
//!
//! Walks the tree and records the names of every variable the script reads
//! or declares. Guard roots are handled here: the collector visits the base,
//! then steps over the null-safe suffix wrapper straight into the guarded
//! expression. Reaching a suffix any other way means the tree was traversed
//! without its guard, which is a structural error.

use std::collections::BTreeSet;

use kindle_ast::{ASTNode, NodeId, expressions::ASTExpression, statements::ASTStatement};
use kindle_type::{Store, symbol::SymbolTable};

use crate::error::{IllegalShape, StructuralError};

pub fn collect_variables(
  ast: &Store<ASTNode>,
  symbols: &SymbolTable,
  node: &NodeId,
  out: &mut BTreeSet<String>,
) -> Result<(), StructuralError> {
  match ast.get(node) {
    ASTNode::Expression(expr) => collect_expression(ast, symbols, expr, out),
    ASTNode::Statement(stmt) => collect_statement(ast, symbols, stmt, out),
  }
}

fn collect_expression(
  ast: &Store<ASTNode>,
  symbols: &SymbolTable,
  expr: &ASTExpression,
  out: &mut BTreeSet<String>,
) -> Result<(), StructuralError> {
  match expr {
    ASTExpression::Literal(_) | ASTExpression::GuardTemp(_) => Ok(()),
    ASTExpression::Variable(var) => {
      out.insert(symbols.get(&var.name).to_string());
      Ok(())
    },
    ASTExpression::FieldAccess(access) => collect_variables(ast, symbols, &access.object, out),
    ASTExpression::Call(call) => {
      collect_variables(ast, symbols, &call.receiver, out)?;
      for arg in &call.arguments {
        collect_variables(ast, symbols, arg, out)?;
      }
      Ok(())
    },
    ASTExpression::NullSafe(guard) => {
      collect_variables(ast, symbols, &guard.base, out)?;

      match ast.get(&guard.guarded) {
        ASTNode::Expression(ASTExpression::NullSafeSub(sub)) => collect_variables(ast, symbols, &sub.guarded, out),
        _ => Err(StructuralError::new(IllegalShape::GuardWithoutSuffix, guard.span.clone())),
      }
    },
    ASTExpression::NullSafeSub(sub) => Err(StructuralError::new(
      IllegalShape::NullSafeSuffixOutsideGuard,
      sub.span.clone(),
    )),
  }
}

fn collect_statement(
  ast: &Store<ASTNode>,
  symbols: &SymbolTable,
  stmt: &ASTStatement,
  out: &mut BTreeSet<String>,
) -> Result<(), StructuralError> {
  match stmt {
    ASTStatement::Let(let_) => {
      out.insert(symbols.get(&let_.name).to_string());
      collect_variables(ast, symbols, &let_.value, out)
    },
    ASTStatement::Expression(stmt) => collect_variables(ast, symbols, &stmt.expression, out),
    ASTStatement::Return(ret) => match &ret.expression {
      Some(expr) => collect_variables(ast, symbols, expr, out),
      None => Ok(()),
    },
  }
}
