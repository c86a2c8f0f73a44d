//! Single-line S-expression rendering of script trees.
//!
//! Used in diagnostics and test output. A null-safe suffix renders exactly as
//! the expression it wraps: the `?.` is conveyed by the enclosing guard root.
//!
//! # Output Format Examples
//!
//! `a?.b()` renders as `(NullSafe (Var "a") (Call (Temp $guard0) "b"))`.
//!
//! `let x: Foo = a;` renders as `(Let "x" Foo (Var "a"))`.

use kindle_type::{Store, symbol::SymbolTable};

use crate::{
  ASTNode, NodeId,
  expressions::ASTExpression,
  statements::ASTStatement,
};

pub fn render(
  nodes: &Store<ASTNode>,
  symbols: &SymbolTable,
  node: &NodeId,
) -> String {
  match nodes.get(node) {
    ASTNode::Expression(expr) => render_expression(nodes, symbols, expr),
    ASTNode::Statement(stmt) => render_statement(nodes, symbols, stmt),
  }
}

pub fn render_nodes(
  nodes: &Store<ASTNode>,
  symbols: &SymbolTable,
  roots: &[NodeId],
) -> String {
  roots
    .iter()
    .map(|root| render(nodes, symbols, root))
    .collect::<Vec<_>>()
    .join("\n")
}

fn render_expression(
  nodes: &Store<ASTNode>,
  symbols: &SymbolTable,
  expr: &ASTExpression,
) -> String {
  match expr {
    ASTExpression::Literal(lit) => lit.value.to_string(),
    ASTExpression::Variable(var) => format!("(Var \"{}\")", symbols.get(&var.name)),
    ASTExpression::FieldAccess(access) => {
      format!(
        "(Field {} \"{}\")",
        render(nodes, symbols, &access.object),
        symbols.get(&access.field)
      )
    },
    ASTExpression::Call(call) => {
      let mut out = format!(
        "(Call {} \"{}\"",
        render(nodes, symbols, &call.receiver),
        symbols.get(&call.method)
      );
      for arg in &call.arguments {
        out.push(' ');
        out.push_str(&render(nodes, symbols, arg));
      }
      out.push(')');
      out
    },
    ASTExpression::NullSafe(guard) => {
      format!(
        "(NullSafe {} {})",
        render(nodes, symbols, &guard.base),
        render(nodes, symbols, &guard.guarded)
      )
    },
    ASTExpression::NullSafeSub(sub) => render(nodes, symbols, &sub.guarded),
    ASTExpression::GuardTemp(temp) => format!("(Temp {})", temp.temp),
  }
}

fn render_statement(
  nodes: &Store<ASTNode>,
  symbols: &SymbolTable,
  stmt: &ASTStatement,
) -> String {
  match stmt {
    ASTStatement::Let(let_) => {
      let value = render(nodes, symbols, &let_.value);
      match &let_.type_name {
        Some(ty) => format!("(Let \"{}\" {} {})", symbols.get(&let_.name), symbols.get(ty), value),
        None => format!("(Let \"{}\" {})", symbols.get(&let_.name), value),
      }
    },
    ASTStatement::Expression(stmt) => format!("(Expr {})", render(nodes, symbols, &stmt.expression)),
    ASTStatement::Return(ret) => match &ret.expression {
      Some(expr) => format!("(Return {})", render(nodes, symbols, expr)),
      None => "(Return)".to_string(),
    },
  }
}
