//! Arena construction for script trees.
//!
//! `ASTBuilder` performs the tree-building actions a front end takes while
//! reducing a script. Spans are laid out left to right from the textual width
//! of each piece, so a tree built in source order carries the positions the
//! source text would have had.

use std::{cell::RefCell, rc::Rc};

use kindle_type::{
  BytePosition, Store,
  definition::GuardTempId,
  file::FileId,
  span::Span,
  symbol::SymbolTable,
  value::KindleLiteralValue,
};

use crate::{
  ASTNode, NodeId,
  expressions::{
    ASTCallExpression, ASTExpression, ASTFieldAccess, ASTGuardTemp, ASTLiteral, ASTNullSafe, ASTNullSafeSub,
    ASTVariableExpression,
  },
  statements::{ASTExpressionStatement, ASTLet, ASTReturn, ASTStatement},
};

pub struct ASTBuilder {
  nodes: Store<ASTNode>,
  symbols: Rc<RefCell<SymbolTable>>,
  file: FileId,
  cursor: u32,
  next_temp: u32,
}

impl ASTBuilder {
  pub fn new(
    file: FileId,
    symbols: Rc<RefCell<SymbolTable>>,
  ) -> Self {
    Self {
      nodes: Store::new(),
      symbols,
      file,
      cursor: 0,
      next_temp: 0,
    }
  }

  /// Move the layout cursor, e.g. to skip whitespace or a statement separator.
  pub fn skip(
    &mut self,
    width: u32,
  ) {
    self.cursor += width;
  }

  fn advance(
    &mut self,
    width: usize,
  ) -> Span {
    let start = BytePosition(self.cursor);
    self.cursor += width as u32;
    Span::new(self.file, start, BytePosition(self.cursor))
  }

  fn alloc_expression(
    &mut self,
    expr: ASTExpression,
  ) -> NodeId {
    self.nodes.alloc(ASTNode::Expression(expr))
  }

  fn alloc_statement(
    &mut self,
    stmt: ASTStatement,
  ) -> NodeId {
    self.nodes.alloc(ASTNode::Statement(stmt))
  }

  fn span_of(
    &self,
    node: &NodeId,
  ) -> Span {
    self.nodes.get(node).span().clone()
  }

  fn expect_node(
    &self,
    node: &NodeId,
    role: &str,
  ) {
    assert!(
      self.nodes.contains(node),
      "ASTBuilder: {} {:?} does not belong to this tree",
      role,
      node
    );
  }

  pub fn literal(
    &mut self,
    value: KindleLiteralValue,
  ) -> NodeId {
    let span = self.advance(value.to_string().len());
    self.alloc_expression(ASTExpression::Literal(ASTLiteral::new(value, span)))
  }

  pub fn int(
    &mut self,
    value: i32,
  ) -> NodeId {
    self.literal(KindleLiteralValue::Int(value))
  }

  pub fn string(
    &mut self,
    value: &str,
  ) -> NodeId {
    self.literal(KindleLiteralValue::String(value.to_string()))
  }

  pub fn null(&mut self) -> NodeId {
    self.literal(KindleLiteralValue::Null)
  }

  pub fn variable(
    &mut self,
    name: &str,
  ) -> NodeId {
    let symbol = self.symbols.borrow_mut().intern(name);
    let span = self.advance(name.len());
    self.alloc_expression(ASTExpression::Variable(ASTVariableExpression::new(symbol, span)))
  }

  pub fn field(
    &mut self,
    object: NodeId,
    name: &str,
  ) -> NodeId {
    self.expect_node(&object, "field receiver");

    let symbol = self.symbols.borrow_mut().intern(name);
    let tail = self.advance(1 + name.len());
    let span = Span::merge(&self.span_of(&object), &tail);

    self.alloc_expression(ASTExpression::FieldAccess(ASTFieldAccess::new(object, symbol, span)))
  }

  pub fn call(
    &mut self,
    receiver: NodeId,
    method: &str,
    arguments: Vec<NodeId>,
  ) -> NodeId {
    self.expect_node(&receiver, "call receiver");
    for arg in &arguments {
      self.expect_node(arg, "call argument");
    }

    let symbol = self.symbols.borrow_mut().intern(method);
    // `.method(` ... `)`
    let tail = self.advance(method.len() + 3);
    let mut span = Span::merge(&self.span_of(&receiver), &tail);
    for arg in &arguments {
      span = Span::merge(&span, &self.span_of(arg));
    }

    self.alloc_expression(ASTExpression::Call(ASTCallExpression::new(receiver, symbol, arguments, span)))
  }

  pub fn fresh_temp(&mut self) -> GuardTempId {
    let temp = GuardTempId(self.next_temp);
    self.next_temp += 1;
    temp
  }

  pub fn guard_temp(
    &mut self,
    temp: GuardTempId,
  ) -> NodeId {
    let span = Span::empty_at(self.file, BytePosition(self.cursor));
    self.alloc_expression(ASTExpression::GuardTemp(ASTGuardTemp::new(temp, span)))
  }

  /// Wrap `guarded` as the suffix of a null-safe chain.
  ///
  /// # Panics
  /// Panics if `guarded` was not allocated by this builder.
  pub fn null_safe_sub(
    &mut self,
    guarded: NodeId,
  ) -> NodeId {
    self.expect_node(&guarded, "guarded expression");

    let span = self.span_of(&guarded);
    self.alloc_expression(ASTExpression::NullSafeSub(ASTNullSafeSub::new(guarded, span)))
  }

  /// Assemble a guard root from parts built by hand.
  pub fn null_safe(
    &mut self,
    base: NodeId,
    temp: GuardTempId,
    guarded: NodeId,
  ) -> NodeId {
    self.expect_node(&base, "guard base");
    self.expect_node(&guarded, "guard suffix");

    let span = Span::merge(&self.span_of(&base), &self.span_of(&guarded));
    self.alloc_expression(ASTExpression::NullSafe(ASTNullSafe::new(base, temp, guarded, span)))
  }

  /// `base?.method(args)`
  pub fn null_safe_call(
    &mut self,
    base: NodeId,
    method: &str,
    arguments: Vec<NodeId>,
  ) -> NodeId {
    self.expect_node(&base, "guard base");

    let temp = self.fresh_temp();
    // `?` of `?.`; the call accounts for the dot.
    self.skip(1);
    let receiver = self.guard_temp(temp);
    let suffix = self.call(receiver, method, arguments);
    let sub = self.null_safe_sub(suffix);

    self.null_safe(base, temp, sub)
  }

  /// `base?.field`
  pub fn null_safe_field(
    &mut self,
    base: NodeId,
    name: &str,
  ) -> NodeId {
    self.expect_node(&base, "guard base");

    let temp = self.fresh_temp();
    self.skip(1);
    let receiver = self.guard_temp(temp);
    let suffix = self.field(receiver, name);
    let sub = self.null_safe_sub(suffix);

    self.null_safe(base, temp, sub)
  }

  pub fn let_statement(
    &mut self,
    name: &str,
    type_name: Option<&str>,
    value: NodeId,
  ) -> NodeId {
    self.expect_node(&value, "let value");

    let name = self.symbols.borrow_mut().intern(name);
    let type_name = type_name.map(|t| self.symbols.borrow_mut().intern(t));
    let span = Span::merge(&self.span_of(&value), &self.advance(1));

    self.alloc_statement(ASTStatement::Let(ASTLet::new(name, type_name, value, span)))
  }

  pub fn expression_statement(
    &mut self,
    expression: NodeId,
  ) -> NodeId {
    self.expect_node(&expression, "statement expression");

    let span = Span::merge(&self.span_of(&expression), &self.advance(1));
    self.alloc_statement(ASTStatement::Expression(ASTExpressionStatement { expression, span }))
  }

  pub fn return_statement(
    &mut self,
    expression: Option<NodeId>,
  ) -> NodeId {
    let span = match &expression {
      Some(expr) => {
        self.expect_node(expr, "return value");
        Span::merge(&self.span_of(expr), &self.advance(1))
      },
      None => self.advance(7),
    };

    self.alloc_statement(ASTStatement::Return(ASTReturn::new(expression, span)))
  }

  pub fn nodes(&self) -> &Store<ASTNode> {
    &self.nodes
  }

  pub fn finish(self) -> Store<ASTNode> {
    self.nodes
  }
}
