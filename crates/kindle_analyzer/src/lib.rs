pub mod classes;
pub mod error;
mod lowering;
mod scope;
pub mod script;
mod typeck;
pub mod variables;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kindle_ast::{ASTNode, NodeId};
use kindle_config::KindleConfig;
use kindle_diagnostics::message::DiagnosticMessage;
use kindle_type::{
  Store,
  definition::{GuardTempId, LocalDefinition, LocalId, LocalKind},
  span::Span,
  symbol::SymbolTable,
  types::{FieldRef, MethodRef, TypeId, TypeStore},
};

pub use classes::{ClassRegistryError, register_manifest, type_store_from_config};
pub use error::{AnalyzeError, IllegalShape, StructuralError};
pub use scope::{ScopeId, ScopeKind, ScopeTree};
pub use script::{CompileFailure, CompiledScript, ScriptSignature, compile_script};
pub use variables::collect_variables;

/// Analysis context for one script.
///
/// Resolved types live in `node_types`; a node without an entry has not been
/// analyzed (or its analysis failed). Lowering only reads this state.
pub struct Analyzer<'a> {
  ast: &'a Store<ASTNode>,
  symbols: Rc<RefCell<SymbolTable>>,
  types: TypeStore,
  config: &'a KindleConfig,
  scopes: ScopeTree,
  locals: Store<LocalDefinition>,
  node_types: HashMap<NodeId, TypeId>,
  node_locals: HashMap<NodeId, LocalId>,
  node_fields: HashMap<NodeId, FieldRef>,
  node_methods: HashMap<NodeId, MethodRef>,
  /// Guard temporaries bound by the guards currently being analyzed.
  guard_temps: HashMap<GuardTempId, TypeId>,
}

impl<'a> Analyzer<'a> {
  pub fn new(
    ast: &'a Store<ASTNode>,
    symbols: Rc<RefCell<SymbolTable>>,
    types: TypeStore,
    config: &'a KindleConfig,
  ) -> Self {
    Self {
      ast,
      symbols,
      types,
      config,
      scopes: ScopeTree::new(),
      locals: Store::new(),
      node_types: HashMap::new(),
      node_locals: HashMap::new(),
      node_fields: HashMap::new(),
      node_methods: HashMap::new(),
      guard_temps: HashMap::new(),
    }
  }

  /// Declare a host-supplied parameter in the current scope.
  pub fn declare_parameter(
    &mut self,
    name: &str,
    type_id: TypeId,
    span: Span,
  ) -> Result<LocalId, AnalyzeError> {
    self.declare_local(name, type_id, LocalKind::Parameter, span)
  }

  fn declare_local(
    &mut self,
    name: &str,
    type_id: TypeId,
    kind: LocalKind,
    span: Span,
  ) -> Result<LocalId, AnalyzeError> {
    let symbol = self.symbols.borrow_mut().intern(name);
    let local = self.locals.alloc(LocalDefinition {
      name: symbol,
      type_id,
      kind,
      span: span.clone(),
    });

    if let Err(existing) = self.scopes.define(&symbol, &local) {
      let previous_span = self.locals.get(&existing).span.clone();
      return Err(
        DiagnosticMessage::VariableAlreadyDefined {
          name: name.to_string(),
          span,
          previous_span,
        }
        .into(),
      );
    }

    Ok(local)
  }

  pub fn enter_scope(
    &mut self,
    kind: ScopeKind,
  ) -> ScopeId {
    self.scopes.push(kind)
  }

  pub fn exit_scope(&mut self) {
    self.scopes.pop();
  }

  /// Resolved type of `node`, absent until analysis of that node succeeded.
  pub fn type_of(
    &self,
    node: &NodeId,
  ) -> Option<TypeId> {
    self.node_types.get(node).copied()
  }

  pub fn types(&self) -> &TypeStore {
    &self.types
  }

  pub fn locals(&self) -> &Store<LocalDefinition> {
    &self.locals
  }

  pub fn symbols(&self) -> &Rc<RefCell<SymbolTable>> {
    &self.symbols
  }

  pub fn into_parts(self) -> (TypeStore, Store<LocalDefinition>) {
    (self.types, self.locals)
  }

  fn symbol_name(
    &self,
    symbol: &kindle_type::symbol::SymbolId,
  ) -> String {
    self.symbols.borrow().get(symbol).to_string()
  }

  fn type_name(
    &self,
    id: &TypeId,
  ) -> String {
    kindle_type::types::format_type_name(&self.types, id)
  }
}
