use std::collections::HashMap;

use kindle_type::{Id, Store, definition::LocalId, symbol::SymbolId};

pub type ScopeId = Id<Scope>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
  /// Host-supplied script parameters.
  Parameters,
  /// Top level of the script body.
  Script,
}

#[derive(Debug, Clone)]
pub struct Scope {
  pub parent: Option<ScopeId>,
  pub kind: ScopeKind,
  pub symbols: HashMap<SymbolId, LocalId>,
}

#[derive(Debug, Clone)]
pub struct ScopeTree {
  scopes: Store<Scope>,
  current: ScopeId,
}

impl Default for ScopeTree {
  fn default() -> Self {
    Self::new()
  }
}

impl ScopeTree {
  pub fn new() -> Self {
    let mut scopes = Store::new();
    let root = scopes.alloc(Scope {
      parent: None,
      kind: ScopeKind::Parameters,
      symbols: HashMap::new(),
    });

    Self { scopes, current: root }
  }

  pub fn push(
    &mut self,
    kind: ScopeKind,
  ) -> ScopeId {
    let new = self.scopes.alloc(Scope {
      parent: Some(self.current),
      kind,
      symbols: HashMap::new(),
    });

    self.current = new;
    new
  }

  pub fn pop(&mut self) {
    if let Some(parent) = self.scopes.get(&self.current).parent {
      self.current = parent;
    }
  }

  pub fn current_kind(&self) -> ScopeKind {
    self.scopes.get(&self.current).kind
  }

  /// Define `name` in the current scope. Returns the existing local when the
  /// name is already taken in this scope.
  pub fn define(
    &mut self,
    name: &SymbolId,
    local: &LocalId,
  ) -> Result<(), LocalId> {
    let scope = self.scopes.get_mut(&self.current);

    match scope.symbols.get(name) {
      Some(existing) => Err(*existing),
      None => {
        scope.symbols.insert(*name, *local);
        Ok(())
      },
    }
  }

  pub fn lookup(
    &self,
    name: &SymbolId,
  ) -> Option<&LocalId> {
    let mut current = self.current;
    loop {
      let scope = self.scopes.get(&current);
      if let Some(local) = scope.symbols.get(name) {
        return Some(local);
      }

      current = scope.parent?;
    }
  }
}
