use std::fmt::Write;

use kindle_type::{
  Store,
  definition::LocalDefinition,
  symbol::SymbolTable,
  types::{TypeStore, format_type_name},
};

use crate::{IR, IRId, IRKind};

pub struct IRPrinter<'a> {
  ir: &'a IR,
  types: &'a TypeStore,
  locals: &'a Store<LocalDefinition>,
  symbols: &'a SymbolTable,
  indent: usize,
  output: String,
}

impl<'a> IRPrinter<'a> {
  pub fn new(
    ir: &'a IR,
    types: &'a TypeStore,
    locals: &'a Store<LocalDefinition>,
    symbols: &'a SymbolTable,
  ) -> Self {
    Self {
      ir,
      types,
      locals,
      symbols,
      indent: 0,
      output: String::new(),
    }
  }

  pub fn print(mut self) -> String {
    writeln!(self.output, "=== IR ===").unwrap();

    for root in &self.ir.roots {
      self.print_node(*root);
    }

    self.output
  }

  /// Print a single subtree, without the header.
  pub fn print_subtree(
    mut self,
    id: IRId,
  ) -> String {
    self.print_node(id);
    self.output
  }

  fn print_node(
    &mut self,
    id: IRId,
  ) {
    let node = self.ir.get(id);
    let ty = format_type_name(self.types, &node.type_id);

    let label = match &node.kind {
      IRKind::Literal(value) => format!("Literal {}", value),
      IRKind::Local(local) => {
        let def = self.locals.get(local);
        format!("Local {}", self.symbols.get(&def.name))
      },
      IRKind::FieldAccess { field, .. } => {
        let owner = &self.types.class(&field.class).name;
        format!("FieldAccess {}.{}", owner, self.types.field(field).name)
      },
      IRKind::MethodCall { method, .. } => {
        let owner = &self.types.class(&method.class).name;
        format!("MethodCall {}.{}", owner, self.types.method(method).name)
      },
      IRKind::NullSafe { temp, .. } => format!("NullSafe {}", temp),
      IRKind::NullSafeSub { .. } => "NullSafeSub".to_string(),
      IRKind::GuardTemp(temp) => format!("GuardTemp {}", temp),
      IRKind::Let { local, .. } => {
        let def = self.locals.get(local);
        format!("Let {}", self.symbols.get(&def.name))
      },
      IRKind::ExpressionStatement(_) => "ExpressionStatement".to_string(),
      IRKind::Return(_) => "Return".to_string(),
    };

    writeln!(self.output, "{:indent$}{}: {}", "", label, ty, indent = self.indent * 2).unwrap();

    self.indent += 1;
    for child in self.ir.children(id) {
      self.print_node(child);
    }
    self.indent -= 1;
  }
}

pub fn print_ir(
  ir: &IR,
  types: &TypeStore,
  locals: &Store<LocalDefinition>,
  symbols: &SymbolTable,
) -> String {
  IRPrinter::new(ir, types, locals, symbols).print()
}
