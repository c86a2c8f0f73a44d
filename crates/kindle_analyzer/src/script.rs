//! End-to-end compilation of a script: collect, declare, analyze, lower.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use ascii_table::AsciiTable;
use kindle_ast::{ASTNode, NodeId};
use kindle_config::{DebugTrace, KindleConfig};
use kindle_diagnostics::{diagnostic_report::Diagnostic, message::DiagnosticMessage};
use kindle_ir::IR;
use kindle_log::{debug_trace_enabled, log_dbg, phase_log, phase_ok, trace_dbg};
use kindle_type::{
  BytePosition, Store,
  definition::{LocalDefinition, LocalId, LocalKind},
  file::FileId,
  span::Span,
  symbol::SymbolTable,
  types::{TypeStore, format_type_name},
};

use crate::{Analyzer, ScopeKind, error::AnalyzeError, variables::collect_variables};

/// Parameters the host passes to a script, in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSignature {
  pub params: Vec<(String, String)>,
}

impl ScriptSignature {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn param(
    mut self,
    name: &str,
    type_name: &str,
  ) -> Self {
    self.params.push((name.to_string(), type_name.to_string()));
    self
  }
}

#[derive(Debug, Clone)]
pub struct CompiledScript {
  pub ir: IR,
  pub types: TypeStore,
  pub locals: Store<LocalDefinition>,
  /// Locals bound to the signature parameters, in signature order.
  pub parameters: Vec<LocalId>,
  pub used_variables: BTreeSet<String>,
}

impl CompiledScript {
  /// One `[name, kind, type]` row per local, in declaration order.
  pub fn locals_table_rows(
    &self,
    symbols: &SymbolTable,
  ) -> Vec<Vec<String>> {
    self
      .locals
      .iter()
      .map(|(_, local)| {
        let kind = match local.kind {
          LocalKind::Parameter => "parameter",
          LocalKind::Variable => "variable",
        };

        vec![
          symbols.get(&local.name).to_string(),
          kind.to_string(),
          format_type_name(&self.types, &local.type_id),
        ]
      })
      .collect()
  }

  pub fn print_locals_table(
    &self,
    symbols: &SymbolTable,
  ) {
    let mut ascii_table = AsciiTable::default();
    ascii_table.column(0).set_header("Local");
    ascii_table.column(1).set_header("Kind");
    ascii_table.column(2).set_header("Type");

    ascii_table.print(self.locals_table_rows(symbols));
  }
}

#[derive(Debug, Clone)]
pub struct CompileFailure {
  pub error: AnalyzeError,
  /// User-facing diagnostics. Empty for structural errors.
  pub diagnostics: Vec<Diagnostic>,
}

impl From<AnalyzeError> for CompileFailure {
  fn from(error: AnalyzeError) -> Self {
    let diagnostics = error.diagnostic().cloned().into_iter().collect();
    Self { error, diagnostics }
  }
}

impl fmt::Display for CompileFailure {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "script failed to compile: {}", self.error)
  }
}

impl std::error::Error for CompileFailure {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.error)
  }
}

pub fn compile_script(
  ast: &Store<ASTNode>,
  roots: &[NodeId],
  symbols: Rc<RefCell<SymbolTable>>,
  types: TypeStore,
  signature: &ScriptSignature,
  config: &KindleConfig,
) -> Result<CompiledScript, CompileFailure> {
  phase_log!(config, "Compiling script ({} statements)", roots.len());

  let mut used_variables = BTreeSet::new();
  {
    let symbols = symbols.borrow();
    for root in roots {
      collect_variables(ast, &symbols, root, &mut used_variables).map_err(AnalyzeError::from)?;
    }
  }
  trace_dbg!(config, DebugTrace::Collect, "used variables: {:?}", used_variables);
  log_dbg!(config, "script reads {} variables", used_variables.len());

  let mut analyzer = Analyzer::new(ast, symbols.clone(), types, config);

  let mut parameters = Vec::with_capacity(signature.params.len());
  for (name, type_name) in &signature.params {
    let span = Span::empty_at(FileId::SYNTHETIC, BytePosition(0));
    let Some(type_id) = analyzer.types().lookup_by_name(type_name) else {
      return Err(
        AnalyzeError::from(DiagnosticMessage::UndefinedType {
          name: type_name.clone(),
          span,
        })
        .into(),
      );
    };

    parameters.push(analyzer.declare_parameter(name, type_id, span)?);
  }

  analyzer.enter_scope(ScopeKind::Script);
  for root in roots {
    analyzer.analyze_node(root)?;
  }
  analyzer.exit_scope();

  let mut ir = IR::new();
  for root in roots {
    let id = analyzer.lower_node(root, &mut ir)?;
    ir.roots.push(id);
  }
  phase_ok!(config, "Compiled script into {} IR nodes", ir.len());

  let (types, locals) = analyzer.into_parts();
  let script = CompiledScript {
    ir,
    types,
    locals,
    parameters,
    used_variables,
  };

  if debug_trace_enabled(config, DebugTrace::Analyzer) {
    script.print_locals_table(&symbols.borrow());
  }

  Ok(script)
}
