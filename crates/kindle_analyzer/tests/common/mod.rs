#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use kindle_analyzer::{
  Analyzer, CompileFailure, CompiledScript, ScriptSignature, compile_script, type_store_from_config,
};
use kindle_ast::{ASTBuilder, ASTNode, NodeId};
use kindle_config::{ClassManifest, KindleConfig};
use kindle_ir::display::print_ir;
use kindle_type::{
  BytePosition, Store,
  file::FileId,
  span::Span,
  symbol::SymbolTable,
};

/// Host classes used across the analyzer tests.
pub const MANIFEST: &str = r#"
[[class]]
name = "Foo"

[[class.field]]
name = "bar"
type = "Bar"

[[class.field]]
name = "count"
type = "int"

[[class.method]]
name = "b"
returns = "String"

[[class.method]]
name = "c"
returns = "int"

[[class.method]]
name = "next"
returns = "Foo"

[[class.method]]
name = "greet"
params = ["String"]
returns = "String"

[[class.method]]
name = "reset"

[[class]]
name = "Bar"

[[class.field]]
name = "label"
type = "String"

[[class.method]]
name = "c"
returns = "String"

[[class.method]]
name = "size"
returns = "int"
"#;

pub fn config() -> KindleConfig {
  let manifest = ClassManifest::from_toml_str(MANIFEST).expect("test manifest parses");
  KindleConfig::quiet().with_manifest(manifest)
}

/// Tree under construction plus everything needed to compile it.
pub struct Fixture {
  pub symbols: Rc<RefCell<SymbolTable>>,
  pub builder: ASTBuilder,
  pub config: KindleConfig,
}

impl Fixture {
  pub fn new() -> Self {
    let symbols = Rc::new(RefCell::new(SymbolTable::new()));
    let builder = ASTBuilder::new(FileId::new(0), symbols.clone());

    Self {
      symbols,
      builder,
      config: config(),
    }
  }

  pub fn finish(self) -> Built {
    Built {
      nodes: self.builder.finish(),
      symbols: self.symbols,
      config: self.config,
    }
  }
}

pub struct Built {
  pub nodes: Store<ASTNode>,
  pub symbols: Rc<RefCell<SymbolTable>>,
  pub config: KindleConfig,
}

impl Built {
  pub fn compile(
    &self,
    roots: &[NodeId],
    signature: &ScriptSignature,
  ) -> Result<CompiledScript, CompileFailure> {
    let types = type_store_from_config(&self.config).expect("test manifest registers");
    compile_script(&self.nodes, roots, self.symbols.clone(), types, signature, &self.config)
  }

  /// Analyzer with `params` declared, for driving single nodes by hand.
  pub fn analyzer(
    &self,
    params: &[(&str, &str)],
  ) -> Analyzer<'_> {
    let types = type_store_from_config(&self.config).expect("test manifest registers");
    let mut analyzer = Analyzer::new(&self.nodes, self.symbols.clone(), types, &self.config);

    for (name, type_name) in params {
      let ty = analyzer.types().lookup_by_name(type_name).expect("known parameter type");
      analyzer
        .declare_parameter(name, ty, synthetic_span())
        .expect("parameter declared once");
    }

    analyzer
  }

  pub fn format_ir(
    &self,
    script: &CompiledScript,
  ) -> String {
    print_ir(&script.ir, &script.types, &script.locals, &self.symbols.borrow())
  }
}

pub fn synthetic_span() -> Span {
  Span::empty_at(FileId::SYNTHETIC, BytePosition(0))
}

pub fn foo_param() -> ScriptSignature {
  ScriptSignature::new().param("a", "Foo")
}
