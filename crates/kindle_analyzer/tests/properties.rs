mod common;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use common::Fixture;
use kindle_analyzer::{Analyzer, IllegalShape, collect_variables, register_manifest};
use kindle_ast::{ASTBuilder, NodeId};
use kindle_config::{ClassManifest, HostClassEntry, HostMethodEntry, KindleConfig};
use kindle_ir::IR;
use kindle_type::{file::FileId, symbol::SymbolTable, types::TypeStore};
use proptest::prelude::*;

const REFERENCE_TYPES: [&str; 4] = ["String", "Object", "Host", "Other"];
const PRIMITIVE_TYPES: [&str; 8] = ["void", "boolean", "char", "int", "long", "double", "byte", "float"];

fn return_type() -> impl Strategy<Value = (&'static str, bool)> {
  prop_oneof![
    proptest::sample::select(REFERENCE_TYPES.to_vec()).prop_map(|t| (t, true)),
    proptest::sample::select(PRIMITIVE_TYPES.to_vec()).prop_map(|t| (t, false)),
  ]
}

/// `Host.m()` returning `returns`, plus an unrelated reference class.
fn host_types(returns: &str) -> TypeStore {
  let manifest = ClassManifest {
    classes: vec![
      HostClassEntry {
        name: "Host".to_string(),
        fields: vec![],
        methods: vec![HostMethodEntry {
          name: "m".to_string(),
          params: vec![],
          returns: returns.to_string(),
        }],
      },
      HostClassEntry {
        name: "Other".to_string(),
        fields: vec![],
        methods: vec![],
      },
    ],
  };

  let mut types = TypeStore::new();
  register_manifest(&mut types, &manifest).unwrap();
  types
}

/// `h?.m()` followed by `depth` more `?.toString()` segments. Returns the
/// innermost and the outermost guard roots.
fn build_chain(
  b: &mut ASTBuilder,
  depth: usize,
) -> (NodeId, NodeId) {
  let h = b.variable("h");
  let first = b.null_safe_call(h, "m", vec![]);

  let mut chain = first;
  for _ in 0..depth {
    chain = b.null_safe_call(chain, "toString", vec![]);
  }

  (first, chain)
}

proptest! {
  #[test]
  fn suffix_type_follows_nullability((returns, nullable) in return_type()) {
    let symbols = Rc::new(RefCell::new(SymbolTable::new()));
    let mut b = ASTBuilder::new(FileId::new(0), symbols.clone());
    let (chain, _) = build_chain(&mut b, 0);
    let nodes = b.finish();

    let config = KindleConfig::quiet();
    let types = host_types(returns);
    let host = types.lookup_by_name("Host").unwrap();
    let mut analyzer = Analyzer::new(&nodes, symbols, types, &config);
    analyzer.declare_parameter("h", host, common::synthetic_span()).unwrap();

    let result = analyzer.analyze_node(&chain);
    let guarded = match nodes.get(&chain) {
      kindle_ast::ASTNode::Expression(kindle_ast::expressions::ASTExpression::NullSafe(guard)) => guard.guarded,
      _ => unreachable!(),
    };

    if nullable {
      let ty = result.unwrap();
      prop_assert_eq!(analyzer.type_of(&guarded), Some(ty));
      prop_assert_eq!(analyzer.types().lookup_by_name(returns), Some(ty));
    } else {
      let err = result.unwrap_err();
      prop_assert!(!err.is_structural());
      prop_assert_eq!(err.diagnostic().map(|d| d.error_code.as_str()), Some("A0040"));
      prop_assert_eq!(analyzer.type_of(&guarded), None);
    }
  }

  #[test]
  fn lowering_is_deterministic(depth in 0usize..4) {
    let symbols = Rc::new(RefCell::new(SymbolTable::new()));
    let mut b = ASTBuilder::new(FileId::new(0), symbols.clone());
    let (_, chain) = build_chain(&mut b, depth);
    let nodes = b.finish();

    let config = KindleConfig::quiet();
    let types = host_types("String");
    let host = types.lookup_by_name("Host").unwrap();
    let mut analyzer = Analyzer::new(&nodes, symbols, types, &config);
    analyzer.declare_parameter("h", host, common::synthetic_span()).unwrap();
    analyzer.analyze_node(&chain).unwrap();

    let mut first = IR::new();
    let mut second = IR::new();
    analyzer.lower_node(&chain, &mut first).unwrap();
    analyzer.lower_node(&chain, &mut second).unwrap();

    prop_assert_eq!(first, second);
  }

  #[test]
  fn direct_collection_always_fails(kind in 0u8..6) {
    let mut f = Fixture::new();
    let child = match kind {
      0 => f.builder.int(7),
      1 => f.builder.string("s"),
      2 => f.builder.variable("a"),
      3 => {
        let a = f.builder.variable("a");
        f.builder.field(a, "bar")
      },
      4 => {
        let a = f.builder.variable("a");
        let arg = f.builder.variable("x");
        f.builder.call(a, "greet", vec![arg])
      },
      _ => {
        let a = f.builder.variable("a");
        f.builder.null_safe_call(a, "b", vec![])
      },
    };
    let sub = f.builder.null_safe_sub(child);
    let built = f.finish();

    let mut out = BTreeSet::new();
    let err = collect_variables(&built.nodes, &built.symbols.borrow(), &sub, &mut out).unwrap_err();

    prop_assert_eq!(err.shape, IllegalShape::NullSafeSuffixOutsideGuard);
    prop_assert!(out.is_empty());
  }
}
