mod common;

use std::collections::BTreeSet;

use common::{Fixture, foo_param};
use kindle_analyzer::{IllegalShape, ScriptSignature, collect_variables};

fn names(list: &[&str]) -> BTreeSet<String> {
  list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn script_reports_used_variables() {
  // let x = a?.b(); let y: String = x.concat(suffix); return y;
  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let chain = f.builder.null_safe_call(a, "b", vec![]);
  let let_x = f.builder.let_statement("x", None, chain);
  let x = f.builder.variable("x");
  let suffix = f.builder.variable("suffix");
  let concat = f.builder.call(x, "concat", vec![suffix]);
  let let_y = f.builder.let_statement("y", Some("String"), concat);
  let y = f.builder.variable("y");
  let ret = f.builder.return_statement(Some(y));
  let built = f.finish();

  let signature = ScriptSignature::new().param("a", "Foo").param("suffix", "String");
  let script = built.compile(&[let_x, let_y, ret], &signature).expect("script compiles");

  assert_eq!(script.used_variables, names(&["a", "suffix", "x", "y"]));

  let rows = script.locals_table_rows(&built.symbols.borrow());
  assert_eq!(rows.len(), 4);
  assert_eq!(rows[0], vec!["a", "parameter", "Foo"]);
  assert_eq!(rows[2], vec!["x", "variable", "String"]);
}

#[test]
fn nested_chain_collects_through_every_guard() {
  // a?.next()?.greet(who)
  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let inner = f.builder.null_safe_call(a, "next", vec![]);
  let who = f.builder.variable("who");
  let outer = f.builder.null_safe_call(inner, "greet", vec![who]);
  let built = f.finish();

  let mut out = BTreeSet::new();
  collect_variables(&built.nodes, &built.symbols.borrow(), &outer, &mut out).unwrap();

  assert_eq!(out, names(&["a", "who"]));
}

#[test]
fn guard_temps_are_not_variables() {
  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let chain = f.builder.null_safe_field(a, "bar");
  let built = f.finish();

  let mut out = BTreeSet::new();
  collect_variables(&built.nodes, &built.symbols.borrow(), &chain, &mut out).unwrap();

  assert_eq!(out, names(&["a"]));
}

#[test]
fn stray_suffix_aborts_script_compilation() {
  // A suffix used as a plain statement expression, outside any guard.
  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let call = f.builder.call(a, "b", vec![]);
  let sub = f.builder.null_safe_sub(call);
  let stmt = f.builder.expression_statement(sub);
  let built = f.finish();

  let failure = built.compile(&[stmt], &foo_param()).unwrap_err();

  assert!(failure.error.is_structural());
  assert!(failure.diagnostics.is_empty());
  assert_eq!(
    failure.error.structural().map(|e| e.shape),
    Some(IllegalShape::NullSafeSuffixOutsideGuard)
  );
}

#[test]
fn suffix_in_argument_position_is_structural() {
  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let name = f.builder.variable("name");
  let sub = f.builder.null_safe_sub(name);
  let call = f.builder.call(a, "greet", vec![sub]);
  let built = f.finish();

  let mut out = BTreeSet::new();
  let err = collect_variables(&built.nodes, &built.symbols.borrow(), &call, &mut out).unwrap_err();

  assert_eq!(err.shape, IllegalShape::NullSafeSuffixOutsideGuard);
  // Variables seen before the stray suffix are kept; the caller discards them.
  assert!(out.contains("a"));
}
