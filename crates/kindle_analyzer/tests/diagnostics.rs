mod common;

use common::{Fixture, foo_param};
use kindle_analyzer::ScriptSignature;
use kindle_ast::NodeId;
use kindle_diagnostics::render_to_string;
use kindle_type::{BytePosition, file::SourceMap};

fn error_code(
  build: impl FnOnce(&mut Fixture) -> Vec<NodeId>,
  signature: &ScriptSignature,
) -> String {
  let mut f = Fixture::new();
  let roots = build(&mut f);
  let built = f.finish();

  let failure = built.compile(&roots, signature).expect_err("script should fail");
  let diag = failure.error.diagnostic().expect("user-facing error");
  diag.error_code.clone()
}

#[test]
fn undeclared_variable() {
  let code = error_code(
    |f| {
      let a = f.builder.variable("missing");
      vec![f.builder.return_statement(Some(a))]
    },
    &ScriptSignature::new(),
  );
  assert_eq!(code, "A0001");
}

#[test]
fn undefined_declared_type() {
  let code = error_code(
    |f| {
      let v = f.builder.int(1);
      vec![f.builder.let_statement("x", Some("Nope"), v)]
    },
    &ScriptSignature::new(),
  );
  assert_eq!(code, "A0002");
}

#[test]
fn declared_type_mismatch() {
  let code = error_code(
    |f| {
      let v = f.builder.string("x");
      vec![f.builder.let_statement("x", Some("Foo"), v)]
    },
    &ScriptSignature::new(),
  );
  assert_eq!(code, "A0003");
}

#[test]
fn null_initializer_fits_reference_type() {
  let mut f = Fixture::new();
  let v = f.builder.null();
  let let_ = f.builder.let_statement("x", Some("Foo"), v);
  let built = f.finish();

  assert!(built.compile(&[let_], &ScriptSignature::new()).is_ok());
}

#[test]
fn redefinition_points_at_previous_definition() {
  let mut f = Fixture::new();
  let one = f.builder.int(1);
  let first = f.builder.let_statement("x", None, one);
  let two = f.builder.int(2);
  let second = f.builder.let_statement("x", None, two);
  let built = f.finish();

  let failure = built.compile(&[first, second], &ScriptSignature::new()).unwrap_err();
  let diag = &failure.diagnostics[0];

  assert_eq!(diag.error_code, "A0004");
  assert_eq!(diag.primary_span, *built.nodes.get(&second).span());
  assert_eq!(diag.labels[0].span, *built.nodes.get(&first).span());
}

#[test]
fn missing_field_and_method() {
  let field = error_code(
    |f| {
      let a = f.builder.variable("a");
      let access = f.builder.field(a, "nope");
      vec![f.builder.expression_statement(access)]
    },
    &foo_param(),
  );
  assert_eq!(field, "A0010");

  let method = error_code(
    |f| {
      let a = f.builder.variable("a");
      let arg = f.builder.int(1);
      // b() exists, but not with one argument
      let call = f.builder.call(a, "b", vec![arg]);
      vec![f.builder.expression_statement(call)]
    },
    &foo_param(),
  );
  assert_eq!(method, "A0011");
}

#[test]
fn member_access_on_primitive() {
  let code = error_code(
    |f| {
      let a = f.builder.variable("a");
      let count = f.builder.field(a, "count");
      let call = f.builder.call(count, "toString", vec![]);
      vec![f.builder.expression_statement(call)]
    },
    &foo_param(),
  );
  assert_eq!(code, "A0012");
}

#[test]
fn argument_type_mismatch() {
  let code = error_code(
    |f| {
      let a = f.builder.variable("a");
      let arg = f.builder.int(3);
      let call = f.builder.call(a, "greet", vec![arg]);
      vec![f.builder.expression_statement(call)]
    },
    &foo_param(),
  );
  assert_eq!(code, "A0013");
}

#[test]
fn object_methods_are_inherited() {
  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let chain = f.builder.null_safe_call(a, "toString", vec![]);
  let ret = f.builder.return_statement(Some(chain));
  let built = f.finish();

  assert!(built.compile(&[ret], &foo_param()).is_ok());
}

#[test]
fn unknown_parameter_type() {
  let mut f = Fixture::new();
  let ret = f.builder.return_statement(None);
  let built = f.finish();

  let failure = built
    .compile(&[ret], &ScriptSignature::new().param("a", "Missing"))
    .unwrap_err();
  assert_eq!(failure.diagnostics[0].error_code, "A0002");
}

#[test]
fn first_error_aborts_the_script() {
  let mut f = Fixture::new();
  let missing = f.builder.variable("missing");
  let first = f.builder.expression_statement(missing);
  let five = f.builder.int(5);
  let chain = f.builder.null_safe_call(five, "toString", vec![]);
  let second = f.builder.expression_statement(chain);
  let built = f.finish();

  let failure = built.compile(&[first, second], &ScriptSignature::new()).unwrap_err();
  assert_eq!(failure.diagnostics.len(), 1);
  assert_eq!(failure.diagnostics[0].error_code, "A0001");
}

#[test]
fn null_safe_error_renders_at_suffix() {
  colored::control::set_override(false);

  // a?.c()
  let mut sm = SourceMap::new();
  let file = sm.add_script("script", "a?.c()".to_string());
  assert_eq!(file.index(), 0);

  let mut f = Fixture::new();
  let a = f.builder.variable("a");
  let chain = f.builder.null_safe_call(a, "c", vec![]);
  let stmt = f.builder.expression_statement(chain);
  let built = f.finish();

  let failure = built.compile(&[stmt], &foo_param()).unwrap_err();
  let diag = &failure.diagnostics[0];
  assert_eq!(diag.primary_span.start, BytePosition(2));

  let out = render_to_string(diag, &sm);
  assert!(out.starts_with("Error[A0040]: Result of null safe operator must be nullable, found 'int'"));
  assert!(out.contains("<script>:1:3"));
}
