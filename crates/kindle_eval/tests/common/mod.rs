#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kindle_analyzer::{CompiledScript, ScriptSignature, compile_script, type_store_from_config};
use kindle_ast::{ASTBuilder, NodeId};
use kindle_config::{ClassManifest, KindleConfig};
use kindle_eval::{EvalError, HostRuntime, ObjectHandle, Value};
use kindle_type::{file::FileId, symbol::SymbolTable};

pub const MANIFEST: &str = r#"
[[class]]
name = "Host"

[[class.method]]
name = "make"
returns = "Foo"

[[class]]
name = "Foo"

[[class.field]]
name = "bar"
type = "Bar"

[[class.method]]
name = "b"
returns = "String"

[[class]]
name = "Bar"

[[class.method]]
name = "c"
returns = "String"
"#;

pub fn config() -> KindleConfig {
  KindleConfig::quiet().with_manifest(ClassManifest::from_toml_str(MANIFEST).unwrap())
}

pub fn compile(
  signature: &ScriptSignature,
  build: impl FnOnce(&mut ASTBuilder) -> Vec<NodeId>,
) -> CompiledScript {
  let config = config();
  let symbols = Rc::new(RefCell::new(SymbolTable::new()));
  let mut builder = ASTBuilder::new(FileId::new(0), symbols.clone());
  let roots = build(&mut builder);
  let nodes = builder.finish();

  let types = type_store_from_config(&config).unwrap();
  compile_script(&nodes, &roots, symbols, types, signature, &config).expect("script compiles")
}

struct TestObject {
  class: String,
  fields: HashMap<String, Value>,
  returns: HashMap<String, Value>,
}

/// Host that records how often each `Class.member` was touched.
#[derive(Default)]
pub struct TestHost {
  objects: Vec<TestObject>,
  touched: HashMap<String, usize>,
}

impl TestHost {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn object(
    &mut self,
    class: &str,
  ) -> ObjectHandle {
    self.objects.push(TestObject {
      class: class.to_string(),
      fields: HashMap::new(),
      returns: HashMap::new(),
    });
    ObjectHandle(self.objects.len() as u32 - 1)
  }

  pub fn set_field(
    &mut self,
    object: ObjectHandle,
    name: &str,
    value: Value,
  ) {
    self.objects[object.0 as usize].fields.insert(name.to_string(), value);
  }

  pub fn set_return(
    &mut self,
    object: ObjectHandle,
    method: &str,
    value: Value,
  ) {
    self.objects[object.0 as usize].returns.insert(method.to_string(), value);
  }

  pub fn touched(
    &self,
    member: &str,
  ) -> usize {
    self.touched.get(member).copied().unwrap_or(0)
  }

  fn lookup(
    &mut self,
    object: ObjectHandle,
    class: &str,
    member: &str,
    is_field: bool,
  ) -> Result<Value, EvalError> {
    *self.touched.entry(format!("{}.{}", class, member)).or_default() += 1;

    let target = &self.objects[object.0 as usize];
    assert_eq!(target.class, class, "script dispatched on the wrong class");

    let table = if is_field { &target.fields } else { &target.returns };
    table.get(member).cloned().ok_or_else(|| EvalError::UnknownMember {
      class: class.to_string(),
      member: member.to_string(),
    })
  }
}

impl HostRuntime for TestHost {
  fn get_field(
    &mut self,
    object: ObjectHandle,
    class: &str,
    field: &str,
  ) -> Result<Value, EvalError> {
    self.lookup(object, class, field, true)
  }

  fn invoke(
    &mut self,
    object: ObjectHandle,
    class: &str,
    method: &str,
    _args: Vec<Value>,
  ) -> Result<Value, EvalError> {
    self.lookup(object, class, method, false)
  }
}
