mod common;

use kindle_analyzer::{ClassRegistryError, register_manifest};
use kindle_config::ClassManifest;
use kindle_type::types::{TypeStore, format_type_name};

fn register(text: &str) -> Result<TypeStore, ClassRegistryError> {
  let manifest = ClassManifest::from_toml_str(text).unwrap();
  let mut types = TypeStore::new();
  register_manifest(&mut types, &manifest)?;
  Ok(types)
}

#[test]
fn registers_fixture_classes() {
  let types = register(common::MANIFEST).unwrap();

  let foo = types.lookup_by_name("Foo").unwrap();
  let bar = types.lookup_by_name("Bar").unwrap();

  let field = types.find_field(&foo, "bar").unwrap();
  assert_eq!(types.field(&field).type_id, bar);

  let greet = types.find_method(&foo, "greet", 1).unwrap();
  assert_eq!(types.method(&greet).params, vec![types.string()]);

  let reset = types.find_method(&foo, "reset", 0).unwrap();
  assert_eq!(format_type_name(&types, &types.method(&reset).return_type), "void");
}

#[test]
fn forward_references_resolve() {
  let types = register(
    r#"
[[class]]
name = "A"

[[class.field]]
name = "b"
type = "B"

[[class]]
name = "B"
"#,
  )
  .unwrap();

  let a = types.lookup_by_name("A").unwrap();
  let field = types.find_field(&a, "b").unwrap();
  assert_eq!(format_type_name(&types, &types.field(&field).type_id), "B");
}

#[test]
fn duplicate_class_is_rejected() {
  let err = register(
    r#"
[[class]]
name = "String"
"#,
  )
  .unwrap_err();

  assert_eq!(
    err,
    ClassRegistryError::DuplicateClass {
      name: "String".to_string()
    }
  );
}

#[test]
fn unknown_member_type_is_rejected() {
  let err = register(
    r#"
[[class]]
name = "A"

[[class.method]]
name = "m"
params = ["Nope"]
"#,
  )
  .unwrap_err();

  assert_eq!(err.to_string(), "unknown type 'Nope' in 'A.m'");
}

#[test]
fn void_field_is_rejected() {
  let err = register(
    r#"
[[class]]
name = "A"

[[class.field]]
name = "f"
type = "void"
"#,
  )
  .unwrap_err();

  assert!(matches!(err, ClassRegistryError::VoidMember { .. }));
}
