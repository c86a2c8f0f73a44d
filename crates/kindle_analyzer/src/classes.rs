//! Registration of host classes from the class manifest.

use std::fmt;

use kindle_config::{ClassManifest, KindleConfig};
use kindle_log::phase_warn;
use kindle_type::types::{TypeId, TypeStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassRegistryError {
  DuplicateClass {
    name: String,
  },
  UnknownType {
    class: String,
    member: String,
    type_name: String,
  },
  /// `void` is only valid as a method return type.
  VoidMember {
    class: String,
    member: String,
  },
}

impl fmt::Display for ClassRegistryError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ClassRegistryError::DuplicateClass { name } => write!(f, "class '{}' is already declared", name),
      ClassRegistryError::UnknownType {
        class,
        member,
        type_name,
      } => write!(f, "unknown type '{}' in '{}.{}'", type_name, class, member),
      ClassRegistryError::VoidMember { class, member } => {
        write!(f, "'{}.{}' cannot have type 'void'", class, member)
      },
    }
  }
}

impl std::error::Error for ClassRegistryError {}

/// Declare every manifest class, then resolve member types. Classes may refer
/// to each other regardless of declaration order.
pub fn register_manifest(
  types: &mut TypeStore,
  manifest: &ClassManifest,
) -> Result<Vec<TypeId>, ClassRegistryError> {
  let mut declared = Vec::with_capacity(manifest.classes.len());

  for class in &manifest.classes {
    let type_id = types
      .declare_class(&class.name)
      .map_err(|_| ClassRegistryError::DuplicateClass {
        name: class.name.clone(),
      })?;
    declared.push(type_id);
  }

  for (class, class_type) in manifest.classes.iter().zip(&declared) {
    for field in &class.fields {
      let field_ty = resolve_value_type(types, &class.name, &field.name, &field.type_name)?;
      types.add_field(class_type, &field.name, field_ty);
    }

    for method in &class.methods {
      let mut params = Vec::with_capacity(method.params.len());
      for param in &method.params {
        params.push(resolve_value_type(types, &class.name, &method.name, param)?);
      }

      let return_type = resolve_type(types, &class.name, &method.name, &method.returns)?;
      types.add_method(class_type, &method.name, params, return_type);
    }
  }

  Ok(declared)
}

/// Type store with builtin classes plus the classes of `config.manifest`.
pub fn type_store_from_config(config: &KindleConfig) -> Result<TypeStore, ClassRegistryError> {
  let mut types = TypeStore::new();
  register_manifest(&mut types, &config.manifest)?;

  for class in &config.manifest.classes {
    if class.fields.is_empty() && class.methods.is_empty() {
      phase_warn!(config, "Host class '{}' exposes no members", class.name);
    }
  }

  Ok(types)
}

fn resolve_type(
  types: &TypeStore,
  class: &str,
  member: &str,
  type_name: &str,
) -> Result<TypeId, ClassRegistryError> {
  types
    .lookup_by_name(type_name)
    .ok_or_else(|| ClassRegistryError::UnknownType {
      class: class.to_string(),
      member: member.to_string(),
      type_name: type_name.to_string(),
    })
}

fn resolve_value_type(
  types: &TypeStore,
  class: &str,
  member: &str,
  type_name: &str,
) -> Result<TypeId, ClassRegistryError> {
  let ty = resolve_type(types, class, member, type_name)?;
  if ty == types.void() {
    return Err(ClassRegistryError::VoidMember {
      class: class.to_string(),
      member: member.to_string(),
    });
  }

  Ok(ty)
}
