use std::collections::HashMap;

use crate::{Id, Store};

pub type TypeId = Id<Type>;
pub type ClassId = Id<ClassDefinition>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
  Void,
  Boolean,
  Byte,
  Short,
  Char,
  Int,
  Long,
  Float,
  Double,

  /// Type of the `null` literal. Assignable to every reference type.
  Null,
  /// Builtin (`Object`, `String`) and host classes.
  Class(ClassId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
  pub name: String,
  pub type_id: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDefinition {
  pub name: String,
  pub params: Vec<TypeId>,
  pub return_type: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
  pub name: String,
  pub fields: Vec<FieldDefinition>,
  pub methods: Vec<MethodDefinition>,
  /// Builtin classes are provided by the runtime, not by the host manifest.
  pub builtin: bool,
}

/// A method resolved on a receiver type. `class` may differ from the
/// receiver's class when the method is inherited from `Object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodRef {
  pub class: ClassId,
  pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef {
  pub class: ClassId,
  pub index: u32,
}

const PRIMITIVE_NAMES: [(&str, Type); 9] = [
  ("void", Type::Void),
  ("boolean", Type::Boolean),
  ("byte", Type::Byte),
  ("short", Type::Short),
  ("char", Type::Char),
  ("int", Type::Int),
  ("long", Type::Long),
  ("float", Type::Float),
  ("double", Type::Double),
];

#[derive(Debug, Clone)]
pub struct TypeStore {
  types: Store<Type>,
  classes: Store<ClassDefinition>,
  primitives: HashMap<Type, TypeId>,
  class_types: HashMap<ClassId, TypeId>,
  by_name: HashMap<String, TypeId>,
  object: TypeId,
  string: TypeId,
}

impl Default for TypeStore {
  fn default() -> Self {
    Self::new()
  }
}

impl TypeStore {
  pub fn new() -> Self {
    let mut store = Self {
      types: Store::new(),
      classes: Store::new(),
      primitives: HashMap::new(),
      class_types: HashMap::new(),
      by_name: HashMap::new(),
      object: TypeId::new(0),
      string: TypeId::new(0),
    };
    store.init_primitives();
    store.init_builtin_classes();
    store
  }

  fn init_primitives(&mut self) {
    for (name, ty) in PRIMITIVE_NAMES {
      let id = self.types.alloc(ty.clone());
      self.primitives.insert(ty, id);
      self.by_name.insert(name.to_string(), id);
    }

    let null = self.types.alloc(Type::Null);
    self.primitives.insert(Type::Null, null);
  }

  fn init_builtin_classes(&mut self) {
    self.object = self.alloc_class("Object", true);
    self.string = self.alloc_class("String", true);

    let (object, string, int, boolean) = (self.object, self.string, self.int(), self.boolean());

    self.add_method(&object, "toString", vec![], string);
    self.add_method(&object, "hashCode", vec![], int);
    self.add_method(&object, "equals", vec![object], boolean);

    self.add_method(&string, "length", vec![], int);
    self.add_method(&string, "isEmpty", vec![], boolean);
    self.add_method(&string, "toString", vec![], string);
    self.add_method(&string, "concat", vec![string], string);
    self.add_method(&string, "trim", vec![], string);
  }

  fn alloc_class(
    &mut self,
    name: &str,
    builtin: bool,
  ) -> TypeId {
    let class_id = self.classes.alloc(ClassDefinition {
      name: name.to_string(),
      fields: Vec::new(),
      methods: Vec::new(),
      builtin,
    });
    let type_id = self.types.alloc(Type::Class(class_id));
    self.class_types.insert(class_id, type_id);
    self.by_name.insert(name.to_string(), type_id);
    type_id
  }

  /// Declare a host class. Returns the existing type id as the error when the
  /// name is already taken.
  pub fn declare_class(
    &mut self,
    name: &str,
  ) -> Result<TypeId, TypeId> {
    if let Some(existing) = self.by_name.get(name) {
      return Err(*existing);
    }

    Ok(self.alloc_class(name, false))
  }

  pub fn add_field(
    &mut self,
    class_type: &TypeId,
    name: &str,
    type_id: TypeId,
  ) -> Option<FieldRef> {
    let class = self.class_id(class_type)?;
    let def = self.classes.get_mut(&class);
    def.fields.push(FieldDefinition {
      name: name.to_string(),
      type_id,
    });

    Some(FieldRef {
      class,
      index: (def.fields.len() - 1) as u32,
    })
  }

  pub fn add_method(
    &mut self,
    class_type: &TypeId,
    name: &str,
    params: Vec<TypeId>,
    return_type: TypeId,
  ) -> Option<MethodRef> {
    let class = self.class_id(class_type)?;
    let def = self.classes.get_mut(&class);
    def.methods.push(MethodDefinition {
      name: name.to_string(),
      params,
      return_type,
    });

    Some(MethodRef {
      class,
      index: (def.methods.len() - 1) as u32,
    })
  }

  pub fn get(
    &self,
    id: &TypeId,
  ) -> &Type {
    self.types.get(id)
  }

  pub fn class(
    &self,
    id: &ClassId,
  ) -> &ClassDefinition {
    self.classes.get(id)
  }

  pub fn class_id(
    &self,
    id: &TypeId,
  ) -> Option<ClassId> {
    match self.get(id) {
      Type::Class(class) => Some(*class),
      _ => None,
    }
  }

  pub fn class_type(
    &self,
    class: &ClassId,
  ) -> TypeId {
    self.class_types[class]
  }

  pub fn lookup_by_name(
    &self,
    name: &str,
  ) -> Option<TypeId> {
    self.by_name.get(name).copied()
  }

  pub fn find_field(
    &self,
    receiver: &TypeId,
    name: &str,
  ) -> Option<FieldRef> {
    let class = self.class_id(receiver)?;
    let index = self.classes.get(&class).fields.iter().position(|f| f.name == name)?;

    Some(FieldRef {
      class,
      index: index as u32,
    })
  }

  /// Resolve a method by name and arity, falling back to `Object`'s methods.
  pub fn find_method(
    &self,
    receiver: &TypeId,
    name: &str,
    arity: usize,
  ) -> Option<MethodRef> {
    let class = self.class_id(receiver)?;
    let object = self.class_id(&self.object)?;

    [class, object].into_iter().find_map(|candidate| {
      self
        .classes
        .get(&candidate)
        .methods
        .iter()
        .position(|m| m.name == name && m.params.len() == arity)
        .map(|index| MethodRef {
          class: candidate,
          index: index as u32,
        })
    })
  }

  pub fn field(
    &self,
    field: &FieldRef,
  ) -> &FieldDefinition {
    &self.classes.get(&field.class).fields[field.index as usize]
  }

  pub fn method(
    &self,
    method: &MethodRef,
  ) -> &MethodDefinition {
    &self.classes.get(&method.class).methods[method.index as usize]
  }

  /// Primitive (value) types cannot represent the absence of a value.
  pub fn is_primitive(
    &self,
    id: &TypeId,
  ) -> bool {
    matches!(
      self.get(id),
      Type::Void
        | Type::Boolean
        | Type::Byte
        | Type::Short
        | Type::Char
        | Type::Int
        | Type::Long
        | Type::Float
        | Type::Double
    )
  }

  pub fn is_reference(
    &self,
    id: &TypeId,
  ) -> bool {
    matches!(self.get(id), Type::Null | Type::Class(_))
  }

  /// Whether a value of type `from` may be stored where `to` is expected.
  pub fn is_assignable(
    &self,
    from: &TypeId,
    to: &TypeId,
  ) -> bool {
    if from == to {
      return true;
    }

    match self.get(from) {
      Type::Null => self.is_reference(to),
      Type::Class(_) => *to == self.object,
      _ => false,
    }
  }

  pub fn void(&self) -> TypeId {
    self.primitives[&Type::Void]
  }

  pub fn boolean(&self) -> TypeId {
    self.primitives[&Type::Boolean]
  }

  pub fn char(&self) -> TypeId {
    self.primitives[&Type::Char]
  }

  pub fn int(&self) -> TypeId {
    self.primitives[&Type::Int]
  }

  pub fn long(&self) -> TypeId {
    self.primitives[&Type::Long]
  }

  pub fn double(&self) -> TypeId {
    self.primitives[&Type::Double]
  }

  pub fn null(&self) -> TypeId {
    self.primitives[&Type::Null]
  }

  pub fn object(&self) -> TypeId {
    self.object
  }

  pub fn string(&self) -> TypeId {
    self.string
  }
}

pub fn format_type_name(
  types: &TypeStore,
  id: &TypeId,
) -> String {
  match types.get(id) {
    Type::Class(class) => types.class(class).name.clone(),
    Type::Null => "null".to_string(),
    primitive => PRIMITIVE_NAMES
      .iter()
      .find(|(_, ty)| ty == primitive)
      .map(|(name, _)| name.to_string())
      .unwrap_or_else(|| format!("{:?}", primitive)),
  }
}
