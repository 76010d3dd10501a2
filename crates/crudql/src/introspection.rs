//! Read-only views over a GraphQL introspection result.
//!
//! The model mirrors the standard `__schema` shape: named types with
//! fields and input fields, and type references wrapped in `LIST` /
//! `NON_NULL` modifiers. Everything deserializes straight from the JSON
//! an introspection query returns; unknown keys (descriptions,
//! deprecation, directives) are ignored.
//!
//! An [`IntrospectionSchema`] additionally distinguishes *resources* —
//! object types the host treats as top-level entity collections — from
//! the rest of the type list. Resources encountered as nested fields are
//! selected by id only; other object types ("linked types") may be
//! expanded into sub-selections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QueryBuildError;

/// What kind of GraphQL type a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// A GraphQL type reference: a named type, possibly wrapped in any
/// combination of `LIST` and `NON_NULL` modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Scalar, name)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Object, name)
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// The innermost named type, after stripping all wrapper modifiers.
    pub fn final_type(&self) -> &TypeRef {
        match (self.kind, &self.of_type) {
            (TypeKind::List | TypeKind::NonNull, Some(inner)) => inner.final_type(),
            _ => self,
        }
    }

    /// Whether any wrapper in the chain is a `LIST`.
    pub fn is_list(&self) -> bool {
        if self.kind == TypeKind::List {
            return true;
        }
        match &self.of_type {
            Some(inner) => inner.is_list(),
            None => false,
        }
    }

    /// Whether the outermost wrapper is `NON_NULL`.
    pub fn is_required(&self) -> bool {
        self.kind == TypeKind::NonNull
    }
}

/// A field on an object type, or a query/mutation root field targeted by
/// a build (in which case `args` carries its declared arguments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            type_ref,
        }
    }

    pub fn with_args(mut self, args: Vec<InputValue>) -> Self {
        self.args = args;
        self
    }
}

/// An argument declaration or an input-object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl InputValue {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// A named type from the schema's type list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
}

impl FullType {
    pub fn object(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            kind: TypeKind::Object,
            name: name.into(),
            fields: Some(fields),
            input_fields: None,
        }
    }

    pub fn input_object(name: impl Into<String>, input_fields: Vec<InputValue>) -> Self {
        Self {
            kind: TypeKind::InputObject,
            name: name.into(),
            fields: None,
            input_fields: Some(input_fields),
        }
    }
}

/// A top-level entity type managed by the host as an independent
/// collection. When a resource shows up as a nested field of another
/// selection it is referenced by id only, never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub ty: FullType,
}

impl Resource {
    pub fn new(ty: FullType) -> Self {
        Self { ty }
    }
}

/// An introspected schema: the full type list plus the registered
/// resources. Immutable for the duration of a document build; safe to
/// share across any number of concurrent builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionSchema {
    pub resources: Vec<Resource>,
    pub types: Vec<FullType>,
}

impl IntrospectionSchema {
    pub fn new(resources: Vec<Resource>, types: Vec<FullType>) -> Self {
        Self { resources, types }
    }

    /// Build a schema from introspection JSON.
    ///
    /// Accepts a full response envelope (`{"data": {"__schema": …}}`),
    /// the `{"__schema": …}` object, or the `__schema` value itself.
    /// `resource_names` selects which object types are registered as
    /// resources; names that match no object type are skipped.
    pub fn from_introspection(
        value: &Value,
        resource_names: &[&str],
    ) -> Result<Self, QueryBuildError> {
        let schema = match value.get("data") {
            Some(data) if data.get("__schema").is_some() => &data["__schema"],
            _ => match value.get("__schema") {
                Some(schema) => schema,
                None => value,
            },
        };

        let types: Vec<FullType> =
            serde_json::from_value(schema.get("types").cloned().unwrap_or(Value::Null))?;

        let resources = resource_names
            .iter()
            .filter_map(|name| {
                types
                    .iter()
                    .find(|t| t.kind == TypeKind::Object && t.name == *name)
                    .cloned()
            })
            .map(Resource::new)
            .collect();

        Ok(Self { resources, types })
    }

    /// Look up a registered resource by its type name.
    pub fn find_resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.ty.name == name)
    }

    /// Look up any named type in the schema's type list.
    pub fn find_type(&self, name: &str) -> Option<&FullType> {
        self.types.iter().find(|t| t.name == name)
    }
}
