//! Build GraphQL documents for CRUD-style data operations from a schema
//! introspection result.
//!
//! Given an introspected schema, a registered resource, an
//! [`OperationKind`] and the caller's variables, [`QueryBuilder`]
//! produces a complete query or mutation document: it derives the field
//! selection recursively from the type graph (bounding recursion through
//! cyclic types), binds variables onto the operation's declared
//! arguments — special-casing the generated `<Type>CreateInput` /
//! `<Type>UpdateInput` types for writes — and renders the result as
//! document text. It never talks to the network; fetching the
//! introspection result and executing the documents are the host's job.

pub mod arguments;
pub mod builder;
pub mod encoder;
pub mod error;
pub mod introspection;
pub mod operation;
pub mod selection;

// Re-export key types at crate root for convenience.
pub use arguments::{type_signature, ArgumentBindings, VariableDefinitions, VariablesMap};
pub use builder::{resolve_input_type, QueryBuilder};
pub use encoder::{encode_mutation, encode_query, ArgValue, FieldNode, Operation};
pub use error::QueryBuildError;
pub use introspection::{
    Field, FullType, InputValue, IntrospectionSchema, Resource, TypeKind, TypeRef,
};
pub use operation::OperationKind;
pub use selection::{build_selection, SelectionNode, SelectionOptions, SelectionTree};
