//! Top-level document assembly.
//!
//! [`QueryBuilder`] is the entry point: give it a schema, then ask it to
//! build the document for a resource, an operation kind, the target
//! query/mutation field and the caller's variables. It resolves the
//! generated input type for create/update, binds arguments and variable
//! definitions, derives the field selection, shapes the operation per
//! kind and renders it to text.

use indexmap::IndexMap;

use crate::arguments::{bind_arguments, bind_variable_definitions, ArgumentBindings, VariablesMap};
use crate::encoder::{encode_mutation, encode_query, ArgValue, FieldNode, Operation};
use crate::error::QueryBuildError;
use crate::introspection::{Field, FullType, IntrospectionSchema, Resource};
use crate::operation::OperationKind;
use crate::selection::{build_selection, SelectionNode, SelectionOptions, SelectionTree};

/// Look up the schema's generated input type for an entity type.
///
/// Create maps to `<Type>CreateInput`, update to `<Type>UpdateInput`;
/// every other kind has no input type. Absence is not an error — callers
/// fall back to the operation field's own declared arguments.
pub fn resolve_input_type<'a>(
    schema: &'a IntrospectionSchema,
    entity_type: &FullType,
    operation: OperationKind,
) -> Option<&'a FullType> {
    let suffix = match operation {
        OperationKind::Create => "CreateInput",
        OperationKind::Update => "UpdateInput",
        _ => return None,
    };
    schema.find_type(&format!("{}{}", entity_type.name, suffix))
}

/// Builds GraphQL documents for CRUD operations against one schema.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    schema: &'a IntrospectionSchema,
    options: SelectionOptions,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(schema: &'a IntrospectionSchema) -> Self {
        Self {
            schema,
            options: SelectionOptions::default(),
        }
    }

    /// Override the selection depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Build the document for one operation.
    ///
    /// `field` is the query or mutation field targeted by the operation
    /// (name plus declared arguments, as introspected); `variables` are
    /// the caller's values, filtered down to what the operation declares.
    pub fn build(
        &self,
        resource: &Resource,
        operation: OperationKind,
        field: &Field,
        variables: &VariablesMap,
    ) -> Result<String, QueryBuildError> {
        let input_type = resolve_input_type(self.schema, &resource.ty, operation);
        let definitions = bind_variable_definitions(field, input_type, variables);
        let args = bind_arguments(field, input_type, variables);
        let selection = build_selection(self.schema, &resource.ty, &self.options)?;

        tracing::debug!(
            resource = %resource.ty.name,
            operation = %operation,
            field = %field.name,
            "building document"
        );

        match operation {
            OperationKind::GetList | OperationKind::GetMany | OperationKind::GetManyReference => {
                // The total is recomputed from `where` alone: sort and
                // pagination arguments must not affect it.
                let mut total_params = IndexMap::new();
                if let Some(where_ref) = args.get("where") {
                    total_params.insert("where".to_string(), ArgValue::Variable(where_ref.clone()));
                }

                let mut count = SelectionTree::new();
                count.insert("count".to_string(), SelectionNode::Leaf);
                let mut aggregate = SelectionTree::new();
                aggregate.insert("aggregate".to_string(), SelectionNode::Nested(count));

                let mut fields = IndexMap::new();
                fields.insert(
                    "items".to_string(),
                    FieldNode {
                        field: field.name.clone(),
                        params: variable_params(&args),
                        selection,
                    },
                );
                fields.insert(
                    "total".to_string(),
                    FieldNode {
                        field: format!("{}Connection", field.name),
                        params: total_params,
                        selection: aggregate,
                    },
                );

                Ok(encode_query(
                    &field.name,
                    &Operation {
                        variables: definitions,
                        fields,
                    },
                ))
            }
            OperationKind::GetOne => {
                let document = Operation {
                    variables: definitions,
                    fields: data_field(field, variable_params(&args), selection),
                };
                Ok(encode_query(&field.name, &document))
            }
            OperationKind::Delete => {
                let mut id_only = SelectionTree::new();
                id_only.insert("id".to_string(), SelectionNode::Leaf);
                let document = Operation {
                    variables: definitions,
                    fields: data_field(field, variable_params(&args), id_only),
                };
                Ok(encode_mutation(&field.name, &document))
            }
            OperationKind::Update => {
                let mut definitions = definitions;
                // `$id` is always declared, whether or not the caller
                // supplied an id variable.
                definitions.insert("$id".to_string(), "ID!".to_string());

                let mut where_id = IndexMap::new();
                where_id.insert("id".to_string(), ArgValue::Variable("$id".to_string()));
                let mut params = IndexMap::new();
                params.insert("data".to_string(), ArgValue::Object(variable_params(&args)));
                params.insert("where".to_string(), ArgValue::Object(where_id));

                let document = Operation {
                    variables: definitions,
                    fields: data_field(field, params, selection),
                };
                Ok(encode_mutation(&field.name, &document))
            }
            OperationKind::Create => {
                // The default shape: the field invoked with a single
                // `data` object argument and the full selection.
                let mut params = IndexMap::new();
                params.insert("data".to_string(), ArgValue::Object(variable_params(&args)));
                let document = Operation {
                    variables: definitions,
                    fields: data_field(field, params, selection),
                };
                if operation.is_query() {
                    Ok(encode_query(&field.name, &document))
                } else {
                    Ok(encode_mutation(&field.name, &document))
                }
            }
        }
    }
}

fn variable_params(args: &ArgumentBindings) -> IndexMap<String, ArgValue> {
    args.iter()
        .map(|(name, var)| (name.clone(), ArgValue::Variable(var.clone())))
        .collect()
}

fn data_field(
    field: &Field,
    params: IndexMap<String, ArgValue>,
    selection: SelectionTree,
) -> IndexMap<String, FieldNode> {
    let mut fields = IndexMap::new();
    fields.insert(
        "data".to_string(),
        FieldNode {
            field: field.name.clone(),
            params,
            selection,
        },
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::{InputValue, TypeRef};

    fn schema() -> IntrospectionSchema {
        let post = FullType::object(
            "Post",
            vec![Field::new("id", TypeRef::non_null(TypeRef::scalar("ID")))],
        );
        let create_input = FullType::input_object(
            "PostCreateInput",
            vec![InputValue::new("title", TypeRef::scalar("String"))],
        );
        let update_input = FullType::input_object(
            "PostUpdateInput",
            vec![InputValue::new("title", TypeRef::scalar("String"))],
        );
        IntrospectionSchema::new(
            vec![Resource::new(post.clone())],
            vec![post, create_input, update_input],
        )
    }

    #[test]
    fn resolves_create_input_by_naming_convention() {
        let schema = schema();
        let post = schema.find_resource("Post").unwrap().ty.clone();
        let input = resolve_input_type(&schema, &post, OperationKind::Create).unwrap();
        assert_eq!(input.name, "PostCreateInput");
    }

    #[test]
    fn resolves_update_input_by_naming_convention() {
        let schema = schema();
        let post = schema.find_resource("Post").unwrap().ty.clone();
        let input = resolve_input_type(&schema, &post, OperationKind::Update).unwrap();
        assert_eq!(input.name, "PostUpdateInput");
    }

    #[test]
    fn non_write_operations_have_no_input_type() {
        let schema = schema();
        let post = schema.find_resource("Post").unwrap().ty.clone();
        for kind in [
            OperationKind::GetList,
            OperationKind::GetMany,
            OperationKind::GetManyReference,
            OperationKind::GetOne,
            OperationKind::Delete,
        ] {
            assert!(resolve_input_type(&schema, &post, kind).is_none());
        }
    }

    #[test]
    fn missing_input_type_is_not_an_error() {
        let post = FullType::object("Post", vec![]);
        let schema = IntrospectionSchema::new(vec![Resource::new(post.clone())], vec![post.clone()]);
        assert!(resolve_input_type(&schema, &post, OperationKind::Create).is_none());
    }
}
