//! Variable binding for operation arguments.
//!
//! Two parallel mappings share one filtering rule: candidates come from
//! a resolved input type's fields (create/update) or from the operation
//! field's own declared arguments, and only candidates whose name is
//! present in the caller's variables map survive.
//!
//! [`bind_arguments`] yields the in-selection mapping (`name` →
//! `$name`); [`bind_variable_definitions`] yields the document-header
//! mapping (`$name` → type signature). Variables the operation does not
//! declare are excluded silently.

use indexmap::IndexMap;

use crate::introspection::{Field, FullType, InputValue, TypeRef};

/// Argument name → `$name` variable reference, in declaration order.
pub type ArgumentBindings = IndexMap<String, String>;

/// `$name` → GraphQL type signature, in declaration order.
pub type VariableDefinitions = IndexMap<String, String>;

/// Caller-supplied variables. A key's presence makes the variable
/// "defined" — an explicit `null` value still counts.
pub type VariablesMap = serde_json::Map<String, serde_json::Value>;

/// The GraphQL type signature for an argument's type reference.
///
/// Produces exactly four forms: `Name`, `Name!`, `[Name!]`, `[Name!]!`.
/// A list of nullable elements is not representable; list arguments are
/// always rendered with required elements.
pub fn type_signature(type_ref: &TypeRef) -> String {
    let name = type_ref.final_type().name.as_deref().unwrap_or_default();
    let list = type_ref.is_list();
    let required = type_ref.is_required();
    format!(
        "{}{}{}{}",
        if list { "[" } else { "" },
        name,
        if list { "!]" } else { "" },
        if required { "!" } else { "" },
    )
}

fn candidates<'a>(field: &'a Field, input_type: Option<&'a FullType>) -> &'a [InputValue] {
    match input_type.and_then(|t| t.input_fields.as_deref()) {
        Some(input_fields) => input_fields,
        None => &field.args,
    }
}

/// Map retained candidates to `$name` variable references.
///
/// Empty whenever the operation field declares no arguments at all,
/// regardless of the variables map or a resolved input type.
pub fn bind_arguments(
    field: &Field,
    input_type: Option<&FullType>,
    variables: &VariablesMap,
) -> ArgumentBindings {
    if field.args.is_empty() {
        return ArgumentBindings::new();
    }

    let declared = candidates(field, input_type);
    for name in variables.keys() {
        if !declared.iter().any(|c| c.name == *name) {
            tracing::debug!(
                variable = %name,
                operation = %field.name,
                "variable not declared by the operation; excluded from bindings"
            );
        }
    }

    declared
        .iter()
        .filter(|c| variables.contains_key(&c.name))
        .map(|c| (c.name.clone(), format!("${}", c.name)))
        .collect()
}

/// Map retained candidates to their variable declarations.
///
/// Subject to the same filtering and empty-argument short-circuit as
/// [`bind_arguments`].
pub fn bind_variable_definitions(
    field: &Field,
    input_type: Option<&FullType>,
    variables: &VariablesMap,
) -> VariableDefinitions {
    if field.args.is_empty() {
        return VariableDefinitions::new();
    }

    candidates(field, input_type)
        .iter()
        .filter(|c| variables.contains_key(&c.name))
        .map(|c| (format!("${}", c.name), type_signature(&c.type_ref)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::{TypeKind, TypeRef};
    use serde_json::json;

    fn vars(value: serde_json::Value) -> VariablesMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    fn posts_field() -> Field {
        Field::new("posts", TypeRef::list(TypeRef::object("Post"))).with_args(vec![
            InputValue::new(
                "where",
                TypeRef::named(TypeKind::InputObject, "PostWhereInput"),
            ),
            InputValue::new("skip", TypeRef::scalar("Int")),
            InputValue::new("first", TypeRef::scalar("Int")),
        ])
    }

    #[test]
    fn type_signature_four_forms() {
        let name = TypeRef::scalar("String");
        assert_eq!(type_signature(&name), "String");
        assert_eq!(type_signature(&TypeRef::non_null(name.clone())), "String!");
        assert_eq!(type_signature(&TypeRef::list(name.clone())), "[String!]");
        assert_eq!(
            type_signature(&TypeRef::non_null(TypeRef::list(TypeRef::non_null(name)))),
            "[String!]!"
        );
    }

    #[test]
    fn binds_only_supplied_variables() {
        let args = bind_arguments(
            &posts_field(),
            None,
            &vars(json!({"first": 10, "where": {"published": true}})),
        );
        assert_eq!(args.len(), 2);
        assert_eq!(args.get("where"), Some(&"$where".to_string()));
        assert_eq!(args.get("first"), Some(&"$first".to_string()));
        assert!(args.get("skip").is_none());
    }

    #[test]
    fn bindings_follow_declaration_order() {
        let args = bind_arguments(
            &posts_field(),
            None,
            &vars(json!({"first": 1, "skip": 2, "where": {}})),
        );
        let names: Vec<&str> = args.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["where", "skip", "first"]);
    }

    #[test]
    fn null_variable_counts_as_defined() {
        let args = bind_arguments(&posts_field(), None, &vars(json!({"skip": null})));
        assert_eq!(args.get("skip"), Some(&"$skip".to_string()));
    }

    #[test]
    fn absent_variable_is_excluded() {
        let args = bind_arguments(&posts_field(), None, &vars(json!({})));
        assert!(args.is_empty());
        let defs = bind_variable_definitions(&posts_field(), None, &vars(json!({})));
        assert!(defs.is_empty());
    }

    #[test]
    fn undeclared_variable_is_excluded() {
        let args = bind_arguments(
            &posts_field(),
            None,
            &vars(json!({"first": 3, "unrelated": "x"})),
        );
        assert_eq!(args.len(), 1);
        assert!(args.get("unrelated").is_none());
    }

    #[test]
    fn no_declared_args_yields_empty_bindings() {
        let field = Field::new("viewer", TypeRef::object("User"));
        let input = FullType::input_object(
            "UserCreateInput",
            vec![InputValue::new("name", TypeRef::scalar("String"))],
        );
        // Even with an input type and matching variables, an operation
        // that declares no arguments binds nothing.
        let variables = vars(json!({"name": "Ada"}));
        assert!(bind_arguments(&field, Some(&input), &variables).is_empty());
        assert!(bind_variable_definitions(&field, Some(&input), &variables).is_empty());
    }

    #[test]
    fn input_type_fields_replace_operation_args() {
        let field = Field::new("createPost", TypeRef::object("Post")).with_args(vec![
            InputValue::new(
                "data",
                TypeRef::non_null(TypeRef::named(TypeKind::InputObject, "PostCreateInput")),
            ),
        ]);
        let input = FullType::input_object(
            "PostCreateInput",
            vec![
                InputValue::new("title", TypeRef::non_null(TypeRef::scalar("String"))),
                InputValue::new("views", TypeRef::scalar("Int")),
            ],
        );
        let variables = vars(json!({"title": "hi", "data": {"ignored": true}}));

        let args = bind_arguments(&field, Some(&input), &variables);
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("title"), Some(&"$title".to_string()));
        // The operation's own `data` argument is not a candidate.
        assert!(args.get("data").is_none());

        let defs = bind_variable_definitions(&field, Some(&input), &variables);
        assert_eq!(defs.get("$title"), Some(&"String!".to_string()));
    }

    #[test]
    fn definitions_use_type_signatures() {
        let field = Field::new("posts", TypeRef::list(TypeRef::object("Post"))).with_args(vec![
            InputValue::new("ids", TypeRef::list(TypeRef::non_null(TypeRef::scalar("ID")))),
            InputValue::new("first", TypeRef::non_null(TypeRef::scalar("Int"))),
        ]);
        let defs = bind_variable_definitions(&field, None, &vars(json!({"ids": ["1"], "first": 5})));
        assert_eq!(defs.get("$ids"), Some(&"[ID!]".to_string()));
        assert_eq!(defs.get("$first"), Some(&"Int!".to_string()));
    }
}
