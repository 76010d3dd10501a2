//! Recursive field-selection derivation.
//!
//! [`build_selection`] walks a root object type and derives, field by
//! field, what to request for it: scalars and enums become leaves,
//! registered resources collapse to an id-only reference, and other
//! object types ("linked types") are expanded recursively.
//!
//! Recursion through the type graph is bounded two ways. A visited set
//! of type names, seeded with the root type, terminates any cycle —
//! direct self-references as well as longer chains (A → B → A) — by
//! collapsing the revisited type to an id-only selection. Independently,
//! a configurable depth limit turns pathologically deep non-cyclic
//! nesting into [`QueryBuildError::SchemaCycleExceeded`] instead of a
//! stack overflow.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::QueryBuildError;
use crate::introspection::{FullType, IntrospectionSchema, TypeKind};

/// Ordered mapping from field name to its selection.
pub type SelectionTree = IndexMap<String, SelectionNode>;

/// What to select for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNode {
    /// A scalar, enum, interface or union field: no sub-selection.
    Leaf,
    /// An object field with a nested selection.
    Nested(SelectionTree),
}

/// Knobs for selection building.
#[derive(Debug, Clone, Copy)]
pub struct SelectionOptions {
    /// Maximum nesting depth of expanded object types. Exceeding it is
    /// an error, not a silent truncation.
    pub max_depth: usize,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

/// An id-only nested selection, used for resources and revisited types.
fn id_selection() -> SelectionTree {
    let mut tree = SelectionTree::new();
    tree.insert("id".to_string(), SelectionNode::Leaf);
    tree
}

/// Derive the selection tree for `root`.
///
/// Fields whose final type cannot be resolved in the schema are dropped
/// silently (reported via a `tracing` debug event), never an error.
pub fn build_selection(
    schema: &IntrospectionSchema,
    root: &FullType,
    options: &SelectionOptions,
) -> Result<SelectionTree, QueryBuildError> {
    let mut visited = HashSet::new();
    visited.insert(root.name.clone());
    let mut dropped = 0usize;
    let tree = walk(schema, root, options, &mut visited, 1, &mut dropped)?;
    if dropped > 0 {
        tracing::debug!(
            root = %root.name,
            dropped,
            "dropped fields whose final type is not resolvable in the schema"
        );
    }
    Ok(tree)
}

fn walk(
    schema: &IntrospectionSchema,
    ty: &FullType,
    options: &SelectionOptions,
    visited: &mut HashSet<String>,
    depth: usize,
    dropped: &mut usize,
) -> Result<SelectionTree, QueryBuildError> {
    let mut tree = SelectionTree::new();
    let Some(fields) = ty.fields.as_ref() else {
        return Ok(tree);
    };

    for field in fields {
        let final_ty = field.type_ref.final_type();
        let Some(type_name) = final_ty.name.as_deref() else {
            *dropped += 1;
            continue;
        };

        // Reserved meta types (Prisma-style `_Name` aggregates as well as
        // `__Name` introspection internals) are never selected.
        if type_name.starts_with('_') {
            continue;
        }

        if final_ty.kind != TypeKind::Object {
            tree.insert(field.name.clone(), SelectionNode::Leaf);
            continue;
        }

        if schema.find_resource(type_name).is_some() {
            tree.insert(field.name.clone(), SelectionNode::Nested(id_selection()));
            continue;
        }

        let Some(linked) = schema.find_type(type_name) else {
            *dropped += 1;
            continue;
        };

        if visited.contains(type_name) {
            // Cycle of any length: stop at an id reference.
            tree.insert(field.name.clone(), SelectionNode::Nested(id_selection()));
            continue;
        }

        if depth >= options.max_depth {
            return Err(QueryBuildError::SchemaCycleExceeded {
                type_name: type_name.to_string(),
                max_depth: options.max_depth,
            });
        }

        visited.insert(type_name.to_string());
        let mut nested = walk(schema, linked, options, visited, depth + 1, dropped)?;
        visited.remove(type_name);

        nested
            .entry("id".to_string())
            .or_insert(SelectionNode::Leaf);
        tree.insert(field.name.clone(), SelectionNode::Nested(nested));
    }

    Ok(tree)
}
