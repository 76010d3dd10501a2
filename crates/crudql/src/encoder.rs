//! Rendering operation descriptors to GraphQL document text.
//!
//! The descriptor model is deliberately small: an [`Operation`] carries
//! the document's variable definitions and an ordered map of aliased
//! top-level [`FieldNode`]s, each with argument values and a selection
//! tree. [`encode_query`] and [`encode_mutation`] turn one into a single
//! line of document text, ready to send as the `query` member of a
//! GraphQL request body.

use indexmap::IndexMap;

use crate::arguments::VariableDefinitions;
use crate::selection::{SelectionNode, SelectionTree};

/// An argument value: a `$variable` reference or a nested object
/// literal (e.g. `{data: $data, where: {id: $id}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A variable reference, stored with its leading `$`.
    Variable(String),
    /// An object literal of argument values.
    Object(IndexMap<String, ArgValue>),
}

/// A top-level field of an operation: the schema field it targets, the
/// argument values it is invoked with, and its selection. The map key it
/// is stored under in [`Operation::fields`] is its alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub field: String,
    pub params: IndexMap<String, ArgValue>,
    pub selection: SelectionTree,
}

/// A complete operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub variables: VariableDefinitions,
    pub fields: IndexMap<String, FieldNode>,
}

/// Render `operation` as a query document.
pub fn encode_query(name: &str, operation: &Operation) -> String {
    encode("query", name, operation)
}

/// Render `operation` as a mutation document.
pub fn encode_mutation(name: &str, operation: &Operation) -> String {
    encode("mutation", name, operation)
}

fn encode(keyword: &str, name: &str, operation: &Operation) -> String {
    let mut doc = String::new();
    doc.push_str(keyword);
    doc.push(' ');
    doc.push_str(name);

    if !operation.variables.is_empty() {
        let defs: Vec<String> = operation
            .variables
            .iter()
            .map(|(var, signature)| format!("{}: {}", var, signature))
            .collect();
        doc.push_str(&format!("({})", defs.join(", ")));
    }

    doc.push_str(" {");
    for (alias, node) in &operation.fields {
        doc.push(' ');
        if *alias == node.field {
            doc.push_str(alias);
        } else {
            doc.push_str(&format!("{}: {}", alias, node.field));
        }
        if !node.params.is_empty() {
            let params: Vec<String> = node
                .params
                .iter()
                .map(|(name, value)| format!("{}: {}", name, render_value(value)))
                .collect();
            doc.push_str(&format!("({})", params.join(", ")));
        }
        if !node.selection.is_empty() {
            doc.push(' ');
            render_selection(&mut doc, &node.selection);
        }
    }
    doc.push_str(" }");
    doc
}

fn render_value(value: &ArgValue) -> String {
    match value {
        ArgValue::Variable(var) => var.clone(),
        ArgValue::Object(entries) => {
            let inner: Vec<String> = entries
                .iter()
                .map(|(name, value)| format!("{}: {}", name, render_value(value)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

fn render_selection(doc: &mut String, tree: &SelectionTree) {
    doc.push('{');
    for (name, node) in tree {
        doc.push(' ');
        doc.push_str(name);
        if let SelectionNode::Nested(inner) = node {
            doc.push(' ');
            render_selection(doc, inner);
        }
    }
    doc.push_str(" }");
}
