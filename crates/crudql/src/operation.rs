//! The closed set of CRUD-style operation kinds.

use std::fmt;

/// A data operation to translate into a GraphQL document.
///
/// A closed enumeration so that document shaping dispatches
/// exhaustively; adding a kind is a compile-visible change everywhere
/// one is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GetList,
    GetMany,
    GetManyReference,
    GetOne,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// Whether this kind belongs to the read-only set and therefore
    /// encodes as a query rather than a mutation.
    pub fn is_query(self) -> bool {
        matches!(
            self,
            Self::GetList | Self::GetMany | Self::GetManyReference | Self::GetOne
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GetList => "GET_LIST",
            Self::GetMany => "GET_MANY",
            Self::GetManyReference => "GET_MANY_REFERENCE",
            Self::GetOne => "GET_ONE",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_set() {
        assert!(OperationKind::GetList.is_query());
        assert!(OperationKind::GetMany.is_query());
        assert!(OperationKind::GetManyReference.is_query());
        assert!(OperationKind::GetOne.is_query());
        assert!(!OperationKind::Create.is_query());
        assert!(!OperationKind::Update.is_query());
        assert!(!OperationKind::Delete.is_query());
    }

    #[test]
    fn display_matches_wire_constants() {
        assert_eq!(OperationKind::GetManyReference.to_string(), "GET_MANY_REFERENCE");
        assert_eq!(OperationKind::Delete.to_string(), "DELETE");
    }
}
