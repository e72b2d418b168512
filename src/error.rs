//! Error types for tree construction and toggling.

use thiserror::Error;

/// Fatal problems in the employee list. A rebuild that hits one of these
/// produces no tree at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// Following manager references from these ids loops back on itself.
    #[error("manager cycle detected: {}", .ids.join(" -> "))]
    ManagerCycle { ids: Vec<String> },

    /// Two records share the same id.
    #[error("duplicate employee id: {id}")]
    DuplicateId { id: String },
}

/// A toggle named an id that is not part of the current tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown node: {id}")]
pub struct UnknownNodeError {
    pub id: String,
}

impl UnknownNodeError {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    UnknownNode(#[from] UnknownNodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_ids_in_chain_order() {
        let err = StructuralError::ManagerCycle {
            ids: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "manager cycle detected: a -> b");
    }

    #[test]
    fn chart_error_is_transparent() {
        let err: ChartError = UnknownNodeError::new("ghost").into();
        assert_eq!(err.to_string(), "unknown node: ghost");
    }
}
