use thiserror::Error;

use crate::entity::Category;

/// Failure to turn the text of a sidebar script into a [`SidebarIndex`].
///
/// [`SidebarIndex`]: crate::entity::SidebarIndex
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected `initSidebarItems(...);`, `window.SIDEBAR_ITEMS = ...;` or a bare JSON object")]
    UnrecognizedEnvelope,
    #[error("malformed sidebar JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sidebar index has {} problem(s):\n{}", .0.len(), list_violations(.0))]
    Invalid(Vec<Violation>),
}

/// A broken structural invariant of a sidebar index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("category `{0}` appears more than once")]
    DuplicateCategory(String),
    #[error("category `{0}` is missing")]
    MissingCategory(Category),
    #[error("category `{key}` must map to a list of entries")]
    NotAList { key: String },
    #[error("{category} entry #{position} must be a [name, description] pair of strings")]
    MalformedEntry { category: Category, position: usize },
    #[error("{category} entry #{position} has an empty name")]
    EmptyName { category: Category, position: usize },
    #[error("{category} `{name}` is listed more than once")]
    DuplicateName { category: Category, name: String },
}

pub fn list_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}
