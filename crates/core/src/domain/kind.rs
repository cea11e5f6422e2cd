// Procedure Kind - selects the terminal builder call

use serde::{Deserialize, Serialize};

/// Kind of a built procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcedureKind {
    /// Read endpoint
    Query,
    /// Mutating endpoint
    Mutation,
    /// Streaming endpoint
    Subscription,
}

impl Default for ProcedureKind {
    /// A method with no kind marker is a read endpoint
    fn default() -> Self {
        ProcedureKind::Query
    }
}

impl std::fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcedureKind::Query => write!(f, "QUERY"),
            ProcedureKind::Mutation => write!(f, "MUTATION"),
            ProcedureKind::Subscription => write!(f, "SUBSCRIPTION"),
        }
    }
}
