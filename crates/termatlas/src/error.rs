//! Error types for termatlas

use crate::forward::KnowledgeError;
use crate::logic::UnificationError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Which constructor rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Variable,
    Constant,
    Function,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TermKind::Variable => "variable",
            TermKind::Constant => "constant",
            TermKind::Function => "function",
        };
        f.write_str(s)
    }
}

/// Malformed term input, caught at the constructor boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    #[error("empty {0} name")]
    EmptyName(TermKind),

    #[error("function {name} declared with arity {declared} but given {actual} arguments")]
    ArityMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum TermAtlasError {
    #[error("Invalid term: {0}")]
    Term(#[from] TermError),

    #[error("No unifier: {0}")]
    Unification(#[from] UnificationError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TermAtlasError>;
