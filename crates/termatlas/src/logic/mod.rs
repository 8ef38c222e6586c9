//! First-order logic representation and manipulation
//!
//! Terms, substitutions, and the unification algorithm over them.

pub mod core;
pub mod unification;

// Re-export commonly used types
pub use self::core::term::{Constant, FunctionSymbol, Term, Variable};
pub use unification::{
    compose, match_term, occurs, unify, unify_var, unify_with, Substitution, UnificationError,
    UnificationResult, Unifier, UnifierDisplay,
};
