//! Unification, matching, and substitution for first-order terms

mod matching;
pub mod mgu;
pub mod substitution;


pub use matching::match_term;
pub use mgu::{
    compose, occurs, unify, unify_var, unify_with, UnificationError, UnificationResult, Unifier,
    UnifierDisplay,
};
pub use substitution::Substitution;
