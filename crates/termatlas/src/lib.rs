//! termatlas: first-order term unification
//!
//! Terms are variables, constants or function applications. [`unify`] computes
//! a most general unifier with occurs-check, threading a persistent
//! [`Substitution`] that is kept normalized on every extension. The
//! [`forward`] module builds a small forward-chaining engine on top.

pub mod config;
pub mod error;
pub mod forward;
pub mod json;
pub mod logic;

pub use config::{ChainConfig, Config, UnifyConfig};
pub use error::{Result, TermAtlasError, TermError};

pub use logic::{
    compose, match_term, occurs, unify, unify_var, unify_with, Constant, FunctionSymbol,
    Substitution, Term, UnificationError, UnificationResult, Unifier, UnifierDisplay, Variable,
};

pub use forward::{ChainOutcome, Inference, KnowledgeBase, KnowledgeError, Rule};

pub use json::{OutcomeJson, ProblemJson, SubstitutionJson, TermJson};
