//! Forward chaining over ground facts
//!
//! A small consumer of the unifier: rule antecedents are unified against
//! known facts and the resulting bindings are applied to the consequent.

mod knowledge_base;
mod rule;

pub use knowledge_base::{ChainOutcome, Inference, KnowledgeBase};
pub use rule::{KnowledgeError, Rule};
