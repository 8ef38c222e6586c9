//! Horn rules for forward chaining

use crate::logic::{Term, Variable};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("rule has no antecedents")]
    NoAntecedents,

    #[error("consequent variable {0} does not occur in any antecedent")]
    UnboundConsequentVariable(Variable),

    #[error("fact {0} is not ground")]
    NonGroundFact(Term),
}

/// `antecedent_1, ..., antecedent_n => consequent`
///
/// Every variable of the consequent occurs in some antecedent, so firing the
/// rule against ground facts always yields a ground fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    antecedents: Vec<Term>,
    consequent: Term,
}

impl Rule {
    pub fn new(antecedents: Vec<Term>, consequent: Term) -> Result<Self, KnowledgeError> {
        if antecedents.is_empty() {
            return Err(KnowledgeError::NoAntecedents);
        }

        let mut bound = HashSet::new();
        for antecedent in &antecedents {
            antecedent.collect_variables(&mut bound);
        }
        if let Some(v) = consequent.variables().into_iter().find(|v| !bound.contains(v)) {
            return Err(KnowledgeError::UnboundConsequentVariable(v));
        }

        Ok(Rule {
            antecedents,
            consequent,
        })
    }

    pub fn antecedents(&self) -> &[Term] {
        &self.antecedents
    }

    pub fn consequent(&self) -> &Term {
        &self.consequent
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", a)?;
        }
        write!(f, " => {}", self.consequent)
    }
}
