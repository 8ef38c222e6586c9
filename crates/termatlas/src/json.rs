//! JSON serialization types for terms, substitutions and unification problems

use crate::error::TermError;
use crate::logic::{unify_with, FunctionSymbol, Substitution, Term, UnificationResult, Variable};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl TermJson {
    pub fn from_term(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name.clone(),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name.clone(),
            },
            Term::Function(func, args) => TermJson::Function {
                name: func.name.clone(),
                args: args.iter().map(TermJson::from_term).collect(),
            },
        }
    }

    /// Build the term, validating names through the checked constructors
    pub fn into_term(self) -> Result<Term, TermError> {
        match self {
            TermJson::Variable { name } => Term::try_var(name),
            TermJson::Constant { name } => Term::try_constant(name),
            TermJson::Function { name, args } => {
                let args = args
                    .into_iter()
                    .map(TermJson::into_term)
                    .collect::<Result<Vec<_>, _>>()?;
                Term::try_function(FunctionSymbol::new(name, args.len()), args)
            }
        }
    }
}

/// A single `variable -> term` binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingJson {
    pub variable: String,
    pub term: TermJson,
}

/// JSON representation of a substitution, in binding order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionJson {
    pub bindings: Vec<BindingJson>,
}

impl SubstitutionJson {
    pub fn from_substitution(subst: &Substitution) -> Self {
        SubstitutionJson {
            bindings: subst
                .iter()
                .map(|(v, t)| BindingJson {
                    variable: v.name.clone(),
                    term: TermJson::from_term(t),
                })
                .collect(),
        }
    }

    /// Rebuild a substitution.
    ///
    /// Bindings are folded in through unification, so cyclic or contradictory
    /// input is rejected instead of producing a broken substitution.
    pub fn into_substitution(self) -> crate::Result<Substitution> {
        let mut subst = Substitution::new();
        for binding in self.bindings {
            let var = Variable::try_new(binding.variable)?;
            let term = binding.term.into_term()?;
            subst = unify_with(&Term::Variable(var), &term, &subst)?;
        }
        Ok(subst)
    }
}

/// A unification problem read by the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemJson {
    pub left: TermJson,
    pub right: TermJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<SubstitutionJson>,
}

/// Outcome of a unification problem, as printed by the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OutcomeJson {
    Unified { unifier: SubstitutionJson },
    Failed { reason: String },
}

impl OutcomeJson {
    pub fn from_result(result: &UnificationResult) -> Self {
        match result {
            Ok(sigma) => OutcomeJson::Unified {
                unifier: SubstitutionJson::from_substitution(sigma),
            },
            Err(e) => OutcomeJson::Failed {
                reason: e.to_string(),
            },
        }
    }
}
