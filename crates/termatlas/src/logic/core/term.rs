//! Terms in first-order logic

use crate::error::{TermError, TermKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable, identified by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }

    /// Like `new`, but rejects an empty name
    pub fn try_new(name: impl Into<String>) -> Result<Self, TermError> {
        let name = non_empty(name.into(), TermKind::Variable)?;
        Ok(Variable { name })
    }
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

/// A function symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// A term in first-order logic.
///
/// Terms are immutable trees. Equality is purely syntactic: two terms are equal
/// when they have the same shape and the same names everywhere. No substitution
/// is ever consulted by `==`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Build a variable term
    pub fn var(name: impl Into<String>) -> Term {
        Term::Variable(Variable::new(name))
    }

    /// Build a constant term
    pub fn constant(name: impl Into<String>) -> Term {
        Term::Constant(Constant::new(name))
    }

    /// Build a compound term; the arity is taken from `args`.
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Term {
        let symbol = FunctionSymbol::new(name, args.len());
        Term::Function(symbol, args)
    }

    /// Build a variable term, rejecting an empty name
    pub fn try_var(name: impl Into<String>) -> Result<Term, TermError> {
        Variable::try_new(name).map(Term::Variable)
    }

    /// Build a constant term, rejecting an empty name
    pub fn try_constant(name: impl Into<String>) -> Result<Term, TermError> {
        let name = non_empty(name.into(), TermKind::Constant)?;
        Ok(Term::Constant(Constant { name }))
    }

    /// Build a compound term from an explicit symbol.
    ///
    /// Fails if the symbol name is empty or its declared arity disagrees with
    /// the number of arguments supplied.
    pub fn try_function(symbol: FunctionSymbol, args: Vec<Term>) -> Result<Term, TermError> {
        let name = non_empty(symbol.name, TermKind::Function)?;
        if symbol.arity != args.len() {
            return Err(TermError::ArityMismatch {
                name,
                declared: symbol.arity,
                actual: args.len(),
            });
        }
        Ok(Term::Function(
            FunctionSymbol {
                name,
                arity: symbol.arity,
            },
            args,
        ))
    }

    /// A ground term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Get all variables in this term, in left-to-right order (with repeats)
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Term::Variable(v) => vec![v.clone()],
            Term::Constant(_) => vec![],
            Term::Function(_, args) => args.iter().flat_map(|arg| arg.variables()).collect(),
        }
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Syntactic containment, without consulting any substitution
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }
}

fn non_empty(name: String, kind: TermKind) -> Result<String, TermError> {
    if name.trim().is_empty() {
        Err(TermError::EmptyName(kind))
    } else {
        Ok(name)
    }
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
