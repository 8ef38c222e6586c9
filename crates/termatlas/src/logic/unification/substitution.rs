//! Variable substitutions

use crate::logic::core::term::{Term, Variable};
use indexmap::IndexMap;
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Substitutions are persistent: `extend` returns a new value and leaves the
/// receiver untouched. Every binding is kept fully resolved against the rest
/// of the map, so no bound term mentions a variable that is itself bound.
/// Bindings keep their insertion order, which is the order they render in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the term a variable is bound to, if any
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    /// Iterate over bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Apply this substitution to a term
    pub fn apply(&self, term: &Term) -> Term {
        term.apply_substitution(self)
    }

    /// Fully resolve a single variable
    pub fn resolve(&self, var: &Variable) -> Term {
        match self.map.get(var) {
            Some(bound) => bound.apply_substitution(self),
            None => Term::Variable(var.clone()),
        }
    }

    /// Return a new substitution with `var -> term` added.
    ///
    /// The caller must have checked that `var` does not occur in `term` under
    /// this substitution; otherwise the new binding would be cyclic and `apply`
    /// would not terminate.
    pub fn extend(&self, var: Variable, term: Term) -> Substitution {
        self.clone().with_binding(var, term)
    }

    /// Consuming form of [`Substitution::extend`].
    ///
    /// The new term is resolved against the current bindings, then every
    /// existing binding is re-resolved against the augmented map so that none
    /// still refers to `var`.
    pub fn with_binding(mut self, var: Variable, term: Term) -> Substitution {
        let resolved = term.apply_substitution(&self);
        self.map.insert(var, resolved);

        let normalized: IndexMap<Variable, Term> = self
            .map
            .iter()
            .map(|(v, t)| (v.clone(), t.apply_substitution(&self)))
            .collect();
        self.map = normalized;
        self
    }
}

impl Term {
    /// Apply a substitution to this term.
    ///
    /// Bound variables are resolved transitively: with `X -> Y` and `Y -> a`,
    /// `X` becomes `a`. Unbound variables and constants are returned as is.
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => match subst.map.get(v) {
                Some(bound) => bound.apply_substitution(subst),
                None => self.clone(),
            },
            Term::Constant(_) => self.clone(),
            Term::Function(f, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.apply_substitution(subst))
                    .collect();
                Term::Function(f.clone(), new_args)
            }
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ ")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, " }}")
    }
}
