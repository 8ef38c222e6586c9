//! Most General Unifier (MGU) computation

use super::substitution::Substitution;
use crate::config::UnifyConfig;
use crate::logic::core::term::{Constant, Term, Variable};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Why two terms failed to unify.
///
/// Every variant is an ordinary negative answer of the decision procedure.
/// Callers that only care about success can treat them all alike.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    #[error("occurs check: {0} occurs in {1}")]
    OccursCheck(Variable, Term),

    /// Function symbols don't match
    #[error("function clash: {0} vs {1}")]
    FunctionClash(String, String),

    /// Arities don't match
    #[error("arity mismatch: {0} vs {1}")]
    ArityMismatch(usize, usize),

    /// Constant symbols don't match
    #[error("constant clash: {0} vs {1}")]
    ConstantClash(Constant, Constant),

    /// A constant met a compound term, or (when matching) a non-variable
    /// pattern met a variable
    #[error("shape clash: {0} vs {1}")]
    ShapeClash(Term, Term),

    /// Matching only: a pattern variable was already matched to another term
    #[error("{0} already matched {1}, cannot also match {2}")]
    BindingConflict(Variable, Term, Term),

    /// Failure inside an argument pair of two compound terms
    #[error("argument {index} of {functor}: {source}")]
    Argument {
        functor: String,
        index: usize,
        #[source]
        source: Box<UnificationError>,
    },

    /// The configured recursion bound was reached
    #[error("depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),
}

impl UnificationError {
    /// Strip `Argument` wrappers down to the clash that caused the failure
    pub fn root_cause(&self) -> &UnificationError {
        match self {
            UnificationError::Argument { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Unification engine with a configurable recursion bound.
///
/// The free functions [`unify`], [`unify_with`] and [`unify_var`] use the
/// default (unbounded) configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unifier {
    config: UnifyConfig,
}

impl Unifier {
    pub fn new(config: UnifyConfig) -> Self {
        Unifier { config }
    }

    /// Unify two terms starting from `theta`.
    ///
    /// On success the returned substitution extends `theta`. On failure
    /// `theta` is untouched and no partial substitution escapes.
    pub fn unify(&self, x: &Term, y: &Term, theta: &Substitution) -> UnificationResult {
        let result = self.unify_at(x, y, theta.clone(), 0);
        match &result {
            Ok(sigma) => debug!(%x, %y, unifier = %sigma, "unified"),
            Err(e) => debug!(%x, %y, cause = %e.root_cause(), "no unifier"),
        }
        result
    }

    /// Bind `var` against `other` under `theta`
    pub fn unify_var(&self, var: &Variable, other: &Term, theta: &Substitution) -> UnificationResult {
        self.unify_var_at(var, other, theta.clone(), 0)
    }

    fn check_depth(&self, depth: usize) -> Result<(), UnificationError> {
        match self.config.max_depth {
            Some(max) if depth > max => {
                trace!(depth, max, "unify_depth_limit");
                Err(UnificationError::DepthLimitExceeded(max))
            }
            _ => Ok(()),
        }
    }

    fn unify_at(
        &self,
        x: &Term,
        y: &Term,
        theta: Substitution,
        depth: usize,
    ) -> UnificationResult {
        self.check_depth(depth)?;

        let x = x.apply_substitution(&theta);
        let y = y.apply_substitution(&theta);

        if x == y {
            return Ok(theta);
        }

        match (&x, &y) {
            (Term::Variable(v), _) => self.unify_var_at(v, &y, theta, depth),
            (_, Term::Variable(v)) => self.unify_var_at(v, &x, theta, depth),

            (Term::Function(f1, args1), Term::Function(f2, args2)) => {
                if f1.name != f2.name {
                    trace!(left = %f1.name, right = %f2.name, "unify_functor_mismatch");
                    return Err(UnificationError::FunctionClash(
                        f1.name.clone(),
                        f2.name.clone(),
                    ));
                }
                if args1.len() != args2.len() {
                    trace!(functor = %f1.name, "unify_arity_mismatch");
                    return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
                }

                // Left to right, each pair sees the bindings of the previous ones
                let mut theta = theta;
                for (index, (a, b)) in args1.iter().zip(args2.iter()).enumerate() {
                    theta = self
                        .unify_at(a, b, theta, depth + 1)
                        .map_err(|e| match e {
                            UnificationError::DepthLimitExceeded(_) => e,
                            source => UnificationError::Argument {
                                functor: f1.name.clone(),
                                index,
                                source: Box::new(source),
                            },
                        })?;
                }
                Ok(theta)
            }

            (Term::Constant(c1), Term::Constant(c2)) => {
                trace!(left = %c1, right = %c2, "unify_constant_mismatch");
                Err(UnificationError::ConstantClash(c1.clone(), c2.clone()))
            }

            _ => {
                trace!(left = %x, right = %y, "unify_shape_mismatch");
                Err(UnificationError::ShapeClash(x.clone(), y.clone()))
            }
        }
    }

    fn unify_var_at(
        &self,
        var: &Variable,
        other: &Term,
        theta: Substitution,
        depth: usize,
    ) -> UnificationResult {
        // Never rebind: go through the existing binding instead
        if let Some(bound) = theta.get(var).cloned() {
            return self.unify_at(&bound, other, theta, depth + 1);
        }

        if let Term::Variable(o) = other {
            if o == var {
                return Ok(theta);
            }
            if let Some(bound) = theta.get(o).cloned() {
                return self.unify_at(&Term::Variable(var.clone()), &bound, theta, depth + 1);
            }
        }

        if occurs(var, other, &theta) {
            trace!(var = %var, term = %other, "unify_occurs_check_failed");
            let resolved = other.apply_substitution(&theta);
            return Err(UnificationError::OccursCheck(var.clone(), resolved));
        }

        trace!(var = %var, term = %other, "unify_bind");
        Ok(theta.with_binding(var.clone(), other.clone()))
    }
}

/// Unify two terms, returning a most general unifier (MGU) if one exists
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    Unifier::default().unify(term1, term2, &Substitution::new())
}

/// Unify two terms under an existing substitution
pub fn unify_with(term1: &Term, term2: &Term, theta: &Substitution) -> UnificationResult {
    Unifier::default().unify(term1, term2, theta)
}

/// Unify a variable with a term under an existing substitution.
///
/// A bound `var` (or a bound variable `other`) is unified through its binding
/// rather than rebound.
pub fn unify_var(var: &Variable, other: &Term, theta: &Substitution) -> UnificationResult {
    Unifier::default().unify_var(var, other, theta)
}

/// Check if `var` occurs in `term` once `term` is resolved under `subst`
pub fn occurs(var: &Variable, term: &Term, subst: &Substitution) -> bool {
    term.apply_substitution(subst).contains_variable(var)
}

/// Combine two substitutions into one that satisfies both.
///
/// Each binding of `second` is unified under `first`, so the result stays
/// normalized. Fails if the two disagree on some variable.
pub fn compose(first: &Substitution, second: &Substitution) -> UnificationResult {
    let unifier = Unifier::default();
    let mut theta = first.clone();
    for (var, term) in second.iter() {
        theta = unifier.unify_at(&Term::Variable(var.clone()), term, theta, 0)?;
    }
    Ok(theta)
}

/// Renders a unification outcome: the substitution, or `Failure (No Unifier)`
pub struct UnifierDisplay<'a>(pub &'a UnificationResult);

impl fmt::Display for UnifierDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(sigma) => write!(f, "{}", sigma),
            Err(_) => write!(f, "Failure (No Unifier)"),
        }
    }
}
