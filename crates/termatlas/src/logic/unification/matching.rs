//! One-way matching

use super::mgu::{UnificationError, UnificationResult};
use super::substitution::Substitution;
use crate::logic::core::term::Term;
use tracing::trace;

/// One-way match: find a substitution σ such that `pattern`σ = `term`.
///
/// Only variables in the pattern are bound; variables in `term` are treated
/// as opaque symbols. Pattern and term must not share variable names (rename
/// apart first), since the returned substitution is applied transitively.
pub fn match_term(pattern: &Term, term: &Term) -> UnificationResult {
    match_with(pattern, term, Substitution::new())
}

fn match_with(pattern: &Term, term: &Term, subst: Substitution) -> UnificationResult {
    match (pattern, term) {
        (Term::Variable(v), t) => match subst.get(v).cloned() {
            Some(bound) if &bound == t => Ok(subst),
            Some(bound) => {
                trace!(var = %v, "match_binding_conflict");
                Err(UnificationError::BindingConflict(v.clone(), bound, t.clone()))
            }
            None => Ok(subst.with_binding(v.clone(), t.clone())),
        },

        (Term::Constant(c1), Term::Constant(c2)) => {
            if c1 == c2 {
                Ok(subst)
            } else {
                Err(UnificationError::ConstantClash(c1.clone(), c2.clone()))
            }
        }

        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.name != f2.name {
                trace!("match_functor_mismatch");
                return Err(UnificationError::FunctionClash(
                    f1.name.clone(),
                    f2.name.clone(),
                ));
            }
            if args1.len() != args2.len() {
                trace!("match_arity_mismatch");
                return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
            }

            let mut subst = subst;
            for (index, (p, t)) in args1.iter().zip(args2.iter()).enumerate() {
                subst = match_with(p, t, subst).map_err(|source| UnificationError::Argument {
                    functor: f1.name.clone(),
                    index,
                    source: Box::new(source),
                })?;
            }
            Ok(subst)
        }

        // Constant vs function, or a non-variable pattern against a variable
        _ => Err(UnificationError::ShapeClash(pattern.clone(), term.clone())),
    }
}
