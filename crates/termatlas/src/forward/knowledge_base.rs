//! Knowledge base of ground facts saturated by forward chaining

use super::rule::{KnowledgeError, Rule};
use crate::config::ChainConfig;
use crate::logic::{match_term, Substitution, Term, UnificationError, Unifier};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

/// A fact derived while chaining
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub fact: Term,
    /// Index of the rule that fired, see [`KnowledgeBase::rules`]
    pub rule: usize,
    /// Bindings of the rule's variables that produced `fact`
    pub bindings: Substitution,
}

/// Result of a forward-chaining run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Unifier of the query with the first fact that proved it
    pub answer: Option<Substitution>,
    /// Facts added by this run, in derivation order
    pub inferred: Vec<Inference>,
    pub rounds: usize,
    /// True if chaining stopped because no rule could add anything new
    pub saturated: bool,
    /// True if the unifier's depth bound cut the run short. The outcome is
    /// then inconclusive and `saturated` is false.
    pub depth_limited: bool,
}

impl ChainOutcome {
    pub fn proven(&self) -> bool {
        self.answer.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    facts: IndexSet<Term>,
    rules: Vec<Rule>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ground fact. Returns false if it was already known.
    pub fn add_fact(&mut self, fact: Term) -> Result<bool, KnowledgeError> {
        if !fact.is_ground() {
            return Err(KnowledgeError::NonGroundFact(fact));
        }
        Ok(self.facts.insert(fact))
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn facts(&self) -> impl Iterator<Item = &Term> {
        self.facts.iter()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn contains_fact(&self, fact: &Term) -> bool {
        self.facts.contains(fact)
    }

    /// All facts that are instances of `pattern`, with the matching bindings
    pub fn facts_matching(&self, pattern: &Term) -> Vec<(&Term, Substitution)> {
        self.facts
            .iter()
            .filter_map(|fact| match_term(pattern, fact).ok().map(|sigma| (fact, sigma)))
            .collect()
    }

    /// First fact that unifies with `query`.
    ///
    /// Fails only when the unifier's depth bound is hit before an answer is
    /// found.
    pub fn ask(
        &self,
        query: &Term,
        unifier: &Unifier,
    ) -> Result<Option<Substitution>, UnificationError> {
        let empty = Substitution::new();
        for fact in &self.facts {
            if let Some(sigma) = attempt(unifier, query, fact, &empty)? {
                return Ok(Some(sigma));
            }
        }
        Ok(None)
    }

    /// [`KnowledgeBase::forward_chain_with`] using an unbounded unifier
    pub fn forward_chain(&mut self, query: &Term, config: &ChainConfig) -> ChainOutcome {
        self.forward_chain_with(query, config, &Unifier::default())
    }

    /// Fire rules until `query` is proven, nothing new can be derived, the
    /// round limit is reached, or `unifier` hits its depth bound.
    pub fn forward_chain_with(
        &mut self,
        query: &Term,
        config: &ChainConfig,
        unifier: &Unifier,
    ) -> ChainOutcome {
        let mut outcome = ChainOutcome {
            answer: None,
            inferred: Vec::new(),
            rounds: 0,
            saturated: false,
            depth_limited: false,
        };
        if let Err(e) = self.run_rounds(query, config, unifier, &mut outcome) {
            warn!(rounds = outcome.rounds, %query, cause = %e, "chaining stopped at depth limit");
            outcome.saturated = false;
            outcome.depth_limited = true;
        }
        outcome
    }

    fn run_rounds(
        &mut self,
        query: &Term,
        config: &ChainConfig,
        unifier: &Unifier,
        outcome: &mut ChainOutcome,
    ) -> Result<(), UnificationError> {
        outcome.answer = self.ask(query, unifier)?;
        if outcome.proven() {
            info!(%query, "query already known");
            return Ok(());
        }

        let empty = Substitution::new();
        loop {
            if config.max_iterations != 0 && outcome.rounds >= config.max_iterations {
                warn!(rounds = outcome.rounds, %query, "round limit reached");
                return Ok(());
            }
            outcome.rounds += 1;

            let round = self.derive_round(unifier)?;
            if round.is_empty() {
                info!(rounds = outcome.rounds, facts = self.facts.len(), "saturated");
                outcome.saturated = true;
                return Ok(());
            }

            for inference in round {
                debug!(
                    fact = %inference.fact,
                    rule = %self.rules[inference.rule],
                    "inferred"
                );
                let fact = inference.fact.clone();
                self.facts.insert(fact.clone());
                outcome.inferred.push(inference);
                if outcome.answer.is_none() {
                    outcome.answer = attempt(unifier, query, &fact, &empty)?;
                }
            }

            if outcome.proven() {
                info!(rounds = outcome.rounds, %query, "query proven");
                return Ok(());
            }
        }
    }

    /// Every new fact derivable in one step from the current facts
    fn derive_round(&self, unifier: &Unifier) -> Result<Vec<Inference>, UnificationError> {
        let mut round: Vec<Inference> = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let mut solutions = Vec::new();
            self.satisfy(rule.antecedents(), Substitution::new(), unifier, &mut solutions)?;

            for bindings in solutions {
                let fact = bindings.apply(rule.consequent());
                if self.facts.contains(&fact) || round.iter().any(|i| i.fact == fact) {
                    continue;
                }
                round.push(Inference {
                    fact,
                    rule: index,
                    bindings,
                });
            }
        }
        Ok(round)
    }

    /// Collect every substitution that unifies all `antecedents` with facts,
    /// threading bindings left to right
    fn satisfy(
        &self,
        antecedents: &[Term],
        theta: Substitution,
        unifier: &Unifier,
        out: &mut Vec<Substitution>,
    ) -> Result<(), UnificationError> {
        let Some((first, rest)) = antecedents.split_first() else {
            out.push(theta);
            return Ok(());
        };
        for fact in &self.facts {
            if let Some(next) = attempt(unifier, first, fact, &theta)? {
                self.satisfy(rest, next, unifier, out)?;
            }
        }
        Ok(())
    }
}

/// Unify, treating a clash as "no match" and passing a depth-limit failure on
fn attempt(
    unifier: &Unifier,
    x: &Term,
    y: &Term,
    theta: &Substitution,
) -> Result<Option<Substitution>, UnificationError> {
    match unifier.unify(x, y, theta) {
        Ok(sigma) => Ok(Some(sigma)),
        Err(e) if matches!(e.root_cause(), UnificationError::DepthLimitExceeded(_)) => Err(e),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnifyConfig;

    fn pred(name: &str, args: Vec<Term>) -> Term {
        Term::function(name, args)
    }

    fn c(name: &str) -> Term {
        Term::constant(name)
    }

    fn v(name: &str) -> Term {
        Term::var(name)
    }

    fn socrates_kb() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        kb.add_fact(pred("Human", vec![c("Socrates")])).unwrap();
        kb.add_fact(pred("Human", vec![c("Plato")])).unwrap();
        kb.add_rule(Rule::new(vec![pred("Human", vec![v("x")])], pred("Mortal", vec![v("x")])).unwrap());
        kb.add_rule(Rule::new(vec![pred("Mortal", vec![v("x")])], pred("Dies", vec![v("x")])).unwrap());
        kb
    }

    #[test]
    fn test_socrates_dies() {
        let mut kb = socrates_kb();
        let outcome = kb.forward_chain(&pred("Dies", vec![c("Socrates")]), &ChainConfig::default());

        assert!(outcome.proven());
        assert!(kb.contains_fact(&pred("Mortal", vec![c("Socrates")])));
        assert!(kb.contains_fact(&pred("Dies", vec![c("Socrates")])));
        assert_eq!(outcome.rounds, 2);
    }

    #[test]
    fn test_unprovable_query_saturates() {
        let mut kb = socrates_kb();
        let outcome = kb.forward_chain(&pred("Dies", vec![c("Zeus")]), &ChainConfig::default());

        assert!(!outcome.proven());
        assert!(outcome.saturated);
        assert!(!outcome.depth_limited);
        // Mortal and Dies for both humans
        assert_eq!(outcome.inferred.len(), 4);
        assert_eq!(kb.facts().count(), 6);
    }

    #[test]
    fn test_query_with_variable_returns_answer() {
        let mut kb = socrates_kb();
        let outcome = kb.forward_chain(&pred("Mortal", vec![v("Who")]), &ChainConfig::default());

        let answer = outcome.answer.expect("query should be proven");
        let who = answer.apply(&v("Who"));
        assert!(who == c("Socrates") || who == c("Plato"));
    }

    #[test]
    fn test_known_fact_proven_without_rounds() {
        let mut kb = socrates_kb();
        let outcome = kb.forward_chain(&pred("Human", vec![c("Plato")]), &ChainConfig::default());
        assert!(outcome.proven());
        assert_eq!(outcome.rounds, 0);
    }

    #[test]
    fn test_joined_antecedents() {
        // Parent(x, y), Parent(y, z) => Grandparent(x, z)
        let mut kb = KnowledgeBase::new();
        kb.add_fact(pred("Parent", vec![c("abe"), c("homer")])).unwrap();
        kb.add_fact(pred("Parent", vec![c("homer"), c("bart")])).unwrap();
        kb.add_fact(pred("Parent", vec![c("homer"), c("lisa")])).unwrap();
        kb.add_rule(
            Rule::new(
                vec![
                    pred("Parent", vec![v("x"), v("y")]),
                    pred("Parent", vec![v("y"), v("z")]),
                ],
                pred("Grandparent", vec![v("x"), v("z")]),
            )
            .unwrap(),
        );

        let outcome = kb.forward_chain(&pred("Grandparent", vec![c("bart"), v("z")]), &ChainConfig::default());

        assert!(!outcome.proven());
        assert_eq!(outcome.inferred.len(), 2);
        assert!(kb.contains_fact(&pred("Grandparent", vec![c("abe"), c("bart")])));
        assert!(kb.contains_fact(&pred("Grandparent", vec![c("abe"), c("lisa")])));
    }

    #[test]
    fn test_round_limit() {
        // Nat(n) => Nat(s(n)) never saturates
        let mut kb = KnowledgeBase::new();
        kb.add_fact(pred("Nat", vec![c("zero")])).unwrap();
        kb.add_rule(
            Rule::new(
                vec![pred("Nat", vec![v("n")])],
                pred("Nat", vec![pred("s", vec![v("n")])]),
            )
            .unwrap(),
        );

        let config = ChainConfig { max_iterations: 5 };
        let outcome = kb.forward_chain(&pred("Nat", vec![c("omega")]), &config);

        assert!(!outcome.proven());
        assert!(!outcome.saturated);
        assert_eq!(outcome.rounds, 5);
        assert_eq!(outcome.inferred.len(), 5);
    }

    fn two_kb() -> KnowledgeBase {
        // Num(s(s(n))) => Two(n)
        let mut kb = KnowledgeBase::new();
        kb.add_fact(pred("Num", vec![pred("s", vec![pred("s", vec![c("zero")])])]))
            .unwrap();
        kb.add_rule(
            Rule::new(
                vec![pred("Num", vec![pred("s", vec![pred("s", vec![v("n")])])])],
                pred("Two", vec![v("n")]),
            )
            .unwrap(),
        );
        kb
    }

    #[test]
    fn test_depth_limit_is_not_saturation() {
        let query = pred("Two", vec![c("zero")]);
        let shallow = Unifier::new(UnifyConfig { max_depth: Some(1) });

        let mut kb = two_kb();
        let outcome = kb.forward_chain_with(&query, &ChainConfig::default(), &shallow);

        assert!(!outcome.proven());
        assert!(outcome.depth_limited);
        assert!(!outcome.saturated);
        assert_eq!(outcome.rounds, 1);
        assert!(outcome.inferred.is_empty());

        // Same rule fires once the bound is lifted
        let mut kb = two_kb();
        let outcome = kb.forward_chain_with(&query, &ChainConfig::default(), &Unifier::default());
        assert!(outcome.proven());
        assert!(!outcome.depth_limited);
        assert_eq!(outcome.inferred.len(), 1);
    }

    #[test]
    fn test_ask_reports_depth_limit() {
        let kb = two_kb();
        let shallow = Unifier::new(UnifyConfig { max_depth: Some(1) });

        // functor clash at the root is an ordinary miss
        assert_eq!(kb.ask(&pred("Two", vec![v("n")]), &shallow), Ok(None));
        assert!(matches!(
            kb.ask(&pred("Num", vec![pred("s", vec![pred("s", vec![v("n")])])]), &shallow),
            Err(UnificationError::DepthLimitExceeded(1))
        ));
        assert!(kb
            .ask(&pred("Num", vec![v("n")]), &Unifier::default())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_non_ground_fact_rejected() {
        let mut kb = KnowledgeBase::new();
        assert!(matches!(
            kb.add_fact(pred("Human", vec![v("x")])),
            Err(KnowledgeError::NonGroundFact(_))
        ));
        assert_eq!(kb.add_fact(pred("Human", vec![c("a")])), Ok(true));
        assert_eq!(kb.add_fact(pred("Human", vec![c("a")])), Ok(false));
    }

    #[test]
    fn test_facts_matching() {
        let kb = socrates_kb();
        let matches = kb.facts_matching(&pred("Human", vec![v("x")]));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].1.apply(&v("x")), c("Socrates"));
    }
}
