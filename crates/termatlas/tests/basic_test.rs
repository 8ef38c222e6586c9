//! Integration tests for the unifier through the public API

use termatlas::{
    unify, unify_with, Substitution, Term, UnificationError, Unifier, UnifierDisplay,
    UnifyConfig, Variable,
};

fn v(name: &str) -> Term {
    Term::var(name)
}

fn c(name: &str) -> Term {
    Term::constant(name)
}

fn f(name: &str, args: Vec<Term>) -> Term {
    Term::function(name, args)
}

#[test]
fn test_variable_constant() {
    let theta = unify(&v("X"), &c("a"));
    assert_eq!(UnifierDisplay(&theta).to_string(), "{ X -> a }");
}

#[test]
fn test_nested_compound_example() {
    let t1 = f("f", vec![v("X"), f("g", vec![v("Y")])]);
    let t2 = f("f", vec![f("g", vec![v("Z")]), f("g", vec![c("a")])]);

    let sigma = unify(&t1, &t2).expect("terms should unify");

    assert_eq!(sigma.apply(&t1), sigma.apply(&t2));
    assert_eq!(sigma.apply(&v("Y")), c("a"));
    assert_eq!(sigma.apply(&v("X")), f("g", vec![v("Z")]));
    assert_eq!(UnifierDisplay(&Ok(sigma)).to_string(), "{ X -> g(Z), Y -> a }");
}

#[test]
fn test_chained_bindings_all_resolve() {
    // Once Z is fixed, X -> g(Z) and Y -> Z must follow
    let t1 = f("h", vec![v("X"), v("Y"), v("Z")]);
    let t2 = f("h", vec![f("g", vec![v("Z")]), v("Z"), c("a")]);

    let sigma = unify(&t1, &t2).unwrap();

    assert_eq!(sigma.apply(&v("X")), f("g", vec![c("a")]));
    assert_eq!(sigma.apply(&v("Y")), c("a"));
    assert_eq!(sigma.apply(&v("Z")), c("a"));
    // stored bindings are already resolved
    for (_, bound) in sigma.iter() {
        assert!(bound.is_ground());
    }
}

#[test]
fn test_failures_render_as_no_unifier() {
    let cases = vec![
        (f("f", vec![v("X")]), f("g", vec![v("X")])),
        (f("f", vec![v("X")]), f("f", vec![v("X"), v("Y")])),
        (v("X"), f("f", vec![v("X")])),
        (f("f", vec![v("X"), v("X")]), f("f", vec![c("a"), c("b")])),
        (c("a"), f("a", vec![])),
    ];

    for (t1, t2) in cases {
        let theta = unify(&t1, &t2);
        assert!(theta.is_err(), "unify({}, {}) should fail", t1, t2);
        assert_eq!(UnifierDisplay(&theta).to_string(), "Failure (No Unifier)");
    }
}

#[test]
fn test_occurs_check_regardless_of_initial() {
    let initials = vec![
        Substitution::new(),
        Substitution::new().extend(Variable::new("Y"), c("b")),
        Substitution::new().extend(Variable::new("Y"), v("X")),
    ];
    for theta in initials {
        let result = unify_with(&v("X"), &f("f", vec![v("X")]), &theta);
        assert!(matches!(
            result.unwrap_err().root_cause(),
            UnificationError::OccursCheck(_, _)
        ));
    }
}

#[test]
fn test_two_variables_resolve_together() {
    let sigma = unify(&v("X"), &v("Y")).unwrap();
    assert_eq!(sigma.apply(&v("X")), sigma.apply(&v("Y")));

    // Later binding of either side reaches both
    let sigma = unify_with(&v("Y"), &c("k"), &sigma).unwrap();
    assert_eq!(sigma.apply(&v("X")), c("k"));
    assert_eq!(sigma.apply(&v("Y")), c("k"));
}

#[test]
fn test_unrelated_substitution_untouched() {
    let theta = Substitution::new()
        .extend(Variable::new("P"), c("p"))
        .extend(Variable::new("Q"), f("q", vec![v("R")]));
    let g = f("f", vec![c("a"), f("g", vec![c("b"), c("c")])]);

    let sigma = unify_with(&g, &g, &theta).unwrap();

    assert_eq!(sigma, theta);
    assert_eq!(sigma.to_string(), "{ P -> p, Q -> q(R) }");
}

#[test]
fn test_threading_initial_substitution() {
    let theta = unify(&v("X"), &c("a")).unwrap();

    // f(X, Y) = f(a, b) is consistent with X -> a
    let sigma = unify_with(&f("f", vec![v("X"), v("Y")]), &f("f", vec![c("a"), c("b")]), &theta)
        .unwrap();
    assert_eq!(sigma.len(), 2);

    // f(X) = f(b) is not
    assert!(unify_with(&f("f", vec![v("X")]), &f("f", vec![c("b")]), &theta).is_err());
    assert_eq!(theta.len(), 1);
}

#[test]
fn test_depth_bounded_unifier() {
    let mut left = v("X");
    let mut right = c("zero");
    for _ in 0..50 {
        left = f("s", vec![left]);
        right = f("s", vec![right]);
    }

    let bounded = Unifier::new(UnifyConfig { max_depth: Some(10) });
    assert!(matches!(
        bounded.unify(&left, &right, &Substitution::new()),
        Err(UnificationError::DepthLimitExceeded(10))
    ));

    let roomy = Unifier::new(UnifyConfig { max_depth: Some(100) });
    let sigma = roomy.unify(&left, &right, &Substitution::new()).unwrap();
    assert_eq!(sigma.apply(&v("X")), c("zero"));
}
