//! Command-line unification driver

use std::env;

use termatlas::{
    ChainConfig, Config, KnowledgeBase, OutcomeJson, ProblemJson, Rule, Substitution,
    TermAtlasError, Term, Unifier, UnifierDisplay,
};
use tracing_subscriber::EnvFilter;

fn usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!("\nWith no options, runs the built-in examples.");
    eprintln!("\nOptions:");
    eprintln!("  --problems <file>   Unify each problem in a JSON array of {{left, right, initial?}}");
    eprintln!("  --config <file>     Load engine configuration from JSON");
    eprintln!("  --max-depth <n>     Bound the unifier's recursion depth (also when chaining)");
    eprintln!("  --json              Print one JSON outcome per problem");
    eprintln!("  --forward           Run the forward-chaining example");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();
    let mut problems_file: Option<String> = None;
    let mut json = false;
    let mut forward = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--problems" => {
                if i + 1 < args.len() {
                    problems_file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    match Config::from_file(&args[i + 1]) {
                        Ok(c) => config = c,
                        Err(e) => {
                            eprintln!("Config error: {}", e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--max-depth" => {
                if i + 1 < args.len() {
                    if let Ok(n) = args[i + 1].parse::<usize>() {
                        config.unify.max_depth = Some(n);
                    }
                    i += 1;
                }
            }
            "--json" => json = true,
            "--forward" => forward = true,
            "--help" | "-h" => {
                usage(&args[0]);
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                usage(&args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let unifier = Unifier::new(config.unify);

    let result = if forward {
        run_forward(&config.chain, &unifier)
    } else if let Some(path) = problems_file {
        run_problems(&path, &unifier, json)
    } else {
        run_examples(&unifier);
        Ok(())
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn v(name: &str) -> Term {
    Term::var(name)
}

fn c(name: &str) -> Term {
    Term::constant(name)
}

fn f(name: &str, args: Vec<Term>) -> Term {
    Term::function(name, args)
}

fn run_examples(unifier: &Unifier) {
    let examples = vec![
        // {X -> a}
        (v("X"), c("a")),
        // X, Y bound; Z left free
        (
            f("f", vec![v("X"), f("g", vec![v("Y")])]),
            f("f", vec![f("g", vec![v("Z")]), f("g", vec![c("a")])]),
        ),
        // functor clash
        (f("f", vec![v("X")]), f("g", vec![v("X")])),
        // occurs check
        (v("X"), f("f", vec![v("X")])),
        // X cannot be both a and b
        (
            f("f", vec![v("X"), v("X")]),
            f("f", vec![c("a"), c("b")]),
        ),
    ];

    let empty = Substitution::new();
    for (i, (t1, t2)) in examples.iter().enumerate() {
        let theta = unifier.unify(t1, t2, &empty);
        println!("Example {}: unify({}, {})", i + 1, t1, t2);
        println!("  => {}", UnifierDisplay(&theta));
        println!();
    }
}

fn run_problems(path: &str, unifier: &Unifier, json: bool) -> termatlas::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let problems: Vec<ProblemJson> = serde_json::from_str(&text)?;

    for (i, problem) in problems.into_iter().enumerate() {
        let initial = match problem.initial {
            Some(s) => s.into_substitution()?,
            None => Substitution::new(),
        };
        let left = problem.left.into_term()?;
        let right = problem.right.into_term()?;

        let theta = unifier.unify(&left, &right, &initial);
        if json {
            println!("{}", serde_json::to_string(&OutcomeJson::from_result(&theta))?);
        } else {
            println!("Problem {}: unify({}, {})", i + 1, left, right);
            println!("  => {}", UnifierDisplay(&theta));
            if let Err(e) = &theta {
                println!("     ({})", e);
            }
            println!();
        }
    }
    Ok(())
}

fn run_forward(config: &ChainConfig, unifier: &Unifier) -> termatlas::Result<()> {
    let mut kb = KnowledgeBase::new();
    kb.add_fact(f("Human", vec![c("Socrates")]))?;
    kb.add_fact(f("Human", vec![c("Plato")]))?;
    kb.add_rule(Rule::new(vec![f("Human", vec![v("x")])], f("Mortal", vec![v("x")]))?);
    kb.add_rule(Rule::new(vec![f("Mortal", vec![v("x")])], f("Dies", vec![v("x")]))?);

    let query = f("Dies", vec![c("Socrates")]);

    println!("Applying forward reasoning...\n");
    let facts: Vec<String> = kb.facts().map(|t| t.to_string()).collect();
    println!("Initial facts: [{}]", facts.join(", "));

    let outcome = kb.forward_chain_with(&query, config, unifier);
    for inference in &outcome.inferred {
        let rule = kb.rules().get(inference.rule).ok_or_else(|| {
            TermAtlasError::InvalidInput(format!("unknown rule index {}", inference.rule))
        })?;
        println!("Inferred: {} from {}", inference.fact, rule);
    }

    if outcome.proven() {
        println!("\nQuery {} proven.", query);
    } else if outcome.depth_limited {
        println!("\nQuery {} undecided: unifier depth limit reached.", query);
    } else {
        println!("\nQuery {} cannot be proven.", query);
    }
    Ok(())
}
