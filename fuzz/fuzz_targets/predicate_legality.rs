#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xsparse::coiterate::{Coiterate, Expr};
use xsparse::levels::{Dense, Level};

/// A small boolean-expression grammar fuzzed directly (rather than fuzzing
/// raw bytes into `Expr`'s constructors), so every generated case is a
/// well-formed expression over a fixed arity instead of mostly panicking
/// on out-of-range variable indices.
#[derive(Debug, Arbitrary)]
enum ExprSeed {
    Var(u8),
    And(Box<ExprSeed>, Box<ExprSeed>),
    Or(Box<ExprSeed>, Box<ExprSeed>),
    Not(Box<ExprSeed>),
}

const ARITY: usize = 3;

fn to_expr(seed: &ExprSeed) -> Expr {
    match seed {
        ExprSeed::Var(n) => Expr::var(usize::from(*n) % ARITY),
        ExprSeed::And(a, b) => to_expr(a) & to_expr(b),
        ExprSeed::Or(a, b) => to_expr(a) | to_expr(b),
        ExprSeed::Not(a) => !to_expr(a),
    }
}

fuzz_target!(|seed: ExprSeed| {
    let expr = to_expr(&seed);

    let levels: Vec<Level> = (0..ARITY).map(|_| Dense::new(4).into()).collect();
    let refs: Vec<&Level> = levels.iter().collect();

    // Whatever the outcome, construction must not panic: legal predicates
    // build successfully, illegal ones return `IllegalPredicate`.
    let _ = Coiterate::new(refs, expr);
});
