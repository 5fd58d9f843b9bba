// tests/grammar_expansion.rs
use lsystem_plotter::{
    Effect, GrammarEngine, PlotterError, Program, RuleTable, Symbol, check_balance, expand,
    growth, run,
};

fn symbols(s: &str) -> Vec<Symbol> {
    s.chars().collect()
}

fn plant_rules() -> RuleTable {
    Program::base_rules().with('F', "F[+F]F[-F]F", Effect::Forward)
}

#[test]
fn test_single_generation_of_bracketed_plant() {
    let rules = plant_rules();
    let next = expand(&symbols("F"), &rules).unwrap();

    assert_eq!(next.len(), 11);
    assert_eq!(next, symbols("F[+F]F[-F]F"));
}

#[test]
fn test_zero_generations_returns_axiom() {
    let rules = plant_rules();
    let axiom = symbols("F+F");
    assert_eq!(run(&axiom, &rules, 0).unwrap(), axiom);
}

#[test]
fn test_concatenation_preserves_order() {
    let rules = RuleTable::new()
        .with('A', "AB", Effect::NoOp)
        .with('B', "A", Effect::NoOp);

    // Fibonacci words: A, AB, ABA, ABAAB, ABAABABA
    let out = run(&symbols("A"), &rules, 4).unwrap();
    assert_eq!(out, symbols("ABAABABA"));
}

#[test]
fn test_unknown_symbol_aborts_expansion() {
    let rules = plant_rules();
    let err = expand(&symbols("F+X-F"), &rules).unwrap_err();
    assert!(matches!(err, PlotterError::UnknownSymbol('X')), "got {err:?}");

    // Hidden two generations deep: B only appears after rewriting A.
    let rules = RuleTable::new().with('A', "AB", Effect::NoOp);
    let err = run(&symbols("A"), &rules, 2).unwrap_err();
    assert!(matches!(err, PlotterError::UnknownSymbol('B')));
}

#[test]
fn test_expansion_is_deterministic() {
    let program = Program::default();
    let a = run(&program.axiom, &program.rules, 4).unwrap();
    let b = run(&program.axiom, &program.rules, 4).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_growth_prediction_matches_expansion() {
    let rules = plant_rules();
    let axiom = symbols("F");
    let predicted = growth(&axiom, &rules, 4).unwrap();

    assert_eq!(predicted, vec![1, 11, 61, 311, 1561]);
    for (generation, expected) in predicted.iter().enumerate() {
        let actual = run(&axiom, &rules, generation as u32).unwrap().len() as u128;
        assert_eq!(actual, *expected, "generation {generation}");
    }
}

#[test]
fn test_engine_enforces_symbol_ceiling() {
    let engine = GrammarEngine::new(100);
    let err = engine.run(&symbols("F"), &plant_rules(), 5).unwrap_err();

    match err {
        PlotterError::GrowthLimit {
            generation,
            symbols,
            limit,
        } => {
            assert_eq!(generation, 3);
            assert_eq!(symbols, 311);
            assert_eq!(limit, 100);
        }
        other => panic!("expected GrowthLimit, got {other:?}"),
    }

    // Below the ceiling it behaves like the unbounded run.
    let bounded = engine.run(&symbols("F"), &plant_rules(), 2).unwrap();
    assert_eq!(bounded, run(&symbols("F"), &plant_rules(), 2).unwrap());
}

#[test]
fn test_engine_rejects_unknown_axiom_symbol_even_without_rewriting() {
    let engine = GrammarEngine::default();
    let err = engine.run(&symbols("FZ"), &plant_rules(), 0).unwrap_err();
    assert!(matches!(err, PlotterError::UnknownSymbol('Z')));
}

#[test]
fn test_static_balance_check() {
    let rules = plant_rules();
    assert_eq!(check_balance(&symbols("F[+F[-F]]F"), &rules).unwrap(), 0);
    assert_eq!(check_balance(&symbols("[[F]"), &rules).unwrap(), 1);

    let err = check_balance(&symbols("F[F]]F"), &rules).unwrap_err();
    assert!(matches!(err, PlotterError::StackUnderflow { index: 4 }));
}

#[test]
fn test_rule_table_closure() {
    let rules = plant_rules();
    assert!(rules.validate_closed().is_ok());

    let broken = plant_rules().with('G', "GH", Effect::NoOp);
    assert!(matches!(
        broken.validate_closed(),
        Err(PlotterError::UnknownSymbol('H'))
    ));
}

#[test]
fn test_builtin_effects() {
    assert_eq!(Effect::builtin('F'), Effect::Forward);
    assert_eq!(Effect::builtin('+'), Effect::TurnRight);
    assert_eq!(Effect::builtin('-'), Effect::TurnLeft);
    assert_eq!(Effect::builtin('['), Effect::Push);
    assert_eq!(Effect::builtin(']'), Effect::Pop);
    assert_eq!(Effect::builtin('f'), Effect::NoOp, "symbols are case-sensitive");
    assert_eq!(Effect::builtin('X'), Effect::NoOp);
}

#[test]
fn test_fixed_point_stops_expansion_early() {
    let rules = Program::base_rules();
    assert_eq!(run(&symbols("+"), &rules, u32::MAX).unwrap(), symbols("+"));

    let engine = GrammarEngine::default();
    assert_eq!(engine.run(&symbols("+-"), &rules, 1000).unwrap(), symbols("+-"));
}

#[test]
fn test_engine_enforces_generation_ceiling() {
    let engine = GrammarEngine::default().with_max_generations(16);
    let err = engine.run(&symbols("+"), &Program::base_rules(), u32::MAX).unwrap_err();
    assert!(matches!(
        err,
        PlotterError::GenerationLimit {
            generations: u32::MAX,
            limit: 16
        }
    ));
}

#[test]
fn test_growth_stops_once_counts_settle() {
    let settled = growth(&symbols("+"), &Program::base_rules(), u32::MAX).unwrap();
    assert_eq!(settled, vec![1]);

    let rules = RuleTable::new().with('F', "FF", Effect::Forward);
    let saturated = growth(&symbols("F"), &rules, u32::MAX).unwrap();
    assert_eq!(saturated.len(), 129, "2^0 ..= 2^127, then saturation");
    assert_eq!(saturated.last(), Some(&u128::MAX));
}
