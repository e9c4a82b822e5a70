//! End-to-end generation scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;
use stratos_evaluator::StratosEvaluator;
use stratos_genome::{
    EvolutionConfig, GenerationEngine, GenomeError, PLACEHOLDER_MODULE, TITLE_TAGS,
};
use stratos_tests::{raising_scorer, rich_plan, staged_plan, title_scorer};
use stratos_types::{GenomeOp, PlanRecord};

fn engine() -> GenerationEngine {
    GenerationEngine::new("growth", EvolutionConfig::default())
}

#[test]
fn ranked_seed_breeds_from_qualified_parents() {
    let seed = vec![
        staged_plan("a", &["x"]),
        staged_plan("b", &["y"]),
        staged_plan("c", &["z"]),
    ];
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = engine().evolve_once(&seed, &title_scorer, &mut rng).unwrap();

    let elite_titles: Vec<&str> = outcome.elites.iter().map(|e| e.plan.title.as_str()).collect();
    assert_eq!(elite_titles, vec!["c", "a", "b"]);

    let pool_titles: Vec<&str> = outcome
        .parent_pool
        .iter()
        .map(|p| p.plan.title.as_str())
        .collect();
    assert_eq!(pool_titles, vec!["c", "a"]);

    assert_eq!(outcome.population_size(), 7);
    for child in outcome
        .scored
        .iter()
        .filter(|s| s.plan.meta.genome_op == Some(GenomeOp::Mutated))
    {
        assert!(!child.plan.module_names().contains(&"y"));
        assert!(child.plan.title.starts_with('a') || child.plan.title.starts_with('c'));
    }
    assert_eq!(outcome.best().map(|b| b.score), Some(95.0));
}

#[test]
fn single_member_breeds_with_itself() {
    let seed = vec![rich_plan().with_version("v1")];
    let mut rng = StdRng::seed_from_u64(3);

    let outcome = engine()
        .evolve_once(&seed, &StratosEvaluator::new(), &mut rng)
        .unwrap();

    assert_eq!(outcome.elites.len(), 1);
    assert_eq!(outcome.population_size(), 5);
    for child in outcome.next_population.iter().filter(|p| p.meta.genome_op.is_some()) {
        assert_eq!(child.meta.parents, vec!["v1".to_string(), "v1".to_string()]);
        assert!(child.flow_is_consistent());
    }
}

#[test]
fn module_less_parents_get_placeholder() {
    let seed = vec![PlanRecord::new("bare"), PlanRecord::new("empty")];
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = engine()
        .evolve_once(&seed, &StratosEvaluator::new(), &mut rng)
        .unwrap();

    let children: Vec<&PlanRecord> = outcome
        .next_population
        .iter()
        .filter(|p| p.meta.genome_op == Some(GenomeOp::Mutated))
        .collect();
    assert_eq!(children.len(), 4);
    for child in children {
        assert_eq!(child.module_names(), vec![PLACEHOLDER_MODULE]);
        assert_eq!(child.flow, vec![PLACEHOLDER_MODULE.to_string()]);
    }
}

#[test]
fn failing_scorer_still_evolves() {
    let seed = vec![staged_plan("a", &["x"]), staged_plan("b", &["y"])];
    let mut rng = StdRng::seed_from_u64(9);

    let outcome = engine().evolve_once(&seed, &raising_scorer, &mut rng).unwrap();

    assert!(outcome.scored.iter().all(|s| s.score == 0.0));
    assert_eq!(outcome.parent_pool.len(), 2);
    assert_eq!(outcome.population_size(), 6);
}

#[test]
fn empty_seed_is_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = engine()
        .evolve_once(&[], &StratosEvaluator::new(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, GenomeError::EmptyPopulation));
}

#[test]
fn full_rate_run_tags_every_child() {
    let config = EvolutionConfig {
        mutation_rate: 1.0,
        ..EvolutionConfig::default()
    };
    let mut engine = GenerationEngine::new("growth", config);
    let mut rng = StdRng::seed_from_u64(21);

    let outcomes = engine
        .run(&[rich_plan()], &StratosEvaluator::new(), &mut rng, 3)
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(
        outcomes.iter().map(|o| o.generation).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(engine.config().generation, 4);

    let last = &outcomes[2];
    assert!(last
        .next_population
        .iter()
        .filter(|p| p.meta.genome_op == Some(GenomeOp::Mutated))
        .all(|p| TITLE_TAGS.iter().any(|tag| p.title.contains(tag))));
}
