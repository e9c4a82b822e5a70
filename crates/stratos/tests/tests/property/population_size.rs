//! Property tests: a generation holds elites plus offspring, best first.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stratos_evaluator::StratosEvaluator;
use stratos_genome::{EvolutionConfig, GenerationEngine};
use stratos_tests::arb_plan;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Population size is `min(max(1, survivors), seed) + offspring`.
    #[test]
    fn population_is_elites_plus_offspring(
        seed_population in prop::collection::vec(arb_plan(), 1..6),
        survivors in 0usize..5,
        offspring in 0usize..6,
        threshold in 0.0f64..100.0,
        seed in any::<u64>(),
    ) {
        let config = EvolutionConfig {
            survivors,
            offspring,
            discard_threshold: threshold,
            ..EvolutionConfig::default()
        };
        let engine = GenerationEngine::new("prop", config);
        let mut rng = StdRng::seed_from_u64(seed);

        let outcome = engine
            .evolve_once(&seed_population, &StratosEvaluator::new(), &mut rng)
            .unwrap();

        let elites = survivors.max(1).min(seed_population.len());
        prop_assert_eq!(outcome.elites.len(), elites);
        prop_assert_eq!(outcome.population_size(), elites + offspring);
        prop_assert!(!outcome.parent_pool.is_empty());
        prop_assert!(outcome.scored.windows(2).all(|w| w[0].score >= w[1].score));
    }

    /// The same seed reproduces the same generation, timestamps aside.
    #[test]
    fn seeded_runs_are_reproducible(
        seed_population in prop::collection::vec(arb_plan(), 1..4),
        seed in any::<u64>(),
    ) {
        let engine = GenerationEngine::new("prop", EvolutionConfig::default());
        let evaluator = StratosEvaluator::new();

        let first = engine
            .evolve_once(&seed_population, &evaluator, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let second = engine
            .evolve_once(&seed_population, &evaluator, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        let titles = |o: &stratos_genome::GenerationOutcome| {
            o.scored.iter().map(|s| (s.plan.title.clone(), s.score)).collect::<Vec<_>>()
        };
        prop_assert_eq!(titles(&first), titles(&second));
    }
}
