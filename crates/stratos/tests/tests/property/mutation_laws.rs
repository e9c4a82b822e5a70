//! Property tests: mutation leaves its input alone and only adds known content.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stratos_genome::{mutate, EXPLORATORY_OBJECTIVE, EXPLORATORY_RISK};
use stratos_tests::arb_plan;
use stratos_types::GenomeOp;

proptest! {
    /// The result is stamped as mutated with the rate used.
    #[test]
    fn mutation_stamps_meta(plan in arb_plan(), rate in 0.0f64..=1.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = mutate(&plan, rate, &mut rng);
        prop_assert_eq!(child.meta.genome_op, Some(GenomeOp::Mutated));
        prop_assert_eq!(child.meta.mutation_rate, Some(rate));
        prop_assert!(child.meta.mutated_at.is_some());
    }

    /// The input plan is never modified.
    #[test]
    fn mutation_does_not_touch_input(plan in arb_plan(), seed in any::<u64>()) {
        let before = plan.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let _ = mutate(&plan, 1.0, &mut rng);
        prop_assert_eq!(plan, before);
    }

    /// Modules are untouched; lists only gain the exploratory entries.
    #[test]
    fn mutation_preserves_content(plan in arb_plan(), rate in 0.0f64..=1.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = mutate(&plan, rate, &mut rng);

        prop_assert_eq!(&child.modules, &plan.modules);

        let mut flow = child.flow.clone();
        let mut original_flow = plan.flow.clone();
        flow.sort();
        original_flow.sort();
        prop_assert_eq!(flow, original_flow);

        prop_assert!(child.objectives.len() - plan.objectives.len() <= 1);
        for extra in child.objectives.iter().filter(|o| !plan.objectives.contains(o)) {
            prop_assert_eq!(extra, EXPLORATORY_OBJECTIVE);
        }
        prop_assert!(child.risks.len() - plan.risks.len() <= 1);
        for extra in child.risks.iter().filter(|r| !plan.risks.contains(r)) {
            prop_assert_eq!(extra, EXPLORATORY_RISK);
        }
        prop_assert!(child.title.trim().starts_with(plan.title.trim()));
    }

    /// A zero rate changes nothing but the metadata.
    #[test]
    fn zero_rate_is_identity(plan in arb_plan(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = mutate(&plan, 0.0, &mut rng);
        prop_assert_eq!(&child.title, &plan.title);
        prop_assert_eq!(&child.objectives, &plan.objectives);
        prop_assert_eq!(&child.flow, &plan.flow);
        prop_assert_eq!(&child.risks, &plan.risks);
    }
}
