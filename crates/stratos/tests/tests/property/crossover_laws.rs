//! Property tests: crossover keeps module provenance, flow consistency and
//! deduplicated fields.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stratos_genome::{crossover, dedup_strings, merge_strings, PLACEHOLDER_MODULE};
use stratos_tests::{arb_plan, arb_strings};
use stratos_types::{GenomeOp, PlanRecord};

fn has_duplicates(items: &[String]) -> bool {
    let mut seen = HashSet::new();
    !items.iter().all(|item| seen.insert(item))
}

fn parent_names<'a>(a: &'a PlanRecord, b: &'a PlanRecord) -> HashSet<&'a str> {
    a.module_names().into_iter().chain(b.module_names()).collect()
}

proptest! {
    /// Every child module name comes from a parent, or is the placeholder.
    #[test]
    fn module_names_come_from_parents(a in arb_plan(), b in arb_plan(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = crossover(&a, &b, &mut rng);
        let names = parent_names(&a, &b);

        prop_assert!(!child.modules.is_empty());
        for name in child.module_names() {
            prop_assert!(names.contains(name) || name == PLACEHOLDER_MODULE);
        }
    }

    /// Named modules are unique within a child.
    #[test]
    fn module_names_are_unique(a in arb_plan(), b in arb_plan(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = crossover(&a, &b, &mut rng);
        let names: Vec<String> = child.module_names().into_iter().map(String::from).collect();
        prop_assert!(!has_duplicates(&names));
    }

    /// Every flow step names a child module.
    #[test]
    fn flow_is_consistent(a in arb_plan(), b in arb_plan(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = crossover(&a, &b, &mut rng);
        prop_assert!(child.flow_is_consistent());
    }

    /// String fields carry no duplicates and draw only from the parents.
    #[test]
    fn string_fields_are_deduplicated(a in arb_plan(), b in arb_plan(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = crossover(&a, &b, &mut rng);

        prop_assert!(!has_duplicates(&child.objectives));
        prop_assert!(!has_duplicates(&child.risks));
        prop_assert!(!has_duplicates(&child.flow));
        for objective in &child.objectives {
            prop_assert!(a.objectives.contains(objective) || b.objectives.contains(objective));
        }
        prop_assert_eq!(child.meta.genome_op, Some(GenomeOp::Crossover));
        prop_assert_eq!(child.meta.parents.len(), 2);
    }

    /// Deduplication is idempotent and keeps first occurrences in order.
    #[test]
    fn dedup_law(items in arb_strings(12)) {
        let once = dedup_strings(&items);
        prop_assert_eq!(dedup_strings(&once), once.clone());

        let mut expected: Vec<String> = Vec::new();
        for item in &items {
            if !expected.contains(item) {
                expected.push(item.clone());
            }
        }
        prop_assert_eq!(once, expected);
    }

    /// A merge is a duplicate-free subset of its inputs.
    #[test]
    fn merge_is_subset(x in arb_strings(8), y in arb_strings(8), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let merged = merge_strings(&x, &y, &mut rng);
        prop_assert!(!has_duplicates(&merged));
        prop_assert!(merged.iter().all(|s| x.contains(s) || y.contains(s)));
    }
}
