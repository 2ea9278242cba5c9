//! Property tests for the exhaustive-search generators.
//!
//! The engines trust three things about a generator: it visits the whole
//! space, it never visits a configuration twice, and its visit count matches
//! the closed form the count self-checks compare against.  These tests pin
//! all three on randomly sized spaces small enough to enumerate fully.

use std::collections::HashSet;
use std::convert::Infallible;

use proptest::prelude::*;

use dualprio::search::enumerate::{
    falling_factorial, for_each_combination, for_each_permutation, for_each_tuple, tuple_count,
    Step,
};
use dualprio::task::Time;

fn binomial(pool: usize, k: usize) -> u128 {
    falling_factorial(pool, k).unwrap() / falling_factorial(k, k).unwrap()
}

proptest! {
    #[test]
    fn tuple_walk_matches_the_closed_form(
        bounds in prop::collection::vec(0u64..=4, 0..=4),
    ) {
        let mut order = Vec::new();
        let walk = for_each_tuple(&bounds, &mut |tuple: &[Time]| -> Result<Step, Infallible> {
            order.push(tuple.to_vec());
            Ok(Step::Continue)
        })
        .unwrap();

        let expected = tuple_count(&bounds).unwrap();
        prop_assert!(walk.completed);
        prop_assert_eq!(walk.visited, expected);

        let distinct: HashSet<_> = order.iter().cloned().collect();
        prop_assert_eq!(distinct.len() as u128, expected);

        let mut sorted = order.clone();
        sorted.sort();
        prop_assert_eq!(order, sorted);
    }

    #[test]
    fn tuple_walk_early_stop_reports_partial_progress(
        bounds in prop::collection::vec(0u64..=3, 1..=3),
        stop_after in 1u128..=80,
    ) {
        let total = tuple_count(&bounds).unwrap();
        let mut count = 0u128;
        let walk = for_each_tuple(&bounds, &mut |_: &[Time]| -> Result<Step, Infallible> {
            count += 1;
            Ok(if count == stop_after { Step::Done } else { Step::Continue })
        })
        .unwrap();

        prop_assert_eq!(walk.visited, total.min(stop_after));
        prop_assert_eq!(walk.completed, stop_after > total);
    }

    #[test]
    fn permutation_walk_is_a_bijection_over_the_slice(n in 0usize..=5) {
        let values: Vec<u32> = (0..n as u32).collect();
        let mut perms = Vec::new();
        let walk = for_each_permutation(&values, &mut |perm: &[u32]| -> Result<Step, Infallible> {
            perms.push(perm.to_vec());
            Ok(Step::Continue)
        })
        .unwrap();

        let expected = falling_factorial(n, n).unwrap();
        prop_assert!(walk.completed);
        prop_assert_eq!(walk.visited, expected);

        let distinct: HashSet<_> = perms.iter().cloned().collect();
        prop_assert_eq!(distinct.len() as u128, expected);
        for perm in &perms {
            let mut sorted = perm.clone();
            sorted.sort_unstable();
            prop_assert_eq!(&sorted, &values);
        }
    }

    #[test]
    fn combination_walk_yields_every_increasing_subset(
        (pool, k) in (0usize..=7).prop_flat_map(|pool| (Just(pool), 0..=pool)),
    ) {
        let mut combos = Vec::new();
        let walk = for_each_combination(k, pool, &mut |combo: &[u32]| -> Result<Step, Infallible> {
            combos.push(combo.to_vec());
            Ok(Step::Continue)
        })
        .unwrap();

        let expected = binomial(pool, k);
        prop_assert!(walk.completed);
        prop_assert_eq!(walk.visited, expected);

        let distinct: HashSet<_> = combos.iter().cloned().collect();
        prop_assert_eq!(distinct.len() as u128, expected);
        for combo in &combos {
            prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(combo.iter().all(|&v| (v as usize) < pool));
        }
    }
}
