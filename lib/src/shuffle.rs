use rand::Rng;

/// Returns a uniformly random permutation of `items` without mutating
/// the input (Fisher-Yates, walking from the last index down to 1).
///
/// The generator is injected so callers can substitute a seeded RNG.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut impl Rng) -> Vec<T> {
    let mut shuffled = items.to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }

    shuffled
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        let shuffled: Vec<u8> = shuffle(&[], &mut rand::thread_rng());

        assert!(shuffled.is_empty());
    }

    #[test]
    fn single_element_is_identity() {
        let shuffled = shuffle(&["only"], &mut rand::thread_rng());

        assert_eq!(shuffled, vec!["only"]);
    }

    #[test]
    fn does_not_mutate_input() {
        let items = vec![1, 2, 3, 4, 5];
        let before = items.clone();

        let _ = shuffle(&items, &mut rand::thread_rng());

        assert_eq!(items, before);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let items: Vec<u32> = (0..20).collect();

        let first = shuffle(&items, &mut StdRng::seed_from_u64(7));
        let second = shuffle(&items, &mut StdRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn output_is_a_permutation(items in proptest::collection::vec(any::<i32>(), 0..50), seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = shuffle(&items, &mut rng);

            let mut expected = items.clone();
            let mut actual = shuffled.clone();
            expected.sort_unstable();
            actual.sort_unstable();

            prop_assert_eq!(shuffled.len(), items.len());
            prop_assert_eq!(actual, expected);
        }
    }
}
