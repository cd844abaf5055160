use keystrain::{Chart, Difficulty, GradualStrains, Note, difficulty::DifficultyValues};
use proptest::prelude::*;

fn arb_chart() -> impl Strategy<Value = Chart> {
    (1_usize..=10).prop_flat_map(|total_columns| {
        let note = (0..total_columns, 0_u32..200_000, 0_u32..8_000);

        (Just(total_columns), prop::collection::vec(note, 0..200)).prop_map(
            |(total_columns, mut raw)| {
                raw.sort_by_key(|&(_, start_time, _)| start_time);

                let notes = raw
                    .into_iter()
                    .map(|(column, start_time, duration)| {
                        Note::hold(
                            column,
                            f64::from(start_time),
                            f64::from(start_time + duration),
                        )
                    })
                    .collect();

                Chart::new(total_columns, notes).unwrap()
            },
        )
    })
}

proptest! {
    #[test]
    fn calculation_is_deterministic(chart in arb_chart()) {
        let difficulty = Difficulty::new();

        prop_assert_eq!(difficulty.calculate(&chart), difficulty.calculate(&chart));
    }

    #[test]
    fn strains_are_finite_and_non_negative(chart in arb_chart()) {
        let attrs = Difficulty::new().calculate(&chart);

        for &strain in attrs.strains.iter() {
            prop_assert!(strain.is_finite());
            prop_assert!(strain >= 0.0);
        }
    }

    #[test]
    fn peak_strain_matches_the_hardest_note(chart in arb_chart()) {
        let difficulty = Difficulty::new();

        let gradual: Vec<_> = GradualStrains::new(&difficulty, &chart).collect();

        prop_assume!(!gradual.is_empty());

        let attrs = difficulty.calculate(&chart);

        let max_summed = attrs.strains.iter().copied().fold(f64::MIN, f64::max);
        let max_gradual = gradual.iter().copied().fold(f64::MIN, f64::max);

        // Sections track the peak combined strain of a single note, never
        // a cumulative sum across the section.
        prop_assert!((max_summed - max_gradual).abs() < 1e-9);
    }

    #[test]
    fn longer_gaps_decay_harder(gap in 2.0_f64..4_000.0, extra in 1.0_f64..1_000.0) {
        let strain_after = |gap: f64| {
            let chart = Chart::new(4, vec![Note::tap(0, 0.0), Note::tap(0, gap)]).unwrap();

            GradualStrains::new(&Difficulty::new(), &chart)
                .last()
                .unwrap()
        };

        prop_assert!(strain_after(gap) > strain_after(gap + extra));
    }

    #[test]
    fn chord_members_share_their_bitmap(chart in arb_chart()) {
        let objects = DifficultyValues::create_difficulty_objects(1.0, chart.notes());

        for pair in objects.windows(2) {
            if pair[0].start_time == pair[1].start_time {
                prop_assert_eq!(
                    pair[0].chord_bitmap(chart.total_columns(), &objects),
                    pair[1].chord_bitmap(chart.total_columns(), &objects)
                );
            }
        }
    }
}
