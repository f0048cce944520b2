//! Tests for counting-run thresholds, run commits and block clearance

#[cfg(test)]
mod tests {
    use sumfree_boxes::algorithm::counting::{
        CountingBox, RunClearance, counting_mask, first_allowed, restrict_initial,
        run_clearance, start_run,
    };
    use sumfree_boxes::algorithm::propagation::fill_run;
    use sumfree_boxes::algorithm::state::SearchState;

    // Tests the closed form against known run totals
    // Verified by dropping the division by two
    #[test]
    fn test_first_allowed() {
        assert_eq!(first_allowed(5), 25);
        assert_eq!(first_allowed(6), 39);
        assert_eq!(first_allowed(13), 221);
    }

    // Tests first_allowed equals the run's total minus 2c
    // Verified by using 3c + 5 in the closed form
    #[test]
    fn test_first_allowed_is_total_minus_double() {
        for start in 5..40 {
            let total: usize = (start..2 * start).sum();
            assert_eq!(first_allowed(start), total - 2 * start, "start {start}");
        }
    }

    // Tests the mask collects every counting box index
    #[test]
    fn test_counting_mask() {
        let boxes = [CountingBox::new(3), CountingBox::with_min_start(1, 9)];
        assert_eq!(counting_mask(&boxes).to_vec(), vec![1, 3]);
    }

    // Tests a start ceiling admits starts up to and including it
    // Verified by comparing with < instead of <=
    #[test]
    fn test_allows_start_ceiling() {
        let open = CountingBox::with_min_start(3, 13);
        assert!(open.allows_start(10_000));

        let capped = open.with_max_start(20);
        assert_eq!(capped.min_start, Some(13));
        assert!(capped.allows_start(20));
        assert!(!capped.allows_start(21));
    }

    // Tests no counting box may take a value below the minimum start
    // Verified by starting the initial exclusion at 5 instead of 1
    #[test]
    fn test_restrict_initial_minimum_start() {
        let mut state = SearchState::new(3, 20);
        restrict_initial(&mut state, &[CountingBox::new(2)]);

        for n in 1..5 {
            assert_eq!(state.eligible(n).to_vec(), vec![0, 1], "integer {n}");
        }
        assert!(state.eligible(5).contains(2));
    }

    // Tests an explicit threshold bars its own box below it
    // Verified by using an inclusive threshold range
    #[test]
    fn test_restrict_initial_threshold() {
        let mut state = SearchState::new(4, 48);
        restrict_initial(&mut state, &[CountingBox::with_min_start(3, 13)]);

        assert!(!state.eligible(12).contains(3));
        assert!(state.eligible(13).contains(3));
        assert!(state.eligible(12).contains(2));
    }

    // Tests a missing threshold inherits the previous counting box's
    // Verified by resetting the threshold for each box
    #[test]
    fn test_restrict_initial_inherits_threshold() {
        let mut state = SearchState::new(4, 48);
        restrict_initial(
            &mut state,
            &[CountingBox::new(3), CountingBox::with_min_start(2, 8)],
        );

        for n in 5..8 {
            assert!(!state.eligible(n).contains(2), "box 2 at {n}");
            assert!(!state.eligible(n).contains(3), "box 3 at {n}");
        }
        assert!(state.eligible(8).contains(2));
        assert!(state.eligible(8).contains(3));
    }

    // Tests a later threshold does not bar earlier counting boxes
    // Verified by excluding every counting box at each threshold
    #[test]
    fn test_restrict_initial_later_threshold_spares_earlier_box() {
        let mut state = SearchState::new(4, 48);
        restrict_initial(
            &mut state,
            &[CountingBox::new(2), CountingBox::with_min_start(3, 13)],
        );

        assert!(state.eligible(6).contains(2));
        assert!(!state.eligible(6).contains(3));
    }

    // Tests a run commit matches placing the run value by value
    // Verified by skipping the reopened first_allowed value
    #[test]
    fn test_start_run_matches_sequential_fill() {
        let state = SearchState::new(2, 40);
        let committed = start_run(&state, 5, 1);
        let filled = fill_run(&state, 5, 5, 1);

        assert_eq!(committed.sums(1), filled.sums(1));
        for n in 10..=40 {
            assert_eq!(committed.eligible(n), filled.eligible(n), "integer {n}");
        }
        assert_eq!(committed.run_start(1), Some(5));
        assert!(committed.is_occupied(1));
    }

    // Tests the closure has its closed form: gaps at 2c and first_allowed
    // Verified by inserting 2c into the closure
    #[test]
    fn test_start_run_closure() {
        let state = SearchState::new(2, 40);
        let committed = start_run(&state, 5, 0);
        let sums = committed.sums(0).unwrap();

        let mut expected: Vec<usize> = (5..=30).filter(|&n| n != 10 && n != 25).collect();
        expected.push(35);
        assert_eq!(sums.to_vec(), expected);

        assert!(committed.eligible(25).contains(0));
        assert!(!committed.eligible(24).contains(0));
        assert!(committed.eligible(31).contains(0));
        assert!(!committed.eligible(35).contains(0));
    }

    // Tests a run whose reuse point is past the domain closes the box
    // Verified by keeping the closed-form branch for every start
    #[test]
    fn test_start_run_closes_box_past_domain() {
        let state = SearchState::new(2, 20);
        let committed = start_run(&state, 5, 1);
        for n in 10..=20 {
            assert!(!committed.eligible(n).contains(1), "integer {n}");
        }
        assert!(committed.eligible(10).contains(0));
    }

    // Tests blocks of a started run are checked value by value
    // Verified by checking only the block start
    #[test]
    fn test_run_clearance() {
        let wide = start_run(&SearchState::new(2, 60), 5, 1);
        assert_eq!(run_clearance(&wide, 25, 5, 1), RunClearance::Blocked);
        assert_eq!(run_clearance(&wide, 31, 5, 1), RunClearance::Blocked);
        assert_eq!(run_clearance(&wide, 36, 5, 1), RunClearance::Clear);

        let narrow = start_run(&SearchState::new(2, 33), 5, 1);
        assert_eq!(run_clearance(&narrow, 31, 5, 1), RunClearance::Overrun);
    }
}
