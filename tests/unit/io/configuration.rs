//! Tests for configuration constants and their relationships

#[cfg(test)]
mod tests {
    use sumfree_boxes::algorithm::executor::default_domain_bound;
    use sumfree_boxes::io::configuration::{
        COUNTING_MIN_START, DEFAULT_BOX_COUNT, DEFAULT_STACK_MIB, MAX_BOXES, MAX_DOMAIN_BOUND,
        PROGRESS_TICK_INTERVAL,
    };

    // Tests box sets fit in one machine word
    #[test]
    fn test_max_boxes_matches_word() {
        assert_eq!(MAX_BOXES, u64::BITS as usize);
    }

    // Tests the default box count has an accepted default bound
    // Verified by raising the default box count past the bound limit
    #[test]
    fn test_default_box_count_bound() {
        let bound = default_domain_bound(DEFAULT_BOX_COUNT).unwrap();
        assert!(bound <= MAX_DOMAIN_BOUND);
        assert_eq!(bound, 48);
    }

    // Tests the counting closed form is only used from a start above 4
    #[test]
    fn test_counting_min_start() {
        assert_eq!(COUNTING_MIN_START, 5);
    }

    // Tests runtime defaults are positive
    #[test]
    fn test_runtime_defaults_positive() {
        assert!(DEFAULT_STACK_MIB > 0);
        assert!(PROGRESS_TICK_INTERVAL.is_power_of_two());
    }
}
