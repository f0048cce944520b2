use crate::algorithm::{bitset::ValueBitset, state::SearchState};

/// Place `n` into `box_index` and propagate its consequences in-place
///
/// Removes the box from the eligibility set of `2n` and of every newly
/// reachable subset sum, then extends the box's closure with those sums and
/// with `n` itself. Returns the newly reachable sums (excluding `n`).
///
/// The caller is responsible for `box_index` being eligible for `n`.
pub fn place(state: &mut SearchState, n: usize, box_index: usize) -> ValueBitset {
    let bound = state.domain_bound();

    // Doubling: x and 2x never share a box
    if let Some(doubled) = n.checked_mul(2)
        && doubled <= bound
    {
        state.exclude(doubled, box_index);
    }

    let fresh = state.sums(box_index).map_or_else(
        || ValueBitset::new(bound),
        |sums| sums.shifted_difference(n),
    );

    for value in fresh.iter() {
        state.exclude(value, box_index);
    }

    if let Some(sums) = state.sums_mut(box_index) {
        sums.union_with(&fresh);
        sums.insert(n);
    }
    state.mark_occupied(box_index);

    fresh
}

/// Successor state after placing `n` into `box_index`
///
/// The input state is left untouched so sibling branches can keep using it.
#[must_use]
pub fn apply_placement(state: &SearchState, n: usize, box_index: usize) -> SearchState {
    let mut next = state.clone();
    place(&mut next, n, box_index);
    next
}

/// Successor state after placing the block `start..start + len` into `box_index`
///
/// Each value is propagated in increasing order, exactly as if it had been
/// placed by its own search step.
#[must_use]
pub fn fill_run(state: &SearchState, start: usize, len: usize, box_index: usize) -> SearchState {
    let mut next = state.clone();
    for n in start..start + len {
        place(&mut next, n, box_index);
    }
    next
}
