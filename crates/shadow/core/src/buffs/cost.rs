//! Stack pricing.
//!
//! The first copy of a buff costs its base price; the k-th copy (k ≥ 2) costs
//! `round(base × (1 + 0.5 × (k − 1)²))`. Each step is rounded on its own before
//! being summed, so [`cumulative_cost`] is a loop and not a closed form.

/// Cost of the `stack_index`-th copy (1-based). Index 0 costs nothing.
pub fn incremental_cost(base: u32, stack_index: u32) -> u64 {
    match stack_index {
        0 => 0,
        1 => base as u64,
        k => {
            let step = (k - 1) as f64;
            (base as f64 * (1.0 + 0.5 * step * step)).round() as u64
        }
    }
}

/// Total cost of holding `count` copies.
pub fn cumulative_cost(base: u32, count: u32) -> u64 {
    (1..=count).fold(0u64, |total, index| {
        total.saturating_add(incremental_cost(base, index))
    })
}

/// Cost of buying one more copy on top of `current_count`.
pub fn next_cost(base: u32, current_count: u32) -> u64 {
    incremental_cost(base, current_count.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_ten_schedule() {
        let steps: Vec<u64> = (1..=4).map(|k| incremental_cost(10, k)).collect();
        assert_eq!(steps, vec![10, 15, 30, 55]);
        assert_eq!(cumulative_cost(10, 4), 110);
    }

    #[test]
    fn zero_and_one_copies() {
        assert_eq!(cumulative_cost(25, 0), 0);
        assert_eq!(cumulative_cost(25, 1), 25);
        assert_eq!(next_cost(25, 0), 25);
    }

    #[test]
    fn cumulative_is_running_sum_of_increments() {
        for base in [1, 7, 8, 14, 35] {
            for n in 1..=12 {
                assert_eq!(
                    cumulative_cost(base, n),
                    cumulative_cost(base, n - 1) + incremental_cost(base, n)
                );
                assert!(cumulative_cost(base, n) > cumulative_cost(base, n - 1));
            }
        }
    }

    #[test]
    fn each_step_rounds_independently() {
        // base 7: 7, round(10.5)=11, round(21)=21, round(38.5)=39
        assert_eq!(incremental_cost(7, 2), 11);
        assert_eq!(incremental_cost(7, 4), 39);
        assert_eq!(cumulative_cost(7, 4), 7 + 11 + 21 + 39);
    }
}
