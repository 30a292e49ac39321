//! Trimming of the extreme samples of a group before aggregation.

/// How many samples to drop from each end of a group of `group_size`
/// samples, given the total `drop_fraction` (half of it applies to
/// each tail). The low count is taken from the full group; the high
/// count is taken from the group left after low trimming, scaled by
/// `1 / (1 - drop_fraction / 2)` so that it stays proportional to the
/// original group size. Both are floored; their sum never exceeds
/// `group_size`.
pub fn trim_counts(group_size: usize, drop_fraction: f64) -> (usize, usize) {
    if !(drop_fraction > 0.) {
        return (0, 0);
    }
    let per_tail = drop_fraction * 0.5;
    let low = ((per_tail * group_size as f64).floor() as usize).min(group_size);
    let remaining = group_size - low;
    let high = ((per_tail * remaining as f64 / (1.0 - per_tail)).floor() as usize).min(remaining);
    (low, high)
}

/// Drop the smallest and largest values of `vals` according to
/// `trim_counts`. The returned values are sorted ascending.
pub fn trim_outliers(mut vals: Vec<f64>, drop_fraction: f64) -> Vec<f64> {
    let (low, high) = trim_counts(vals.len(), drop_fraction);
    if low == 0 && high == 0 {
        return vals;
    }
    vals.sort_by(f64::total_cmp);
    let end = vals.len() - high;
    vals.truncate(end);
    vals.drain(..low);
    vals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_trim_counts() {
        assert_eq!(trim_counts(8, 0.), (0, 0));
        // per tail 0.25: low = 2 of 8, high = 0.25 * 6 / 0.75 = 2
        assert_eq!(trim_counts(8, 0.5), (2, 2));
        // low = floor(0.05 * 10) = 0, high = floor(0.05 * 10 / 0.95) = 0
        assert_eq!(trim_counts(10, 0.1), (0, 0));
        assert_eq!(trim_counts(0, 0.5), (0, 0));
        assert_eq!(trim_counts(1, 0.5), (0, 0));
    }

    #[test]
    fn t_high_tail_scaled_from_remaining() {
        // low = floor(0.495 * 2) = 0, high = floor(0.495 * 2 / 0.505) = 1
        assert_eq!(trim_counts(2, 0.99), (0, 1));
        // low = floor(0.45 * 4) = 1, high = floor(0.45 * 3 / 0.55) = 2
        assert_eq!(trim_counts(4, 0.9), (1, 2));
        assert_eq!(trim_outliers(vec![4., 1., 3., 2.], 0.9), vec![2.]);
    }

    #[test]
    fn t_trim_never_exceeds_group() {
        for n in 0..50 {
            for f in [0.01, 0.2, 0.5, 0.9, 0.99, 1.5, 2.0] {
                let (low, high) = trim_counts(n, f);
                assert!(low + high <= n, "n={n} f={f} -> {low}+{high}");
            }
        }
    }

    #[test]
    fn t_trim_outliers() {
        let vals = vec![5., 1., 100., 6., 7., 0., 8., 200.];
        assert_eq!(trim_outliers(vals, 0.5), vec![5., 6., 7., 8.]);
        let vals = vec![3., 1., 2.];
        assert_eq!(trim_outliers(vals.clone(), 0.), vals);
    }
}
