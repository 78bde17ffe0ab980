//! Descriptive statistics helpers shared by the cleaner, the statistics
//! engine, and the KPI aggregator. All operate on `f64` and return `None`
//! when the input cannot support the computation.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (n - 1). `None` below two observations.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Percentile by linear interpolation between order statistics.
///
/// Uses the rank `h = (n - 1) * level` and interpolates between the
/// surrounding order statistics, so `[1..=10]` at level 0.9 yields 9.1.
/// Sorts a copy; the input is untouched.
pub fn percentile(values: &[f64], level: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&level) {
        return None;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let h = (sorted.len() - 1) as f64 * level;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = h - lower as f64;
    Some(sorted[lower] + weight * (sorted[upper] - sorted[lower]))
}

/// First and third quartiles, for IQR fences.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    Some((percentile(values, 0.25)?, percentile(values, 0.75)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        let var = sample_variance(&values).unwrap();
        assert!((var - 4.571428571428571).abs() < 1e-12);

        assert_eq!(mean(&[]), None);
        assert_eq!(sample_variance(&[1.0]), None);
    }

    #[test]
    fn test_percentile_reference_sample() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let p90 = percentile(&values, 0.90).unwrap();
        assert!((p90 - 9.1).abs() < 1e-12);

        let median = percentile(&values, 0.50).unwrap();
        assert!((median - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_handles_unsorted_input() {
        let values = [9.0, 1.0, 5.0, 3.0, 7.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 1.0), Some(9.0));
        assert_eq!(percentile(&values, 0.5), Some(5.0));
    }

    #[test]
    fn test_percentile_rejects_bad_input() {
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile(&[1.0], 1.5), None);
    }

    #[test]
    fn test_quartiles() {
        let values: Vec<f64> = (1..=5).map(|v| v as f64).collect();
        let (q1, q3) = quartiles(&values).unwrap();
        assert_eq!(q1, 2.0);
        assert_eq!(q3, 4.0);
    }
}
