//! Basic descriptive statistics over slices of doubles.
//!
//! Every helper returns `None` when the statistic is undefined for the input
//! length rather than a sentinel value; callers decide how to surface that.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator). `None` for fewer than two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_of_squares: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some(sum_of_squares / (values.len() - 1) as f64)
}

/// Sample standard deviation. `None` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Median, averaging the two middle order statistics for even-length input.
/// `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_of_empty_is_undefined() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_averages_values() {
        assert!(approx_eq(mean(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap(), 5.0));
    }

    #[test]
    fn sample_std_dev_uses_n_minus_one() {
        // Squared deviations from the mean of 5 sum to 32; 32 / 7 gives the
        // sample variance.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx_eq(sample_variance(&values).unwrap(), 32.0 / 7.0));
        assert!(approx_eq(
            sample_std_dev(&values).unwrap(),
            (32.0f64 / 7.0).sqrt()
        ));
    }

    #[test]
    fn sample_std_dev_of_single_value_is_undefined() {
        assert_eq!(sample_std_dev(&[3.0]), None);
    }

    #[test]
    fn median_of_odd_length_is_middle_order_statistic() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
    }

    #[test]
    fn median_of_even_length_averages_middle_pair() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn median_of_empty_is_undefined() {
        assert_eq!(median(&[]), None);
    }
}
