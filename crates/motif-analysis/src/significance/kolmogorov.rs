//! One-sample Kolmogorov-Smirnov goodness of fit.

use statrs::distribution::ContinuousCDF;

/// Largest distance between the empirical CDF of `values` and `cdf`.
pub fn ks_statistic(values: &[f64], cdf: impl Fn(f64) -> f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let expected = cdf(x);
            let above = (i as f64 + 1.0) / n - expected;
            let below = expected - i as f64 / n;
            above.max(below)
        })
        .fold(0.0, f64::max)
}

/// Probability of a statistic at least `d` for `n` samples, using the
/// asymptotic Kolmogorov distribution with Stephens' correction.
pub fn kolmogorov_p_value(d: f64, n: usize) -> f64 {
    if n == 0 || d <= 0.0 {
        return 1.0;
    }
    let root = (n as f64).sqrt();
    let lambda = (root + 0.12 + 0.11 / root) * d;
    1.0 - kolmogorov_cdf(lambda)
}

/// `P(K <= lambda)` of the Kolmogorov distribution.
fn kolmogorov_cdf(lambda: f64) -> f64 {
    if lambda < 0.2 {
        return 0.0;
    }
    if lambda < 1.18 {
        // Converges fast for small lambda.
        let factor = (2.0 * std::f64::consts::PI).sqrt() / lambda;
        let exponent = -std::f64::consts::PI.powi(2) / (8.0 * lambda * lambda);
        let sum: f64 = (1..=8)
            .map(|k| {
                let odd = f64::from(2 * k - 1);
                (odd * odd * exponent).exp()
            })
            .sum();
        return (factor * sum).clamp(0.0, 1.0);
    }
    let sum: f64 = (1..=100)
        .map(|k: i32| {
            let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
            let k = f64::from(k);
            sign * (-2.0 * k * k * lambda * lambda).exp()
        })
        .sum();
    (1.0 - 2.0 * sum).clamp(0.0, 1.0)
}

/// KS p-value of `values` against `distribution`.
pub fn ks_test(values: &[f64], distribution: &impl ContinuousCDF<f64, f64>) -> f64 {
    let d = ks_statistic(values, |x| distribution.cdf(x));
    kolmogorov_p_value(d, values.len())
}

#[cfg(test)]
mod tests {
    use statrs::distribution::Normal;

    use super::*;

    #[test]
    fn statistic_of_a_perfect_grid_is_half_a_step() {
        // Uniform grid at the midpoints of [0, 1].
        let values: Vec<f64> = (0..10).map(|i| (f64::from(i) + 0.5) / 10.0).collect();
        let d = ks_statistic(&values, |x| x.clamp(0.0, 1.0));
        assert!((d - 0.05).abs() < 1e-12);
    }

    #[test]
    fn kolmogorov_tail_matches_known_values() {
        // P(K > 1.3581) = 0.05 and P(K > 1.2239) = 0.10.
        assert!((1.0 - kolmogorov_cdf(1.3581) - 0.05).abs() < 1e-3);
        assert!((1.0 - kolmogorov_cdf(1.2239) - 0.10).abs() < 1e-3);
        // Both series agree where they switch.
        let below = {
            let factor = (2.0 * std::f64::consts::PI).sqrt() / 1.18;
            let exponent = -std::f64::consts::PI.powi(2) / (8.0 * 1.18 * 1.18);
            factor * (1..=8).map(|k| (f64::from((2 * k - 1) * (2 * k - 1)) * exponent).exp()).sum::<f64>()
        };
        assert!((below - kolmogorov_cdf(1.18)).abs() < 1e-6);
    }

    #[test]
    fn normal_sample_fits_and_shifted_sample_does_not() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        // Quantile grid of the standard normal.
        let fitted: Vec<f64> = (1..50)
            .map(|i| normal.inverse_cdf(f64::from(i) / 50.0))
            .collect();
        assert!(ks_test(&fitted, &normal) > 0.9);

        let shifted: Vec<f64> = fitted.iter().map(|x| x + 3.0).collect();
        assert!(ks_test(&shifted, &normal) < 1e-6);
    }

    #[test]
    fn degenerate_inputs_are_not_rejected() {
        assert_eq!(kolmogorov_p_value(0.0, 10), 1.0);
        assert_eq!(kolmogorov_p_value(0.3, 0), 1.0);
    }
}
