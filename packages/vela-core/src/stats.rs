//! Scalar and rolling statistics over return series.
//!
//! Conventions, fixed once for the whole crate: scalar and rolling standard
//! deviations use the sample (N-1) denominator; the normal-fit sigma uses
//! the population (N) denominator, as a maximum-likelihood fit does;
//! percentiles interpolate linearly between order statistics. Degenerate
//! inputs (too few observations, zero variance) yield NaN, never a
//! substituted zero.

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 denominator). NaN for fewer than 2 values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Population standard deviation (N denominator). NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (ss / values.len() as f64).sqrt()
}

/// Bias-corrected sample skewness (adjusted Fisher-Pearson).
///
/// NaN for fewer than 3 observations or a zero-variance sample.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m = mean(values);
    let m2: f64 = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / nf;
    let m3: f64 = values.iter().map(|x| (x - m).powi(3)).sum::<f64>() / nf;
    let g1 = m3 / m2.powf(1.5);
    (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * g1
}

/// Bias-corrected sample excess kurtosis.
///
/// NaN for fewer than 4 observations or a zero-variance sample.
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m = mean(values);
    let m2: f64 = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / nf;
    let m4: f64 = values.iter().map(|x| (x - m).powi(4)).sum::<f64>() / nf;
    let g2 = m4 / (m2 * m2) - 3.0;
    (nf - 1.0) / ((nf - 2.0) * (nf - 3.0)) * ((nf + 1.0) * g2 + 6.0)
}

/// Percentile with linear interpolation between order statistics.
///
/// `pct` is on the 0-100 scale; `pct = 0` returns the minimum observation
/// and `pct = 100` the maximum. NaN for an empty slice.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi || hi >= sorted.len() {
        sorted[lo.min(sorted.len() - 1)]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Inverse cumulative distribution function for the standard normal
/// distribution.
///
/// Uses Acklam's rational approximation, accurate to about 1.15e-9 over
/// the whole open interval (0, 1).
pub fn norm_ppf(p: f64) -> f64 {
    // Coefficients in rational approximations
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];

    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];

    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];

    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    // Break-points between the tail and central approximations
    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Rolling sample standard deviation over a trailing window.
///
/// Position `i` covers the `window` observations ending at `i` inclusive;
/// the first `window - 1` positions are `None`.
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if window == 0 || window > n {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        result[i] = Some(sample_std(slice));
    }

    result
}

/// Rolling mean over a trailing window of optional values.
///
/// Position `i` is defined only when all `window` trailing values are
/// defined, so warm-up gaps in the input push the output's own warm-up out.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if window == 0 || window > n {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_some()) {
            let sum: f64 = slice.iter().flatten().sum();
            result[i] = Some(sum / window as f64);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_stds() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&values), 3.0);
        // Sample variance of 1..5 is 2.5; population variance is 2.0.
        assert_relative_eq!(sample_std(&values), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(population_std(&values), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_std_degenerate_inputs() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
        assert_eq!(sample_std(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_skewness_known_value() {
        // An indicator sample {0,0,0,1} has adjusted skewness exactly 2.
        let values = vec![0.0, 0.0, 0.0, 1.0];
        assert_relative_eq!(skewness(&values), 2.0, epsilon = 1e-12);
        // Symmetric data has zero skew.
        assert_relative_eq!(skewness(&[1.0, 2.0, 3.0]), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kurtosis_known_value() {
        // Same indicator sample: bias-corrected excess kurtosis is exactly 4.
        let values = vec![0.0, 0.0, 0.0, 1.0];
        assert_relative_eq!(excess_kurtosis(&values), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_moments_degenerate_inputs() {
        assert!(skewness(&[1.0, 2.0]).is_nan());
        assert!(excess_kurtosis(&[1.0, 2.0, 3.0]).is_nan());
        // Zero variance: 0/0 inside the moment ratio
        assert!(skewness(&[5.0, 5.0, 5.0]).is_nan());
        assert!(excess_kurtosis(&[5.0, 5.0, 5.0, 5.0]).is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = vec![-5.0, -4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];
        // index 0.05 * 9 = 0.45, between -5 and -4
        assert_relative_eq!(percentile(&values, 5.0), -4.55, epsilon = 1e-12);
        assert_relative_eq!(percentile(&values, 0.0), -5.0);
        assert_relative_eq!(percentile(&values, 100.0), 4.0);
        assert_relative_eq!(percentile(&values, 50.0), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let values = vec![4.0, -5.0, 2.0, -3.0, 0.0];
        assert_relative_eq!(percentile(&values, 0.0), -5.0);
        assert_relative_eq!(percentile(&values, 100.0), 4.0);
    }

    #[test]
    fn test_norm_ppf_spot_values() {
        assert!(norm_ppf(0.5).abs() < 1e-9);
        assert!((norm_ppf(0.05) + 1.6448536).abs() < 1e-6);
        assert!((norm_ppf(0.01) + 2.3263479).abs() < 1e-6);
        assert!((norm_ppf(0.003) + 2.7477814).abs() < 1e-6);
        // Symmetry
        assert!((norm_ppf(0.95) - 1.6448536).abs() < 1e-6);
        // Edge cases
        assert!(norm_ppf(0.0).is_infinite() && norm_ppf(0.0) < 0.0);
        assert!(norm_ppf(1.0).is_infinite() && norm_ppf(1.0) > 0.0);
    }

    #[test]
    fn test_rolling_sample_std() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let rolled = rolling_sample_std(&values, 3);
        assert_eq!(rolled[0], None);
        assert_eq!(rolled[1], None);
        assert_relative_eq!(rolled[2].unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(rolled[3].unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_window_larger_than_data() {
        let values = vec![1.0, 2.0];
        assert!(rolling_sample_std(&values, 5).iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_rolling_mean_respects_input_gaps() {
        let values = vec![None, Some(2.0), Some(4.0), Some(6.0)];
        let rolled = rolling_mean(&values, 2);
        assert_eq!(rolled[0], None);
        // Window [None, Some] stays undefined.
        assert_eq!(rolled[1], None);
        assert_relative_eq!(rolled[2].unwrap(), 3.0);
        assert_relative_eq!(rolled[3].unwrap(), 5.0);
    }
}
