//! One-sided confidence bounds of the sample mean, from the Student t
//! distribution.

use statrs::distribution::{ContinuousCDF, StudentsT};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfidenceError {
    #[error("need at least 2 values for a confidence bound, got {0}")]
    TooFewValues(usize),
    #[error("confidence must be in the range (0, 1), got {0}")]
    InvalidConfidence(f64),
    #[error("invalid t distribution with {0} degrees of freedom")]
    Distribution(f64),
}

/// The level used for the lower bound ("5th Percentile" columns).
pub const P05_CONFIDENCE: f64 = 0.05;
/// The level used for the upper bound ("95th Percentile" columns).
pub const P95_CONFIDENCE: f64 = 0.95;

/// The probability at which the t distribution is evaluated for a
/// given confidence: levels up to 0.5 are the lower tail probability
/// as is, higher levels map to `0.5 + confidence / 2`.
pub fn one_sided_probability(confidence: f64) -> f64 {
    if confidence > 0.5 {
        0.5 + confidence / 2.
    } else {
        confidence
    }
}

pub fn mean(vals: &[f64]) -> f64 {
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Sample standard deviation (n - 1 denominator); NaN for fewer than
/// 2 values.
pub fn sample_std_dev(vals: &[f64]) -> f64 {
    let n = vals.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = mean(vals);
    let sum_squared_error: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_squared_error / (n - 1) as f64).sqrt()
}

/// `mean + t * sd / sqrt(n)`, with `t` the critical value of the t
/// distribution with n - 1 degrees of freedom.
pub fn confidence_interval(vals: &[f64], confidence: f64) -> Result<f64, ConfidenceError> {
    let n = vals.len();
    if n < 2 {
        return Err(ConfidenceError::TooFewValues(n));
    }
    if !(confidence > 0. && confidence < 1.) {
        return Err(ConfidenceError::InvalidConfidence(confidence));
    }
    let degrees_of_freedom = (n - 1) as f64;
    let t = StudentsT::new(0., 1., degrees_of_freedom)
        .map_err(|_| ConfidenceError::Distribution(degrees_of_freedom))?;
    let critical_value = t.inverse_cdf(one_sided_probability(confidence));
    Ok(mean(vals) + critical_value * sample_std_dev(vals) / (n as f64).sqrt())
}

pub fn p05(vals: &[f64]) -> Result<f64, ConfidenceError> {
    confidence_interval(vals, P05_CONFIDENCE)
}

pub fn p95(vals: &[f64]) -> Result<f64, ConfidenceError> {
    confidence_interval(vals, P95_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const LUINDEX: [f64; 5] = [100., 102., 98., 101., 99.];

    #[test]
    fn t_std_dev() {
        assert_abs_diff_eq!(sample_std_dev(&LUINDEX), 2.5f64.sqrt(), epsilon = 1e-12);
        assert!(sample_std_dev(&[3.]).is_nan());
    }

    #[test]
    fn t_bounds() -> Result<(), ConfidenceError> {
        // t(0.975, df=4) = 2.776445, t(0.05, df=4) = -2.131847
        let se = 2.5f64.sqrt() / 5f64.sqrt();
        assert_abs_diff_eq!(p95(&LUINDEX)?, 100. + 2.776445 * se, epsilon = 1e-4);
        assert_abs_diff_eq!(p05(&LUINDEX)?, 100. - 2.131847 * se, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn t_bounds_bracket_the_mean() -> Result<(), ConfidenceError> {
        let samples: &[&[f64]] = &[
            &[1., 2.],
            &[5., 5., 5.],
            &[0.3, 1e6, 17., -4.],
            &[90., 92., 88., 91., 89.],
        ];
        for vals in samples {
            let m = mean(vals);
            assert!(p05(vals)? <= m, "{vals:?}");
            assert!(m <= p95(vals)?, "{vals:?}");
        }
        Ok(())
    }

    #[test]
    fn t_errors() {
        assert_eq!(p05(&[]), Err(ConfidenceError::TooFewValues(0)));
        assert_eq!(p95(&[1.]), Err(ConfidenceError::TooFewValues(1)));
        assert_eq!(
            confidence_interval(&[1., 2.], 1.),
            Err(ConfidenceError::InvalidConfidence(1.))
        );
    }

    #[test]
    fn t_one_sided_probability() {
        assert_eq!(one_sided_probability(0.05), 0.05);
        assert_eq!(one_sided_probability(0.5), 0.5);
        assert_eq!(one_sided_probability(0.95), 0.975);
    }
}
