//! University vs non-university town hypothesis test.
//!
//! Price ratios are split by university-town membership and compared with a
//! two-sided, equal-variance Student's t-test.

use recession_core::{Error, PriceRatio, Result, TestOutcome, TownGroup, UniversityTownSet};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;
use tracing::info;

/// p-values strictly below this reject the null hypothesis.
pub const SIGNIFICANCE_LEVEL: f64 = 0.01;

/// Whether a p-value rejects the null hypothesis.
#[inline]
pub fn is_significant(p_value: f64) -> bool {
    p_value < SIGNIFICANCE_LEVEL
}

/// Two-sample Student's t-test result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    /// t statistic of `a` relative to `b`.
    pub statistic: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Equal-variance two-sample t-test.
///
/// With zero pooled variance the statistic is infinite (p = 0) when the
/// means differ and undefined (p = NaN) when they are equal.
pub fn student_t_test(a: &[f64], b: &[f64]) -> Result<TTest> {
    let (n_a, n_b) = (a.len(), b.len());
    if n_a + n_b <= 2 {
        return Err(Error::insufficient_data(format!(
            "t-test needs more than two observations, got {} and {}",
            n_a, n_b
        )));
    }

    let mean_a = a.iter().mean();
    let mean_b = b.iter().mean();
    let df = (n_a + n_b - 2) as f64;
    let pooled_var = (sum_sq_dev(a) + sum_sq_dev(b)) / df;
    let std_err = (pooled_var * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
    let diff = mean_a - mean_b;

    if std_err == 0.0 {
        let (statistic, p_value) = if diff == 0.0 {
            (f64::NAN, f64::NAN)
        } else {
            (diff.signum() * f64::INFINITY, 0.0)
        };
        return Ok(TTest { statistic, df, p_value });
    }

    let statistic = diff / std_err;
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::statistics(e.to_string()))?;
    // Upper tail directly; 1 - cdf cancels to zero for large |t|
    let p_value = (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0);

    Ok(TTest { statistic, df, p_value })
}

/// Sum of squared deviations from the mean.
fn sum_sq_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().variance() * (values.len() - 1) as f64
}

/// Compare price ratios of university towns against all other regions.
///
/// Fails with [`Error::EmptyGroup`] if either group has no members.
pub fn run_hypothesis_test(ratios: &[PriceRatio], towns: &UniversityTownSet) -> Result<TestOutcome> {
    let (university, other): (Vec<&PriceRatio>, Vec<&PriceRatio>) = ratios
        .iter()
        .partition(|r| towns.contains(&r.state, &r.region));

    if university.is_empty() {
        return Err(Error::EmptyGroup(TownGroup::University));
    }
    if other.is_empty() {
        return Err(Error::EmptyGroup(TownGroup::NonUniversity));
    }

    let university: Vec<f64> = university.iter().map(|r| r.ratio).collect();
    let other: Vec<f64> = other.iter().map(|r| r.ratio).collect();

    let test = student_t_test(&university, &other)?;

    // Lower ratio means a smaller loss from pre-recession to bottom
    let better = if university.iter().mean() < other.iter().mean() {
        TownGroup::University
    } else {
        TownGroup::NonUniversity
    };

    let outcome = TestOutcome {
        different: is_significant(test.p_value),
        p_value: test.p_value,
        better,
    };
    info!(
        university = university.len(),
        non_university = other.len(),
        t = test.statistic,
        p = outcome.p_value,
        different = outcome.different,
        better = %outcome.better,
        "Hypothesis test complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn make_ratios(prefix: &str, values: &[f64]) -> Vec<PriceRatio> {
        values
            .iter()
            .enumerate()
            .map(|(i, &ratio)| PriceRatio {
                state: "ST".to_string(),
                region: format!("{}{}", prefix, i),
                ratio,
            })
            .collect()
    }

    fn make_towns(prefix: &str, count: usize) -> UniversityTownSet {
        (0..count).map(|i| ("ST", format!("{}{}", prefix, i))).collect()
    }

    #[test]
    fn test_t_test_known_value() {
        // scipy.stats.ttest_ind([1, 2, 3], [4, 5, 6])
        let test = student_t_test(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_relative_eq!(test.statistic, -3.674234614174767, epsilon = 1e-9);
        assert_relative_eq!(test.df, 4.0);
        assert_abs_diff_eq!(test.p_value, 0.021311641128756723, epsilon = 1e-6);
    }

    #[test]
    fn test_t_test_small_groups_p_value() {
        // scipy.stats.ttest_ind([0.9, 0.95, 0.92], [1.0, 1.05, 1.02])
        let test = student_t_test(&[0.9, 0.95, 0.92], &[1.0, 1.05, 1.02]).unwrap();
        assert_relative_eq!(test.statistic, -4.866642633922871, epsilon = 1e-9);
        assert_relative_eq!(test.p_value, 0.00823964274227481, max_relative = 1e-6);
    }

    #[test]
    fn test_t_test_moderate_tail_p_value() {
        // scipy.stats.ttest_ind([0, 1, 2, 1, 0, 1], [5, 6, 5, 4, 5, 6])
        let test = student_t_test(&[0.0, 1.0, 2.0, 1.0, 0.0, 1.0], &[5.0, 6.0, 5.0, 4.0, 5.0, 6.0]).unwrap();
        assert_relative_eq!(test.statistic, -9.970544855015817, epsilon = 1e-9);
        assert_relative_eq!(test.p_value, 1.633106264839074e-6, max_relative = 1e-6);
    }

    #[test]
    fn test_t_test_far_tail_p_value() {
        // Tight groups far apart: p is far below f64 epsilon but not zero.
        // scipy.stats.ttest_ind gives t = -624.4997998398316, p = 4.912763308241999e-146
        let a: Vec<f64> = (0..40).map(|i| 0.9 + 0.0005 * (i % 5) as f64).collect();
        let b: Vec<f64> = (0..40).map(|i| 1.0 + 0.0005 * (i % 5) as f64).collect();
        let test = student_t_test(&a, &b).unwrap();

        assert_relative_eq!(test.statistic, -624.4997998398316, max_relative = 1e-9);
        assert!(test.p_value > 0.0);
        assert_relative_eq!(test.p_value, 4.912763308241999e-146, max_relative = 1e-4);
    }

    #[test]
    fn test_t_test_symmetric() {
        let ab = student_t_test(&[1.0, 2.5, 3.0], &[4.0, 5.0, 6.5, 7.0]).unwrap();
        let ba = student_t_test(&[4.0, 5.0, 6.5, 7.0], &[1.0, 2.5, 3.0]).unwrap();
        assert_relative_eq!(ab.statistic, -ba.statistic);
        assert_relative_eq!(ab.p_value, ba.p_value);
    }

    #[test]
    fn test_t_test_single_observation_group() {
        // One group of size one contributes no variance
        let test = student_t_test(&[10.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_relative_eq!(test.df, 2.0);
        assert!(test.p_value > 0.0 && test.p_value < 0.05);
    }

    #[test]
    fn test_t_test_zero_variance() {
        let equal = student_t_test(&[1.0, 1.0], &[1.0, 1.0]).unwrap();
        assert!(equal.p_value.is_nan());

        let apart = student_t_test(&[1.0, 1.0], &[2.0, 2.0]).unwrap();
        assert_eq!(apart.p_value, 0.0);
        assert!(apart.statistic.is_infinite() && apart.statistic < 0.0);
    }

    #[test]
    fn test_t_test_too_few_observations() {
        assert!(matches!(
            student_t_test(&[1.0], &[2.0]),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_significance_threshold() {
        assert!(is_significant(0.0099));
        assert!(!is_significant(0.01));
        assert!(!is_significant(0.2));
        assert!(!is_significant(f64::NAN));
    }

    #[test]
    fn test_separated_groups() {
        let mut ratios = make_ratios("uni", &[0.9, 0.95, 0.92]);
        ratios.extend(make_ratios("town", &[1.0, 1.05, 1.02]));
        let towns = make_towns("uni", 3);

        let outcome = run_hypothesis_test(&ratios, &towns).unwrap();

        assert!(outcome.p_value < SIGNIFICANCE_LEVEL);
        assert!(outcome.different);
        assert_eq!(outcome.better, TownGroup::University);
    }

    #[test]
    fn test_overlapping_groups() {
        let mut ratios = make_ratios("uni", &[1.0, 1.2, 0.9, 1.1]);
        ratios.extend(make_ratios("town", &[1.05, 0.95, 1.15, 0.98]));
        let towns = make_towns("uni", 4);

        let outcome = run_hypothesis_test(&ratios, &towns).unwrap();

        assert!(!outcome.different);
        assert!(outcome.p_value > 0.5);
        // Means 1.05 vs 1.0325
        assert_eq!(outcome.better, TownGroup::NonUniversity);
    }

    #[test]
    fn test_membership_uses_state_and_region() {
        let mut ratios = make_ratios("uni", &[0.9, 0.95, 0.92]);
        ratios.extend(make_ratios("town", &[1.0, 1.05, 1.02]));
        // Same region names in another state are not university towns
        let towns: UniversityTownSet = (0..3).map(|i| ("XX", format!("uni{}", i))).collect();

        assert!(matches!(
            run_hypothesis_test(&ratios, &towns),
            Err(Error::EmptyGroup(TownGroup::University))
        ));
    }

    #[test]
    fn test_empty_non_university_group() {
        let ratios = make_ratios("uni", &[0.9, 0.95]);
        let towns = make_towns("uni", 2);

        assert!(matches!(
            run_hypothesis_test(&ratios, &towns),
            Err(Error::EmptyGroup(TownGroup::NonUniversity))
        ));
    }

    #[test]
    fn test_equal_means_favor_non_university() {
        let mut ratios = make_ratios("uni", &[1.0, 2.0]);
        ratios.extend(make_ratios("town", &[2.0, 1.0]));
        let towns = make_towns("uni", 2);

        let outcome = run_hypothesis_test(&ratios, &towns).unwrap();
        assert_eq!(outcome.better, TownGroup::NonUniversity);
        assert!(!outcome.different);
    }

    #[test]
    fn test_idempotent() {
        let mut ratios = make_ratios("uni", &[0.91, 0.97, 0.93, 1.01]);
        ratios.extend(make_ratios("town", &[1.0, 1.04, 0.99]));
        let towns = make_towns("uni", 4);

        let first = run_hypothesis_test(&ratios, &towns).unwrap();
        let second = run_hypothesis_test(&ratios, &towns).unwrap();
        assert_eq!(first.p_value.to_bits(), second.p_value.to_bits());
        assert_eq!(first, second);
    }
}
