//! Posterior Engine
//!
//! Bayes' rule over a fixed set of three interpretations:
//!
//! ```text
//! E      = l1*p1 + l2*p2 + l3*p3
//! post_i = (l_i * p_i) / E        if E != 0
//! post_i = 0                      if E == 0
//! ```
//!
//! Inputs are expected in [0, 1]; range enforcement happens at the input
//! boundary (see [`EventEntry::clamped`](crate::entry::EventEntry::clamped)).

/// Number of hypotheses the engine works over.
pub const HYPOTHESES: usize = 3;

/// Result of one posterior update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosteriorUpdate {
    /// Total probability of the stimulus over all interpretations
    pub evidence: f64,
    /// Posterior per interpretation, in [0, 1]
    pub posteriors: [f64; HYPOTHESES],
}

impl PosteriorUpdate {
    /// Runs Bayes' rule on three (prior, likelihood) pairs.
    pub fn compute(priors: [f64; HYPOTHESES], likelihoods: [f64; HYPOTHESES]) -> Self {
        let joint = [
            likelihoods[0] * priors[0],
            likelihoods[1] * priors[1],
            likelihoods[2] * priors[2],
        ];
        let evidence = joint[0] + joint[1] + joint[2];

        let posteriors = if evidence != 0.0 {
            [joint[0] / evidence, joint[1] / evidence, joint[2] / evidence]
        } else {
            tracing::warn!("Evidence is zero, all posteriors set to 0");
            [0.0; HYPOTHESES]
        };

        tracing::debug!(evidence, ?posteriors, "Computed posteriors");

        Self {
            evidence,
            posteriors,
        }
    }

    /// True when the evidence term is exactly zero and no normalization was
    /// possible.
    pub fn is_degenerate(&self) -> bool {
        self.evidence == 0.0
    }

    /// Posteriors scaled to percent and rounded to one decimal.
    pub fn percents(&self) -> [f64; HYPOTHESES] {
        self.posteriors.map(to_display_percent)
    }
}

/// Computes the three posteriors for the given priors and likelihoods.
///
/// Returns all zeros when the evidence term is zero.
pub fn compute_posteriors(
    priors: [f64; HYPOTHESES],
    likelihoods: [f64; HYPOTHESES],
) -> [f64; HYPOTHESES] {
    PosteriorUpdate::compute(priors, likelihoods).posteriors
}

/// Scales a probability to percent, rounded to one decimal place.
pub fn to_display_percent(probability: f64) -> f64 {
    (probability * 100.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_worked_example() {
        let update = PosteriorUpdate::compute([0.2, 0.6, 0.2], [0.1, 0.8, 0.3]);

        assert!((update.evidence - 0.56).abs() < EPS);
        assert_eq!(update.percents(), [3.6, 85.7, 10.7]);
        assert!(!update.is_degenerate());
    }

    #[test]
    fn test_posteriors_sum_to_one() {
        let values = [0.0, 0.05, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];

        for &p1 in &values {
            for &p2 in &values {
                for &l1 in &values {
                    for &l3 in &values {
                        let priors = [p1, p2, 0.3];
                        let likelihoods = [l1, 0.4, l3];
                        let post = compute_posteriors(priors, likelihoods);
                        let evidence: f64 =
                            priors.iter().zip(&likelihoods).map(|(p, l)| p * l).sum();

                        if evidence > 0.0 {
                            let total: f64 = post.iter().sum();
                            assert!(
                                (total - 1.0).abs() < EPS,
                                "priors {:?} likelihoods {:?} summed to {}",
                                priors,
                                likelihoods,
                                total
                            );
                        }
                        assert!(post.iter().all(|p| (0.0..=1.0 + EPS).contains(p)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_likelihoods() {
        let update = PosteriorUpdate::compute([0.2, 0.6, 0.2], [0.0, 0.0, 0.0]);
        assert!(update.is_degenerate());
        assert_eq!(update.posteriors, [0.0, 0.0, 0.0]);
        assert_eq!(update.percents(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_priors() {
        let post = compute_posteriors([0.0, 0.0, 0.0], [0.1, 0.8, 0.3]);
        assert_eq!(post, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_nonzero_product() {
        let post = compute_posteriors([0.5, 0.5, 0.0], [0.0, 0.3, 0.9]);
        assert_eq!(post, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_uniform_inputs() {
        let post = compute_posteriors([0.5, 0.5, 0.5], [0.5, 0.5, 0.5]);
        for p in post {
            assert!((p - 1.0 / 3.0).abs() < EPS);
        }
        assert_eq!(
            PosteriorUpdate::compute([0.5; 3], [0.5; 3]).percents(),
            [33.3, 33.3, 33.3]
        );
    }

    #[test]
    fn test_to_display_percent() {
        assert_eq!(to_display_percent(0.0), 0.0);
        assert_eq!(to_display_percent(1.0), 100.0);
        assert_eq!(to_display_percent(0.857142857), 85.7);
        assert_eq!(to_display_percent(0.0357142857), 3.6);
    }
}
