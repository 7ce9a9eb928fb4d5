//! Data types produced by the aggregation step.

use serde::Serialize;

/// Values substituted into the README template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub total_downloads: u64,
    pub average_quality: f64,
    pub average_coverage: f64,
    pub generated_date: String,
}

/// Decides which per-package values take part in a sum.
///
/// `Truthy` drops zero, NaN and absent values alike, which is how the README
/// numbers have always been computed. `Present` keeps every value that exists,
/// zero included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContributionFilter {
    #[default]
    Truthy,
    Present,
}

impl ContributionFilter {
    pub fn count(self, value: Option<u64>) -> Option<u64> {
        match (self, value) {
            (ContributionFilter::Truthy, Some(0)) => None,
            (_, v) => v,
        }
    }

    pub fn fraction(self, value: Option<f64>) -> Option<f64> {
        match (self, value) {
            (ContributionFilter::Truthy, Some(v)) if v == 0.0 || v.is_nan() => None,
            (_, v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_drops_zero_and_nan() {
        let f = ContributionFilter::Truthy;
        assert_eq!(f.count(Some(0)), None);
        assert_eq!(f.count(Some(7)), Some(7));
        assert_eq!(f.count(None), None);
        assert_eq!(f.fraction(Some(0.0)), None);
        assert_eq!(f.fraction(Some(f64::NAN)), None);
        assert_eq!(f.fraction(Some(0.4)), Some(0.4));
    }

    #[test]
    fn test_present_keeps_zero() {
        let f = ContributionFilter::Present;
        assert_eq!(f.count(Some(0)), Some(0));
        assert_eq!(f.count(None), None);
        assert_eq!(f.fraction(Some(0.0)), Some(0.0));
        assert_eq!(f.fraction(None), None);
    }
}
