use std::fmt;

use serde::{Deserialize, Serialize};

/// Sampling granularity of a retrieved candle series.
///
/// The upstream endpoint only serves these three granularities; anything
/// finer has to come from a different data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// One candle per trading day.
    #[default]
    Daily,
    /// One candle per week.
    Weekly,
    /// One candle per month.
    Monthly,
}

impl Interval {
    /// Value the upstream form expects in its `interval_sec` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_daily() {
        assert_eq!(Interval::default(), Interval::Daily);
    }

    #[test]
    fn test_form_values_match_upstream_tokens() {
        assert_eq!(Interval::Daily.as_str(), "Daily");
        assert_eq!(Interval::Weekly.as_str(), "Weekly");
        assert_eq!(Interval::Monthly.as_str(), "Monthly");
    }
}
