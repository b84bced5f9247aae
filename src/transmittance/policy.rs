//! Policy for the "pre-rain day" transmittance rule.

use serde::{Deserialize, Serialize};

/// Decides whether a dry day is darkened because rain is imminent.
///
/// SolarCalc documents the rule as "a dry day followed by a rainy day", but
/// the exact neighbor it should inspect has never been confirmed by the
/// authors of the method. The rule is therefore kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PreRainPolicy {
    /// A dry day is a pre-rain day when the next day is rainy.
    #[default]
    NextDay,
    /// Never apply the pre-rain rule.
    Disabled,
}

impl PreRainPolicy {
    /// Applies the policy to a dry or rainy day given its successor's rain flag.
    ///
    /// `next_rainy` is `None` for the last day of a series, which never
    /// qualifies as a pre-rain day.
    pub fn is_pre_rain(&self, rainy: bool, next_rainy: Option<bool>) -> bool {
        match self {
            PreRainPolicy::NextDay => !rainy && next_rainy.unwrap_or(false),
            PreRainPolicy::Disabled => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_day_policy() {
        let policy = PreRainPolicy::NextDay;
        assert!(policy.is_pre_rain(false, Some(true)));
        assert!(!policy.is_pre_rain(true, Some(true)));
        assert!(!policy.is_pre_rain(false, Some(false)));
        assert!(!policy.is_pre_rain(false, None));
    }

    #[test]
    fn test_disabled_policy_never_fires() {
        let policy = PreRainPolicy::Disabled;
        assert!(!policy.is_pre_rain(false, Some(true)));
        assert!(!policy.is_pre_rain(false, None));
    }

    #[test]
    fn test_default_is_next_day() {
        assert_eq!(PreRainPolicy::default(), PreRainPolicy::NextDay);
    }
}
