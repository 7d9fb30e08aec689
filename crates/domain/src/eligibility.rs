use serde::{Deserialize, Serialize};

/// League cap on higher-tier appearances used when no rule is configured.
pub const DEFAULT_HIGHER_APPS_LIMIT: u32 = 5;

/// League eligibility of a player for a lower-tier fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityState {
    /// Below the higher-tier appearance cap.
    Eligible,
    /// Exactly at the cap; one more higher-tier appearance breaches it.
    Risk,
    /// Over the cap; treated as graduated to the higher tier.
    Ineligible,
}

impl EligibilityState {
    /// Returns a stable storage value for this state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::Risk => "risk",
            Self::Ineligible => "ineligible",
        }
    }
}

/// Classifies a higher-tier appearance count against the league limit.
#[must_use]
pub fn classify(higher_apps: u32, limit: u32) -> EligibilityState {
    match higher_apps.cmp(&limit) {
        std::cmp::Ordering::Greater => EligibilityState::Ineligible,
        std::cmp::Ordering::Equal => EligibilityState::Risk,
        std::cmp::Ordering::Less => EligibilityState::Eligible,
    }
}
