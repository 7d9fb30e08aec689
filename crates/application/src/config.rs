use clubhouse_core::{AppError, AppResult, ClubId};
use clubhouse_domain::{DEFAULT_HIGHER_APPS_LIMIT, ViewMode};

/// Club-level runtime settings for the selection tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubSettings {
    /// Club opened by default, if pinned by the deployment.
    pub club_id: Option<ClubId>,
    /// Higher-tier appearance cap used when the league has none stored.
    pub default_higher_apps_limit: u32,
    /// View mode the selection screen opens in.
    pub default_view_mode: ViewMode,
}

impl ClubSettings {
    /// Creates validated settings; a zero default cap is rejected.
    pub fn new(
        club_id: Option<ClubId>,
        default_higher_apps_limit: u32,
        default_view_mode: ViewMode,
    ) -> AppResult<Self> {
        if default_higher_apps_limit == 0 {
            return Err(AppError::Validation(
                "default_higher_apps_limit must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            club_id,
            default_higher_apps_limit,
            default_view_mode,
        })
    }
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self {
            club_id: None,
            default_higher_apps_limit: DEFAULT_HIGHER_APPS_LIMIT,
            default_view_mode: ViewMode::Squad,
        }
    }
}
