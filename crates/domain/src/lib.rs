//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod club;
mod eligibility;
mod roster;
mod security;

pub use club::{Match, MatchId, MatchStatus, Player, PlayerId, TeamId};
pub use eligibility::{DEFAULT_HIGHER_APPS_LIMIT, EligibilityState, classify};
pub use roster::{
    AppearanceKind, AppearanceRecord, AvailabilityMap, AvailabilityRecord, AvailabilityStatus,
    HigherAppsMap, Position, RosterCandidate, RosterInputs, RosterQuery, SelectionMap, ViewMode,
    build_roster, filter_players, project_candidates, sort_candidates,
};
pub use security::{
    Action, PermissionSummary, RoleAssignment, RoleName, RoleSet, Screen, ScreenAccess, can,
};
