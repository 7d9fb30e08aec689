//! Matchday roster projection.
//!
//! Turns the club's player list plus the selection, availability and
//! higher-tier appearance data for one fixture into the ordered candidate list
//! shown on the selection screen. Everything here is pure; fetching the
//! inputs is the application layer's job.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use clubhouse_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{EligibilityState, Match, MatchId, Player, PlayerId, classify};

/// Current selections for a fixture; `None` means selected without a position.
pub type SelectionMap = HashMap<PlayerId, Option<Position>>;

/// Availability replies for a fixture.
pub type AvailabilityMap = HashMap<PlayerId, AvailabilityRecord>;

/// Higher-tier appearance counts by player.
pub type HigherAppsMap = HashMap<PlayerId, u32>;

/// Playing position label on the team sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(NonEmptyString);

impl Position {
    /// Label used for selected players without an assigned position.
    pub const SUBSTITUTE: &'static str = "SUB";

    /// Creates a validated position label.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        NonEmptyString::new(value.trim()).map(Self)
    }

    /// Returns the substitute position.
    #[must_use]
    pub fn substitute() -> Self {
        Self(NonEmptyString::from_static(Self::SUBSTITUTE))
    }

    /// Reads an optional stored label; blank labels count as unset.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Option<Self> {
        value.and_then(|label| Self::new(label).ok())
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the substitute label.
    #[must_use]
    pub fn is_substitute(&self) -> bool {
        self.as_str() == Self::SUBSTITUTE
    }
}

impl Display for Position {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A player's reply to a fixture availability request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Confirmed available.
    Available,
    /// Confirmed unavailable.
    Unavailable,
    /// No reply recorded.
    Unknown,
    /// Any other status the store records.
    Other(String),
}

impl AvailabilityStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Unknown => "Unknown",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a stored status; unrecognised values are kept verbatim.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "Available" => Self::Available,
            "Unavailable" => Self::Unavailable,
            "Unknown" | "" => Self::Unknown,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns whether the player has said they cannot play.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Stored availability reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Reply status.
    pub status: AvailabilityStatus,
    /// Optional free-text note from the family.
    pub note: Option<String>,
}

/// Kind of appearance written when a player is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceKind {
    /// Named on the matchday team sheet.
    Start,
}

impl AppearanceKind {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "Start",
        }
    }
}

/// Appearance row owned by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceRecord {
    /// Fixture the player is selected for.
    pub match_id: MatchId,
    /// Selected player.
    pub player_id: PlayerId,
    /// Appearance kind.
    pub kind: AppearanceKind,
    /// Team sheet position.
    pub position: Position,
}

/// Which players the roster offers when no search is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Members of the fixture's team plus anyone already selected.
    #[default]
    Squad,
    /// Every club player.
    All,
}

impl ViewMode {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squad => "squad",
            Self::All => "all",
        }
    }
}

impl FromStr for ViewMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "squad" => Ok(Self::Squad),
            "all" => Ok(Self::All),
            _ => Err(AppError::Validation(format!(
                "unknown roster view mode '{value}'"
            ))),
        }
    }
}

/// Roster filter parameters chosen on the selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterQuery {
    /// View mode applied when not searching.
    pub view_mode: ViewMode,
    /// Free-text name search.
    pub search: Option<String>,
}

impl RosterQuery {
    /// Creates a query for a view mode without a search.
    #[must_use]
    pub fn view(view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            search: None,
        }
    }

    /// Creates a name search.
    #[must_use]
    pub fn search(view_mode: ViewMode, term: impl Into<String>) -> Self {
        Self {
            view_mode,
            search: Some(term.into()),
        }
    }

    /// Returns the trimmed, lower-cased search term.
    ///
    /// A whitespace-only search counts as absent and falls back to the view
    /// filter, rather than acting as a search that matches nobody.
    #[must_use]
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Annotated player row on the selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCandidate {
    player: Player,
    is_selected: bool,
    position: Option<Position>,
    higher_apps: u32,
    compliance_status: EligibilityState,
    availability: AvailabilityStatus,
    availability_note: Option<String>,
}

impl RosterCandidate {
    /// Returns the underlying player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the player identifier.
    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player.id()
    }

    /// Returns whether the player is on the team sheet.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Returns the team sheet position; `None` when not selected.
    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Returns prior appearances for higher-tier squads.
    #[must_use]
    pub fn higher_apps(&self) -> u32 {
        self.higher_apps
    }

    /// Returns the league eligibility classification.
    #[must_use]
    pub fn compliance_status(&self) -> EligibilityState {
        self.compliance_status
    }

    /// Returns the availability reply.
    #[must_use]
    pub fn availability(&self) -> &AvailabilityStatus {
        &self.availability
    }

    /// Returns the availability note.
    #[must_use]
    pub fn availability_note(&self) -> Option<&str> {
        self.availability_note.as_deref()
    }

    /// Mirrors a stored selection.
    pub fn mark_selected(&mut self, position: Position) {
        self.is_selected = true;
        self.position = Some(position);
    }

    /// Mirrors a removed selection.
    pub fn mark_deselected(&mut self) {
        self.is_selected = false;
        self.position = None;
    }

    /// Mirrors a stored position change.
    pub fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }
}

/// Everything needed to project the roster for one fixture.
#[derive(Debug, Clone, Copy)]
pub struct RosterInputs<'a> {
    /// Fixture being selected for.
    pub fixture: &'a Match,
    /// Club players.
    pub players: &'a [Player],
    /// Current selections.
    pub selections: &'a SelectionMap,
    /// Availability replies.
    pub availability: &'a AvailabilityMap,
    /// Higher-tier appearance counts; absent players count as zero.
    pub higher_apps: &'a HigherAppsMap,
    /// League higher-tier appearance cap.
    pub limit: u32,
    /// Screen filter parameters.
    pub query: &'a RosterQuery,
}

/// Keeps the players the roster should offer.
///
/// A non-blank search matches first or last name case-insensitively and
/// overrides every other rule. Otherwise selected players are always kept,
/// squad view keeps members of the fixture's team and all view keeps
/// everyone.
#[must_use]
pub fn filter_players<'a>(
    fixture: &Match,
    players: &'a [Player],
    selections: &SelectionMap,
    query: &RosterQuery,
) -> Vec<&'a Player> {
    if let Some(term) = query.search_term() {
        return players
            .iter()
            .filter(|player| player.name_contains(term.as_str()))
            .collect();
    }

    players
        .iter()
        .filter(|player| {
            selections.contains_key(&player.id())
                || match query.view_mode {
                    ViewMode::Squad => player.is_member_of(fixture.team_id()),
                    ViewMode::All => true,
                }
        })
        .collect()
}

/// Annotates the given players and returns them in display order.
#[must_use]
pub fn project_candidates<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    selections: &SelectionMap,
    availability: &AvailabilityMap,
    higher_apps: &HigherAppsMap,
    limit: u32,
) -> Vec<RosterCandidate> {
    let mut candidates: Vec<RosterCandidate> = players
        .into_iter()
        .map(|player| {
            let selection = selections.get(&player.id());
            let apps = higher_apps.get(&player.id()).copied().unwrap_or(0);
            let reply = availability.get(&player.id());

            RosterCandidate {
                player: player.clone(),
                is_selected: selection.is_some(),
                position: selection
                    .map(|position| position.clone().unwrap_or_else(Position::substitute)),
                higher_apps: apps,
                compliance_status: classify(apps, limit),
                availability: reply
                    .map(|record| record.status.clone())
                    .unwrap_or(AvailabilityStatus::Unknown),
                availability_note: reply.and_then(|record| record.note.clone()),
            }
        })
        .collect();

    sort_candidates(&mut candidates);
    candidates
}

/// Orders candidates: selected first, then unavailable last, then last name.
///
/// Last names compare case-insensitively so particles such as "van" or "de"
/// sort alongside capitalised names; exact byte order only breaks ties. The
/// sort is stable, so candidates equal on all keys keep their input order.
pub fn sort_candidates(candidates: &mut [RosterCandidate]) {
    candidates.sort_by(|left, right| {
        right
            .is_selected
            .cmp(&left.is_selected)
            .then_with(|| {
                left.availability
                    .is_unavailable()
                    .cmp(&right.availability.is_unavailable())
            })
            .then_with(|| compare_last_names(left.player.last_name(), right.player.last_name()))
    });
}

fn compare_last_names(left: &str, right: &str) -> std::cmp::Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Filters, annotates and orders the roster for one fixture.
#[must_use]
pub fn build_roster(inputs: &RosterInputs<'_>) -> Vec<RosterCandidate> {
    let kept = filter_players(
        inputs.fixture,
        inputs.players,
        inputs.selections,
        inputs.query,
    );

    project_candidates(
        kept,
        inputs.selections,
        inputs.availability,
        inputs.higher_apps,
        inputs.limit,
    )
}

#[cfg(test)]
mod tests;
