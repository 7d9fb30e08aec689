use async_trait::async_trait;
use chrono::NaiveDate;
use clubhouse_core::{AppResult, ClubId};
use clubhouse_domain::{
    AppearanceRecord, AvailabilityMap, Match, MatchId, Player, PlayerId, Position, SelectionMap,
};

/// Read port for the data the selection screen needs.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Returns the league cap on higher-tier appearances, if one is configured.
    async fn fetch_league_threshold(&self) -> AppResult<Option<u32>>;

    /// Lists a club's fixtures still to be played.
    async fn fetch_scheduled_matches(&self, club_id: ClubId) -> AppResult<Vec<Match>>;

    /// Lists a club's players with their team memberships.
    async fn fetch_club_players(&self, club_id: ClubId) -> AppResult<Vec<Player>>;

    /// Returns current selections for a fixture.
    async fn fetch_selections(&self, match_id: MatchId) -> AppResult<SelectionMap>;

    /// Returns availability replies for a fixture.
    async fn fetch_availability(&self, match_id: MatchId) -> AppResult<AvailabilityMap>;

    /// Counts a player's appearances in fixtures dated before `before` for
    /// teams ranked above `above_level` (numerically lower levels).
    async fn count_higher_level_appearances(
        &self,
        player_id: PlayerId,
        before: NaiveDate,
        above_level: i32,
    ) -> AppResult<u32>;
}

/// Write port for team sheet selections.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Stores a new appearance row.
    async fn write_selection(&self, record: AppearanceRecord) -> AppResult<()>;

    /// Removes a player's appearance row for a fixture.
    async fn delete_selection(&self, match_id: MatchId, player_id: PlayerId) -> AppResult<()>;

    /// Changes the position on an existing appearance row.
    async fn update_selection_position(
        &self,
        match_id: MatchId,
        player_id: PlayerId,
        position: Position,
    ) -> AppResult<()>;
}
