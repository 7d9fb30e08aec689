use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use clubhouse_application::{
    RoleAssignmentRepository, RoleAssignmentRow, RosterRepository, SelectionRepository,
};
use clubhouse_core::{AppError, AppResult, ClubId};
use clubhouse_domain::{
    AppearanceRecord, AvailabilityMap, AvailabilityRecord, Match, MatchId, MatchStatus, Player,
    PlayerId, Position, SelectionMap,
};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory club data store implementing every roster and session port.
#[derive(Debug, Default)]
pub struct InMemoryClubRepository {
    league_threshold: RwLock<Option<u32>>,
    matches: RwLock<HashMap<MatchId, (ClubId, Match)>>,
    players: RwLock<HashMap<PlayerId, (ClubId, Player)>>,
    appearances: RwLock<HashMap<(MatchId, PlayerId), AppearanceRecord>>,
    availability: RwLock<HashMap<(MatchId, PlayerId), AvailabilityRecord>>,
    role_assignments: RwLock<HashMap<(ClubId, String), Vec<RoleAssignmentRow>>>,
}

impl InMemoryClubRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the league higher-tier appearance cap.
    pub async fn set_league_threshold(&self, threshold: Option<u32>) {
        *self.league_threshold.write().await = threshold;
    }

    /// Stores or replaces a fixture.
    pub async fn save_match(&self, club_id: ClubId, fixture: Match) {
        self.matches
            .write()
            .await
            .insert(fixture.id(), (club_id, fixture));
    }

    /// Stores or replaces a player.
    pub async fn save_player(&self, club_id: ClubId, player: Player) {
        self.players
            .write()
            .await
            .insert(player.id(), (club_id, player));
    }

    /// Stores or replaces an availability reply.
    pub async fn save_availability(
        &self,
        match_id: MatchId,
        player_id: PlayerId,
        record: AvailabilityRecord,
    ) {
        self.availability
            .write()
            .await
            .insert((match_id, player_id), record);
    }

    /// Adds a role assignment row for a subject.
    pub async fn assign_role(&self, club_id: ClubId, subject: &str, row: RoleAssignmentRow) {
        self.role_assignments
            .write()
            .await
            .entry((club_id, subject.to_owned()))
            .or_default()
            .push(row);
    }
}

#[async_trait]
impl RosterRepository for InMemoryClubRepository {
    async fn fetch_league_threshold(&self) -> AppResult<Option<u32>> {
        Ok(*self.league_threshold.read().await)
    }

    async fn fetch_scheduled_matches(&self, club_id: ClubId) -> AppResult<Vec<Match>> {
        let matches = self.matches.read().await;
        let mut listed: Vec<Match> = matches
            .values()
            .filter_map(|(stored_club_id, fixture)| {
                (stored_club_id == &club_id
                    && fixture.status() == MatchStatus::Scheduled)
                    .then_some(fixture.clone())
            })
            .collect();
        listed.sort_by_key(|fixture| (fixture.match_date(), fixture.id()));

        Ok(listed)
    }

    async fn fetch_club_players(&self, club_id: ClubId) -> AppResult<Vec<Player>> {
        let players = self.players.read().await;
        let mut listed: Vec<Player> = players
            .values()
            .filter_map(|(stored_club_id, player)| {
                (stored_club_id == &club_id).then_some(player.clone())
            })
            .collect();
        listed.sort_by(|left, right| {
            left.last_name()
                .cmp(right.last_name())
                .then_with(|| left.id().cmp(&right.id()))
        });

        Ok(listed)
    }

    async fn fetch_selections(&self, match_id: MatchId) -> AppResult<SelectionMap> {
        Ok(self
            .appearances
            .read()
            .await
            .values()
            .filter(|record| record.match_id == match_id)
            .map(|record| (record.player_id, Some(record.position.clone())))
            .collect())
    }

    async fn fetch_availability(&self, match_id: MatchId) -> AppResult<AvailabilityMap> {
        Ok(self
            .availability
            .read()
            .await
            .iter()
            .filter_map(|((stored_match_id, player_id), record)| {
                (stored_match_id == &match_id).then_some((*player_id, record.clone()))
            })
            .collect())
    }

    async fn count_higher_level_appearances(
        &self,
        player_id: PlayerId,
        before: NaiveDate,
        above_level: i32,
    ) -> AppResult<u32> {
        let matches = self.matches.read().await;
        let appearances = self.appearances.read().await;

        let count = appearances
            .values()
            .filter(|record| record.player_id == player_id)
            .filter_map(|record| matches.get(&record.match_id))
            .filter(|(_, fixture)| {
                fixture.match_date() < before && fixture.team_level() < above_level
            })
            .count();

        u32::try_from(count).map_err(|error| {
            AppError::Internal(format!(
                "appearance count for player '{player_id}' overflowed: {error}"
            ))
        })
    }
}

#[async_trait]
impl SelectionRepository for InMemoryClubRepository {
    async fn write_selection(&self, record: AppearanceRecord) -> AppResult<()> {
        let key = (record.match_id, record.player_id);
        let mut appearances = self.appearances.write().await;

        if appearances.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "player '{}' is already selected for match '{}'",
                key.1, key.0
            )));
        }

        debug!(
            match_id = %record.match_id,
            player_id = %record.player_id,
            kind = record.kind.as_str(),
            position = %record.position,
            "appearance stored"
        );
        appearances.insert(key, record);
        Ok(())
    }

    async fn delete_selection(&self, match_id: MatchId, player_id: PlayerId) -> AppResult<()> {
        let removed = self
            .appearances
            .write()
            .await
            .remove(&(match_id, player_id));
        debug!(
            match_id = %match_id,
            player_id = %player_id,
            removed = removed.is_some(),
            "appearance deleted"
        );

        Ok(())
    }

    async fn update_selection_position(
        &self,
        match_id: MatchId,
        player_id: PlayerId,
        position: Position,
    ) -> AppResult<()> {
        let mut appearances = self.appearances.write().await;
        let Some(record) = appearances.get_mut(&(match_id, player_id)) else {
            return Err(AppError::NotFound(format!(
                "player '{player_id}' is not selected for match '{match_id}'"
            )));
        };

        record.position = position;
        Ok(())
    }
}

#[async_trait]
impl RoleAssignmentRepository for InMemoryClubRepository {
    async fn list_role_assignments(
        &self,
        club_id: ClubId,
        subject: &str,
    ) -> AppResult<Vec<RoleAssignmentRow>> {
        Ok(self
            .role_assignments
            .read()
            .await
            .get(&(club_id, subject.to_owned()))
            .cloned()
            .unwrap_or_default())
    }
}
