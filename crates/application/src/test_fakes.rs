use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use clubhouse_core::{AppError, AppResult, ClubId};
use clubhouse_domain::{
    AppearanceRecord, AvailabilityMap, HigherAppsMap, Match, MatchId, MatchStatus, Player,
    PlayerId, Position, SelectionMap, TeamId,
};
use tokio::sync::Mutex;

use crate::{RosterRepository, SelectionRepository};

/// Scriptable stand-in for the club data store.
#[derive(Default)]
pub(crate) struct FakeClubRepository {
    pub threshold: Option<u32>,
    pub matches: Vec<Match>,
    pub players: Vec<Player>,
    pub selections: Mutex<SelectionMap>,
    pub availability: AvailabilityMap,
    pub higher_apps: HigherAppsMap,
    pub fail_queries: bool,
    pub fail_count_for: Option<PlayerId>,
    pub fail_writes: bool,
    pub count_calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeClubRepository {
    async fn track<T>(&self, value: T) -> T {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        value
    }

    fn query_result<T>(&self, value: T) -> AppResult<T> {
        if self.fail_queries {
            return Err(AppError::Internal("store unreachable".to_owned()));
        }
        Ok(value)
    }

    fn write_result(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Internal("write rejected".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl RosterRepository for FakeClubRepository {
    async fn fetch_league_threshold(&self) -> AppResult<Option<u32>> {
        self.query_result(self.threshold)
    }

    async fn fetch_scheduled_matches(&self, _club_id: ClubId) -> AppResult<Vec<Match>> {
        self.query_result(self.matches.clone())
    }

    async fn fetch_club_players(&self, _club_id: ClubId) -> AppResult<Vec<Player>> {
        let players = self.track(self.players.clone()).await;
        self.query_result(players)
    }

    async fn fetch_selections(&self, _match_id: MatchId) -> AppResult<SelectionMap> {
        let selections = self.selections.lock().await.clone();
        let selections = self.track(selections).await;
        self.query_result(selections)
    }

    async fn fetch_availability(&self, _match_id: MatchId) -> AppResult<AvailabilityMap> {
        let availability = self.track(self.availability.clone()).await;
        self.query_result(availability)
    }

    async fn count_higher_level_appearances(
        &self,
        player_id: PlayerId,
        _before: NaiveDate,
        _above_level: i32,
    ) -> AppResult<u32> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        let count = self
            .track(self.higher_apps.get(&player_id).copied().unwrap_or(0))
            .await;
        if self.fail_count_for == Some(player_id) {
            return Err(AppError::Internal(format!(
                "count failed for player '{player_id}'"
            )));
        }
        Ok(count)
    }
}

#[async_trait]
impl SelectionRepository for FakeClubRepository {
    async fn write_selection(&self, record: AppearanceRecord) -> AppResult<()> {
        self.write_result()?;
        self.selections
            .lock()
            .await
            .insert(record.player_id, Some(record.position));
        Ok(())
    }

    async fn delete_selection(&self, _match_id: MatchId, player_id: PlayerId) -> AppResult<()> {
        self.write_result()?;
        self.selections.lock().await.remove(&player_id);
        Ok(())
    }

    async fn update_selection_position(
        &self,
        _match_id: MatchId,
        player_id: PlayerId,
        position: Position,
    ) -> AppResult<()> {
        self.write_result()?;
        match self.selections.lock().await.get_mut(&player_id) {
            Some(stored) => {
                *stored = Some(position);
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "no selection for player '{player_id}'"
            ))),
        }
    }
}

pub(crate) fn fixture_on(team_id: TeamId, day: u32, status: MatchStatus) -> Match {
    let date = NaiveDate::from_ymd_opt(2026, 11, day).unwrap_or_default();
    Match::new(MatchId::new(), team_id, 3, date, "Northside", status)
        .unwrap_or_else(|_| unreachable!())
}

pub(crate) fn player(first_name: &str, last_name: &str, team_ids: Vec<TeamId>) -> Player {
    Player::new(PlayerId::new(), first_name, last_name, team_ids).unwrap_or_else(|_| unreachable!())
}

pub(crate) fn position(label: &str) -> Position {
    Position::new(label).unwrap_or_else(|_| unreachable!())
}
