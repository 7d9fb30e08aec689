//! Roster loading and team sheet mutations.
//!
//! A roster load issues the player, selection and availability queries
//! concurrently, then fans out one higher-tier appearance count per kept
//! player and joins them before projecting. Dropping the returned future
//! cancels every branch that is still in flight.

use std::sync::Arc;

use clubhouse_core::{AppError, ClubId};
use clubhouse_domain::{
    AppearanceKind, AppearanceRecord, HigherAppsMap, Match, MatchId, MatchStatus, PlayerId, Position,
    RosterCandidate, RosterQuery, filter_players, project_candidates,
};
use futures_util::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{ClubSettings, RosterRepository, SelectionRepository};

/// Failures surfaced by roster loading and team sheet changes.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A collaborator query failed; nothing was projected.
    #[error("failed to load roster data: {0}")]
    Fetch(#[source] AppError),

    /// A team sheet write failed; local state was not changed.
    #[error("failed to update team sheet: {0}")]
    Write(#[source] AppError),

    /// The fixture is not among the loaded scheduled matches.
    #[error("match '{0}' is not scheduled for this club")]
    MatchNotFound(MatchId),

    /// The player is not on the loaded roster.
    #[error("player '{0}' is not on the loaded roster")]
    CandidateNotFound(PlayerId),
}

/// Application service for the matchday selection screen.
#[derive(Clone)]
pub struct RosterService {
    repository: Arc<dyn RosterRepository>,
    selections: Arc<dyn SelectionRepository>,
    settings: ClubSettings,
}

impl RosterService {
    /// Creates a new roster service from repository implementations.
    #[must_use]
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        selections: Arc<dyn SelectionRepository>,
        settings: ClubSettings,
    ) -> Self {
        Self {
            repository,
            selections,
            settings,
        }
    }

    /// Returns the settings the service was built with.
    #[must_use]
    pub fn settings(&self) -> &ClubSettings {
        &self.settings
    }

    /// Returns the league cap, falling back to the configured default.
    pub async fn fetch_league_limit(&self) -> Result<u32, RosterError> {
        let threshold = self
            .repository
            .fetch_league_threshold()
            .await
            .map_err(RosterError::Fetch)?;

        Ok(threshold.unwrap_or(self.settings.default_higher_apps_limit))
    }

    /// Lists scheduled fixtures for a club, earliest first.
    pub async fn fetch_scheduled_matches(&self, club_id: ClubId) -> Result<Vec<Match>, RosterError> {
        let mut matches: Vec<Match> = self
            .repository
            .fetch_scheduled_matches(club_id)
            .await
            .map_err(RosterError::Fetch)?
            .into_iter()
            .filter(|fixture| fixture.status() == MatchStatus::Scheduled)
            .collect();
        matches.sort_by_key(Match::match_date);

        Ok(matches)
    }

    /// Loads, filters, annotates and orders the roster for one fixture.
    ///
    /// Either the whole roster is returned or the first collaborator error.
    pub async fn fetch_roster(
        &self,
        club_id: ClubId,
        fixture: &Match,
        query: &RosterQuery,
        limit: u32,
    ) -> Result<Vec<RosterCandidate>, RosterError> {
        let match_id = fixture.id();
        let (players, selections, availability) = tokio::try_join!(
            self.repository.fetch_club_players(club_id),
            self.repository.fetch_selections(match_id),
            self.repository.fetch_availability(match_id),
        )
        .map_err(|error| {
            warn!(club_id = %club_id, match_id = %match_id, error = %error, "roster queries failed");
            RosterError::Fetch(error)
        })?;

        let kept = filter_players(fixture, &players, &selections, query);
        debug!(
            match_id = %match_id,
            club_players = players.len(),
            kept_players = kept.len(),
            "counting higher-tier appearances"
        );

        let counts = try_join_all(kept.iter().map(|player| {
            let player_id = player.id();
            async move {
                self.repository
                    .count_higher_level_appearances(
                        player_id,
                        fixture.match_date(),
                        fixture.team_level(),
                    )
                    .await
                    .map(|count| (player_id, count))
            }
        }))
        .await
        .map_err(|error| {
            warn!(match_id = %match_id, error = %error, "appearance count lookup failed");
            RosterError::Fetch(error)
        })?;
        let higher_apps: HigherAppsMap = counts.into_iter().collect();

        let roster = project_candidates(kept, &selections, &availability, &higher_apps, limit);
        info!(
            match_id = %match_id,
            candidates = roster.len(),
            selected = roster.iter().filter(|candidate| candidate.is_selected()).count(),
            "roster loaded"
        );

        Ok(roster)
    }

    /// Puts a player on the team sheet, then mirrors it locally.
    pub async fn select(
        &self,
        match_id: MatchId,
        candidate: &mut RosterCandidate,
        position: Position,
    ) -> Result<(), RosterError> {
        let player_id = candidate.player_id();
        let record = AppearanceRecord {
            match_id,
            player_id,
            kind: AppearanceKind::Start,
            position: position.clone(),
        };

        self.selections
            .write_selection(record)
            .await
            .map_err(|error| write_failed(match_id, player_id, "select", error))?;

        candidate.mark_selected(position);
        Ok(())
    }

    /// Takes a player off the team sheet, then mirrors it locally.
    pub async fn deselect(
        &self,
        match_id: MatchId,
        candidate: &mut RosterCandidate,
    ) -> Result<(), RosterError> {
        let player_id = candidate.player_id();
        self.selections
            .delete_selection(match_id, player_id)
            .await
            .map_err(|error| write_failed(match_id, player_id, "deselect", error))?;

        candidate.mark_deselected();
        Ok(())
    }

    /// Moves a selected player to another position, then mirrors it locally.
    pub async fn reposition(
        &self,
        match_id: MatchId,
        candidate: &mut RosterCandidate,
        position: Position,
    ) -> Result<(), RosterError> {
        let player_id = candidate.player_id();
        self.selections
            .update_selection_position(match_id, player_id, position.clone())
            .await
            .map_err(|error| write_failed(match_id, player_id, "reposition", error))?;

        candidate.set_position(position);
        Ok(())
    }
}

fn write_failed(
    match_id: MatchId,
    player_id: PlayerId,
    operation: &'static str,
    error: AppError,
) -> RosterError {
    warn!(
        match_id = %match_id,
        player_id = %player_id,
        operation,
        error = %error,
        "team sheet write failed"
    );
    RosterError::Write(error)
}
