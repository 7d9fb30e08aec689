use clubhouse_core::ClubId;
use clubhouse_domain::{Match, MatchId, PlayerId, Position, RosterCandidate, RosterQuery};
use tracing::info;

use crate::{RosterError, RosterService};

/// Selection screen state for one club.
///
/// Holds the scheduled fixtures, the league cap and the roster of the
/// active fixture. A failed refresh leaves the previous state in place.
pub struct RosterBoard {
    service: RosterService,
    club_id: ClubId,
    loading: bool,
    league_limit: u32,
    matches: Vec<Match>,
    active_match: Option<MatchId>,
    candidates: Vec<RosterCandidate>,
}

impl RosterBoard {
    /// Creates an empty board for a club.
    #[must_use]
    pub fn new(service: RosterService, club_id: ClubId) -> Self {
        let league_limit = service.settings().default_higher_apps_limit;
        Self {
            service,
            club_id,
            loading: false,
            league_limit,
            matches: Vec::new(),
            active_match: None,
            candidates: Vec::new(),
        }
    }

    /// Returns the club the board belongs to.
    #[must_use]
    pub fn club_id(&self) -> ClubId {
        self.club_id
    }

    /// Returns whether a roster load is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the league higher-tier appearance cap in use.
    #[must_use]
    pub fn league_limit(&self) -> u32 {
        self.league_limit
    }

    /// Returns the scheduled fixtures, earliest first.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Returns the fixture whose roster is loaded.
    #[must_use]
    pub fn active_fixture(&self) -> Option<&Match> {
        let match_id = self.active_match?;
        self.matches.iter().find(|fixture| fixture.id() == match_id)
    }

    /// Returns the loaded roster in display order.
    #[must_use]
    pub fn candidates(&self) -> &[RosterCandidate] {
        &self.candidates
    }

    /// Reloads the league cap.
    pub async fn refresh_rules(&mut self) -> Result<u32, RosterError> {
        self.league_limit = self.service.fetch_league_limit().await?;
        Ok(self.league_limit)
    }

    /// Reloads the club's scheduled fixtures.
    pub async fn refresh_matches(&mut self) -> Result<(), RosterError> {
        self.matches = self.service.fetch_scheduled_matches(self.club_id).await?;
        Ok(())
    }

    /// Loads the roster for a scheduled fixture.
    ///
    /// The candidate list is replaced only when the whole roster loaded.
    pub async fn load_roster(
        &mut self,
        match_id: MatchId,
        query: &RosterQuery,
    ) -> Result<(), RosterError> {
        let fixture = self
            .matches
            .iter()
            .find(|fixture| fixture.id() == match_id)
            .cloned()
            .ok_or(RosterError::MatchNotFound(match_id))?;

        let loading = LoadingFlag::raise(&mut self.loading);
        let result = self
            .service
            .fetch_roster(self.club_id, &fixture, query, self.league_limit)
            .await;
        drop(loading);

        self.candidates = result?;
        self.active_match = Some(match_id);
        info!(
            club_id = %self.club_id,
            match_id = %match_id,
            view_mode = query.view_mode.as_str(),
            "roster board refreshed"
        );

        Ok(())
    }

    /// Selects a roster player for the active fixture.
    pub async fn select(
        &mut self,
        player_id: PlayerId,
        position: Position,
    ) -> Result<(), RosterError> {
        let match_id = self
            .active_match
            .ok_or(RosterError::CandidateNotFound(player_id))?;
        let candidate = find_candidate(&mut self.candidates, player_id)?;
        self.service.select(match_id, candidate, position).await
    }

    /// Removes a roster player from the active fixture's team sheet.
    pub async fn deselect(&mut self, player_id: PlayerId) -> Result<(), RosterError> {
        let match_id = self
            .active_match
            .ok_or(RosterError::CandidateNotFound(player_id))?;
        let candidate = find_candidate(&mut self.candidates, player_id)?;
        self.service.deselect(match_id, candidate).await
    }

    /// Changes a selected player's position for the active fixture.
    pub async fn reposition(
        &mut self,
        player_id: PlayerId,
        position: Position,
    ) -> Result<(), RosterError> {
        let match_id = self
            .active_match
            .ok_or(RosterError::CandidateNotFound(player_id))?;
        let candidate = find_candidate(&mut self.candidates, player_id)?;
        self.service.reposition(match_id, candidate, position).await
    }
}

/// Keeps the loading flag raised until dropped, including when the load
/// future is cancelled mid-flight.
struct LoadingFlag<'a>(&'a mut bool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn find_candidate(
    candidates: &mut [RosterCandidate],
    player_id: PlayerId,
) -> Result<&mut RosterCandidate, RosterError> {
    candidates
        .iter_mut()
        .find(|candidate| candidate.player_id() == player_id)
        .ok_or(RosterError::CandidateNotFound(player_id))
}
