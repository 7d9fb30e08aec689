use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use clubhouse_core::{AppError, AppResult, ClubId, UserIdentity};
use clubhouse_domain::{
    Action, PermissionSummary, RoleAssignment, RoleName, RoleSet, Screen, ScreenAccess, TeamId,
};
use tracing::{info, warn};

/// Stored role assignment row before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentRow {
    /// Raw role name as stored.
    pub role: String,
    /// Team scope, if any.
    pub team_id: Option<TeamId>,
}

/// Repository port for role assignment lookups.
#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Lists the role rows a subject holds in a club.
    async fn list_role_assignments(
        &self,
        club_id: ClubId,
        subject: &str,
    ) -> AppResult<Vec<RoleAssignmentRow>>;
}

/// Signed-in user and the roles they hold for the active club.
///
/// An anonymous context holds no roles and is denied every action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<UserIdentity>,
    roles: RoleSet,
}

impl SessionContext {
    /// Creates a signed-out context.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the signed-in identity.
    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    /// Returns the active club of the signed-in user.
    #[must_use]
    pub fn club_id(&self) -> Option<ClubId> {
        self.identity.as_ref().map(UserIdentity::club_id)
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the roles held in the active club.
    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Returns whether the session may perform an action.
    #[must_use]
    pub fn can(&self, action: &Action, resource_team_id: Option<TeamId>) -> bool {
        self.roles.can(action, resource_team_id)
    }

    /// Ensures the session may perform an action.
    pub fn require(&self, action: &Action, resource_team_id: Option<TeamId>) -> AppResult<()> {
        if self.can(action, resource_team_id) {
            return Ok(());
        }

        let Some(identity) = self.identity.as_ref() else {
            return Err(AppError::Unauthorized(format!(
                "sign in required for action '{action}'"
            )));
        };

        let scope = resource_team_id
            .map(|team_id| format!(" on team '{team_id}'"))
            .unwrap_or_default();
        warn!(
            subject = %identity.subject(),
            club_id = %identity.club_id(),
            action = %action,
            "permission denied"
        );

        Err(AppError::Forbidden(format!(
            "subject '{}' may not perform '{action}'{scope} in club '{}'",
            identity.subject(),
            identity.club_id()
        )))
    }

    /// Returns club-wide capability flags for toggling controls.
    #[must_use]
    pub fn permissions(&self) -> PermissionSummary {
        PermissionSummary::for_roles(&self.roles)
    }

    /// Decides whether navigation to a screen may proceed.
    #[must_use]
    pub fn guard(&self, screen: Screen) -> ScreenAccess {
        ScreenAccess::evaluate(&self.roles, screen)
    }

    /// Lists the screens this session may open.
    #[must_use]
    pub fn accessible_screens(&self) -> Vec<Screen> {
        Screen::all()
            .iter()
            .copied()
            .filter(|screen| self.guard(*screen) == ScreenAccess::Granted)
            .collect()
    }

    /// Clears identity and roles.
    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!(subject = %identity.subject(), "session signed out");
        }
        self.roles = RoleSet::empty();
    }
}

/// Application service that populates session contexts.
#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn RoleAssignmentRepository>,
}

impl SessionService {
    /// Creates a new session service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleAssignmentRepository>) -> Self {
        Self { repository }
    }

    /// Signs a user in, replacing whatever the context held.
    ///
    /// Role rows with unknown names are dropped. On a lookup failure the
    /// context is left unchanged.
    pub async fn login(&self, session: &mut SessionContext, identity: UserIdentity) -> AppResult<()> {
        let roles = self.load_roles(identity.club_id(), identity.subject()).await?;

        info!(
            subject = %identity.subject(),
            club_id = %identity.club_id(),
            role_count = roles.assignments().len(),
            "session signed in"
        );

        session.identity = Some(identity);
        session.roles = roles;
        Ok(())
    }

    /// Reloads roles for the signed-in user, e.g. after an assignment change.
    pub async fn refresh_roles(&self, session: &mut SessionContext) -> AppResult<()> {
        let Some(identity) = session.identity.as_ref() else {
            return Err(AppError::Unauthorized(
                "cannot refresh roles for a signed-out session".to_owned(),
            ));
        };

        let roles = self.load_roles(identity.club_id(), identity.subject()).await?;
        session.roles = roles;
        Ok(())
    }

    async fn load_roles(&self, club_id: ClubId, subject: &str) -> AppResult<RoleSet> {
        let rows = self
            .repository
            .list_role_assignments(club_id, subject)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match RoleName::from_str(row.role.as_str()) {
                Ok(role) => Some(RoleAssignment::from_parts(role, row.team_id)),
                Err(error) => {
                    warn!(
                        subject = %subject,
                        club_id = %club_id,
                        error = %error,
                        "dropping unrecognised role assignment"
                    );
                    None
                }
            })
            .collect())
    }
}
