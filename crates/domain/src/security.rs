use std::fmt::{Display, Formatter};
use std::str::FromStr;

use clubhouse_core::AppError;
use serde::{Deserialize, Serialize};

use crate::TeamId;

/// Club roles a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Full club administrator; passes every check.
    Admin,
    /// Club secretary; manages club settings and all teams.
    Secretary,
    /// Club treasurer; manages finance.
    Treasurer,
    /// Team coach; manages squads, optionally scoped to one team.
    Coach,
    /// Welfare officer; views safeguarding records.
    WelfareOfficer,
    /// Parent of a registered player.
    Parent,
    /// Registered player.
    Player,
}

impl RoleName {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Secretary => "secretary",
            Self::Treasurer => "treasurer",
            Self::Coach => "coach",
            Self::WelfareOfficer => "welfare_officer",
            Self::Parent => "parent",
            Self::Player => "player",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RoleName] = &[
            RoleName::Admin,
            RoleName::Secretary,
            RoleName::Treasurer,
            RoleName::Coach,
            RoleName::WelfareOfficer,
            RoleName::Parent,
            RoleName::Player,
        ];

        ALL
    }
}

impl FromStr for RoleName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "secretary" => Ok(Self::Secretary),
            "treasurer" => Ok(Self::Treasurer),
            "coach" => Ok(Self::Coach),
            "welfare_officer" => Ok(Self::WelfareOfficer),
            "parent" => Ok(Self::Parent),
            "player" => Ok(Self::Player),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One role held by a principal, optionally scoped to a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
    role: RoleName,
    team_id: Option<TeamId>,
}

impl RoleAssignment {
    /// Creates a club-wide assignment.
    #[must_use]
    pub fn new(role: RoleName) -> Self {
        Self {
            role,
            team_id: None,
        }
    }

    /// Creates an assignment scoped to a team.
    #[must_use]
    pub fn scoped(role: RoleName, team_id: TeamId) -> Self {
        Self {
            role,
            team_id: Some(team_id),
        }
    }

    /// Creates an assignment from stored parts.
    #[must_use]
    pub fn from_parts(role: RoleName, team_id: Option<TeamId>) -> Self {
        Self { role, team_id }
    }

    /// Returns the assigned role.
    #[must_use]
    pub fn role(&self) -> RoleName {
        self.role
    }

    /// Returns the team scope, if any.
    #[must_use]
    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }
}

/// All role assignments held by one principal.
///
/// Duplicates are allowed: a coach of two teams holds two assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(Vec<RoleAssignment>);

impl RoleSet {
    /// Creates a role set from assignments.
    #[must_use]
    pub fn new(assignments: Vec<RoleAssignment>) -> Self {
        Self(assignments)
    }

    /// Creates an empty role set; every check against it is denied.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the assignments.
    #[must_use]
    pub fn assignments(&self) -> &[RoleAssignment] {
        &self.0
    }

    /// Returns whether no assignments are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether any assignment carries one of the roles.
    #[must_use]
    pub fn has_any(&self, roles: &[RoleName]) -> bool {
        self.0
            .iter()
            .any(|assignment| roles.contains(&assignment.role))
    }

    /// Returns whether a coach assignment is scoped to the team.
    #[must_use]
    pub fn coaches_team(&self, team_id: TeamId) -> bool {
        coaches_team(&self.0, team_id)
    }

    /// Evaluates an action against this role set.
    #[must_use]
    pub fn can(&self, action: &Action, resource_team_id: Option<TeamId>) -> bool {
        can(&self.0, action, resource_team_id)
    }
}

impl From<Vec<RoleAssignment>> for RoleSet {
    fn from(value: Vec<RoleAssignment>) -> Self {
        Self(value)
    }
}

impl FromIterator<RoleAssignment> for RoleSet {
    fn from_iter<T: IntoIterator<Item = RoleAssignment>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Capability check points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Adding teams and players, club settings.
    ManageClub,
    /// Treasurer dashboard and ledger.
    ManageFinance,
    /// Squad selection and fixtures.
    ManageTeam,
    /// League rules and compliance thresholds.
    EditCompliance,
    /// Welfare officer dashboard.
    ViewSafeguarding,
    /// Family wallet payments.
    PayWallet,
    /// Any action outside the decision table; only admins pass.
    Other(String),
}

impl Action {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ManageClub => "manage_club",
            Self::ManageFinance => "manage_finance",
            Self::ManageTeam => "manage_team",
            Self::EditCompliance => "edit_compliance",
            Self::ViewSafeguarding => "view_safeguarding",
            Self::PayWallet => "pay_wallet",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a transport value; unrecognised names map to [`Action::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "manage_club" => Self::ManageClub,
            "manage_finance" => Self::ManageFinance,
            "manage_team" => Self::ManageTeam,
            "edit_compliance" => Self::EditCompliance,
            "view_safeguarding" => Self::ViewSafeguarding,
            "pay_wallet" => Self::PayWallet,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Display for Action {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Decides whether the role assignments allow an action.
///
/// Fails closed on an empty slice. Any `admin` assignment allows everything.
/// Otherwise roles are OR-combined over a fixed decision table; a
/// `resource_team_id` only narrows `manage_team` for coaches, who then need
/// an assignment scoped to that exact team.
#[must_use]
pub fn can(roles: &[RoleAssignment], action: &Action, resource_team_id: Option<TeamId>) -> bool {
    if roles.is_empty() {
        return false;
    }

    let has_any = |wanted: &[RoleName]| roles.iter().any(|entry| wanted.contains(&entry.role));

    if has_any(&[RoleName::Admin]) {
        return true;
    }

    match action {
        Action::ManageClub => has_any(&[RoleName::Secretary]),
        Action::ManageFinance => has_any(&[RoleName::Treasurer]),
        Action::ManageTeam => match resource_team_id {
            None => has_any(&[RoleName::Coach, RoleName::Secretary]),
            Some(team_id) => {
                has_any(&[RoleName::Secretary]) || coaches_team(roles, team_id)
            }
        },
        Action::EditCompliance => has_any(&[RoleName::Secretary, RoleName::Treasurer]),
        Action::ViewSafeguarding => has_any(&[RoleName::WelfareOfficer]),
        Action::PayWallet => has_any(&[RoleName::Parent, RoleName::Player]),
        Action::Other(_) => false,
    }
}

fn coaches_team(roles: &[RoleAssignment], team_id: TeamId) -> bool {
    roles
        .iter()
        .any(|entry| entry.role == RoleName::Coach && entry.team_id == Some(team_id))
}

/// Club-wide capability flags used to toggle navigation and controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSummary {
    /// Holder may manage club settings.
    pub is_super_admin: bool,
    /// Holder may use the treasurer dashboard.
    pub can_manage_money: bool,
    /// Holder may select squads for at least one team.
    pub can_select_team: bool,
    /// Holder may edit league compliance rules.
    pub can_edit_rules: bool,
    /// Holder may view safeguarding records.
    pub can_view_safeguarding: bool,
    /// Holder uses the family wallet.
    pub is_parent: bool,
}

impl PermissionSummary {
    /// Computes the summary for a role set.
    #[must_use]
    pub fn for_roles(roles: &RoleSet) -> Self {
        Self {
            is_super_admin: roles.can(&Action::ManageClub, None),
            can_manage_money: roles.can(&Action::ManageFinance, None),
            can_select_team: roles.can(&Action::ManageTeam, None),
            can_edit_rules: roles.can(&Action::EditCompliance, None),
            can_view_safeguarding: roles.can(&Action::ViewSafeguarding, None),
            is_parent: roles.can(&Action::PayWallet, None),
        }
    }
}

/// Navigable application screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Public landing page.
    Landing,
    /// New club onboarding.
    Onboarding,
    /// Matchday squad selection.
    Selection,
    /// Fixture management.
    Fixtures,
    /// Treasurer dashboard.
    Treasurer,
    /// League compliance rules.
    Rules,
    /// Club administration.
    Admin,
    /// Family wallet.
    Wallet,
    /// Parent matchday hub.
    MatchDayHub,
}

impl Screen {
    /// Returns the stable navigation path for this screen.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Onboarding => "/onboarding",
            Self::Selection => "/selection",
            Self::Fixtures => "/fixtures",
            Self::Treasurer => "/treasurer",
            Self::Rules => "/rules",
            Self::Admin => "/admin",
            Self::Wallet => "/wallet",
            Self::MatchDayHub => "/hub",
        }
    }

    /// Returns the action a principal needs to open this screen, if any.
    #[must_use]
    pub fn required_action(&self) -> Option<Action> {
        match self {
            Self::Selection | Self::Fixtures => Some(Action::ManageTeam),
            Self::Treasurer => Some(Action::ManageFinance),
            Self::Rules => Some(Action::EditCompliance),
            Self::Admin => Some(Action::ManageClub),
            Self::Landing | Self::Onboarding | Self::Wallet | Self::MatchDayHub => None,
        }
    }

    /// Finds a screen by navigation path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|screen| screen.path() == path)
    }

    /// Returns all screens.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Screen] = &[
            Screen::Landing,
            Screen::Onboarding,
            Screen::Selection,
            Screen::Fixtures,
            Screen::Treasurer,
            Screen::Rules,
            Screen::Admin,
            Screen::Wallet,
            Screen::MatchDayHub,
        ];

        ALL
    }
}

/// Outcome of guarding navigation to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAccess {
    /// Navigation may proceed.
    Granted,
    /// Navigation is refused; send the user to the given screen instead.
    Redirect(Screen),
}

impl ScreenAccess {
    /// Decides access to a screen for a role set.
    #[must_use]
    pub fn evaluate(roles: &RoleSet, screen: Screen) -> Self {
        match screen.required_action() {
            Some(action) if !roles.can(&action, None) => Self::Redirect(Screen::Landing),
            _ => Self::Granted,
        }
    }
}
