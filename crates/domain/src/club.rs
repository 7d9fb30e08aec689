use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use clubhouse_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $label, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $label, " identifier from an existing UUID value.")]
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a club team (age group or tier squad).
    TeamId,
    "team"
);
uuid_identifier!(
    /// Unique identifier for a registered player.
    PlayerId,
    "player"
);
uuid_identifier!(
    /// Unique identifier for a fixture.
    MatchId,
    "match"
);

/// Registered club player with their team memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    first_name: NonEmptyString,
    last_name: NonEmptyString,
    team_ids: Vec<TeamId>,
}

impl Player {
    /// Creates a validated player.
    pub fn new(
        id: PlayerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        team_ids: Vec<TeamId>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            first_name: NonEmptyString::new(first_name)?,
            last_name: NonEmptyString::new(last_name)?,
            team_ids,
        })
    }

    /// Returns the player identifier.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the player's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Returns the player's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Returns the teams the player is a member of.
    #[must_use]
    pub fn team_ids(&self) -> &[TeamId] {
        &self.team_ids
    }

    /// Returns whether the player belongs to the given team.
    #[must_use]
    pub fn is_member_of(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }

    /// Returns whether either name contains the lower-cased search term.
    #[must_use]
    pub fn name_contains(&self, lowercase_term: &str) -> bool {
        self.first_name().to_lowercase().contains(lowercase_term)
            || self.last_name().to_lowercase().contains(lowercase_term)
    }
}

/// Lifecycle status of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Fixture is upcoming and open for selection.
    Scheduled,
    /// Fixture has been played.
    Played,
}

impl MatchStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Played => "Played",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Scheduled" => Ok(Self::Scheduled),
            "Played" => Ok(Self::Played),
            _ => Err(AppError::Validation(format!(
                "unknown match status '{value}'"
            ))),
        }
    }
}

/// Fixture played by one club team.
///
/// `team_level` orders squads by tier: level `1` is the top squad and a
/// numerically lower level is a higher tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    team_id: TeamId,
    team_level: i32,
    match_date: NaiveDate,
    opponent_name: NonEmptyString,
    status: MatchStatus,
}

impl Match {
    /// Creates a validated fixture.
    pub fn new(
        id: MatchId,
        team_id: TeamId,
        team_level: i32,
        match_date: NaiveDate,
        opponent_name: impl Into<String>,
        status: MatchStatus,
    ) -> AppResult<Self> {
        if team_level < 1 {
            return Err(AppError::Validation(format!(
                "team_level must be at least 1, got {team_level}"
            )));
        }

        Ok(Self {
            id,
            team_id,
            team_level,
            match_date,
            opponent_name: NonEmptyString::new(opponent_name)?,
            status,
        })
    }

    /// Returns the fixture identifier.
    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Returns the club team playing the fixture.
    #[must_use]
    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the tier level of the playing team.
    #[must_use]
    pub fn team_level(&self) -> i32 {
        self.team_level
    }

    /// Returns the fixture date.
    #[must_use]
    pub fn match_date(&self) -> NaiveDate {
        self.match_date
    }

    /// Returns the opponent name.
    #[must_use]
    pub fn opponent_name(&self) -> &str {
        self.opponent_name.as_str()
    }

    /// Returns the fixture status.
    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }
}
