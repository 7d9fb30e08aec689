use std::env;

use clubhouse_application::ClubSettings;
use clubhouse_core::{AppError, AppResult, ClubId};
use clubhouse_domain::{DEFAULT_HIGHER_APPS_LIMIT, ViewMode};
use tracing::info;

const CLUB_ID_VAR: &str = "CLUBHOUSE_CLUB_ID";
const HIGHER_APPS_LIMIT_VAR: &str = "LEAGUE_HIGHER_APPS_LIMIT";
const DEFAULT_VIEW_VAR: &str = "ROSTER_DEFAULT_VIEW";

/// Loads club settings from the process environment, reading `.env` first when present.
pub fn load_club_settings() -> AppResult<ClubSettings> {
    dotenvy::dotenv().ok();

    let settings = club_settings_from(|name| env::var(name).ok())?;
    info!(
        club_id = ?settings.club_id.map(|club_id| club_id.to_string()),
        default_higher_apps_limit = settings.default_higher_apps_limit,
        default_view_mode = settings.default_view_mode.as_str(),
        "club settings loaded"
    );

    Ok(settings)
}

/// Builds club settings from an arbitrary variable lookup.
///
/// Missing or blank variables fall back to their defaults; present but
/// malformed values are rejected.
pub fn club_settings_from<F>(lookup: F) -> AppResult<ClubSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let club_id = optional_var(&lookup, CLUB_ID_VAR)
        .map(|value| ClubId::parse(value.as_str()))
        .transpose()?;
    let default_higher_apps_limit =
        parse_var_u32(&lookup, HIGHER_APPS_LIMIT_VAR, DEFAULT_HIGHER_APPS_LIMIT)?;
    let default_view_mode = optional_var(&lookup, DEFAULT_VIEW_VAR)
        .map(|value| value.to_ascii_lowercase().parse::<ViewMode>())
        .transpose()?
        .unwrap_or_default();

    ClubSettings::new(club_id, default_higher_apps_limit, default_view_mode)
}

fn optional_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_var_u32<F>(lookup: &F, name: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match optional_var(lookup, name) {
        Some(value) => value.parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
