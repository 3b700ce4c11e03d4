//! Translates provider vocabularies into the canonical matchup shape.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use thiserror::Error;

use crate::league::teams::normalize_team;
use crate::models::matchup::{Enrichment, MatchupRecord, MatchupStatus};
use crate::models::week::{SeasonPhase, SeasonWeek};
use crate::providers::GameRecord;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("unknown team '{0}'")]
    UnknownTeam(String),
    #[error("team '{0}' cannot play itself")]
    SameTeam(String),
    #[error("invalid kickoff time '{0}'")]
    InvalidKickoff(String),
    #[error("unsupported season type '{0}'")]
    InvalidSeasonType(String),
}

/// Map a provider status string into the fixed status set.
/// Anything unrecognized becomes `Tbd`.
pub fn map_status(raw: Option<&str>) -> MatchupStatus {
    let Some(raw) = raw else {
        return MatchupStatus::Tbd;
    };

    let key: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let key = key.strip_prefix("status").unwrap_or(&key);

    match key {
        "scheduled" | "pregame" | "notstarted" | "upcoming" | "created" | "pre" => MatchupStatus::Scheduled,
        "inprogress" | "live" | "halftime" | "endperiod" | "endofperiod" | "overtime" | "ot" | "in" => {
            MatchupStatus::Live
        }
        "final" | "finalot" | "fot" | "f" | "completed" | "complete" | "closed" | "post" | "postgame" => {
            MatchupStatus::Final
        }
        "postponed" | "canceled" | "cancelled" | "forfeit" => MatchupStatus::Postponed,
        "delayed" | "raindelay" | "weatherdelay" | "suspended" => MatchupStatus::Delayed,
        "rescheduled" => MatchupStatus::Rescheduled,
        "tbd" | "tba" => MatchupStatus::Tbd,
        other if is_quarter(other) => MatchupStatus::Live,
        other if other.starts_with("final") => MatchupStatus::Final,
        _ => {
            tracing::debug!("Unrecognized provider status '{}', mapping to tbd", raw);
            MatchupStatus::Tbd
        }
    }
}

fn is_quarter(key: &str) -> bool {
    key.contains("quarter")
        || (key.len() == 2 && key.starts_with('q') && key[1..].chars().all(|c| c.is_ascii_digit()))
}

/// Normalize a kickoff timestamp to UTC.
///
/// Naive timestamps are taken as US/Eastern, the zone schedule pages
/// and keyed APIs report in.
pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // ESPN omits seconds: 2025-09-07T17:00Z
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %I:%M %p"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| New_York.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// ESPN `seasontype`: 1 preseason, 2 regular, 3 postseason
pub fn phase_from_espn_code(code: u8) -> Result<SeasonPhase, MappingError> {
    match code {
        1 => Ok(SeasonPhase::Preseason),
        2 => Ok(SeasonPhase::Regular),
        3 => Ok(SeasonPhase::Postseason),
        other => Err(MappingError::InvalidSeasonType(other.to_string())),
    }
}

pub fn espn_code(phase: SeasonPhase) -> u8 {
    match phase {
        SeasonPhase::Preseason => 1,
        SeasonPhase::Regular => 2,
        SeasonPhase::Postseason => 3,
    }
}

/// SportsData `SeasonType`: 1 regular, 2 preseason, 3 postseason
pub fn phase_from_sportsdata_code(code: u8) -> Result<SeasonPhase, MappingError> {
    match code {
        1 => Ok(SeasonPhase::Regular),
        2 => Ok(SeasonPhase::Preseason),
        3 => Ok(SeasonPhase::Postseason),
        other => Err(MappingError::InvalidSeasonType(other.to_string())),
    }
}

/// Text season types: `PRE`, `REG`, `POST`, `preseason`, `Regular Season`, ...
pub fn phase_from_label(label: &str) -> Result<SeasonPhase, MappingError> {
    let key: String = label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    match key.as_str() {
        "pre" | "preseason" => Ok(SeasonPhase::Preseason),
        "reg" | "regular" | "regularseason" => Ok(SeasonPhase::Regular),
        "post" | "postseason" | "playoffs" => Ok(SeasonPhase::Postseason),
        _ => Err(MappingError::InvalidSeasonType(label.to_string())),
    }
}

/// Map one provider game into the internal record for `season_week`
pub fn map_game(
    record: &GameRecord,
    season_week: SeasonWeek,
    data_source: &str,
) -> Result<MatchupRecord, MappingError> {
    let away_team = resolve_team(&record.away_team, "away_team")?;
    let home_team = resolve_team(&record.home_team, "home_team")?;
    if away_team == home_team {
        return Err(MappingError::SameTeam(away_team.to_string()));
    }

    let kickoff = record
        .kickoff
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(MappingError::MissingField("kickoff"))?;
    let game_time = parse_kickoff(kickoff).ok_or_else(|| MappingError::InvalidKickoff(kickoff.to_string()))?;

    let enrichment = Enrichment {
        venue: record.venue.as_ref().map(|v| v.name.clone()),
        venue_city: record.venue.as_ref().and_then(|v| v.city.clone()),
        weather_temp_f: record.weather.as_ref().and_then(|w| w.temp_f),
        weather_condition: record.weather.as_ref().and_then(|w| w.condition.clone()),
        weather_wind_mph: record.weather.as_ref().and_then(|w| w.wind_mph),
        spread: record.odds.as_ref().and_then(|o| o.spread),
        over_under: record.odds.as_ref().and_then(|o| o.over_under),
    };

    Ok(MatchupRecord {
        week: season_week.unified() as i32,
        season_type: season_week.tag(),
        away_team: away_team.to_string(),
        home_team: home_team.to_string(),
        game_time,
        status: map_status(record.status.as_deref()),
        away_score: record.away_score,
        home_score: record.home_score,
        enrichment,
        data_source: data_source.to_string(),
    })
}

fn resolve_team(raw: &str, field: &'static str) -> Result<&'static str, MappingError> {
    if raw.trim().is_empty() {
        return Err(MappingError::MissingField(field));
    }
    normalize_team(raw).ok_or_else(|| MappingError::UnknownTeam(raw.to_string()))
}
