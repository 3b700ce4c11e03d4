use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchupStatus {
    Scheduled,
    Live,
    Final,
    Postponed,
    Delayed,
    Rescheduled,
    Tbd,
}

impl MatchupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchupStatus::Scheduled => "scheduled",
            MatchupStatus::Live => "live",
            MatchupStatus::Final => "final",
            MatchupStatus::Postponed => "postponed",
            MatchupStatus::Delayed => "delayed",
            MatchupStatus::Rescheduled => "rescheduled",
            MatchupStatus::Tbd => "tbd",
        }
    }
}

/// Optional data that providers supply independently of each other
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, FromRow)]
pub struct Enrichment {
    pub venue: Option<String>,
    pub venue_city: Option<String>,
    pub weather_temp_f: Option<i32>,
    pub weather_condition: Option<String>,
    pub weather_wind_mph: Option<i32>,
    /// Home-relative point spread (negative = home favored)
    pub spread: Option<f64>,
    pub over_under: Option<f64>,
}

impl Enrichment {
    /// Overlay `self` onto `existing`; a missing incoming value keeps the stored one
    pub fn merged_over(&self, existing: &Enrichment) -> Enrichment {
        Enrichment {
            venue: self.venue.clone().or_else(|| existing.venue.clone()),
            venue_city: self.venue_city.clone().or_else(|| existing.venue_city.clone()),
            weather_temp_f: self.weather_temp_f.or(existing.weather_temp_f),
            weather_condition: self
                .weather_condition
                .clone()
                .or_else(|| existing.weather_condition.clone()),
            weather_wind_mph: self.weather_wind_mph.or(existing.weather_wind_mph),
            spread: self.spread.or(existing.spread),
            over_under: self.over_under.or(existing.over_under),
        }
    }
}

/// One scheduled or played NFL game
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, FromRow)]
pub struct Matchup {
    pub id: Uuid,
    pub week: i32,
    pub season_type: String,
    pub away_team: String,
    pub home_team: String,
    pub game_time: DateTime<Utc>,
    pub status: MatchupStatus,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub enrichment: Enrichment,
    pub last_synced_at: DateTime<Utc>,
    pub data_source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A provider game after normalization, ready to be reconciled
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupRecord {
    pub week: i32,
    pub season_type: String,
    pub away_team: String,
    pub home_team: String,
    pub game_time: DateTime<Utc>,
    pub status: MatchupStatus,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    pub enrichment: Enrichment,
    pub data_source: String,
}

/// Fields compared between a stored matchup and an incoming record
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFields {
    pub game_time: DateTime<Utc>,
    pub status: MatchupStatus,
    pub away_score: Option<i32>,
    pub home_score: Option<i32>,
    pub enrichment: Enrichment,
}

/// Update applied to an existing matchup; never touches its id
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupChanges {
    pub fields: TrackedFields,
    pub data_source: String,
    pub synced_at: DateTime<Utc>,
}

impl Matchup {
    pub fn tracked(&self) -> TrackedFields {
        TrackedFields {
            game_time: self.game_time,
            status: self.status,
            away_score: self.away_score,
            home_score: self.home_score,
            enrichment: self.enrichment.clone(),
        }
    }

    /// Merge an incoming record into this matchup.
    ///
    /// Returns `None` when no tracked field would change. Scores and
    /// enrichment are merged additively.
    pub fn reconcile(&self, incoming: &MatchupRecord, synced_at: DateTime<Utc>) -> Option<MatchupChanges> {
        let merged = TrackedFields {
            game_time: incoming.game_time,
            status: incoming.status,
            away_score: incoming.away_score.or(self.away_score),
            home_score: incoming.home_score.or(self.home_score),
            enrichment: incoming.enrichment.merged_over(&self.enrichment),
        };

        if merged == self.tracked() {
            return None;
        }

        Some(MatchupChanges {
            fields: merged,
            data_source: incoming.data_source.clone(),
            synced_at,
        })
    }

    /// Apply an update in place, keeping the stable id
    pub fn apply(&mut self, changes: &MatchupChanges) {
        self.game_time = changes.fields.game_time;
        self.status = changes.fields.status;
        self.away_score = changes.fields.away_score;
        self.home_score = changes.fields.home_score;
        self.enrichment = changes.fields.enrichment.clone();
        self.data_source = changes.data_source.clone();
        self.last_synced_at = changes.synced_at;
        self.updated_at = changes.synced_at;
    }

    /// Team that lost a final game; `None` for ties and unfinished games.
    /// A loser-pool pick survives the week when it names this team.
    pub fn losing_team(&self) -> Option<&str> {
        if self.status != MatchupStatus::Final {
            return None;
        }
        match (self.away_score, self.home_score) {
            (Some(away), Some(home)) if away < home => Some(&self.away_team),
            (Some(away), Some(home)) if home < away => Some(&self.home_team),
            _ => None,
        }
    }
}

impl MatchupRecord {
    /// Build the stored row for a first insert
    pub fn into_matchup(self, id: Uuid, now: DateTime<Utc>) -> Matchup {
        Matchup {
            id,
            week: self.week,
            season_type: self.season_type,
            away_team: self.away_team,
            home_team: self.home_team,
            game_time: self.game_time,
            status: self.status,
            away_score: self.away_score,
            home_score: self.home_score,
            enrichment: self.enrichment,
            last_synced_at: now,
            data_source: self.data_source,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> MatchupRecord {
        MatchupRecord {
            week: 5,
            season_type: "regular-2".to_string(),
            away_team: "KC".to_string(),
            home_team: "BUF".to_string(),
            game_time: Utc.with_ymd_and_hms(2025, 9, 14, 17, 0, 0).unwrap(),
            status: MatchupStatus::Scheduled,
            away_score: None,
            home_score: None,
            enrichment: Enrichment::default(),
            data_source: "mock".to_string(),
        }
    }

    #[test]
    fn test_reconcile_unchanged_record_is_noop() {
        let now = Utc::now();
        let matchup = record().into_matchup(Uuid::new_v4(), now);
        assert_eq!(matchup.reconcile(&record(), now), None);
    }

    #[test]
    fn test_reconcile_keeps_stored_weather() {
        let now = Utc::now();
        let mut stored = record();
        stored.enrichment.weather_temp_f = Some(54);
        stored.enrichment.weather_condition = Some("Rain".to_string());
        let matchup = stored.into_matchup(Uuid::new_v4(), now);

        let mut incoming = record();
        incoming.status = MatchupStatus::Live;
        let changes = matchup.reconcile(&incoming, now).unwrap();

        assert_eq!(changes.fields.status, MatchupStatus::Live);
        assert_eq!(changes.fields.enrichment.weather_temp_f, Some(54));
        assert_eq!(changes.fields.enrichment.weather_condition.as_deref(), Some("Rain"));
    }

    #[test]
    fn test_losing_team() {
        let mut matchup = record().into_matchup(Uuid::new_v4(), Utc::now());
        assert_eq!(matchup.losing_team(), None);

        matchup.status = MatchupStatus::Final;
        matchup.away_score = Some(20);
        matchup.home_score = Some(27);
        assert_eq!(matchup.losing_team(), Some("KC"));

        matchup.home_score = Some(20);
        assert_eq!(matchup.losing_team(), None);
    }
}
