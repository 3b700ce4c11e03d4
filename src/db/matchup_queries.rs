use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use tracing::{info, debug};

use crate::db::{MatchupStore, StoreError, StoreResult};
use crate::models::matchup::{Matchup, MatchupChanges, MatchupRecord};

const MATCHUP_COLUMNS: &str = r#"
    id, week, season_type, away_team, home_team, game_time, status,
    away_score, home_score, venue, venue_city, weather_temp_f,
    weather_condition, weather_wind_mph, spread, over_under,
    last_synced_at, data_source, created_at, updated_at
"#;

/// Postgres-backed matchup table
#[derive(Debug, Clone)]
pub struct MatchupQueries {
    pool: PgPool,
}

impl MatchupQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchupStore for MatchupQueries {
    async fn find_matchup(
        &self,
        season_type: &str,
        away_team: &str,
        home_team: &str,
    ) -> StoreResult<Option<Matchup>> {
        let sql = format!(
            "SELECT {} FROM matchups WHERE season_type = $1 AND away_team = $2 AND home_team = $3",
            MATCHUP_COLUMNS
        );

        let matchup = sqlx::query_as::<_, Matchup>(&sql)
            .bind(season_type)
            .bind(away_team)
            .bind(home_team)
            .fetch_optional(&self.pool)
            .await?;

        Ok(matchup)
    }

    async fn insert_matchup(&self, record: &MatchupRecord) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        debug!("Inserting matchup {} {} @ {} as {}", record.season_type, record.away_team, record.home_team, id);

        let result = sqlx::query(
            r#"
            INSERT INTO matchups (
                id, week, season_type, away_team, home_team, game_time, status,
                away_score, home_score, venue, venue_city, weather_temp_f,
                weather_condition, weather_wind_mph, spread, over_under,
                last_synced_at, data_source, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, NOW(), $17, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(record.week)
        .bind(&record.season_type)
        .bind(&record.away_team)
        .bind(&record.home_team)
        .bind(record.game_time)
        .bind(record.status)
        .bind(record.away_score)
        .bind(record.home_score)
        .bind(&record.enrichment.venue)
        .bind(&record.enrichment.venue_city)
        .bind(record.enrichment.weather_temp_f)
        .bind(&record.enrichment.weather_condition)
        .bind(record.enrichment.weather_wind_mph)
        .bind(record.enrichment.spread)
        .bind(record.enrichment.over_under)
        .bind(&record.data_source)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(id),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(StoreError::Duplicate {
                    season_type: record.season_type.clone(),
                    away_team: record.away_team.clone(),
                    home_team: record.home_team.clone(),
                })
            }
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    async fn update_matchup(&self, id: Uuid, changes: &MatchupChanges) -> StoreResult<()> {
        let fields = &changes.fields;
        let result = sqlx::query(
            r#"
            UPDATE matchups
            SET
                game_time = $2,
                status = $3,
                away_score = $4,
                home_score = $5,
                venue = $6,
                venue_city = $7,
                weather_temp_f = $8,
                weather_condition = $9,
                weather_wind_mph = $10,
                spread = $11,
                over_under = $12,
                data_source = $13,
                last_synced_at = $14,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(fields.game_time)
        .bind(fields.status)
        .bind(fields.away_score)
        .bind(fields.home_score)
        .bind(&fields.enrichment.venue)
        .bind(&fields.enrichment.venue_city)
        .bind(fields.enrichment.weather_temp_f)
        .bind(&fields.enrichment.weather_condition)
        .bind(fields.enrichment.weather_wind_mph)
        .bind(fields.enrichment.spread)
        .bind(fields.enrichment.over_under)
        .bind(&changes.data_source)
        .bind(changes.synced_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn list_week(&self, season_type: &str) -> StoreResult<Vec<Matchup>> {
        let sql = format!(
            "SELECT {} FROM matchups WHERE season_type = $1 ORDER BY game_time, home_team",
            MATCHUP_COLUMNS
        );

        let matchups = sqlx::query_as::<_, Matchup>(&sql)
            .bind(season_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(matchups)
    }

    async fn delete_week(&self, season_type: &str) -> StoreResult<u64> {
        info!("Deleting all matchups for {}", season_type);

        let result = sqlx::query("DELETE FROM matchups WHERE season_type = $1")
            .bind(season_type)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
