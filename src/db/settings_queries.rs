use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::{SettingsStore, StoreResult};

const UPSERT_SETTING: &str = r#"
    INSERT INTO global_settings (key, value, updated_at)
    VALUES ($1, $2, NOW())
    ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
"#;

/// Postgres-backed `global_settings` key/value table
#[derive(Debug, Clone)]
pub struct SettingsQueries {
    pool: PgPool,
}

impl SettingsQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsQueries {
    async fn get_setting(&self, key: &str) -> StoreResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM global_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(UPSERT_SETTING)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_settings(&self, entries: &[(&str, String)]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in entries {
            sqlx::query(UPSERT_SETTING)
                .bind(*key)
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }

        // Dropping the transaction on an early return rolls every write back
        tx.commit().await?;
        Ok(())
    }
}
