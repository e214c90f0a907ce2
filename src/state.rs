use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

/// Durable single-key store of the last successful send time.
///
/// When unconfigured or unreachable the store degrades to a no-op:
/// reads report no prior send (so the gate always allows) and writes
/// are dropped. The worker stays usable without the database.
pub struct SendStateStore {
    pool: Option<PgPool>,
}

impl SendStateStore {
    /// A store that remembers nothing. Used when no database is
    /// configured or when `--ignore-state` is passed.
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    pub async fn connect(database_url: &str) -> Self {
        let pool = match PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!("send-state store unreachable, every run will be eligible: {e}");
                return Self::disabled();
            }
        };

        let schema = sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS send_state (
                singleton BOOLEAN PRIMARY KEY DEFAULT TRUE CHECK (singleton),
                last_sent_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await;

        if let Err(e) = schema {
            warn!("failed to prepare send_state table, degrading to no-op: {e}");
            return Self::disabled();
        }

        info!("send-state store connected");
        Self { pool: Some(pool) }
    }

    /// The last successful send time, or `None` on a first run or a
    /// degraded store. A read failure degrades rather than blocking
    /// the run.
    pub async fn last_sent(&self) -> Option<DateTime<Utc>> {
        let pool = self.pool.as_ref()?;

        match sqlx::query_scalar::<_, DateTime<Utc>>("SELECT last_sent_at FROM send_state")
            .fetch_optional(pool)
            .await
        {
            Ok(last_sent) => last_sent,
            Err(e) => {
                warn!("failed to read last send time, treating as never sent: {e}");
                None
            }
        }
    }

    /// Record a successful send. Only called after the transport
    /// accepts the message, so a failed send never advances the
    /// timestamp.
    pub async fn record_sent(&self, at: DateTime<Utc>) {
        let Some(pool) = self.pool.as_ref() else {
            return;
        };

        let result = sqlx::query(
            r#"
            INSERT INTO send_state (singleton, last_sent_at)
            VALUES (TRUE, $1)
            ON CONFLICT (singleton) DO UPDATE SET last_sent_at = EXCLUDED.last_sent_at
            "#,
        )
        .bind(at)
        .execute(pool)
        .await;

        if let Err(e) = result {
            warn!("failed to record send time: {e}");
        }
    }
}
