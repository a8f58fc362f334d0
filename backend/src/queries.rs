use rocket::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use shared::models::*;

use crate::store::{PollStore, StoreError};

const POLL_COLUMNS: &str =
    "p.id, p.question, p.options, p.created_at, p.owner_id,
     (SELECT COUNT(*) FROM votes v WHERE v.poll_id = p.id) AS total_votes";

fn db_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::UniqueViolation,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StoreError::MissingPoll,
        _ => StoreError::Database(e.to_string()),
    }
}

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgStore {
    async fn insert_poll(&self, poll: &Poll) -> Result<Poll, StoreError> {
        sqlx::query_as::<_, Poll>(
            "INSERT INTO polls (id, question, options, created_at, owner_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, question, options, created_at, owner_id, 0::BIGINT AS total_votes",
        )
        .bind(poll.id)
        .bind(&poll.question)
        .bind(&poll.options)
        .bind(poll.created_at)
        .bind(&poll.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn fetch_poll(&self, id: Uuid) -> Result<Option<Poll>, StoreError> {
        sqlx::query_as::<_, Poll>(&format!("SELECT {POLL_COLUMNS} FROM polls p WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn list_polls(&self, owner_id: Option<&str>) -> Result<Vec<Poll>, StoreError> {
        sqlx::query_as::<_, Poll>(&format!(
            "SELECT {POLL_COLUMNS} FROM polls p
             WHERE $1::TEXT IS NULL OR p.owner_id = $1
             ORDER BY p.created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update_poll(&self, id: Uuid, question: &str, options: &[String]) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE polls SET question = $2, options = $3 WHERE id = $1")
            .bind(id)
            .bind(question)
            .bind(options)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_poll(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM votes WHERE poll_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let deleted = sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected();

        tx.commit().await.map_err(db_error)?;

        Ok(deleted > 0)
    }

    async fn count_votes_for_option(&self, poll_id: Uuid, option_index: i32) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM votes WHERE poll_id = $1 AND option_index = $2",
        )
        .bind(poll_id)
        .bind(option_index)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn insert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO votes (poll_id, voter_id, option_index) VALUES ($1, $2, $3)")
            .bind(vote.poll_id)
            .bind(&vote.voter_id)
            .bind(vote.option_index)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
