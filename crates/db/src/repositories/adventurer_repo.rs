//! Repository for the `adventurers` table.

use questlog_core::types::{DbId, Xp};
use sqlx::PgPool;

use crate::models::adventurer::Adventurer;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "user_id, character_name, character_class_id, xp, created_at, updated_at";

/// Provides CRUD operations for adventurers plus the atomic XP increment.
pub struct AdventurerRepo;

impl AdventurerRepo {
    /// Insert the adventurer for `user_id`, starting at 0 XP.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        character_name: &str,
        character_class_id: DbId,
    ) -> Result<Adventurer, sqlx::Error> {
        let query = format!(
            "INSERT INTO adventurers (user_id, character_name, character_class_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adventurer>(&query)
            .bind(user_id)
            .bind(character_name)
            .bind(character_class_id)
            .fetch_one(pool)
            .await
    }

    /// Find the adventurer owned by `user_id`.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Adventurer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adventurers WHERE user_id = $1");
        sqlx::query_as::<_, Adventurer>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Change the character name. Returns `None` if the user has no adventurer.
    pub async fn rename(
        pool: &PgPool,
        user_id: DbId,
        character_name: &str,
    ) -> Result<Option<Adventurer>, sqlx::Error> {
        let query = format!(
            "UPDATE adventurers SET character_name = $2
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adventurer>(&query)
            .bind(user_id)
            .bind(character_name)
            .fetch_optional(pool)
            .await
    }

    /// Atomically add `delta` XP and return the new total.
    ///
    /// Returns `None` if the user has no adventurer.
    pub async fn add_xp(
        pool: &PgPool,
        user_id: DbId,
        delta: Xp,
    ) -> Result<Option<Xp>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let total = Self::add_xp_in_tx(&mut tx, user_id, delta).await?;
        tx.commit().await?;
        Ok(total)
    }

    /// Atomically add `delta` XP within an existing transaction.
    ///
    /// A single `xp = xp + $2` statement, so concurrent completions for the
    /// same adventurer serialize on the row lock and none is lost.
    pub async fn add_xp_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        delta: Xp,
    ) -> Result<Option<Xp>, sqlx::Error> {
        sqlx::query_scalar::<_, Xp>(
            "UPDATE adventurers SET xp = xp + $2 WHERE user_id = $1 RETURNING xp",
        )
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Delete the adventurer (and, by cascade, its quests).
    pub async fn delete(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM adventurers WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
