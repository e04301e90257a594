//! Repository for the `quests` table.
//!
//! Every query is scoped by `adventurer_id` so a caller can only ever see or
//! touch its own quests.

use questlog_core::quest::{plan_quest_update, QuestChanges};
use questlog_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::quest::{CreateQuest, Quest, QuestFilter, QuestUpdateOutcome};
use crate::repositories::AdventurerRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, adventurer_id, title, details, difficulty_rating, category, \
                       deadline, tags, completed, created_at, completed_at, updated_at";

/// Provides CRUD operations for quests plus the completion transition.
pub struct QuestRepo;

impl QuestRepo {
    /// Insert a new open quest for `adventurer_id`, stamping `created_at`.
    pub async fn create(
        pool: &PgPool,
        adventurer_id: DbId,
        input: &CreateQuest,
        now: Timestamp,
    ) -> Result<Quest, sqlx::Error> {
        let query = format!(
            "INSERT INTO quests
                (adventurer_id, title, details, difficulty_rating, category, deadline, tags, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(adventurer_id)
            .bind(&input.title)
            .bind(&input.details)
            .bind(input.difficulty_rating.as_str())
            .bind(input.category.as_str())
            .bind(input.deadline)
            .bind(&input.tags)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a quest by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        adventurer_id: DbId,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quests WHERE id = $1 AND adventurer_id = $2");
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(adventurer_id)
            .fetch_optional(pool)
            .await
    }

    /// List an adventurer's quests in creation order.
    ///
    /// The category filter compares case-insensitively.
    pub async fn list(
        pool: &PgPool,
        adventurer_id: DbId,
        filter: &QuestFilter,
    ) -> Result<Vec<Quest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quests
             WHERE adventurer_id = $1
               AND ($2::boolean IS NULL OR completed = $2)
               AND ($3::text IS NULL OR $3 = ANY(tags))
               AND ($4::text IS NULL OR UPPER(category) = UPPER($4))
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(adventurer_id)
            .bind(filter.completed)
            .bind(&filter.tag)
            .bind(&filter.category)
            .fetch_all(pool)
            .await
    }

    /// Apply an update request to a quest as one transaction.
    ///
    /// 1. Lock the quest row (`FOR UPDATE`) scoped to its owner.
    /// 2. Plan the writes from the locked state via [`plan_quest_update`].
    /// 3. Write the planned fields and timestamps.
    /// 4. On the open -> completed edge, add the reward to the owner's XP
    ///    with an atomic increment (zero for labels this build does not
    ///    know).
    ///
    /// Returns `None` if the quest does not exist for this adventurer. Any
    /// error rolls the whole update back.
    pub async fn apply_update(
        pool: &PgPool,
        id: DbId,
        adventurer_id: DbId,
        changes: QuestChanges,
        now: Timestamp,
    ) -> Result<Option<QuestUpdateOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!(
            "SELECT {COLUMNS} FROM quests WHERE id = $1 AND adventurer_id = $2 FOR UPDATE"
        );
        let Some(current) = sqlx::query_as::<_, Quest>(&lock_query)
            .bind(id)
            .bind(adventurer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let plan = plan_quest_update(current.state(), &current.difficulty_rating, changes, now);

        if !plan.ignored.is_empty() {
            tracing::debug!(
                quest_id = id,
                ignored = ?plan.ignored.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "Dropped frozen fields on completed quest"
            );
        }

        let update_query = format!(
            "UPDATE quests SET
                title = COALESCE($3, title),
                details = CASE WHEN $4 THEN $5 ELSE details END,
                difficulty_rating = COALESCE($6, difficulty_rating),
                tags = COALESCE($7, tags),
                deadline = COALESCE($8, deadline),
                category = COALESCE($9, category),
                completed = COALESCE($10, completed),
                completed_at = COALESCE(completed_at, $11),
                updated_at = $12
             WHERE id = $1 AND adventurer_id = $2
             RETURNING {COLUMNS}"
        );
        // Outer `Some` means the request named `details`; the inner value may
        // be `None` to clear it.
        let details_provided = plan.details.is_some();
        let details_value = plan.details.as_ref().and_then(|d| d.as_ref());
        let quest = sqlx::query_as::<_, Quest>(&update_query)
            .bind(id)
            .bind(adventurer_id)
            .bind(&plan.title)
            .bind(details_provided)
            .bind(details_value)
            .bind(plan.difficulty_rating.map(|d| d.as_str()))
            .bind(&plan.tags)
            .bind(plan.deadline)
            .bind(plan.category.map(|c| c.as_str()))
            .bind(plan.completed)
            .bind(plan.completed_at)
            .bind(plan.updated_at)
            .fetch_one(&mut *tx)
            .await?;

        if plan.completes_quest() {
            let total = AdventurerRepo::add_xp_in_tx(&mut tx, adventurer_id, plan.reward_xp)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            tracing::info!(
                quest_id = id,
                adventurer_id,
                reward_xp = plan.reward_xp,
                xp = total,
                "Quest completed"
            );
        }

        tx.commit().await?;

        Ok(Some(QuestUpdateOutcome {
            quest,
            reward_xp: plan.reward_xp,
            ignored: plan.ignored,
        }))
    }

    /// Delete a quest. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, adventurer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quests WHERE id = $1 AND adventurer_id = $2")
            .bind(id)
            .bind(adventurer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
