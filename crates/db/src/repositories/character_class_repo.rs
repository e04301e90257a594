//! Repository for the `character_classes` and `class_progressions` tables.
//!
//! Classes are seed data; this repository only reads.

use questlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::character_class::{CharacterClass, CharacterClassWithLadder, ClassProgression};

const COLUMNS: &str = "id, name, created_at, updated_at";

const PROGRESSION_COLUMNS: &str = "id, character_class_id, tier, min_xp, created_at, updated_at";

pub struct CharacterClassRepo;

impl CharacterClassRepo {
    /// List all classes ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<CharacterClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM character_classes ORDER BY id ASC");
        sqlx::query_as::<_, CharacterClass>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CharacterClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM character_classes WHERE id = $1");
        sqlx::query_as::<_, CharacterClass>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a class by its exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CharacterClass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM character_classes WHERE name = $1");
        sqlx::query_as::<_, CharacterClass>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// The ladder of one class, in insertion order.
    pub async fn list_progressions(
        pool: &PgPool,
        character_class_id: DbId,
    ) -> Result<Vec<ClassProgression>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESSION_COLUMNS} FROM class_progressions
             WHERE character_class_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ClassProgression>(&query)
            .bind(character_class_id)
            .fetch_all(pool)
            .await
    }

    /// All classes with their ladders attached.
    pub async fn list_with_ladders(
        pool: &PgPool,
    ) -> Result<Vec<CharacterClassWithLadder>, sqlx::Error> {
        let classes = Self::list(pool).await?;

        let query = format!("SELECT {PROGRESSION_COLUMNS} FROM class_progressions ORDER BY id ASC");
        let progressions = sqlx::query_as::<_, ClassProgression>(&query)
            .fetch_all(pool)
            .await?;

        Ok(classes
            .into_iter()
            .map(|class| CharacterClassWithLadder {
                progressions: progressions
                    .iter()
                    .filter(|p| p.character_class_id == class.id)
                    .cloned()
                    .collect(),
                id: class.id,
                name: class.name,
            })
            .collect())
    }
}
