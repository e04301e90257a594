//! Character class and progression ladder models.

use questlog_core::progression::TierRung;
use questlog_core::types::{DbId, Timestamp, Xp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `character_classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterClass {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `class_progressions` table: one rung of a class ladder.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassProgression {
    pub id: DbId,
    pub character_class_id: DbId,
    pub tier: String,
    pub min_xp: Xp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TierRung for ClassProgression {
    fn tier(&self) -> &str {
        &self.tier
    }

    fn min_xp(&self) -> Xp {
        self.min_xp
    }
}

/// A class together with its ladder, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterClassWithLadder {
    pub id: DbId,
    pub name: String,
    pub progressions: Vec<ClassProgression>,
}
