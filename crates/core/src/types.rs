/// All database primary keys are PostgreSQL BIGSERIAL / BIGINT.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Experience points. Stored as `INTEGER` with a non-negative check, so an
/// adventurer's total is capped at `Xp::MAX`.
pub type Xp = i32;
