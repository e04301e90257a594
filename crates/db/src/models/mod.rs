//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs where the entity is writable

pub mod adventurer;
pub mod character_class;
pub mod quest;
pub mod user;
