//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod adventurer_repo;
pub mod character_class_repo;
pub mod quest_repo;
pub mod user_repo;

pub use adventurer_repo::AdventurerRepo;
pub use character_class_repo::CharacterClassRepo;
pub use quest_repo::QuestRepo;
pub use user_repo::UserRepo;
