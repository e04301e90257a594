pub mod adventurer;
pub mod auth;
pub mod character_class;
pub mod quest;
