//! Domain rules for the QuestLog backend.
//!
//! Nothing in this crate touches the database or HTTP. The `db` crate
//! persists what these functions decide and the `api` crate exposes it.

pub mod error;
pub mod progression;
pub mod quest;
pub mod types;
pub mod validation;
