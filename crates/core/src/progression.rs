//! Class progression ladders and tier resolution.
//!
//! Every character class owns a ladder of rungs, each pairing a tier label
//! with the minimum experience needed to hold it. An adventurer's displayed
//! tier is the label of the highest rung their experience reaches.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Xp;

/// Tier shown when no rung of the ladder qualifies (empty ladder, or the
/// experience sits below the lowest threshold).
pub const UNRANKED_TIER: &str = "Tarnished";

/// Maximum length of a tier label (characters).
pub const MAX_TIER_LENGTH: usize = 30;

/// Anything that can act as one rung of a progression ladder.
///
/// Implemented by [`Progression`] and by the `class_progressions` row type
/// in the db crate, so both resolve through the same function.
pub trait TierRung {
    fn tier(&self) -> &str;
    fn min_xp(&self) -> Xp;
}

/// A plain (tier, threshold) rung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub tier: String,
    pub min_xp: Xp,
}

impl Progression {
    pub fn new(tier: impl Into<String>, min_xp: Xp) -> Self {
        Self {
            tier: tier.into(),
            min_xp,
        }
    }
}

impl TierRung for Progression {
    fn tier(&self) -> &str {
        &self.tier
    }

    fn min_xp(&self) -> Xp {
        self.min_xp
    }
}

/// Resolve the tier label for `xp` against a class ladder.
///
/// Returns the label of the rung with the highest `min_xp` that is `<= xp`,
/// or [`UNRANKED_TIER`] when nothing qualifies. Ladder order does not
/// matter. Thresholds must be unique per class; which label wins on a
/// duplicated threshold is not defined.
pub fn resolve_tier<R: TierRung>(xp: Xp, ladder: &[R]) -> &str {
    ladder
        .iter()
        .filter(|rung| rung.min_xp() <= xp)
        .max_by_key(|rung| rung.min_xp())
        .map_or(UNRANKED_TIER, |rung| rung.tier())
}

/// Check that a ladder is well formed: non-negative, unique thresholds,
/// one of which is zero, and tier labels within length bounds.
pub fn validate_ladder<R: TierRung>(ladder: &[R]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(ladder.len());

    for rung in ladder {
        if rung.min_xp() < 0 {
            return Err(CoreError::Validation(format!(
                "min_xp must be non-negative, got {} for tier '{}'",
                rung.min_xp(),
                rung.tier()
            )));
        }
        let len = rung.tier().chars().count();
        if len == 0 || len > MAX_TIER_LENGTH {
            return Err(CoreError::Validation(format!(
                "tier must be 1 to {MAX_TIER_LENGTH} characters, got {len}"
            )));
        }
        if !seen.insert(rung.min_xp()) {
            return Err(CoreError::Validation(format!(
                "duplicate min_xp threshold {}",
                rung.min_xp()
            )));
        }
    }

    if !seen.contains(&0) {
        return Err(CoreError::Validation(
            "ladder must contain a rung with min_xp 0".to_string(),
        ));
    }
    Ok(())
}
