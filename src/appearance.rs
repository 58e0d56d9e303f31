//! Appearance classification
//!
//! A small closed set of display states derived from the converged attribute
//! values and integrity — never authoritative state of its own. The
//! aggregate re-derives it every evaluation and compares against the stored
//! previous value; only an actual transition should trigger host-side work.
//!
//! Because the classifier reads the *converged* values rather than raw
//! temperature, the slow fade built into attribute convergence acts as
//! hysteresis: a brief warm spike does not immediately strip the reinforced
//! look.

use serde::{Deserialize, Serialize};

use crate::attribute::TrackedAttribute;
use crate::config::StatCurve;
use crate::integrity::IntegrityState;

/// Integrity fraction below which a warm object reads as damaged.
const DAMAGED_FRACTION: f64 = 0.5;

/// Display classification of a simulated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AppearanceState {
    #[default]
    Normal,
    /// Cold-hardened: attributes have converged to the reinforced cap.
    Reinforced,
    /// Warm and below half integrity.
    Damaged,
}

impl AppearanceState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Reinforced => "reinforced",
            Self::Damaged => "damaged",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Normal, Self::Reinforced, Self::Damaged]
    }
}

/// Classify the object. Evaluated in priority order, first match wins:
///
/// 1. `Reinforced` — at or below the reinforced point *and* at least one
///    attribute has actually converged to its reinforced cap (cold alone is
///    not enough; the look follows the stats).
/// 2. `Damaged` — above the melt point and under half integrity.
/// 3. `Normal` — everything else.
pub fn classify(
    temperature: f64,
    attributes: &[TrackedAttribute],
    integrity: &IntegrityState,
    curve: &StatCurve,
) -> AppearanceState {
    if !temperature.is_finite() {
        return AppearanceState::Normal;
    }

    let reinforced = temperature <= curve.reinforced_point
        && attributes.iter().any(|a| a.reached(curve.reinforced_cap));
    if reinforced {
        AppearanceState::Reinforced
    } else if temperature > curve.melt_point
        && integrity.fraction() < DAMAGED_FRACTION
    {
        AppearanceState::Damaged
    } else {
        AppearanceState::Normal
    }
}
