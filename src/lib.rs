//! # Frostwork
//!
//! A temperature-reactive equipment simulation engine: objects gain and
//! lose power with ambient cold, melt in heat, knit themselves back
//! together in frost, and change their look when they cross thresholds —
//! gradually, tick by tick, never snapping.
//!
//! ## Core Concept
//!
//! Every effect is driven by one ambient temperature reading per tick and
//! evolves through bounded incremental convergence:
//!
//! | Component | Behavior |
//! |-----------|----------|
//! | **Stat curve** | 1× at or above 0 °C, fast logarithmic gains just below freezing, decelerating toward an absolute cap in deep cold |
//! | **Tracked attributes** | converge toward `base × multiplier` by a bounded per-tick step; gain fast, fade slow; fractional carry for whole-unit stats |
//! | **Integrity** | melts above 0 °C and regenerates below, accruing fractions in a signed carry and committing whole units clamped to `[floor, max]` |
//! | **Appearance** | `Normal` / `Reinforced` / `Damaged`, re-derived every evaluation; only true transitions signal the host |
//!
//! 0 °C is the exact three-way branch point: positive melts, negative
//! strengthens, zero holds and clears pending fractions.
//!
//! ## Appearance States
//!
//! | State | Condition |
//! |-------|-----------|
//! | **Reinforced** | at or below the reinforced point and an attribute has converged to its reinforced cap |
//! | **Damaged** | above the melt point and under half integrity |
//! | **Normal** | everything else |
//!
//! ## Features
//!
//! - **Cadence covariance** — evaluations fold the elapsed tick count, so a
//!   60-tick interval and a 1-tick interval produce the same effective rates
//! - **No-op failure** — unresolvable or non-finite temperature samples skip
//!   the tick entirely; nothing in the tick path can fail or poison a carry
//! - **Forgiving persistence** — snapshots restore verbatim, and a snapshot
//!   that no longer fits the live definition is discarded in favor of
//!   re-derived base state rather than crashing
//! - **Config presets** — every threshold, cap, and rate is data; presets
//!   bundle known-good sets (`classic`, `glacial`, `volatile`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use frostwork::{AttributeKind, EquipmentSim, EquipmentSpec, QualityTier, SimConfig};
//!
//! # fn main() -> frostwork::Result<()> {
//! let spec = EquipmentSpec::new("ice plate")
//!     .with_attribute(AttributeKind::ArmorSharp, 10.0)
//!     .with_quantized_attribute(AttributeKind::FrostDamage, 5.0, 1.0)
//!     .with_integrity(120)
//!     .with_quality(QualityTier::Excellent);
//!
//! let mut sim = EquipmentSim::new(&spec, SimConfig::classic())?;
//!
//! // each engine tick: resolve a temperature, tick the sim, react
//! let report = sim.tick(&(-21.5));
//! if report.appearance_changed {
//!     // request a visual refresh from the host renderer
//! }
//! // apply the proposed durability change to host-owned storage
//! let _delta = report.integrity_delta;
//!
//! // save / reload without discontinuity
//! let saved = sim.snapshot().to_json()?;
//! let snapshot = frostwork::Snapshot::from_json(&saved)?;
//! let mut restored = EquipmentSim::restore(&spec, SimConfig::classic(), &snapshot, 120)?;
//! restored.reevaluate(&(-21.5)); // never show stale visuals after a load
//! # Ok(())
//! # }
//! ```

pub mod appearance;
pub mod attribute;
pub mod config;
pub mod curve;
pub mod equipment;
pub mod error;
pub mod integrity;
pub mod snapshot;

// Re-exports
pub use crate::appearance::AppearanceState;
pub use crate::attribute::{AttributeKind, TrackedAttribute};
pub use crate::config::{
    ConvergenceConfig, IntegrityConfig, IntegrityFloor, RateCurve, RateScale, SimConfig,
    StatCurve,
};
pub use crate::curve::{rate_multiplier, stat_multiplier};
pub use crate::equipment::{
    AttributeReading, AttributeSpec, EquipmentSim, EquipmentSpec, EquipmentStats, QualityTier,
    TemperatureSource, TickReport,
};
pub use crate::error::{Error, Result};
pub use crate::integrity::{IntegrityOutlook, IntegrityState};
pub use crate::snapshot::{SavedAttribute, Snapshot};
