//! Equipment simulation aggregate
//!
//! [`EquipmentSim`] owns the full per-object simulation state: the tracked
//! attribute arena, the integrity accumulator, the current appearance
//! classification, and the cadence counter. The host drives it with one
//! [`tick`](EquipmentSim::tick) call per engine tick and reacts to the
//! returned [`TickReport`]:
//!
//! - apply `integrity_delta` to the host's own durability storage;
//! - request a visual refresh iff `appearance_changed` (re-reporting the
//!   same state never sets the flag, so refreshes are transition-only).
//!
//! The core performs no discovery, no scheduling, and no rendering. Which
//! objects participate is the host's call — typically a cached predicate
//! over the static definition, evaluated once before constructing the sim.
//!
//! ## Cadence
//!
//! `tick` evaluates every `update_interval` calls and folds the elapsed
//! count into one pass, so effective rates are independent of the interval.
//! Hosts that rate-limit externally call [`step`](EquipmentSim::step) with
//! an explicit elapsed-step count instead. Per object, calls must be
//! ordered; the engine holds no locks and never blocks.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::appearance::{classify, AppearanceState};
use crate::attribute::{AttributeKind, TrackedAttribute};
use crate::config::SimConfig;
use crate::curve::stat_multiplier;
use crate::error::{Error, Result};
use crate::integrity::{IntegrityOutlook, IntegrityState};

/// Resolves the ambient temperature at an object's current location.
///
/// Pure query, no side effects. `None` means the object is not currently
/// anywhere with a sensible reading (mid-transfer, despawned); the sim
/// skips every effect for that tick without touching any state.
pub trait TemperatureSource {
    fn ambient_temperature(&self) -> Option<f64>;
}

impl TemperatureSource for f64 {
    fn ambient_temperature(&self) -> Option<f64> {
        Some(*self)
    }
}

impl TemperatureSource for Option<f64> {
    fn ambient_temperature(&self) -> Option<f64> {
        *self
    }
}

/// Manufacture quality tier. Better-made objects knit themselves back
/// together faster in the cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    Awful,
    Poor,
    Normal,
    Good,
    Excellent,
    Masterwork,
    Legendary,
}

impl QualityTier {
    /// Regeneration speed multiplier for this tier.
    pub fn recovery_factor(&self) -> f64 {
        match self {
            Self::Awful => 1.0,
            Self::Poor => 1.5,
            Self::Normal => 2.0,
            Self::Good => 3.0,
            Self::Excellent => 5.0,
            Self::Masterwork => 8.0,
            Self::Legendary => 15.0,
        }
    }
}

/// One tracked stat in a spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub kind: AttributeKind,
    pub base: f64,
    /// Commit granularity; 0 = continuous. See
    /// [`TrackedAttribute`](crate::attribute::TrackedAttribute).
    pub resolution: f64,
}

/// Static description of a piece of equipment, captured exactly once when
/// the sim is constructed. The sim never reaches back into host objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    pub label: String,
    pub attributes: Vec<AttributeSpec>,
    pub max_integrity: u32,
    pub quality: Option<QualityTier>,
}

impl EquipmentSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attributes: Vec::new(),
            max_integrity: 0,
            quality: None,
        }
    }

    pub fn with_attribute(mut self, kind: AttributeKind, base: f64) -> Self {
        self.attributes.push(AttributeSpec {
            kind,
            base,
            resolution: 0.0,
        });
        self
    }

    /// Track a whole-unit stat (e.g. a bonus damage entry).
    pub fn with_quantized_attribute(
        mut self,
        kind: AttributeKind,
        base: f64,
        resolution: f64,
    ) -> Self {
        self.attributes.push(AttributeSpec {
            kind,
            base,
            resolution,
        });
        self
    }

    pub fn with_integrity(mut self, max: u32) -> Self {
        self.max_integrity = max;
        self
    }

    pub fn with_quality(mut self, quality: QualityTier) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Default eligibility: a spec with nothing to simulate is skipped.
    /// Hosts usually wrap this with their own definition flag.
    pub fn is_reactive(&self) -> bool {
        !self.attributes.is_empty() || self.max_integrity > 0
    }

    pub fn validate(&self) -> Result<()> {
        for attr in &self.attributes {
            if !attr.base.is_finite() || attr.base <= 0.0 {
                return Err(Error::Config(format!(
                    "attribute {} base {} must be finite and positive",
                    attr.kind.name(),
                    attr.base
                )));
            }
            if !attr.resolution.is_finite() || attr.resolution < 0.0 {
                return Err(Error::Config(format!(
                    "attribute {} resolution {} must be finite and non-negative",
                    attr.kind.name(),
                    attr.resolution
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of one tick, for the host to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Whether an evaluation actually ran (false between cadence
    /// boundaries and on unresolvable/non-finite samples).
    pub evaluated: bool,

    pub appearance: AppearanceState,

    /// True only on an actual transition — the host's cue to request a
    /// visual refresh.
    pub appearance_changed: bool,

    /// Signed whole-unit integrity change committed this tick, for the
    /// host's own durability storage.
    pub integrity_delta: i64,

    /// Stat multiplier in effect at the evaluated temperature.
    pub multiplier: f64,
}

/// Observability snapshot of a sim (not the persistence format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentStats {
    pub id: Uuid,
    pub label: String,
    pub appearance: AppearanceState,
    pub multiplier: f64,
    pub attributes: Vec<AttributeReading>,
    pub integrity_current: u32,
    pub integrity_max: u32,
    pub integrity_carry: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeReading {
    pub kind: AttributeKind,
    pub base: f64,
    pub current: f64,
}

/// Per-object temperature-reactive simulation state.
#[derive(Debug, Clone)]
pub struct EquipmentSim {
    pub(crate) id: Uuid,
    pub(crate) label: String,
    pub(crate) config: SimConfig,
    pub(crate) attributes: Vec<TrackedAttribute>,
    pub(crate) integrity: IntegrityState,
    pub(crate) appearance: AppearanceState,
    pub(crate) quality_factor: f64,
    pub(crate) last_multiplier: f64,
    pub(crate) cadence_counter: u32,
}

impl EquipmentSim {
    /// Build a sim from a static spec. Fails fast on a bad config or spec;
    /// nothing in the tick path can fail afterwards.
    pub fn new(spec: &EquipmentSpec, config: SimConfig) -> Result<Self> {
        config.validate()?;
        spec.validate()?;

        let attributes = spec
            .attributes
            .iter()
            .map(|a| {
                if a.resolution > 0.0 {
                    TrackedAttribute::quantized(a.kind, a.base, a.resolution)
                } else {
                    TrackedAttribute::new(a.kind, a.base)
                }
            })
            .collect();

        let quality_factor = spec
            .quality
            .map(|q| q.recovery_factor())
            .unwrap_or(config.integrity.default_quality_factor);

        Ok(Self {
            id: Uuid::new_v4(),
            label: spec.label.clone(),
            attributes,
            integrity: IntegrityState::full(spec.max_integrity),
            appearance: AppearanceState::Normal,
            quality_factor,
            last_multiplier: 1.0,
            config,
            cadence_counter: 0,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn appearance(&self) -> AppearanceState {
        self.appearance
    }

    pub fn attributes(&self) -> &[TrackedAttribute] {
        &self.attributes
    }

    pub fn integrity(&self) -> &IntegrityState {
        &self.integrity
    }

    /// Stat multiplier from the most recent evaluation.
    pub fn multiplier(&self) -> f64 {
        self.last_multiplier
    }

    /// Resync integrity after host-side changes outside this mechanism.
    pub fn set_integrity(&mut self, current: u32) {
        self.integrity.set_current(current);
    }

    /// Per-engine-tick entry point. Counts toward the configured cadence
    /// and, on an evaluation boundary, folds the elapsed ticks into one
    /// pass. Between boundaries the temperature source is not even queried.
    pub fn tick<S: TemperatureSource>(&mut self, source: &S) -> TickReport {
        self.cadence_counter += 1;
        if self.cadence_counter < self.config.update_interval {
            return self.idle_report();
        }
        let steps = self.cadence_counter;
        self.cadence_counter = 0;
        self.evaluate(source, steps)
    }

    /// Explicit-cadence entry point for hosts that rate-limit externally:
    /// one evaluation folding `steps` elapsed engine ticks.
    pub fn step(&mut self, temperature: f64, steps: u32) -> TickReport {
        if steps == 0 {
            return self.idle_report();
        }
        if !temperature.is_finite() {
            warn!(
                id = %self.id,
                label = %self.label,
                temperature,
                "non-finite temperature sample rejected"
            );
            return self.idle_report();
        }

        let mult = stat_multiplier(temperature, &self.config.stat_curve);
        self.last_multiplier = mult;

        for attr in &mut self.attributes {
            attr.advance(mult, steps, &self.config.convergence);
        }

        let integrity_delta = self.integrity.tick(
            temperature,
            steps,
            self.quality_factor,
            &self.config.rate_curve,
            &self.config.integrity,
        );

        let next = classify(
            temperature,
            &self.attributes,
            &self.integrity,
            &self.config.stat_curve,
        );
        let appearance_changed = next != self.appearance;
        if appearance_changed {
            debug!(
                id = %self.id,
                label = %self.label,
                from = self.appearance.name(),
                to = next.name(),
                "appearance transition"
            );
            self.appearance = next;
        }

        TickReport {
            evaluated: true,
            appearance: self.appearance,
            appearance_changed,
            integrity_delta,
            multiplier: mult,
        }
    }

    /// One forced synchronous evaluation, bypassing the cadence counter.
    /// Run this immediately after a restore so the object is never shown
    /// with stale visuals until the next natural tick.
    pub fn reevaluate<S: TemperatureSource>(&mut self, source: &S) -> TickReport {
        self.cadence_counter = 0;
        self.evaluate(source, 1)
    }

    /// Project where integrity is heading at a held temperature.
    pub fn outlook(&self, temperature: f64) -> IntegrityOutlook {
        self.integrity.outlook(
            temperature,
            self.quality_factor,
            &self.config.rate_curve,
            &self.config.integrity,
        )
    }

    pub fn stats(&self) -> EquipmentStats {
        EquipmentStats {
            id: self.id,
            label: self.label.clone(),
            appearance: self.appearance,
            multiplier: self.last_multiplier,
            attributes: self
                .attributes
                .iter()
                .map(|a| AttributeReading {
                    kind: a.kind(),
                    base: a.base(),
                    current: a.current(),
                })
                .collect(),
            integrity_current: self.integrity.current(),
            integrity_max: self.integrity.max(),
            integrity_carry: self.integrity.carry(),
        }
    }

    fn evaluate<S: TemperatureSource>(&mut self, source: &S, steps: u32) -> TickReport {
        match source.ambient_temperature() {
            Some(t) => self.step(t, steps),
            None => self.idle_report(),
        }
    }

    fn idle_report(&self) -> TickReport {
        TickReport {
            evaluated: false,
            appearance: self.appearance,
            appearance_changed: false,
            integrity_delta: 0,
            multiplier: self.last_multiplier,
        }
    }
}
