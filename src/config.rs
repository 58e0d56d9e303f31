//! Simulation configuration — every balance lever as data
//!
//! The curve thresholds, caps, rate constants, convergence step sizing, and
//! update cadence are the primary balance levers of the engine, so none of
//! them are hard-coded. Each component reads its own config struct; presets
//! bundle known-good constant sets.
//!
//! All validation happens up front in [`SimConfig::validate`] — a bad cap or
//! an inverted threshold fails at construction time, never mid-tick.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape of the stat-scaling multiplier curve.
///
/// Above `melt_point` the multiplier is exactly 1.0. Cooling from
/// `melt_point` to `reinforced_point` rises along a logarithmic ease-in to
/// `reinforced_cap`; from `reinforced_point` to `floor_point` it keeps
/// rising toward `max_cap` with decelerating gains, and holds there below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCurve {
    /// Neutral boundary (°C). At or above this the multiplier is 1.0.
    pub melt_point: f64,

    /// Temperature at which the curve reaches `reinforced_cap`.
    pub reinforced_point: f64,

    /// Temperature at which the curve reaches `max_cap`; colder holds the cap.
    pub floor_point: f64,

    /// Multiplier at `reinforced_point`.
    pub reinforced_cap: f64,

    /// Absolute multiplier ceiling.
    pub max_cap: f64,
}

impl Default for StatCurve {
    fn default() -> Self {
        Self::classic()
    }
}

impl StatCurve {
    /// The classic constant set: 0 / −20 / −30 °C, 2× / 3× caps.
    pub fn classic() -> Self {
        Self {
            melt_point: 0.0,
            reinforced_point: -20.0,
            floor_point: -30.0,
            reinforced_cap: 2.0,
            max_cap: 3.0,
        }
    }

    /// Deep-cold tuning: the reinforced band sits much lower, rewarding
    /// sustained exposure instead of a light frost.
    pub fn glacial() -> Self {
        Self {
            melt_point: 0.0,
            reinforced_point: -40.0,
            floor_point: -60.0,
            reinforced_cap: 2.0,
            max_cap: 4.0,
        }
    }

    /// Twitchy tuning: caps arrive within a few degrees of freezing.
    pub fn volatile() -> Self {
        Self {
            melt_point: 0.0,
            reinforced_point: -5.0,
            floor_point: -10.0,
            reinforced_cap: 1.5,
            max_cap: 2.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("melt_point", self.melt_point),
            ("reinforced_point", self.reinforced_point),
            ("floor_point", self.floor_point),
            ("reinforced_cap", self.reinforced_cap),
            ("max_cap", self.max_cap),
        ] {
            if !v.is_finite() {
                return Err(Error::Config(format!("stat curve {name} is not finite")));
            }
        }
        if self.reinforced_point >= self.melt_point {
            return Err(Error::Config(format!(
                "reinforced_point {} must lie below melt_point {}",
                self.reinforced_point, self.melt_point
            )));
        }
        if self.floor_point >= self.reinforced_point {
            return Err(Error::Config(format!(
                "floor_point {} must lie below reinforced_point {}",
                self.floor_point, self.reinforced_point
            )));
        }
        if self.reinforced_cap < 1.0 {
            return Err(Error::Config(format!(
                "reinforced_cap {} must be at least 1.0",
                self.reinforced_cap
            )));
        }
        if self.max_cap < self.reinforced_cap {
            return Err(Error::Config(format!(
                "max_cap {} must be at least reinforced_cap {}",
                self.max_cap, self.reinforced_cap
            )));
        }
        Ok(())
    }
}

/// Scaling family for the integrity rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RateScale {
    /// Straight line from 1.0 to the cap.
    #[default]
    Linear,
    /// Logarithmic ease-in: most of the speedup arrives shortly below zero.
    Logarithmic,
}

/// Shape of the integrity-rate multiplier curve.
///
/// Scales melt/regen speed: 1.0 at or above 0 °C, rising to `cap` at
/// `reference_point` and holding beyond. Kept separate from [`StatCurve`] so
/// the integrity integrator sees a smooth bounded rate even where the stat
/// curve is tuned to feel twitchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCurve {
    /// Temperature (°C) at which the rate multiplier reaches `cap`.
    pub reference_point: f64,

    /// Rate multiplier ceiling.
    pub cap: f64,

    pub scale: RateScale,
}

impl Default for RateCurve {
    fn default() -> Self {
        Self::classic()
    }
}

impl RateCurve {
    /// The classic set: linear 1×→2× over 0…−20 °C.
    pub fn classic() -> Self {
        Self {
            reference_point: -20.0,
            cap: 2.0,
            scale: RateScale::Linear,
        }
    }

    /// Log-scaled variant of the classic set.
    pub fn logarithmic() -> Self {
        Self {
            scale: RateScale::Logarithmic,
            ..Self::classic()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.reference_point.is_finite() || !self.cap.is_finite() {
            return Err(Error::Config("rate curve bound is not finite".into()));
        }
        if self.reference_point >= 0.0 {
            return Err(Error::Config(format!(
                "rate curve reference_point {} must be below zero",
                self.reference_point
            )));
        }
        if self.cap < 1.0 {
            return Err(Error::Config(format!(
                "rate curve cap {} must be at least 1.0",
                self.cap
            )));
        }
        Ok(())
    }
}

/// Whether melting may destroy the object outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IntegrityFloor {
    /// Melt down to 1 point and stop; the object stays usable.
    #[default]
    PreserveItem,
    /// Melt all the way to 0.
    AllowDestruction,
}

impl IntegrityFloor {
    /// Lowest integrity value this policy permits.
    pub fn min_integrity(&self) -> u32 {
        match self {
            Self::PreserveItem => 1,
            Self::AllowDestruction => 0,
        }
    }
}

/// Melt and regeneration rate constants.
///
/// Rates are expressed per degree per hour against max integrity, then
/// divided down to per-tick amounts via `ticks_per_day`, matching how hosts
/// usually express balance numbers ("1% per hour per degree").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityConfig {
    /// Fraction of max integrity melted per hour per degree above zero.
    pub hourly_melt_rate_per_degree: f64,

    /// Fraction of max integrity regenerated per hour per degree below zero.
    pub hourly_regen_rate_per_degree: f64,

    /// Simulation ticks per in-world day.
    pub ticks_per_day: f64,

    pub floor: IntegrityFloor,

    /// Quality factor applied when the object has no quality tier.
    pub default_quality_factor: f64,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl IntegrityConfig {
    /// The classic set: 1%/h/°C melt, 0.5%/h/°C regen, 60 000 ticks per day.
    pub fn classic() -> Self {
        Self {
            hourly_melt_rate_per_degree: 0.01,
            hourly_regen_rate_per_degree: 0.005,
            ticks_per_day: 60_000.0,
            floor: IntegrityFloor::PreserveItem,
            default_quality_factor: 2.0,
        }
    }

    /// Slow-burn tuning for long campaigns.
    pub fn glacial() -> Self {
        Self {
            hourly_melt_rate_per_degree: 0.002,
            hourly_regen_rate_per_degree: 0.001,
            ..Self::classic()
        }
    }

    /// Fast tuning: noticeable melt within minutes of warm exposure.
    pub fn volatile() -> Self {
        Self {
            hourly_melt_rate_per_degree: 0.05,
            hourly_regen_rate_per_degree: 0.025,
            ..Self::classic()
        }
    }

    /// Melt accrual per tick per degree, as a fraction of max integrity.
    pub fn melt_per_tick_per_degree(&self) -> f64 {
        self.hourly_melt_rate_per_degree * 24.0 / self.ticks_per_day
    }

    /// Regen accrual per tick per degree, as a fraction of max integrity.
    pub fn regen_per_tick_per_degree(&self) -> f64 {
        self.hourly_regen_rate_per_degree * 24.0 / self.ticks_per_day
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("hourly_melt_rate_per_degree", self.hourly_melt_rate_per_degree),
            ("hourly_regen_rate_per_degree", self.hourly_regen_rate_per_degree),
            ("default_quality_factor", self.default_quality_factor),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::Config(format!(
                    "integrity {name} must be finite and non-negative"
                )));
            }
        }
        if !self.ticks_per_day.is_finite() || self.ticks_per_day < 1.0 {
            return Err(Error::Config(format!(
                "ticks_per_day {} must be at least 1",
                self.ticks_per_day
            )));
        }
        Ok(())
    }
}

/// Step sizing for attribute convergence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    /// Fraction of `base × multiplier` moved per tick when strengthening.
    pub step_fraction: f64,

    /// How much of the multiplier carries into the fade step. 0 = fade at the
    /// plain base rate, 1 = fade as fast as the gain. The 0.5 default makes
    /// stats gain quickly under cold and let go slowly on warming, which keeps
    /// them from flickering when temperature oscillates around a threshold.
    pub fade_damping: f64,

    /// Convergence dead zone: inside this distance of the target, no step.
    pub epsilon: f64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            step_fraction: 0.01,
            fade_damping: 0.5,
            epsilon: 0.01,
        }
    }
}

impl ConvergenceConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.step_fraction.is_finite()
            || self.step_fraction <= 0.0
            || self.step_fraction > 1.0
        {
            return Err(Error::Config(format!(
                "step_fraction {} must be in (0, 1]",
                self.step_fraction
            )));
        }
        if !self.fade_damping.is_finite() || !(0.0..=1.0).contains(&self.fade_damping) {
            return Err(Error::Config(format!(
                "fade_damping {} must be in [0, 1]",
                self.fade_damping
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::Config(format!(
                "epsilon {} must be positive",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub stat_curve: StatCurve,
    pub rate_curve: RateCurve,
    pub integrity: IntegrityConfig,
    pub convergence: ConvergenceConfig,

    /// Engine ticks between evaluations. The elapsed count is folded into
    /// each evaluation, so a larger interval trades responsiveness for work
    /// without changing effective rates.
    pub update_interval: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl SimConfig {
    /// Classic constant set throughout, evaluating every 60 ticks.
    pub fn classic() -> Self {
        Self {
            stat_curve: StatCurve::classic(),
            rate_curve: RateCurve::classic(),
            integrity: IntegrityConfig::classic(),
            convergence: ConvergenceConfig::default(),
            update_interval: 60,
        }
    }

    /// Slow, deep-cold tuning.
    pub fn glacial() -> Self {
        Self {
            stat_curve: StatCurve::glacial(),
            rate_curve: RateCurve::logarithmic(),
            integrity: IntegrityConfig::glacial(),
            convergence: ConvergenceConfig {
                step_fraction: 0.005,
                ..ConvergenceConfig::default()
            },
            update_interval: 120,
        }
    }

    /// Fast, responsive tuning, evaluating every tick.
    pub fn volatile() -> Self {
        Self {
            stat_curve: StatCurve::volatile(),
            rate_curve: RateCurve::classic(),
            integrity: IntegrityConfig::volatile(),
            convergence: ConvergenceConfig {
                step_fraction: 0.02,
                ..ConvergenceConfig::default()
            },
            update_interval: 1,
        }
    }

    /// Validate every section. Called by `EquipmentSim::new`; misconfiguration
    /// fails here rather than surfacing mid-tick.
    pub fn validate(&self) -> Result<()> {
        self.stat_curve.validate()?;
        self.rate_curve.validate()?;
        self.integrity.validate()?;
        self.convergence.validate()?;
        if self.update_interval == 0 {
            return Err(Error::Config("update_interval must be at least 1".into()));
        }
        Ok(())
    }
}
