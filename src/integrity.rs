//! Integrity melting and regeneration
//!
//! Integrity is a whole-number durability value. Heat melts it, cold heals
//! it, and both effects accrue fractionally between whole-unit commits in a
//! single signed carry: positive fractions are pending melt, negative are
//! pending regeneration. Opposite-direction ticks net against each other,
//! and an exact 0 °C reading clears the carry outright — a pending fraction
//! must never survive a neutral crossing and fire later at an unrelated
//! temperature.
//!
//! Commits are clamped to `[floor, max]`. With the default
//! [`IntegrityFloor::PreserveItem`](crate::config::IntegrityFloor) policy
//! the floor is 1, so melting alone never destroys the object.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{IntegrityConfig, RateCurve};
use crate::curve::rate_multiplier;

/// Whole-number integrity with a signed fractional carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityState {
    current: u32,
    max: u32,
    carry: f64,
}

/// Pure projection of where integrity is heading at a held temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegrityOutlook {
    /// No change pending: neutral temperature or already at the bound.
    Stable,
    Melting {
        /// Integrity lost per in-world hour.
        per_hour: f64,
        /// Ticks until the floor is reached at this rate.
        ticks_to_floor: u64,
    },
    Regenerating {
        /// Integrity recovered per in-world hour.
        per_hour: f64,
        /// Ticks until max is reached at this rate.
        ticks_to_full: u64,
    },
}

impl IntegrityState {
    pub fn new(max: u32, current: u32) -> Self {
        Self {
            current: current.min(max),
            max,
            carry: 0.0,
        }
    }

    pub fn full(max: u32) -> Self {
        Self::new(max, max)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Current integrity as a fraction of max.
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }

    /// Resync after host-side changes outside this mechanism (combat damage,
    /// workbench repair). Clamped to max; the carry is left untouched.
    pub fn set_current(&mut self, current: u32) {
        self.current = current.min(self.max);
    }

    pub(crate) fn set_carry(&mut self, carry: f64) {
        self.carry = carry;
    }

    /// Accrue `steps` ticks of melt or regeneration at `temperature` and
    /// commit any whole units. Returns the signed committed delta (negative
    /// = melted, positive = regenerated, 0 = still accruing).
    pub fn tick(
        &mut self,
        temperature: f64,
        steps: u32,
        quality_factor: f64,
        rate_curve: &RateCurve,
        cfg: &IntegrityConfig,
    ) -> i64 {
        if steps == 0 || !temperature.is_finite() || self.max == 0 {
            return 0;
        }

        let floor = cfg.floor.min_integrity();

        if temperature == 0.0 {
            self.carry = 0.0;
            return 0;
        }

        let per_step = if temperature > 0.0 {
            if self.current <= floor {
                // Nothing left to melt; a banked melt fraction is moot too.
                if self.carry > 0.0 {
                    self.carry = 0.0;
                }
                0.0
            } else {
                temperature * cfg.melt_per_tick_per_degree() * self.max as f64
            }
        } else if self.current >= self.max {
            if self.carry < 0.0 {
                self.carry = 0.0;
            }
            0.0
        } else {
            -(temperature.abs()
                * cfg.regen_per_tick_per_degree()
                * self.max as f64
                * rate_multiplier(temperature, rate_curve)
                * quality_factor)
        };

        self.carry += per_step * steps as f64;

        if self.carry >= 1.0 {
            let units = self.carry.floor();
            // saturating: a host may have resynced current below the floor
            let room = self.current.saturating_sub(floor) as f64;
            let commit = units.min(room);
            self.current -= commit as u32;
            if commit < units {
                // Floor absorbed the remainder.
                self.carry = 0.0;
            } else {
                self.carry -= commit;
            }
            debug!(
                delta = -(commit as i64),
                current = self.current,
                max = self.max,
                "integrity melt commit"
            );
            -(commit as i64)
        } else if self.carry <= -1.0 {
            let units = (-self.carry).floor();
            let room = (self.max - self.current) as f64;
            let commit = units.min(room);
            self.current += commit as u32;
            if commit < units {
                self.carry = 0.0;
            } else {
                self.carry += commit;
            }
            debug!(
                delta = commit as i64,
                current = self.current,
                max = self.max,
                "integrity regen commit"
            );
            commit as i64
        } else {
            0
        }
    }

    /// Project the direction and pace of change at a held `temperature`.
    pub fn outlook(
        &self,
        temperature: f64,
        quality_factor: f64,
        rate_curve: &RateCurve,
        cfg: &IntegrityConfig,
    ) -> IntegrityOutlook {
        if !temperature.is_finite() || temperature == 0.0 || self.max == 0 {
            return IntegrityOutlook::Stable;
        }

        let ticks_per_hour = cfg.ticks_per_day / 24.0;
        let floor = cfg.floor.min_integrity();

        if temperature > 0.0 {
            if self.current <= floor {
                return IntegrityOutlook::Stable;
            }
            let per_tick = temperature * cfg.melt_per_tick_per_degree() * self.max as f64;
            let remaining = (self.current - floor) as f64 - self.carry;
            IntegrityOutlook::Melting {
                per_hour: per_tick * ticks_per_hour,
                ticks_to_floor: (remaining / per_tick).ceil().max(0.0) as u64,
            }
        } else {
            if self.current >= self.max {
                return IntegrityOutlook::Stable;
            }
            let per_tick = temperature.abs()
                * cfg.regen_per_tick_per_degree()
                * self.max as f64
                * rate_multiplier(temperature, rate_curve)
                * quality_factor;
            let remaining = (self.max - self.current) as f64 + self.carry;
            IntegrityOutlook::Regenerating {
                per_hour: per_tick * ticks_per_hour,
                ticks_to_full: (remaining / per_tick).ceil().max(0.0) as u64,
            }
        }
    }
}
