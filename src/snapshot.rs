//! Persistence — the minimal state needed to resume without discontinuity
//!
//! A [`Snapshot`] carries the appearance classification, each attribute's
//! `{base, current, carry}`, and the integrity carry. Current integrity is
//! deliberately *not* duplicated: the host object model already persists
//! durability, and two authorities would drift.
//!
//! Restore is forgiving by contract. If the saved attribute list no longer
//! matches the live definition (the object changed between save and load),
//! the snapshot is discarded and state re-derives from the definition —
//! never an error, never a crash. Corrupted *encodings* are a different
//! matter: both the JSON and binary forms embed a SHA-256 digest that is
//! verified on decode, and a mismatch is reported so hosts can treat the
//! payload as absent.
//!
//! After a restore, run one forced
//! [`reevaluate`](crate::equipment::EquipmentSim::reevaluate) so the object
//! is not displayed with stale visuals until its next natural tick.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::appearance::AppearanceState;
use crate::attribute::{AttributeKind, TrackedAttribute};
use crate::config::SimConfig;
use crate::equipment::{EquipmentSim, EquipmentSpec};
use crate::error::{Error, Result};

/// Persisted per-attribute record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAttribute {
    pub kind: AttributeKind,
    pub base: f64,
    pub current: f64,
    pub carry: f64,
}

/// Minimal per-object resume state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub appearance: AppearanceState,
    pub attributes: Vec<SavedAttribute>,
    pub integrity_carry: f64,
    pub captured_at: DateTime<Utc>,
}

/// Digest-sealed wrapper shared by both encodings.
#[derive(Serialize, Deserialize)]
struct Sealed {
    digest: String,
    snapshot: Snapshot,
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    out.iter().map(|b| format!("{b:02x}")).collect()
}

impl Snapshot {
    fn seal(&self) -> Result<Sealed> {
        let body = serde_json::to_vec(self)?;
        Ok(Sealed {
            digest: hex_digest(&body),
            snapshot: self.clone(),
        })
    }

    fn unseal(sealed: Sealed) -> Result<Self> {
        let body = serde_json::to_vec(&sealed.snapshot)?;
        if hex_digest(&body) != sealed.digest {
            return Err(Error::SnapshotIntegrity(
                "snapshot digest does not match payload".into(),
            ));
        }
        Ok(sealed.snapshot)
    }

    /// Human-readable encoding.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.seal()?)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let sealed: Sealed =
            serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))?;
        Self::unseal(sealed)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.seal()?).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let sealed: Sealed = bincode::deserialize(bytes)?;
        Self::unseal(sealed)
    }

    /// Write the JSON encoding to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from a JSON file written by [`Snapshot::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Whether this snapshot still fits the live definition: same attribute
    /// count, same kind sequence, same base values, all scalars finite.
    pub fn matches(&self, spec: &EquipmentSpec) -> bool {
        if self.attributes.len() != spec.attributes.len() {
            return false;
        }
        if !self.integrity_carry.is_finite() {
            return false;
        }
        self.attributes.iter().zip(&spec.attributes).all(|(saved, live)| {
            saved.kind == live.kind
                && saved.base == live.base
                && saved.current.is_finite()
                && saved.carry.is_finite()
        })
    }
}

impl EquipmentSim {
    /// Capture the minimal resume state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            appearance: self.appearance,
            attributes: self
                .attributes
                .iter()
                .map(|a| SavedAttribute {
                    kind: a.kind(),
                    base: a.base(),
                    current: a.current(),
                    carry: a.carry(),
                })
                .collect(),
            integrity_carry: self.integrity.carry(),
            captured_at: Utc::now(),
        }
    }

    /// Rebuild a sim from the live definition plus a snapshot.
    ///
    /// `current_integrity` comes back from the host's own storage. A
    /// snapshot that no longer fits the definition is discarded: the sim
    /// re-derives `current = base, carry = 0` instead of failing.
    pub fn restore(
        spec: &EquipmentSpec,
        config: SimConfig,
        snapshot: &Snapshot,
        current_integrity: u32,
    ) -> Result<Self> {
        let mut sim = Self::new(spec, config)?;
        sim.set_integrity(current_integrity);

        if !snapshot.matches(spec) {
            debug!(
                label = %sim.label,
                "snapshot no longer fits the definition; re-deriving from base values"
            );
            return Ok(sim);
        }

        let max_cap = sim.config.stat_curve.max_cap;
        sim.attributes = snapshot
            .attributes
            .iter()
            .zip(&spec.attributes)
            .map(|(saved, live)| {
                // Convergence keeps current within [base, base × max_cap];
                // hold restored values to the same band.
                let current = saved.current.clamp(saved.base, saved.base * max_cap);
                TrackedAttribute::from_parts(
                    saved.kind,
                    saved.base,
                    current,
                    saved.carry,
                    live.resolution,
                )
            })
            .collect();
        sim.appearance = snapshot.appearance;
        // A carry at or beyond one whole unit would fire a phantom commit on
        // the first tick after load.
        sim.integrity
            .set_carry(snapshot.integrity_carry.clamp(-1.0, 1.0));

        Ok(sim)
    }
}
