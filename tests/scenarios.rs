//! End-to-end scenarios across the public API
//!
//! Each test drives a sim the way a host engine would: one temperature
//! sample per tick, reacting only to the returned reports.

use frostwork::{
    stat_multiplier, AppearanceState, AttributeKind, EquipmentSim, EquipmentSpec, IntegrityFloor,
    QualityTier, SimConfig, Snapshot, StatCurve,
};

fn every_tick(mut config: SimConfig) -> SimConfig {
    config.update_interval = 1;
    config
}

fn armor(base: f64) -> EquipmentSpec {
    EquipmentSpec::new("ice plate")
        .with_attribute(AttributeKind::ArmorSharp, base)
        .with_integrity(100)
}

#[test]
fn armor_converges_to_double_at_reinforced_threshold() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();

    // hold exactly at the reinforced threshold
    for _ in 0..100 {
        sim.tick(&(-20.0));
    }

    let current = sim.attributes()[0].current();
    assert!(
        (current - 20.0).abs() < 0.01,
        "expected convergence to 20, got {current}"
    );
    assert_eq!(sim.appearance(), AppearanceState::Reinforced);
}

#[test]
fn integrity_melts_to_floor_and_holds() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();

    let mut last = sim.integrity().current();
    let mut commits = 0u32;
    for _ in 0..30_000 {
        let report = sim.tick(&10.0);
        let now = sim.integrity().current();
        assert!(now <= last, "integrity rose while melting: {last} -> {now}");
        if report.integrity_delta != 0 {
            assert!(report.integrity_delta < 0);
            commits += 1;
        }
        last = now;
    }

    assert_eq!(sim.integrity().current(), 1, "should rest at the floor");
    assert_eq!(commits, 99, "one commit per whole unit lost");

    // pinned at the floor: further heat changes nothing
    for _ in 0..5_000 {
        let report = sim.tick(&10.0);
        assert_eq!(report.integrity_delta, 0);
    }
    assert_eq!(sim.integrity().current(), 1);
}

#[test]
fn destruction_policy_melts_to_zero() {
    let mut config = every_tick(SimConfig::classic());
    config.integrity.floor = IntegrityFloor::AllowDestruction;
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();

    for _ in 0..30_000 {
        sim.tick(&10.0);
    }
    assert_eq!(sim.integrity().current(), 0);
}

#[test]
fn alternating_temperatures_never_grow_the_carry() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();
    sim.set_integrity(50);

    for i in 0..20_000 {
        let t = if i % 2 == 0 { 5.0 } else { -5.0 };
        sim.tick(&t);
        assert!(
            sim.integrity().carry().abs() < 1.0,
            "carry ran away after {i} ticks: {}",
            sim.integrity().carry()
        );
    }
}

#[test]
fn neutral_temperature_holds_everything() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();
    sim.set_integrity(60);

    // accrue some pending melt first
    for _ in 0..100 {
        sim.tick(&8.0);
    }

    let report = sim.tick(&0.0);
    assert!(report.evaluated);
    assert_eq!(report.integrity_delta, 0);
    assert_eq!(sim.integrity().carry(), 0.0);
    assert!((report.multiplier - 1.0).abs() < f64::EPSILON);

    // and the cleared carry stays cleared
    for _ in 0..100 {
        let report = sim.tick(&0.0);
        assert_eq!(report.integrity_delta, 0);
        assert_eq!(sim.integrity().carry(), 0.0);
    }
}

#[test]
fn warm_temperatures_are_always_neutral_for_stats() {
    let curve = StatCurve::classic();
    let mut t = 0.0;
    while t <= 60.0 {
        assert_eq!(stat_multiplier(t, &curve), 1.0, "at {t}");
        t += 0.5;
    }
}

#[test]
fn attributes_never_exceed_the_absolute_cap() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();

    for _ in 0..10_000 {
        sim.tick(&(-200.0));
        assert!(sim.attributes()[0].current() <= 30.0 + 1e-9);
    }
    assert!((sim.attributes()[0].current() - 30.0).abs() < 0.01);
}

#[test]
fn converged_state_is_idempotent() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();

    for _ in 0..2_000 {
        sim.tick(&(-20.0));
    }
    let settled_attr = sim.attributes()[0].clone();
    let settled_integrity = sim.integrity().clone();

    for _ in 0..500 {
        let report = sim.tick(&(-20.0));
        assert!(!report.appearance_changed);
        assert_eq!(report.integrity_delta, 0);
    }
    assert_eq!(sim.attributes()[0], settled_attr);
    assert_eq!(*sim.integrity(), settled_integrity);
}

#[test]
fn cadence_folding_matches_per_tick_evaluation() {
    // one sim evaluated every tick, one every 60 ticks via the counter
    let mut fine = EquipmentSim::new(&armor(10.0), every_tick(SimConfig::classic())).unwrap();
    let mut coarse = EquipmentSim::new(&armor(10.0), SimConfig::classic()).unwrap();
    fine.set_integrity(80);
    coarse.set_integrity(80);

    let mut fine_delta = 0i64;
    let mut coarse_delta = 0i64;
    for _ in 0..6_000 {
        fine_delta += fine.tick(&7.0).integrity_delta;
        coarse_delta += coarse.tick(&7.0).integrity_delta;
    }

    assert_eq!(fine_delta, coarse_delta);
    assert_eq!(fine.integrity().current(), coarse.integrity().current());
    assert!((fine.integrity().carry() - coarse.integrity().carry()).abs() < 1e-6);
}

#[test]
fn fade_is_slower_than_gain() {
    let config = every_tick(SimConfig::classic());
    let mut sim = EquipmentSim::new(&armor(10.0), config).unwrap();

    let mut gain_ticks = 0;
    while sim.attributes()[0].current() < 20.0 - 0.01 {
        sim.tick(&(-20.0));
        gain_ticks += 1;
        assert!(gain_ticks < 10_000);
    }

    let mut fade_ticks = 0;
    while sim.attributes()[0].current() > 10.0 + 0.01 {
        sim.tick(&5.0);
        fade_ticks += 1;
        assert!(fade_ticks < 10_000);
    }

    assert!(
        fade_ticks > gain_ticks,
        "fade ({fade_ticks} ticks) should take longer than gain ({gain_ticks} ticks)"
    );
}

#[test]
fn outlook_projects_direction_of_change() {
    use frostwork::IntegrityOutlook;

    let mut sim = EquipmentSim::new(&armor(10.0), every_tick(SimConfig::classic())).unwrap();
    match sim.outlook(10.0) {
        IntegrityOutlook::Melting {
            per_hour,
            ticks_to_floor,
        } => {
            assert!(per_hour > 0.0);
            assert!(ticks_to_floor > 0);
        }
        other => panic!("expected melting, got {other:?}"),
    }

    sim.set_integrity(50);
    assert!(matches!(
        sim.outlook(-10.0),
        IntegrityOutlook::Regenerating { .. }
    ));
    assert!(matches!(sim.outlook(0.0), IntegrityOutlook::Stable));
}

#[test]
fn save_reload_resumes_mid_convergence() {
    use tempfile::tempdir;

    let spec = EquipmentSpec::new("rime blade")
        .with_attribute(AttributeKind::ArmorBlunt, 8.0)
        .with_quantized_attribute(AttributeKind::FrostDamage, 6.0, 1.0)
        .with_integrity(150)
        .with_quality(QualityTier::Masterwork);
    let config = every_tick(SimConfig::classic());

    let mut sim = EquipmentSim::new(&spec, config.clone()).unwrap();
    sim.set_integrity(90);
    // stop mid-convergence so carries are interesting
    for _ in 0..23 {
        sim.tick(&(-17.3));
    }

    let dir = tempdir().unwrap();
    let path = dir.path().join("rime_blade.json");
    sim.snapshot().save(&path).unwrap();

    let loaded = Snapshot::load(&path).unwrap();
    let mut restored =
        EquipmentSim::restore(&spec, config, &loaded, sim.integrity().current()).unwrap();
    restored.reevaluate(&(-17.3));
    sim.reevaluate(&(-17.3));

    assert_eq!(restored.appearance(), sim.appearance());
    for (a, b) in restored.attributes().iter().zip(sim.attributes()) {
        assert_eq!(a.current(), b.current(), "{:?} diverged", a.kind());
        assert_eq!(a.carry(), b.carry());
    }
    assert_eq!(restored.integrity().current(), sim.integrity().current());

    // both copies keep evolving identically
    for _ in 0..500 {
        let a = restored.tick(&(-17.3));
        let b = sim.tick(&(-17.3));
        assert_eq!(a.integrity_delta, b.integrity_delta);
    }
    assert_eq!(
        restored.attributes()[0].current(),
        sim.attributes()[0].current()
    );
}
