//! Clock Engine Integration Test
//!
//! Drives the engine through the host-facing scenarios:
//! - Pause/resume with re-anchoring on the next tick
//! - Device location rewriting slot 0
//! - Per-slot overrides surviving ticks until cleared
//! - Slot list bounds under arbitrary add/remove sequences

use chrono::{Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use worldclock_core::{CityRecord, LocationPermission, Timestamp};
use worldclock_engine::{ClockEngine, EngineConfig, MAX_SLOTS, MIN_SLOTS, RunState};
use worldclock_geo::{CityCatalog, GeoResolver, RandomCityPicker};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn t(seconds: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
}

fn two_city_engine() -> ClockEngine {
    let catalog = Arc::new(
        CityCatalog::new(vec![
            CityRecord::new("melbourne, australia", -37.8, 144.9, "Australia/Melbourne"),
            CityRecord::new("london, united kingdom", 51.5, -0.1, "Europe/London"),
        ])
        .unwrap(),
    );
    let picker = Box::new(RandomCityPicker::with_seed(&catalog, 7));
    ClockEngine::new(
        GeoResolver::new(catalog),
        picker,
        t(0),
        EngineConfig::default(),
    )
}

#[test]
fn test_pause_resume_reanchors() {
    init_logging();
    let mut engine = two_city_engine();
    assert!(engine.is_running());

    engine.advance(t(10));
    assert_eq!(engine.reference_timestamp(), t(10));

    assert_eq!(engine.toggle_running(), RunState::Paused);
    engine.advance(t(11));
    engine.advance(t(12));
    engine.advance(t(13));
    assert_eq!(engine.reference_timestamp(), t(10));

    assert_eq!(engine.toggle_running(), RunState::Running);
    engine.advance(t(500));

    // T1 itself, not T0 plus the paused interval
    assert_eq!(engine.reference_timestamp(), t(500));
}

#[test]
fn test_duplicate_ticks_are_idempotent() {
    let mut engine = two_city_engine();

    engine.advance(t(5));
    engine.advance(t(5));
    assert_eq!(engine.reference_timestamp(), t(5));
}

#[test]
fn test_device_location_scenario() {
    init_logging();
    let mut engine = two_city_engine();
    engine.set_slot_override(0, t(-3600)).unwrap();

    let key = engine.apply_device_location(51.5, -0.1).unwrap();

    assert_eq!(key.as_deref(), Some("london, united kingdom"));
    assert_eq!(engine.permission(), LocationPermission::Granted);
    assert_eq!(
        engine.slot(0).unwrap().location_key(),
        "london, united kingdom"
    );
    let first = engine.effective_time(0).unwrap();
    assert!(!first.is_override);
    assert_eq!(first.instant, engine.reference_timestamp());
}

#[test]
fn test_override_survives_ticks_until_cleared() {
    let mut engine = two_city_engine();
    let pinned = t(-86_400);
    engine.set_slot_override(1, pinned).unwrap();

    for second in 1..=5 {
        engine.advance(t(second));
        assert_eq!(engine.effective_time(1).unwrap().instant, pinned);
        assert_eq!(engine.effective_time(0).unwrap().instant, t(second));
    }

    engine.clear_slot_override(1).unwrap();
    assert_eq!(engine.effective_time(1).unwrap().instant, t(5));
}

#[test]
fn test_override_survives_pause() {
    let mut engine = two_city_engine();
    engine.set_slot_override(1, t(42)).unwrap();
    engine.toggle_running();
    engine.toggle_running();
    engine.advance(t(100));

    assert_eq!(engine.effective_time(1).unwrap().instant, t(42));
}

#[test]
fn test_relocation_after_override_uses_reference() {
    let mut engine = two_city_engine();
    engine.advance(t(30));
    engine.set_slot_override(1, t(-30)).unwrap();

    engine.set_slot_location(1, "melbourne, australia").unwrap();

    assert_eq!(engine.effective_time(1).unwrap().instant, t(30));
}

#[test]
fn test_slot_count_stays_in_bounds() {
    let mut engine = two_city_engine();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1234);

    for _ in 0..500 {
        let len = if rng.gen_bool(0.5) {
            engine.add_slot().len()
        } else {
            engine.remove_slot().len()
        };
        assert!((MIN_SLOTS..=MAX_SLOTS).contains(&len));
    }
}

#[test]
fn test_bounds_are_no_ops() {
    let mut engine = two_city_engine();
    while engine.slots().len() < MAX_SLOTS {
        engine.add_slot();
    }
    let full = engine.slots().to_vec();
    engine.add_slot();
    assert_eq!(engine.slots(), full.as_slice());

    while engine.slots().len() > MIN_SLOTS {
        engine.remove_slot();
    }
    let single = engine.slots().to_vec();
    engine.remove_slot();
    assert_eq!(engine.slots(), single.as_slice());
    assert_eq!(single[0].location_key(), "melbourne, australia");
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = two_city_engine();
    engine.set_display_format(true);

    let json = serde_json::to_value(engine.snapshot()).unwrap();

    assert_eq!(json["run_state"], "Running");
    assert_eq!(json["display_format"], "TwentyFourHour");
    assert_eq!(json["permission"], "Unknown");
    assert_eq!(json["slots"].as_array().unwrap().len(), 2);
    assert_eq!(json["slots"][1]["location_key"], "london, united kingdom");
}

#[test]
fn test_embedded_catalog_shows_local_times() {
    init_logging();
    let catalog = Arc::new(CityCatalog::embedded().unwrap());
    let picker = Box::new(RandomCityPicker::with_seed(&catalog, 7));
    let config = EngineConfig {
        initial_locations: vec![
            "melbourne, australia".to_string(),
            "london, united kingdom".to_string(),
            "new york, united states".to_string(),
            "kathmandu, nepal".to_string(),
        ],
        ..Default::default()
    };
    let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let engine = ClockEngine::new(GeoResolver::new(catalog), picker, noon, config);

    let displays: Vec<_> = engine
        .snapshot()
        .slots
        .into_iter()
        .map(|slot| slot.display)
        .collect();

    // June: Melbourne AEST, London BST, New York EDT, Kathmandu +05:45
    assert_eq!(
        displays,
        vec!["10:00:00 PM", "1:00:00 PM", "8:00:00 AM", "5:45:00 PM"]
    );
}

#[test]
fn test_daylight_saving_changes_display() {
    let mut engine = two_city_engine();
    engine.set_display_format(true);

    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
    engine.advance(winter);
    let london = engine.effective_time(1).unwrap();
    assert_eq!(london.format(engine.display_format()), "09:30:00");
    let melbourne = engine.effective_time(0).unwrap();
    assert_eq!(melbourne.format(engine.display_format()), "20:30:00");

    let summer = Utc.with_ymd_and_hms(2024, 7, 15, 9, 30, 0).unwrap();
    engine.advance(summer);
    let london = engine.effective_time(1).unwrap();
    assert_eq!(london.format(engine.display_format()), "10:30:00");
    let melbourne = engine.effective_time(0).unwrap();
    assert_eq!(melbourne.format(engine.display_format()), "19:30:00");
}
