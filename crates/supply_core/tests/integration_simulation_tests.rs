use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use supply_core::catalog::Tier;
use supply_core::conditions::{HubStatus, TrafficLevel, WeatherCondition};
use supply_core::geocode::GeoPoint;
use supply_core::rng::{lcg, seed_from_postal_code};
use supply_core::simulation::{simulate, simulate_optional, SimulationResult};

fn assert_invariants(result: &SimulationResult) {
    assert_eq!(result.hubs.len(), 6);
    for pair in result.hubs.windows(2) {
        assert!(
            pair[0].distance_km <= pair[1].distance_km,
            "{} sorted after {}",
            pair[0].name,
            pair[1].name
        );
    }
    for hub in &result.hubs {
        assert!(hub.hub_load_pct >= 20 && hub.hub_load_pct <= 95, "{}", hub.hub_load_pct);
        assert!(hub.predicted_eta_minutes >= hub.base_eta_minutes);
        assert!(hub.traffic_factor >= 1.0);
        assert!(hub.rain_factor >= 1.0);

        let expected_status = if hub.hub_load_pct > 85 {
            HubStatus::Overloaded
        } else if hub.hub_load_pct > 70 {
            HubStatus::Loaded
        } else {
            HubStatus::Healthy
        };
        assert_eq!(hub.status_label, expected_status);

        match hub.tier {
            Tier::Express => {
                assert!(hub.distance_km >= 0.5 && hub.distance_km <= 3.5);
                assert!(hub.base_eta_minutes >= 6 && hub.base_eta_minutes < 16);
            }
            Tier::Bulk => {
                assert!(hub.distance_km >= 0.5 && hub.distance_km <= 8.5);
                assert!(hub.base_eta_minutes >= 25 && hub.base_eta_minutes < 85);
            }
        }

        // Spread never exceeds half of 0.02 + 5 * 0.005 degrees.
        assert!((hub.lat - result.center.lat).abs() <= 0.0225);
        assert!((hub.lng - result.center.lng).abs() <= 0.0225);
    }
}

#[test]
fn simulation_is_deterministic() {
    for code in ["560001", "400001", "110001", "700091", "abc", ""] {
        assert_eq!(simulate(code), simulate(code), "code {code:?}");
    }
}

#[test]
fn simulation_is_total_for_malformed_input() {
    for code in ["", "abc", "   ", "-", "🙂", "4", "12", "0000000000000000000000"] {
        assert_invariants(&simulate(code));
    }
    assert_invariants(&simulate_optional(None));
}

#[test]
fn invariants_hold_for_random_postal_codes() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let code = rng.gen_range(100_000..=999_999).to_string();
        assert_invariants(&simulate(&code));
    }
}

#[test]
fn invariants_hold_for_random_strings() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let len = rng.gen_range(0..12);
        let code: String = (0..len).map(|_| rng.gen::<char>()).collect();
        assert_invariants(&simulate(&code));
    }
}

#[test]
fn known_seed_regression_for_560001() {
    let seed = seed_from_postal_code("560001");
    assert_eq!(seed, 300);

    let traffic_sample = lcg(seed, 50);
    let weather_sample = lcg(seed, 51);
    assert!((traffic_sample - 0.230_611_282_578_875).abs() < 1e-12);
    assert!((weather_sample - 0.191_773_834_019_204).abs() < 1e-12);

    let result = simulate("560001");
    assert_eq!(result.seed, 300);
    assert_eq!(result.center, GeoPoint::new(12.9716, 77.5946));
    assert_eq!(result.global_traffic_label, TrafficLevel::Light);
    assert_eq!(result.global_weather_label, WeatherCondition::Clear);

    // Recomputed from the formulas for archetype 0 (express):
    // distance = 0.5 + rng(1) * 3 = 0.9009 -> 0.9
    // base     = floor(6 + rng(2) * 10) = 6
    // traffic  = 1.0 + rng(3) * 0.3 = 1.0168
    // load     = floor(20 + rng(4) * 75) = 21 -> no penalty
    // eta      = floor(6 * 1.0168 * 1.0 * 1.0) = 6
    let first = &result.hubs[0];
    assert_eq!(first.platform_id, "blinkit");
    assert_eq!(first.distance_km, 0.9);
    assert_eq!(first.base_eta_minutes, 6);
    assert_eq!(first.traffic_factor, 1.02);
    assert_eq!(first.hub_load_pct, 21);
    assert_eq!(first.predicted_eta_minutes, 6);
    assert_eq!(first.status_label, HubStatus::Healthy);

    let order: Vec<_> = result.hubs.iter().map(|h| h.platform_id.as_str()).collect();
    assert_eq!(
        order,
        vec!["blinkit", "dmart", "bigbasket", "zepto", "jiomart", "swiggy_instamart"]
    );
    let etas: Vec<_> = result.hubs.iter().map(|h| h.predicted_eta_minutes).collect();
    assert_eq!(etas, vec![6, 32, 15, 22, 47, 62]);
}

#[test]
fn high_traffic_scenario_for_400001() {
    let result = simulate("400001");
    assert_eq!(result.seed, 293);
    assert_eq!(result.global_traffic_label, TrafficLevel::High);
    assert_eq!(result.global_weather_label, WeatherCondition::Clear);

    let swiggy = result
        .hubs
        .iter()
        .find(|h| h.platform_id == "swiggy_instamart")
        .expect("swiggy hub");
    // load 83 -> Loaded, penalty 1.2: floor(54 * 1.6512 * 1.2) = 106
    assert_eq!(swiggy.hub_load_pct, 83);
    assert_eq!(swiggy.status_label, HubStatus::Loaded);
    assert_eq!(swiggy.predicted_eta_minutes, 106);
    assert_eq!(swiggy.distance_km, 7.0);
}

#[test]
fn rain_applies_uniformly_to_every_hub() {
    let rainy = (100_000..200_000)
        .map(|n: u32| n.to_string())
        .map(|code| simulate(&code))
        .find(|result| result.global_weather_label != WeatherCondition::Clear)
        .expect("some code in range sees rain");

    let expected = rainy.global_weather_label.base_factor();
    assert!(rainy.hubs.iter().all(|hub| hub.rain_factor == expected));
}

#[test]
fn result_serializes_with_wire_field_names() {
    let json = serde_json::to_value(simulate("560001")).expect("serialize");
    let hub = &json["hubs"][0];
    for field in [
        "name",
        "platform_id",
        "vehicle_type",
        "color",
        "distance_km",
        "base_eta_minutes",
        "lat",
        "lng",
        "is_active",
        "traffic_factor",
        "rain_factor",
        "hub_load_pct",
        "predicted_eta_minutes",
        "status_label",
    ] {
        assert!(hub.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["global_traffic_label"], "Light");
    assert_eq!(json["global_weather_label"], "Clear");
    assert_eq!(hub["status_label"], "Healthy");

    let back: SimulationResult = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back.postal_code, "560001");
    assert_eq!(back.hubs.len(), 6);
    assert_eq!(back.hubs[0].predicted_eta_minutes, 6);
}
