use crate::config::{AdaptiveConfig, IntegratorKind, SimulationConfig};
use crate::error::Error;
use crate::forces::G;

#[test]
fn test_defaults() {
    let config = SimulationConfig::default();

    assert_eq!(config.gravitational_constant, G);
    assert_eq!(config.softening, 0.0);
    assert_eq!(config.mass_threshold, 0.0);
    assert_eq!(config.dt, 0.1);
    assert_eq!(config.integrator, IntegratorKind::VelocityVerlet);
    assert!(config.adaptive.is_none());
    assert!(config.step_budget.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_adaptive_defaults_valid() {
    let adaptive = AdaptiveConfig::default();

    assert_eq!(adaptive.tolerance, 1.0e-3);
    assert_eq!(adaptive.dt_min, 1.0e-3);
    assert_eq!(adaptive.dt_max, 100.0);
    assert!(adaptive.validate().is_ok());
}

#[test]
fn test_invalid_dt_rejected() {
    for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let config = SimulationConfig {
            dt,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}

#[test]
fn test_invalid_constants_rejected() {
    let negative_g = SimulationConfig {
        gravitational_constant: -1.0,
        ..Default::default()
    };
    let negative_softening = SimulationConfig {
        softening: -0.5,
        ..Default::default()
    };
    let negative_threshold = SimulationConfig {
        mass_threshold: -1.0,
        ..Default::default()
    };

    assert!(negative_g.validate().is_err());
    assert!(negative_softening.validate().is_err());
    assert!(negative_threshold.validate().is_err());
}

#[test]
fn test_inverted_dt_bounds_rejected() {
    let adaptive = AdaptiveConfig {
        dt_min: 10.0,
        dt_max: 1.0,
        ..Default::default()
    };
    assert!(adaptive.validate().is_err());

    let config = SimulationConfig {
        adaptive: Some(adaptive),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_smoothing_and_safety_bounds() {
    let zero_smoothing = AdaptiveConfig {
        smoothing: 0.0,
        ..Default::default()
    };
    let large_safety = AdaptiveConfig {
        safety: 1.5,
        ..Default::default()
    };

    assert!(zero_smoothing.validate().is_err());
    assert!(large_safety.validate().is_err());
}

#[test]
fn test_initial_dt_clamped_in_adaptive_mode() {
    let fixed = SimulationConfig {
        dt: 500.0,
        ..Default::default()
    };
    assert_eq!(fixed.initial_dt(), 500.0);

    let adaptive = SimulationConfig {
        dt: 500.0,
        adaptive: Some(AdaptiveConfig::default()),
        ..Default::default()
    };
    assert_eq!(adaptive.initial_dt(), 100.0);
}

#[test]
fn test_deserialize_partial_config() {
    let json = r#"{
        "dt": 30.0,
        "integrator": "euler",
        "adaptive": { "tolerance": 0.01, "dt_max": 600.0 },
        "step_budget": 1000
    }"#;

    let config: SimulationConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.dt, 30.0);
    assert_eq!(config.integrator, IntegratorKind::Euler);
    assert_eq!(config.step_budget, Some(1000));
    assert_eq!(config.gravitational_constant, G);

    let adaptive = config.adaptive.unwrap();
    assert_eq!(adaptive.tolerance, 0.01);
    assert_eq!(adaptive.dt_max, 600.0);
    assert_eq!(adaptive.dt_min, 1.0e-3);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = SimulationConfig {
        softening: 1.0e3,
        adaptive: Some(AdaptiveConfig::default()),
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: SimulationConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config, back);
}
