use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::body::{Body, BodyId};
use crate::config::AdaptiveConfig;
use crate::timestep::AdaptiveTimestep;

fn with_accel(mut body: Body<2>, ax: f64, ay: f64) -> Body<2> {
    body.acceleration = Vector2::new(ax, ay);
    body
}

fn unit_body() -> Body<2> {
    Body::from_arrays("A", 1.0, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap()
}

#[test]
fn test_first_call_keeps_dt() {
    let mut controller = AdaptiveTimestep::new(AdaptiveConfig::default());
    let bodies = vec![with_accel(unit_body(), 1.0, 0.0)];

    assert_eq!(controller.next_dt(&bodies, 5.0), 5.0);
    assert_eq!(controller.history_len(), 1);
}

#[test]
fn test_unchanged_force_grows_toward_dt_max() {
    let config = AdaptiveConfig::default();
    let mut controller = AdaptiveTimestep::new(config.clone());
    let bodies = vec![with_accel(unit_body(), 1.0, 0.0)];

    controller.next_dt(&bodies, 1.0);
    let next = controller.next_dt(&bodies, 1.0);

    // relError = 0: candidate is dt_max, blended with the current dt
    let alpha = config.smoothing;
    let expected = (1.0 - alpha) * 1.0 + alpha * config.safety * config.dt_max;
    assert_relative_eq!(next, expected);
}

#[test]
fn test_smoothing_formula() {
    let config = AdaptiveConfig::default();
    let mut controller = AdaptiveTimestep::new(config.clone());

    controller.next_dt(&[with_accel(unit_body(), 1.0, 0.0)], 1.0);
    let next = controller.next_dt(&[with_accel(unit_body(), 1.01, 0.0)], 1.0);

    let rel_error = 0.01 / (1.01 + config.force_floor);
    let raw = (config.tolerance / rel_error).powf(config.exponent);
    let expected = (1.0 - config.smoothing) + config.smoothing * config.safety * raw;
    assert_relative_eq!(next, expected, max_relative = 1e-9);
}

#[test]
fn test_rapid_change_shrinks_dt() {
    let mut controller = AdaptiveTimestep::new(AdaptiveConfig::default());

    controller.next_dt(&[with_accel(unit_body(), 1.0, 0.0)], 10.0);
    let next = controller.next_dt(&[with_accel(unit_body(), -50.0, 20.0)], 10.0);

    assert!(next < 10.0);
}

#[test]
fn test_extreme_changes_stay_within_bounds() {
    let config = AdaptiveConfig {
        smoothing: 1.0,
        ..Default::default()
    };
    let mut controller = AdaptiveTimestep::new(config.clone());

    controller.next_dt(&[with_accel(unit_body(), 1.0, 0.0)], 0.01);
    let shrunk = controller.next_dt(&[with_accel(unit_body(), 1.0e12, -1.0e12)], 0.01);
    assert_eq!(shrunk, config.dt_min);

    controller.reset();
    controller.next_dt(&[with_accel(unit_body(), 1.0, 0.0)], 1.0);
    let grown = controller.next_dt(&[with_accel(unit_body(), 1.0 + 1e-15, 0.0)], 1.0);
    assert!(grown <= config.dt_max);
    assert!(grown >= config.dt_min);
}

#[test]
fn test_minimum_over_bodies() {
    let mut controller = AdaptiveTimestep::new(AdaptiveConfig::default());
    let mut calm = unit_body();
    calm.id = BodyId(0);
    let mut busy = unit_body();
    busy.id = BodyId(1);

    controller.next_dt(
        &[with_accel(calm.clone(), 1.0, 0.0), with_accel(busy.clone(), 1.0, 0.0)],
        2.0,
    );
    let both = controller.next_dt(
        &[with_accel(calm.clone(), 1.0, 0.0), with_accel(busy.clone(), 5.0, 0.0)],
        2.0,
    );

    controller.reset();
    controller.next_dt(&[with_accel(busy.clone(), 1.0, 0.0)], 2.0);
    let busy_only = controller.next_dt(&[with_accel(busy, 5.0, 0.0)], 2.0);

    assert_relative_eq!(both, busy_only);
}

#[test]
fn test_new_body_contributes_current_dt() {
    let mut controller = AdaptiveTimestep::new(AdaptiveConfig::default());
    let mut old = unit_body();
    old.id = BodyId(0);
    let mut newcomer = unit_body();
    newcomer.id = BodyId(7);

    controller.next_dt(&[with_accel(old.clone(), 1.0, 0.0)], 3.0);
    let bodies = [with_accel(old, 1.0, 0.0), with_accel(newcomer, 9.0, 9.0)];
    let next = controller.next_dt(&bodies, 3.0);

    // The unchanged body would grow dt; the newcomer caps it at the current value
    assert_eq!(next, 3.0);
}

#[test]
fn test_empty_system_clamps_dt() {
    let config = AdaptiveConfig::default();
    let mut controller = AdaptiveTimestep::<2>::new(config.clone());

    assert_eq!(controller.next_dt(&[], 1.0e6), config.dt_max);
    assert_eq!(controller.next_dt(&[], 0.5), 0.5);
}

#[test]
fn test_history_follows_live_bodies() {
    let mut controller = AdaptiveTimestep::new(AdaptiveConfig::default());
    let mut a = unit_body();
    a.id = BodyId(0);
    let mut b = unit_body();
    b.id = BodyId(1);

    controller.next_dt(&[a.clone(), b], 1.0);
    assert_eq!(controller.history_len(), 2);

    controller.next_dt(&[a], 1.0);
    assert_eq!(controller.history_len(), 1);

    controller.reset();
    assert_eq!(controller.history_len(), 0);
}
