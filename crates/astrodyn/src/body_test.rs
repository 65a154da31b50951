use approx::assert_relative_eq;
use nalgebra::{Vector2, Vector3};

use crate::body::{Body, BodyId, Propulsion, STANDARD_GRAVITY};
use crate::error::Error;

fn make_body(mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Body<2> {
    Body::from_arrays("Test", mass, 0.01, position, velocity).unwrap()
}

#[test]
fn test_new_body() {
    let body = Body::new(
        "Earth",
        5.972e24,
        6.371e6,
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 6.28),
    )
    .unwrap();

    assert_eq!(body.name, "Earth");
    assert_eq!(body.mass, 5.972e24);
    assert_eq!(body.position, Vector2::new(1.0, 0.0));
    assert_eq!(body.velocity, Vector2::new(0.0, 6.28));
    assert_eq!(body.acceleration, Vector2::zeros());
    assert!(body.propulsion.is_none());
}

#[test]
fn test_three_dimensional_body() {
    let body = Body::from_arrays("Probe", 1.0, 1.0, [1.0, 2.0, 2.0], [0.0, 0.0, 0.0]).unwrap();

    assert_eq!(body.position, Vector3::new(1.0, 2.0, 2.0));
    assert_eq!(body.position.magnitude(), 3.0);
}

#[test]
fn test_zero_mass_rejected() {
    let result = Body::<2>::from_arrays("Ghost", 0.0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    assert!(matches!(result, Err(Error::InvalidBody { .. })));
}

#[test]
fn test_negative_mass_rejected() {
    let result = Body::<2>::from_arrays("Antimatter", -5.0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    assert!(matches!(result, Err(Error::InvalidBody { .. })));
}

#[test]
fn test_non_finite_values_rejected() {
    assert!(Body::<2>::from_arrays("A", f64::NAN, 1.0, [0.0, 0.0], [0.0, 0.0]).is_err());
    assert!(Body::<2>::from_arrays("B", 1.0, -1.0, [0.0, 0.0], [0.0, 0.0]).is_err());
    assert!(Body::<2>::from_arrays("C", 1.0, 1.0, [f64::INFINITY, 0.0], [0.0, 0.0]).is_err());
    assert!(Body::<2>::from_arrays("D", 1.0, 1.0, [0.0, 0.0], [0.0, f64::NAN]).is_err());
}

#[test]
fn test_zero_radius_allowed() {
    let body = Body::<2>::from_arrays("Point", 1.0, 0.0, [0.0, 0.0], [0.0, 0.0]);
    assert!(body.is_ok());
}

#[test]
fn test_momentum() {
    let body = make_body(2.0, [1.0, 0.0], [3.0, 4.0]);

    let momentum = body.momentum();
    assert_eq!(momentum, Vector2::new(6.0, 8.0));
}

#[test]
fn test_kinetic_energy() {
    let body = make_body(2.0, [0.0, 0.0], [3.0, 4.0]);

    // KE = 0.5 * m * v²
    // v² = 3² + 4² = 25
    // KE = 0.5 * 2 * 25 = 25
    let ke = body.kinetic_energy();
    assert_eq!(ke, 25.0);
}

#[test]
fn test_distance_to() {
    let body_a = make_body(1.0, [0.0, 0.0], [0.0, 0.0]);
    let body_b = make_body(1.0, [3.0, 4.0], [0.0, 0.0]);

    // Distance = sqrt(3² + 4²) = 5
    assert_eq!(body_a.distance_to(&body_b), 5.0);
    assert_eq!(body_b.distance_to(&body_a), 5.0);
}

#[test]
fn test_speed() {
    let body = make_body(1.0, [0.0, 0.0], [3.0, 4.0]);
    assert_eq!(body.speed(), 5.0);
}

#[test]
fn test_force_from_acceleration() {
    let mut body = make_body(4.0, [0.0, 0.0], [0.0, 0.0]);
    body.acceleration = Vector2::new(0.5, -1.0);

    assert_eq!(body.force(), Vector2::new(2.0, -4.0));
}

#[test]
fn test_with_color() {
    let body = make_body(1.0, [0.0, 0.0], [0.0, 0.0]).with_color("#3399ff");
    assert_eq!(body.color, "#3399ff");
}

#[test]
fn test_with_propulsion() {
    let body = make_body(1_000.0, [0.0, 0.0], [0.0, 0.0])
        .with_propulsion(Propulsion::new(300.0, 500.0, 250.0))
        .unwrap();

    assert_eq!(body.dry_mass(), 700.0);
    assert!(body.propulsion.is_some());
}

#[test]
fn test_propellant_heavier_than_body_rejected() {
    let result = make_body(100.0, [0.0, 0.0], [0.0, 0.0])
        .with_propulsion(Propulsion::new(150.0, 500.0, 250.0));

    assert!(matches!(result, Err(Error::InvalidBody { .. })));
}

#[test]
fn test_invalid_engine_rejected() {
    let body = make_body(100.0, [0.0, 0.0], [0.0, 0.0]);

    assert!(
        body.clone()
            .with_propulsion(Propulsion::new(10.0, 0.0, 250.0))
            .is_err()
    );
    assert!(body.with_propulsion(Propulsion::new(10.0, 500.0, -1.0)).is_err());
}

#[test]
fn test_propulsion_rates() {
    let propulsion = Propulsion::new(100.0, 1_000.0, 300.0);

    assert_relative_eq!(propulsion.exhaust_velocity(), 300.0 * STANDARD_GRAVITY);
    assert_relative_eq!(
        propulsion.mass_flow_rate(),
        1_000.0 / (300.0 * STANDARD_GRAVITY)
    );
    assert!(propulsion.has_propellant());
    assert!(!Propulsion::new(0.0, 1_000.0, 300.0).has_propellant());
}

#[test]
fn test_body_id_equality() {
    let id1 = BodyId(42);
    let id2 = BodyId(42);
    let id3 = BodyId(43);

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
    assert!(id1 < id3);
}
