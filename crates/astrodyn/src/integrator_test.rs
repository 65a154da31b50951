use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::body::Body;
use crate::config::IntegratorKind;
use crate::diagnostics;
use crate::forces::{CompositeForce, DirectGravity};
use crate::integrator::{Euler, Integrator, VelocityVerlet, integrator_for};
use crate::state::SystemState;

/// Star and planet on a circular orbit in the center-of-mass frame, G = 1
fn binary() -> SystemState<2> {
    let (m_star, m_planet, r) = (1.0_f64, 1.0e-3_f64, 1.0_f64);
    let v = ((m_star + m_planet) / r).sqrt();

    let mut system = SystemState::new();
    system
        .add_body(
            Body::from_arrays(
                "Star",
                m_star,
                0.01,
                [-r * m_planet / (m_star + m_planet), 0.0],
                [0.0, -v * m_planet / (m_star + m_planet)],
            )
            .unwrap(),
        )
        .unwrap();
    system
        .add_body(
            Body::from_arrays(
                "Planet",
                m_planet,
                0.001,
                [r * m_star / (m_star + m_planet), 0.0],
                [0.0, v * m_star / (m_star + m_planet)],
            )
            .unwrap(),
        )
        .unwrap();
    system
}

fn energy_drift(integrator: &dyn Integrator<2>, n_steps: usize) -> f64 {
    let mut system = binary();
    let gravity = DirectGravity::new().with_constant(1.0);
    let e0 = diagnostics::total_energy(&system.bodies, 1.0);

    integrator.integrate(&mut system, 0.01, n_steps, &gravity);

    let e1 = diagnostics::total_energy(&system.bodies, 1.0);
    diagnostics::relative_energy_error(e0, e1)
}

#[test]
fn test_free_particle_moves_linearly() {
    let mut system = SystemState::new();
    system
        .add_body(Body::from_arrays("Free", 1.0, 1.0, [1.0, 2.0], [3.0, -1.0]).unwrap())
        .unwrap();
    let no_forces = CompositeForce::new();

    VelocityVerlet.step(&mut system, 2.0, &no_forces);

    assert_eq!(system.bodies[0].position, Vector2::new(7.0, 0.0));
    assert_eq!(system.bodies[0].velocity, Vector2::new(3.0, -1.0));
    assert_eq!(system.time, 2.0);
}

#[test]
fn test_verlet_energy_conservation() {
    // About 1.6 orbits
    let drift = energy_drift(&VelocityVerlet, 1_000);
    assert!(drift < 1e-3, "energy drift {drift} too large");
}

#[test]
fn test_euler_drifts_more_than_verlet() {
    let verlet = energy_drift(&VelocityVerlet, 1_000);
    let euler = energy_drift(&Euler, 1_000);

    assert!(euler > 10.0 * verlet, "euler {euler} vs verlet {verlet}");
}

#[test]
fn test_momentum_conservation() {
    let mut system = binary();
    let gravity = DirectGravity::new().with_constant(1.0);
    let p0 = system.total_momentum();

    VelocityVerlet.integrate(&mut system, 0.01, 500, &gravity);

    assert!((system.total_momentum() - p0).norm() < 1e-14);
}

#[test]
fn test_integrate_returns_final_time() {
    let mut system = binary();
    let gravity = DirectGravity::new().with_constant(1.0);

    let t = VelocityVerlet.integrate(&mut system, 0.25, 8, &gravity);

    assert_relative_eq!(t, 2.0);
    assert_eq!(system.time, t);
}

#[test]
fn test_stored_acceleration_matches_new_positions() {
    let mut system = binary();
    let gravity = DirectGravity::new().with_constant(1.0);

    VelocityVerlet.step(&mut system, 0.01, &gravity);

    let expected = crate::forces::accelerations(&gravity, &system.bodies, system.time);
    for (body, a) in system.bodies.iter().zip(expected) {
        assert_relative_eq!(body.acceleration, a, epsilon = 1e-15);
    }
}

#[test]
fn test_result_independent_of_body_order() {
    let bodies = vec![
        Body::from_arrays("A", 5.0, 0.1, [0.0, 0.0], [0.0, 0.1]).unwrap(),
        Body::from_arrays("B", 1.0, 0.1, [3.0, 0.0], [0.0, 1.0]).unwrap(),
        Body::from_arrays("C", 2.0, 0.1, [0.0, -4.0], [0.5, 0.0]).unwrap(),
    ];
    let gravity = DirectGravity::new().with_constant(1.0);

    let mut forward = SystemState::new();
    for b in bodies.iter().cloned() {
        forward.add_body(b).unwrap();
    }
    let mut reversed = SystemState::new();
    for b in bodies.iter().rev().cloned() {
        reversed.add_body(b).unwrap();
    }

    VelocityVerlet.integrate(&mut forward, 0.01, 100, &gravity);
    VelocityVerlet.integrate(&mut reversed, 0.01, 100, &gravity);

    for body in &forward.bodies {
        let twin = reversed.bodies.iter().find(|b| b.name == body.name).unwrap();
        assert_relative_eq!(body.position, twin.position, epsilon = 1e-10);
        assert_relative_eq!(body.velocity, twin.velocity, epsilon = 1e-10);
    }
}

#[test]
fn test_euler_uses_old_velocity_for_position() {
    let mut system = SystemState::new();
    system
        .add_body(Body::from_arrays("A", 1.0, 0.1, [0.0, 0.0], [0.0, 0.0]).unwrap())
        .unwrap();
    system
        .add_body(Body::from_arrays("B", 1.0, 0.1, [1.0, 0.0], [0.0, 0.0]).unwrap())
        .unwrap();
    let gravity = DirectGravity::new().with_constant(1.0);

    Euler.step(&mut system, 0.1, &gravity);

    // Bodies start at rest, so only velocities change on the first step
    assert_eq!(system.bodies[0].position, Vector2::zeros());
    assert_relative_eq!(system.bodies[0].velocity.x, 0.1);
    assert_relative_eq!(system.bodies[1].velocity.x, -0.1);
}

#[test]
fn test_integrator_for_selects_scheme() {
    let gravity = DirectGravity::new().with_constant(1.0);

    let mut by_kind = binary();
    let mut direct = binary();
    integrator_for::<2>(IntegratorKind::Euler).step(&mut by_kind, 0.01, &gravity);
    Euler.step(&mut direct, 0.01, &gravity);

    assert_eq!(by_kind.bodies, direct.bodies);
}
