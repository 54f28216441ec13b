use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use movers::steering::{self, Uniform};
use movers::{Body, MoverError, Vector2D, VelocityLimit};

const TOLERANCE: f64 = 1e-9;

/// Body with mass 1 and an explicit speed limit
fn mover(location: Vector2D, velocity: Vector2D, limit: f64) -> Body {
    let mut body = Body::with_mass(location.x, location.y, 10.0, 10.0, 1.0).unwrap();
    body.set_velocity(velocity);
    body.set_velocity_limit(VelocityLimit::Fixed(limit)).unwrap();
    body
}

// ==================================================================================
// Integration
// ==================================================================================

#[test]
fn coasting_body_moves_linearly() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        let start = Vector2D::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let velocity = Vector2D::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        let steps = rng.gen_range(1..200);
        let mut body = mover(start, velocity, 5.0);

        for _ in 0..steps {
            body.update();
            assert_eq!(body.acceleration(), Vector2D::ZERO);
        }

        let expected = start + velocity * steps as f64;
        assert_relative_eq!(body.location().x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(body.location().y, expected.y, epsilon = 1e-6);
    }
}

#[test]
fn kick_then_coast() {
    let mut body = mover(Vector2D::ZERO, Vector2D::ZERO, 5.0);
    body.apply_force(Vector2D::new(1.0, 2.0)).unwrap();
    body.update();

    for _ in 0..9 {
        body.update();
    }

    assert_relative_eq!(body.location().x, 10.0, epsilon = TOLERANCE);
    assert_relative_eq!(body.location().y, 20.0, epsilon = TOLERANCE);
    assert_eq!(body.velocity(), Vector2D::new(1.0, 2.0));
}

#[test]
fn speed_never_exceeds_limit_after_update() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut body = mover(Vector2D::ZERO, Vector2D::ZERO, 4.0);

    for _ in 0..500 {
        let force = Vector2D::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        body.apply_force(force).unwrap();
        body.update();
        assert!(body.velocity().magnitude() <= 4.0 + TOLERANCE);
    }
}

#[test]
fn unlimited_body_keeps_accelerating() {
    let mut body = mover(Vector2D::ZERO, Vector2D::ZERO, 1.0);
    body.set_velocity_limit(VelocityLimit::Unlimited).unwrap();

    for _ in 0..10 {
        body.apply_force(Vector2D::new(1.0, 0.0)).unwrap();
        body.update();
    }

    assert_relative_eq!(body.velocity().x, 10.0, epsilon = TOLERANCE);
    assert_relative_eq!(body.location().x, 55.0, epsilon = TOLERANCE);
}

#[test]
fn heavier_bodies_accelerate_less() {
    let mut light = Body::with_mass(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let mut heavy = Body::with_mass(0.0, 0.0, 1.0, 1.0, 4.0).unwrap();
    let force = Vector2D::new(2.0, 0.0);

    light.apply_force(force).unwrap();
    heavy.apply_force(force).unwrap();

    assert_eq!(light.acceleration(), Vector2D::new(2.0, 0.0));
    assert_eq!(heavy.acceleration(), Vector2D::new(0.5, 0.0));
}

#[test]
fn massless_body_reports_divide_by_zero() {
    let mut body = Body::new(0.0, 0.0, 1.0, 1.0);
    assert!(matches!(
        body.apply_force(Vector2D::new(0.0, 1.0)),
        Err(MoverError::DivideByZero)
    ));
    assert!(matches!(
        steering::steer_towards(&mut body, Vector2D::new(5.0, 5.0), &Uniform(1.0), 1.0),
        Err(MoverError::DivideByZero)
    ));
}

// ==================================================================================
// Edges
// ==================================================================================

#[test]
fn overshooting_right_edge_bounces_back() {
    let mut body = mover(Vector2D::new(805.0, 100.0), Vector2D::new(2.0, 0.0), 5.0);
    body.check_edges(800.0, 400.0);

    assert_eq!(body.location().x, 800.0);
    assert!(body.velocity().x < 0.0);
}

#[test]
fn leaving_through_the_top_is_not_corrected() {
    let mut body = mover(Vector2D::new(100.0, -5.0), Vector2D::new(0.0, -1.0), 5.0);
    body.check_edges(800.0, 400.0);

    assert_eq!(body.location().y, -5.0);
    assert_eq!(body.velocity().y, -1.0);
}

#[test]
fn body_bounces_between_side_walls() {
    let mut body = mover(Vector2D::new(5.0, 50.0), Vector2D::new(4.0, 0.0), 5.0);

    for _ in 0..200 {
        body.update();
        body.check_edges(20.0, 100.0);
        let x = body.location().x;
        assert!((0.0..=20.0).contains(&x), "escaped to {x}");
    }
}

// ==================================================================================
// Steering
// ==================================================================================

#[test]
fn steered_body_reaches_pointer() {
    let target = Vector2D::new(300.0, 200.0);
    let mut body = mover(Vector2D::new(10.0, 10.0), Vector2D::ZERO, 5.0);

    let mut closest = f64::MAX;
    for _ in 0..400 {
        steering::steer_towards(&mut body, target, &Uniform(0.5), 1.0).unwrap();
        body.update();
        closest = closest.min(body.location().distance(target));
    }

    assert!(closest < 5.0, "closest approach {closest}");
}
