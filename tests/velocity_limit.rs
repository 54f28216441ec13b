// The shared limit is process-wide state, so it gets a test binary of its own.

use approx::assert_relative_eq;

use movers::{
    set_shared_velocity_limit, shared_velocity_limit, Body, MoverError, Vector2D, VelocityLimit,
    DEFAULT_VELOCITY_LIMIT,
};

#[test]
fn shared_limit_applies_to_bodies_without_override() {
    assert_eq!(shared_velocity_limit(), DEFAULT_VELOCITY_LIMIT);

    let mut shared = Body::with_mass(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    let mut fixed = Body::with_mass(0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
    fixed.set_velocity_limit(VelocityLimit::Fixed(8.0)).unwrap();
    assert_eq!(shared.velocity_limit(), VelocityLimit::Shared);

    let push = Vector2D::new(100.0, 0.0);

    shared.apply_force(push).unwrap();
    shared.update();
    assert_relative_eq!(shared.velocity().x, DEFAULT_VELOCITY_LIMIT);

    set_shared_velocity_limit(2.0).unwrap();
    assert_eq!(shared_velocity_limit(), 2.0);

    shared.apply_force(push).unwrap();
    shared.update();
    fixed.apply_force(push).unwrap();
    fixed.update();
    assert_relative_eq!(shared.velocity().x, 2.0);
    assert_relative_eq!(fixed.velocity().x, 8.0);

    assert!(matches!(
        set_shared_velocity_limit(f64::NAN),
        Err(MoverError::InvalidLimit(_))
    ));
    assert_eq!(shared_velocity_limit(), 2.0);

    set_shared_velocity_limit(DEFAULT_VELOCITY_LIMIT).unwrap();
}
