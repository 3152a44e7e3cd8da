// demos/projectile.rs
//
// A driver-side usage demo: a ball launched at 45 degrees under gravity,
// stepped on a fixed cadence, with a second ball thrown at it to show
// collision resolution. Run with RUST_LOG=debug to see collision logs.

use rs_kinematics::environment::PhysicsEnvironment;
use rs_kinematics::objects::PhysicsObject;
use rs_kinematics::vectors::Vector;
use rs_kinematics::{PhysicsError, EARTH_GRAVITY};

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let mut env = PhysicsEnvironment::new("Room 1", vec![EARTH_GRAVITY]);

    let ball = env.register_object(PhysicsObject::new(
        "Ball",
        1.0,
        Vector::from_polar(50.0, 45.0)?,
        (0.0, 0.0),
        Vec::new(),
        0.0,
    )?);
    let counter = env.register_object(PhysicsObject::new(
        "Counter",
        2.0,
        Vector::from_polar(50.0, 135.0)?,
        (70.0, 0.0),
        Vec::new(),
        0.0,
    )?);

    // Both balls are circles of radius 1 as far as this driver is concerned.
    let overlaps = |_: rs_kinematics::environment::ObjectId,
                    (ax, ay): (f64, f64),
                    _: rs_kinematics::environment::ObjectId,
                    (bx, by): (f64, f64)| (ax - bx).hypot(ay - by) < 2.0;

    for _ in 0..50 {
        env.step(0.1, false, overlaps)?;

        for id in [ball, counter] {
            let object = env.object(id).unwrap();
            let (x, y) = env.position_of(id).unwrap();
            let velocity = env.velocity_of(id).unwrap();
            let momentum = env.momentum_of(id).unwrap();
            println!(
                "t={:5.2}s {}: x={:7.2}m y={:7.2}m v={:6.2}m/s @ {:7.2}° p={:6.2}kg⋅m/s",
                env.time(),
                object.name(),
                x,
                y,
                velocity.magnitude(),
                velocity.argument(),
                momentum.magnitude(),
            );
        }
    }

    Ok(())
}
