// src/interactions/interactions.rs

use log::warn;
use crate::utils::errors::PhysicsError;
use crate::vectors::Vector;

/// The derived state of one body at the moment of impact.
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    /// The mass of the body in kilograms.
    pub mass: f64,
    /// The derived velocity at impact time.
    pub velocity: Vector,
    /// The derived cartesian position at impact time, in meters.
    pub position: (f64, f64),
}

impl BodyState {
    /// Creates a new `BodyState` with the given mass, velocity, and position.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidMass` if the mass is not finite and positive,
    /// or `PhysicsError::NonFiniteValue` for a non-finite position.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::interactions::BodyState;
    /// use rs_kinematics::vectors::Vector;
    ///
    /// let state = BodyState::new(1.0, Vector::ZERO, (0.0, 0.0));
    /// assert!(state.is_ok());
    ///
    /// let error_state = BodyState::new(-1.0, Vector::ZERO, (0.0, 0.0));
    /// assert!(error_state.is_err());
    /// ```
    pub fn new(mass: f64, velocity: Vector, position: (f64, f64)) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass);
        }
        if !position.0.is_finite() || !position.1.is_finite() {
            return Err(PhysicsError::NonFiniteValue);
        }
        Ok(Self { mass, velocity, position })
    }
}

/// The separation angle between two colliding bodies in degrees: the angle of
/// the vector pointing from `b` to `a`.
///
/// # Errors
/// Returns `PhysicsError::DegenerateGeometry` when the positions coincide,
/// which leaves the angle undefined.
pub fn separation_angle(a: (f64, f64), b: (f64, f64)) -> Result<f64, PhysicsError> {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    if dx == 0.0 && dy == 0.0 {
        return Err(PhysicsError::DegenerateGeometry);
    }
    Ok(dy.atan2(dx).to_degrees())
}

/// Resolves a 2D elastic collision between two overlapping bodies and returns
/// their post-collision velocities `(v_a, v_b)`.
///
/// Each body's velocity is projected onto the separation axis (the line
/// connecting the two centers) and its perpendicular. The 1D elastic collision
/// formula is applied to the along-axis components using both masses; the
/// perpendicular components pass through unchanged (frictionless point
/// masses, no rotation, no energy loss). The resolved components are then
/// recombined into a single polar vector per body.
///
/// Coincident positions are a documented degenerate case: the separation angle
/// is taken as 0 degrees by convention and a warning is logged.
///
/// # Errors
/// Returns `PhysicsError::DivisionByZero` if the total mass is zero. This is
/// unreachable for states built through [`BodyState::new`], which rejects
/// non-positive masses.
///
/// # Example
/// ```
/// use rs_kinematics::interactions::{BodyState, elastic_collision_2d};
/// use rs_kinematics::vectors::Vector;
///
/// // Equal masses, head-on: the along-axis velocities are exchanged.
/// let a = BodyState::new(1.0, Vector::from_cartesian(-2.0, 0.0).unwrap(), (1.0, 0.0)).unwrap();
/// let b = BodyState::new(1.0, Vector::from_cartesian(3.0, 0.0).unwrap(), (0.0, 0.0)).unwrap();
///
/// let (v_a, v_b) = elastic_collision_2d(&a, &b).unwrap();
/// let (v_a_x, _) = v_a.to_cartesian();
/// let (v_b_x, _) = v_b.to_cartesian();
/// assert!((v_a_x - 3.0).abs() < 1e-9);
/// assert!((v_b_x + 2.0).abs() < 1e-9);
/// ```
pub fn elastic_collision_2d(a: &BodyState, b: &BodyState) -> Result<(Vector, Vector), PhysicsError> {
    let total_mass = a.mass + b.mass;
    if total_mass == 0.0 {
        return Err(PhysicsError::DivisionByZero);
    }

    let angle = match separation_angle(a.position, b.position) {
        Ok(angle) => angle.to_radians(),
        Err(_) => {
            warn!(
                "Degenerate collision geometry at ({}, {}): coincident positions, using separation angle 0",
                a.position.0, a.position.1
            );
            0.0
        }
    };

    let (vx1, vy1) = a.velocity.to_cartesian();
    let (vx2, vy2) = b.velocity.to_cartesian();

    // Project velocities onto the separation axis and its perpendicular
    let v1_along = vx1 * angle.cos() + vy1 * angle.sin();
    let v1_perp = -vx1 * angle.sin() + vy1 * angle.cos();
    let v2_along = vx2 * angle.cos() + vy2 * angle.sin();
    let v2_perp = -vx2 * angle.sin() + vy2 * angle.cos();

    // 1D elastic collision along the separation axis
    let m1 = a.mass;
    let m2 = b.mass;
    let mass_diff = m1 - m2;

    let v1_final_along = (mass_diff * v1_along + 2.0 * m2 * v2_along) / total_mass;
    let v2_final_along = (2.0 * m1 * v1_along - mass_diff * v2_along) / total_mass;

    // Recompose with the untouched perpendicular components
    let new_vx1 = v1_final_along * angle.cos() - v1_perp * angle.sin();
    let new_vy1 = v1_final_along * angle.sin() + v1_perp * angle.cos();
    let new_vx2 = v2_final_along * angle.cos() - v2_perp * angle.sin();
    let new_vy2 = v2_final_along * angle.sin() + v2_perp * angle.cos();

    Ok((
        Vector::from_cartesian(new_vx1, new_vy1)?,
        Vector::from_cartesian(new_vx2, new_vy2)?,
    ))
}
