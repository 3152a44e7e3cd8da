// src/objects/objects.rs

use crate::utils::errors::PhysicsError;
use crate::vectors::Vector;

/// The kinematic velocity equation `v = u + a·t`, applied per axis.
pub fn velocity_equation(initial_velocity: f64, acceleration: f64, time: f64) -> f64 {
    initial_velocity + acceleration * time
}

/// The kinematic displacement equation `s = u·t + ½·a·t²`, applied per axis.
pub fn displacement_equation(initial_velocity: f64, acceleration: f64, time: f64) -> f64 {
    initial_velocity * time + 0.5 * acceleration * time * time
}

/// A simulated point mass.
///
/// Velocity and position at any instant are pure functions of the initial
/// condition triple (`init_velocity`, `init_position`, `init_time`), the
/// acceleration fields acting on the object, and the environment clock; there
/// is no incremental integration state to drift or desynchronize. A collision
/// re-anchors the triple to the object's derived state at the moment of
/// impact via [`PhysicsObject::reset_initial_conditions`].
#[derive(Debug, Clone)]
pub struct PhysicsObject {
    name: String,
    mass: f64,
    init_velocity: Vector,
    init_position: (f64, f64),
    init_time: f64,
    own_fields: Vec<Vector>,
    // Anchor for renderer relative-motion queries; not part of the physics state.
    tracked_position: (f64, f64),
}

impl PhysicsObject {
    /// Creates a new point mass.
    ///
    /// # Arguments
    /// * `name` - A label used in logs and object info.
    /// * `mass` - The mass of the object in kilograms. Must be finite and positive.
    /// * `init_velocity` - The velocity at `init_time`.
    /// * `init_position` - The cartesian position at `init_time`, in meters.
    /// * `own_fields` - Acceleration fields specific to this object. The vector
    ///   is taken by value so no two objects can alias the same field list.
    /// * `init_time` - The environment time at which the initial conditions hold.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidMass` for a non-positive or non-finite mass,
    /// `PhysicsError::NonFiniteValue` for a non-finite position, and
    /// `PhysicsError::InvalidTime` for a negative or non-finite `init_time`.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::objects::PhysicsObject;
    /// use rs_kinematics::vectors::Vector;
    ///
    /// let ball = PhysicsObject::new(
    ///     "Ball",
    ///     1.0,
    ///     Vector::from_polar(50.0, 45.0).unwrap(),
    ///     (0.0, 0.0),
    ///     Vec::new(),
    ///     0.0,
    /// );
    /// assert!(ball.is_ok());
    ///
    /// assert!(PhysicsObject::new("Weightless", 0.0, Vector::ZERO, (0.0, 0.0), Vec::new(), 0.0).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        init_velocity: Vector,
        init_position: (f64, f64),
        own_fields: Vec<Vector>,
        init_time: f64,
    ) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass);
        }
        if !init_position.0.is_finite() || !init_position.1.is_finite() {
            return Err(PhysicsError::NonFiniteValue);
        }
        if !init_time.is_finite() || init_time < 0.0 {
            return Err(PhysicsError::InvalidTime);
        }
        Ok(Self {
            name: name.into(),
            mass,
            init_velocity,
            init_position,
            init_time,
            own_fields,
            tracked_position: init_position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn init_velocity(&self) -> Vector {
        self.init_velocity
    }

    pub fn init_position(&self) -> (f64, f64) {
        self.init_position
    }

    pub fn init_time(&self) -> f64 {
        self.init_time
    }

    pub fn own_fields(&self) -> &[Vector] {
        &self.own_fields
    }

    /// Adds an acceleration field specific to this object (e.g. wind).
    pub fn add_field(&mut self, field: Vector) {
        self.own_fields.push(field);
    }

    /// Time elapsed since the current initial conditions were set, given the
    /// environment clock. Derived every call, never persisted.
    pub fn elapsed_time(&self, time: f64) -> f64 {
        time - self.init_time
    }

    /// The net acceleration acting on the object: the sum of its own fields
    /// and the environment's ambient fields.
    pub fn acceleration_vector(&self, ambient_fields: &[Vector]) -> Vector {
        Vector::sum(
            self.own_fields
                .iter()
                .copied()
                .chain(ambient_fields.iter().copied()),
        )
    }

    /// The velocity at environment time `time`, from `v = u + a·t` per axis.
    ///
    /// Recomputed from the absolute elapsed time on every call; the result is
    /// never cached.
    pub fn velocity_vector(&self, ambient_fields: &[Vector], time: f64) -> Vector {
        let elapsed = self.elapsed_time(time);
        let (u_x, u_y) = self.init_velocity.to_cartesian();
        let (a_x, a_y) = self.acceleration_vector(ambient_fields).to_cartesian();
        Vector::from_cartesian_unchecked(
            velocity_equation(u_x, a_x, elapsed),
            velocity_equation(u_y, a_y, elapsed),
        )
    }

    /// The cartesian position at environment time `time`, from
    /// `s = u·t + ½·a·t²` per axis plus the initial position.
    pub fn position_vector(&self, ambient_fields: &[Vector], time: f64) -> (f64, f64) {
        let elapsed = self.elapsed_time(time);
        let (u_x, u_y) = self.init_velocity.to_cartesian();
        let (a_x, a_y) = self.acceleration_vector(ambient_fields).to_cartesian();
        (
            self.init_position.0 + displacement_equation(u_x, a_x, elapsed),
            self.init_position.1 + displacement_equation(u_y, a_y, elapsed),
        )
    }

    /// The momentum at environment time `time`: the velocity scaled by mass.
    pub fn momentum_vector(&self, ambient_fields: &[Vector], time: f64) -> Vector {
        self.velocity_vector(ambient_fields, time).scale(self.mass)
    }

    /// Atomically replaces the initial condition triple, re-anchoring the
    /// closed-form trajectory at `time`. Used by collision resolution.
    ///
    /// Immediately after the call, `velocity_vector` at `time` equals
    /// `velocity` and `position_vector` at `time` equals `position`.
    pub fn reset_initial_conditions(&mut self, velocity: Vector, time: f64, position: (f64, f64)) {
        self.init_velocity = velocity;
        self.init_time = time;
        self.init_position = position;
    }

    /// Movement since the last call (or since creation / the last collision),
    /// for renderers that move a shape by a delta rather than an absolute
    /// position. Advances the mark to the current derived position.
    pub fn movement_since_mark(&mut self, ambient_fields: &[Vector], time: f64) -> (f64, f64) {
        let current = self.position_vector(ambient_fields, time);
        self.advance_movement_mark(current)
    }

    /// Reports the delta from the mark to `current` and moves the mark there.
    pub(crate) fn advance_movement_mark(&mut self, current: (f64, f64)) -> (f64, f64) {
        let delta = (current.0 - self.tracked_position.0, current.1 - self.tracked_position.1);
        self.tracked_position = current;
        delta
    }

    /// Resets the movement mark to `position`, discarding accumulated movement.
    pub(crate) fn clear_movement_mark(&mut self, position: (f64, f64)) {
        self.tracked_position = position;
    }
}

/// A registered scene entity: either a display-only piece of scenery or a
/// simulated point mass. Selected at construction; scenery is never stepped
/// and never participates in collisions.
#[derive(Debug, Clone)]
pub enum Entity {
    Scenery { name: String, position: (f64, f64) },
    Dynamic(PhysicsObject),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Scenery { name, .. } => name,
            Entity::Dynamic(object) => object.name(),
        }
    }

    /// The simulated object, if this entity is physics-enabled.
    pub fn as_dynamic(&self) -> Option<&PhysicsObject> {
        match self {
            Entity::Dynamic(object) => Some(object),
            Entity::Scenery { .. } => None,
        }
    }

    pub(crate) fn as_dynamic_mut(&mut self) -> Option<&mut PhysicsObject> {
        match self {
            Entity::Dynamic(object) => Some(object),
            Entity::Scenery { .. } => None,
        }
    }
}
