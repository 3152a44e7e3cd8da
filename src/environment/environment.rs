// src/environment/environment.rs

use std::thread;
use std::time::{Duration, Instant};
use log::debug;
use rayon::prelude::*;
use crate::utils::errors::PhysicsError;
use crate::interactions::{elastic_collision_2d, BodyState};
use crate::objects::{Entity, PhysicsObject};
use crate::vectors::Vector;

/// Handle to a registered entity, returned by registration and used by the
/// driver to query derived state for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A simulated scene: the canonical clock, the ambient acceleration fields
/// shared by every object, and the entity registry.
///
/// The environment advances only when an external driver calls
/// [`PhysicsEnvironment::step`]; objects never poll the clock themselves.
/// Registration order is update and collision order.
pub struct PhysicsEnvironment {
    name: String,
    time: f64,
    ambient_fields: Vec<Vector>,
    entities: Vec<Entity>,
}

impl PhysicsEnvironment {
    /// Creates a new environment with a display name and the ambient
    /// acceleration fields (e.g. gravity) applied to every registered object.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::environment::PhysicsEnvironment;
    /// use rs_kinematics::EARTH_GRAVITY;
    ///
    /// let env = PhysicsEnvironment::new("Room 1", vec![EARTH_GRAVITY]);
    /// assert_eq!(env.time(), 0.0);
    /// ```
    pub fn new(name: impl Into<String>, ambient_fields: Vec<Vector>) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            ambient_fields,
            entities: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The simulation clock in seconds. Monotonic, non-negative, and
    /// unrelated to wall-clock time.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ambient_fields(&self) -> &[Vector] {
        &self.ambient_fields
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity(&self, id: ObjectId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// The simulated object behind `id`, if the entity is physics-enabled.
    pub fn object(&self, id: ObjectId) -> Option<&PhysicsObject> {
        self.entities.get(id.0).and_then(Entity::as_dynamic)
    }

    /// Appends a simulated object to the registry. The object becomes part of
    /// the stepped set from the next step onward. The caller must not register
    /// the same object twice.
    pub fn register_object(&mut self, object: PhysicsObject) -> ObjectId {
        debug!("Registering object {:?} in environment {:?}", object.name(), self.name);
        self.entities.push(Entity::Dynamic(object));
        ObjectId(self.entities.len() - 1)
    }

    /// Appends a display-only entity. Scenery is never stepped and never
    /// participates in collisions; it exists so a renderer can key every
    /// drawn shape off the same registry.
    pub fn register_scenery(
        &mut self,
        name: impl Into<String>,
        position: (f64, f64),
    ) -> Result<ObjectId, PhysicsError> {
        if !position.0.is_finite() || !position.1.is_finite() {
            return Err(PhysicsError::NonFiniteValue);
        }
        self.entities.push(Entity::Scenery { name: name.into(), position });
        Ok(ObjectId(self.entities.len() - 1))
    }

    /// Advances the simulation clock by `delta` seconds.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidTime` if `delta` is negative or non-finite.
    pub fn advance_time(&mut self, delta: f64) -> Result<(), PhysicsError> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(PhysicsError::InvalidTime);
        }
        self.time += delta;
        Ok(())
    }

    /// The derived cartesian position of an entity at the current clock value.
    pub fn position_of(&self, id: ObjectId) -> Option<(f64, f64)> {
        match self.entities.get(id.0)? {
            Entity::Scenery { position, .. } => Some(*position),
            Entity::Dynamic(object) => Some(object.position_vector(&self.ambient_fields, self.time)),
        }
    }

    /// The derived velocity of a simulated object at the current clock value.
    /// `None` for scenery.
    pub fn velocity_of(&self, id: ObjectId) -> Option<Vector> {
        self.object(id)
            .map(|object| object.velocity_vector(&self.ambient_fields, self.time))
    }

    /// The derived momentum of a simulated object at the current clock value.
    /// `None` for scenery.
    pub fn momentum_of(&self, id: ObjectId) -> Option<Vector> {
        self.object(id)
            .map(|object| object.momentum_vector(&self.ambient_fields, self.time))
    }

    /// Movement of a simulated object since its last movement query, for
    /// renderers that translate shapes by deltas. `None` for scenery.
    pub fn movement_of(&mut self, id: ObjectId) -> Option<(f64, f64)> {
        let current = self
            .object(id)?
            .position_vector(&self.ambient_fields, self.time);
        let object = self.entities.get_mut(id.0).and_then(Entity::as_dynamic_mut)?;
        Some(object.advance_movement_mark(current))
    }

    /// Advances the clock by `delta` and resolves collisions.
    ///
    /// Every dynamic entity's derived velocity and position are recomputed for
    /// the new clock value first, as pure functions of pre-step state evaluated
    /// in parallel. Collisions are then checked pairwise in registry order
    /// through the injected `overlaps` predicate, which receives both handles
    /// and derived positions; the concrete footprint geometry is the caller's
    /// concern. Each overlapping pair is resolved once: post-collision
    /// velocities come from the 1D elastic equation along the separation axis,
    /// and both objects are re-anchored at the impact instant with their
    /// movement marks cleared. When an object overlaps several partners in
    /// the same step, each pair is resolved independently against the
    /// pre-step snapshot and the last resolved pair wins for the shared
    /// object.
    ///
    /// If `realtime` is set, the call sleeps for `delta` simulated seconds
    /// minus the compute time before returning. Best-effort pacing only.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidTime` if `delta` is negative or non-finite.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::environment::PhysicsEnvironment;
    /// use rs_kinematics::objects::PhysicsObject;
    /// use rs_kinematics::vectors::Vector;
    /// use rs_kinematics::EARTH_GRAVITY;
    ///
    /// let mut env = PhysicsEnvironment::new("Scene", vec![EARTH_GRAVITY]);
    /// let ball = env.register_object(PhysicsObject::new(
    ///     "Ball", 1.0, Vector::from_polar(50.0, 45.0).unwrap(), (0.0, 0.0), Vec::new(), 0.0,
    /// ).unwrap());
    ///
    /// // Radius-based overlap test supplied by the driver.
    /// env.step(0.1, false, |_, (ax, ay), _, (bx, by)| {
    ///     (ax - bx).hypot(ay - by) < 1.0
    /// }).unwrap();
    ///
    /// assert_eq!(env.time(), 0.1);
    /// assert!(env.position_of(ball).is_some());
    /// ```
    pub fn step<F>(&mut self, delta: f64, realtime: bool, mut overlaps: F) -> Result<(), PhysicsError>
    where
        F: FnMut(ObjectId, (f64, f64), ObjectId, (f64, f64)) -> bool,
    {
        let compute_start = Instant::now();
        self.advance_time(delta)?;
        let time = self.time;

        // Snapshot of every dynamic entity's derived state at the new clock
        // value, taken before any collision mutates an object.
        let snapshots: Vec<Option<BodyState>> = self
            .entities
            .par_iter()
            .map(|entity| {
                entity.as_dynamic().map(|object| BodyState {
                    mass: object.mass(),
                    velocity: object.velocity_vector(&self.ambient_fields, time),
                    position: object.position_vector(&self.ambient_fields, time),
                })
            })
            .collect();

        for i in 0..self.entities.len() {
            for j in (i + 1)..self.entities.len() {
                let (Some(state_i), Some(state_j)) = (snapshots[i], snapshots[j]) else {
                    continue;
                };
                if !overlaps(ObjectId(i), state_i.position, ObjectId(j), state_j.position) {
                    continue;
                }

                debug!(
                    "Collision between {:?} and {:?} at t = {}",
                    self.entities[i].name(),
                    self.entities[j].name(),
                    time
                );

                let (velocity_i, velocity_j) = elastic_collision_2d(&state_i, &state_j)?;
                for (index, velocity, state) in
                    [(i, velocity_i, state_i), (j, velocity_j, state_j)]
                {
                    if let Some(object) = self.entities[index].as_dynamic_mut() {
                        object.reset_initial_conditions(velocity, time, state.position);
                        object.clear_movement_mark(state.position);
                    }
                }
            }
        }

        if realtime {
            // Deltas beyond Duration's range cannot be paced; skip the sleep
            // rather than panic, keeping step total for all finite deltas.
            if let Ok(pace) = Duration::try_from_secs_f64(delta) {
                let compute_time = compute_start.elapsed();
                if pace > compute_time {
                    thread::sleep(pace - compute_time);
                }
            }
        }

        Ok(())
    }
}
