// src/vectors/vectors.rs

use std::ops::Add;
use crate::utils::errors::PhysicsError;

/// A 2D vector in polar form: a non-negative magnitude and an argument
/// (angle from the positive horizontal axis) in degrees, wrapped to (-180, 180].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    magnitude: f64,
    argument: f64,
}

/// Wraps an angle in degrees into the range (-180, 180].
fn wrap_degrees(argument: f64) -> f64 {
    let wrapped = argument % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

impl Vector {
    /// The zero vector. Its argument is 0 by convention.
    pub const ZERO: Vector = Vector { magnitude: 0.0, argument: 0.0 };

    /// Constructs a vector from already-normalized polar components.
    /// The caller guarantees a non-negative magnitude and a wrapped argument.
    pub(crate) const fn new_unchecked(magnitude: f64, argument: f64) -> Self {
        Self { magnitude, argument }
    }

    /// Creates a vector from a magnitude and an argument in degrees.
    ///
    /// A negative magnitude is folded into the direction (the argument is
    /// rotated by 180°), so the stored magnitude is always non-negative.
    /// A zero-magnitude vector has argument 0 by convention.
    ///
    /// # Errors
    /// Returns `PhysicsError::NonFiniteValue` if either component is NaN or infinite.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::vectors::Vector;
    ///
    /// let v = Vector::from_polar(100.0, 45.0).unwrap();
    /// assert_eq!(v.magnitude(), 100.0);
    /// assert_eq!(v.argument(), 45.0);
    ///
    /// // Same vector as (10, -90)
    /// let down = Vector::from_polar(-10.0, 90.0).unwrap();
    /// assert_eq!(down.magnitude(), 10.0);
    /// assert_eq!(down.argument(), -90.0);
    /// ```
    pub fn from_polar(magnitude: f64, argument: f64) -> Result<Self, PhysicsError> {
        if !magnitude.is_finite() || !argument.is_finite() {
            return Err(PhysicsError::NonFiniteValue);
        }
        let (magnitude, argument) = if magnitude < 0.0 {
            (-magnitude, argument + 180.0)
        } else {
            (magnitude, argument)
        };
        if magnitude == 0.0 {
            return Ok(Vector::ZERO);
        }
        Ok(Self { magnitude, argument: wrap_degrees(argument) })
    }

    /// Creates a vector from cartesian components.
    ///
    /// The argument is derived with a two-argument arctangent, so the result
    /// is quadrant-correct for all finite inputs. The origin maps to the zero
    /// vector with argument 0.
    ///
    /// # Errors
    /// Returns `PhysicsError::NonFiniteValue` if either component is NaN or infinite.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::vectors::Vector;
    ///
    /// let v = Vector::from_cartesian(-1.0, 1.0).unwrap();
    /// assert!((v.magnitude() - 2.0_f64.sqrt()).abs() < 1e-12);
    /// assert!((v.argument() - 135.0).abs() < 1e-12);
    /// ```
    pub fn from_cartesian(x: f64, y: f64) -> Result<Self, PhysicsError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PhysicsError::NonFiniteValue);
        }
        Ok(Self::from_cartesian_unchecked(x, y))
    }

    /// Cartesian conversion for components that are already known to be finite
    /// (intermediate results of vector arithmetic).
    pub(crate) fn from_cartesian_unchecked(x: f64, y: f64) -> Self {
        let magnitude = x.hypot(y);
        // atan2 already lands in (-180, 180] once converted to degrees
        let argument = if magnitude == 0.0 { 0.0 } else { y.atan2(x).to_degrees() };
        Self { magnitude, argument }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// The angle from the positive horizontal axis, in degrees, in (-180, 180].
    pub fn argument(&self) -> f64 {
        self.argument
    }

    /// Returns the cartesian `(x, y)` components of the vector.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::vectors::Vector;
    ///
    /// let (x, y) = Vector::from_polar(2.0, 180.0).unwrap().to_cartesian();
    /// assert!((x + 2.0).abs() < 1e-12);
    /// assert!(y.abs() < 1e-12);
    /// ```
    pub fn to_cartesian(&self) -> (f64, f64) {
        let argument = self.argument.to_radians();
        (self.magnitude * argument.cos(), self.magnitude * argument.sin())
    }

    /// Sums any sequence of vectors by accumulating cartesian components and
    /// converting back to polar form. An empty sequence yields the zero vector.
    ///
    /// This is the sole aggregation primitive used for combining acceleration
    /// fields and momenta.
    ///
    /// # Example
    /// ```
    /// use rs_kinematics::vectors::Vector;
    ///
    /// let total = Vector::sum([
    ///     Vector::from_polar(1.0, 0.0).unwrap(),
    ///     Vector::from_polar(1.0, 90.0).unwrap(),
    /// ]);
    /// assert!((total.magnitude() - 2.0_f64.sqrt()).abs() < 1e-12);
    /// assert!((total.argument() - 45.0).abs() < 1e-12);
    /// ```
    pub fn sum<I>(vectors: I) -> Vector
    where
        I: IntoIterator<Item = Vector>,
    {
        let (mut x, mut y) = (0.0, 0.0);
        for vector in vectors {
            let (vx, vy) = vector.to_cartesian();
            x += vx;
            y += vy;
        }
        Vector::from_cartesian_unchecked(x, y)
    }

    /// Scales the magnitude by `factor`. A negative factor reverses the
    /// direction, keeping the stored magnitude non-negative.
    pub fn scale(&self, factor: f64) -> Vector {
        if factor < 0.0 {
            Vector {
                magnitude: self.magnitude * -factor,
                argument: wrap_degrees(self.argument + 180.0),
            }
        } else {
            Vector { magnitude: self.magnitude * factor, argument: self.argument }
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        let (x1, y1) = self.to_cartesian();
        let (x2, y2) = other.to_cartesian();
        Vector::from_cartesian_unchecked(x1 + x2, y1 + y2)
    }
}
