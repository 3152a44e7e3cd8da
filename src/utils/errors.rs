// src/utils/errors.rs

use std::fmt;
use std::error::Error;

/// Represents errors that can occur during kinematics calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (e.g., negative or zero mass).
    InvalidMass,
    /// Indicates an invalid time value (e.g., a negative step delta).
    InvalidTime,
    /// Indicates a non-finite numeric input (NaN or infinity).
    NonFiniteValue,
    /// Indicates a division by zero error (e.g., zero total mass in a collision).
    DivisionByZero,
    /// Indicates that two objects occupy exactly the same position,
    /// leaving the separation angle undefined.
    DegenerateGeometry,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidTime => write!(f, "Invalid time value"),
            PhysicsError::NonFiniteValue => write!(f, "Non-finite numeric value"),
            PhysicsError::DivisionByZero => write!(f, "Division by zero"),
            PhysicsError::DegenerateGeometry => write!(f, "Objects are at the same position"),
        }
    }
}

impl Error for PhysicsError {}
