// src/utils/constants.rs

use crate::vectors::Vector;

/// Standard gravity as an ambient acceleration field: 9.80665 m/s² straight down.
pub const EARTH_GRAVITY: Vector = Vector::new_unchecked(9.80665, -90.0);
