pub mod errors;
pub mod constants;

pub use constants::EARTH_GRAVITY;
pub use errors::PhysicsError;
