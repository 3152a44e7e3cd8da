mod environment;

pub use environment::*;

#[cfg(test)]
mod environment_tests;
