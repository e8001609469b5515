//! Orchestration: starts the collection actors and wires them together.

pub mod restaurant_system;

pub use restaurant_system::*;
