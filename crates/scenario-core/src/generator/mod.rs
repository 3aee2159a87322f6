//! Random snapshot generator.
//!
//! Produces one snapshot per tick and replaces the shared feed file.

pub mod errors;
pub mod handler;
pub mod operations;

pub use errors::GeneratorError;
pub use handler::{publish_once, run_generator};
pub use operations::{generate_snapshot, make_rng};
