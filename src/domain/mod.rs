//! src/domain/mod.rs
mod appointment;
pub use appointment::*;
