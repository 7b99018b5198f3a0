//! Shared test utilities.

pub mod repository;
pub mod runtime;
