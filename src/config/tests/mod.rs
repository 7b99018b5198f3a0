//! Unit tests for configuration loading and conversion.
//!
//! Tests are organised into modules by functional area:
//! - `cli_flags`: Short and long flag parsing
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `resolver`: Conversion to the provider configuration
//! - `request`: Selection, flags, and operation mode

mod helpers;
