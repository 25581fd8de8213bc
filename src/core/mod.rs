//! Core building blocks: launcher parameters and path normalization,
//! input staging, and container command construction/execution. These are
//! the primitives consumed by the high-level `api` module.
pub mod command;
pub mod params;
pub mod staging;
