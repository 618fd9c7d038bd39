//! Shared test utilities for eta integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Clocks are always fixed so results are deterministic.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
