//! Water Council Domain Types
//!
//! This crate defines the domain types for the Water Council bargaining
//! system: a three-party negotiation over a fixed divisible water budget.
//!
//! # Key Concepts
//!
//! - **Allocation**: a split of the total budget (`TOTAL_WATER` = 100) among
//!   the three council roles. Feasible allocations are non-negative and sum
//!   to the total; raw candidates are normalized by the engine, never
//!   rejected.
//! - **Outside option**: the status-quo allocation each role falls back to
//!   when no agreement is reached; also the feasibility reference for the
//!   Nash bargaining objective.
//! - **Negotiation state**: an immutable record threaded through a pure
//!   transition function. Each step returns a new state; a state is terminal
//!   exactly when its final allocation is set.
//!
//! This is a pure data crate with no engine logic. All types implement
//! `Clone`, `Debug`, `Serialize`, `Deserialize`.

#![deny(unsafe_code)]

mod allocation;
mod episode;
mod errors;
mod negotiation;
mod params;
mod role;

pub use allocation::*;
pub use episode::*;
pub use errors::*;
pub use negotiation::*;
pub use params::*;
pub use role::*;
