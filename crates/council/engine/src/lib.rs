//! Water Council Bargaining Engine
//!
//! The algorithmic core of the council: everything here is synchronous,
//! single-threaded, and pure. A driver seeds parameters, asks the solver for
//! the Nash bargaining target, then threads a `NegotiationState` through the
//! protocol's transition function until it concludes with an agreement or
//! the status-quo fallback.
//!
//! # Modules
//!
//! - [`geometry`] — feasibility clamping and exact simplex projection
//! - [`utility`] — per-role utilities and the Nash bargaining objective
//! - [`rng`] — seeded deterministic stream for sampling and offer jitter
//! - [`solver`] — grid search plus projected gradient ascent
//! - [`protocol`] — the turn-based offer/response state machine

#![deny(unsafe_code)]

pub mod geometry;
pub mod protocol;
pub mod rng;
pub mod solver;
pub mod utility;

pub use geometry::{clamp, project_to_simplex};
pub use protocol::{
    acceptance_threshold, create_negotiation_state, evaluate_acceptance, propose_offer,
    step_negotiation, DEFAULT_MAX_TURNS,
};
pub use rng::Mulberry32;
pub use solver::solve_nash_bargaining;
pub use utility::{compute_utilities, nash_objective, outside_utilities};
