//! Negotiation records
//!
//! A negotiation is advanced by a pure transition function over these
//! records: each step consumes a state and an action and yields a new state.
//! Nothing here is mutated in place by the engine, so a state value can be
//! shared freely once produced.

use crate::{AcceptFlags, Allocation, BargainingParams, Role, Utilities};
use serde::{Deserialize, Serialize};

/// One completed round: one offer plus the responses it collected
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationTurn {
    /// Zero-based round number
    pub turn: u32,
    pub proposer: Role,
    /// The offer after simplex projection
    pub offer: Allocation,
    pub accept_flags: AcceptFlags,
    /// Utilities every role would realize at this offer
    pub utilities: Utilities,
    /// Opaque rationale text attached during the turn, in arrival order
    pub messages: Vec<String>,
}

/// Utilities observed at one turn, for the episode time series
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilitySample {
    pub turn: u32,
    pub utilities: Utilities,
}

/// An input to the negotiation transition function
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NegotiationAction {
    /// A role puts a candidate allocation on the table
    Offer {
        proposer: Role,
        /// Raw candidate; the engine projects it before recording
        offer: Allocation,
        message: String,
    },
    /// A role accepts or rejects the current offer
    Respond {
        agent: Role,
        accept: bool,
        message: String,
    },
}

/// Full negotiation state, threaded functionally through the engine.
///
/// The state is terminal exactly when `final_x` is set; `success` is set
/// together with it. Terminal states absorb every further action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationState {
    pub params: BargainingParams,
    /// Nash bargaining target the agents drift toward
    pub x_star: Allocation,
    pub outside_option_allocation: Allocation,
    /// Utilities at the outside option, the bargaining disagreement point
    pub outside_utilities: Utilities,
    pub current_offer: Option<Allocation>,
    /// Highest-Nash-score offer seen so far
    pub best_offer: Option<Allocation>,
    /// Current round, starting at 0
    pub turn: u32,
    pub max_turns: u32,
    /// Round-robin pointer into `Role::ALL`
    pub proposer_index: usize,
    /// Append-only record of completed turns
    pub history: Vec<NegotiationTurn>,
    /// Final allocation, set once on conclusion
    pub final_x: Option<Allocation>,
    /// Whether the conclusion was a unanimous agreement
    pub success: Option<bool>,
    /// Append-only per-turn utility log
    pub utilities_over_time: Vec<UtilitySample>,
}

impl NegotiationState {
    /// Whether the negotiation has concluded
    pub fn is_terminal(&self) -> bool {
        self.final_x.is_some()
    }

    /// The role whose turn it is to propose
    pub fn proposer(&self) -> Role {
        Role::ALL[self.proposer_index % Role::ALL.len()]
    }

    pub fn latest_turn(&self) -> Option<&NegotiationTurn> {
        self.history.last()
    }
}
