//! Persisted negotiation episodes
//!
//! A finished negotiation is flattened into an `Episode` for storage or
//! transport. The record carries everything needed to replay or audit the
//! run: the seed, the sampled parameters, the solved target, the full turn
//! history, and the realized outcome.

use crate::{Allocation, BargainingParams, NegotiationTurn, Utilities, UtilitySample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed negotiation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Stable identifier, derived from the seed
    pub id: String,
    /// RNG seed the episode was driven with
    pub seed: u32,
    pub params: BargainingParams,
    /// Nash bargaining target computed for these parameters
    pub x_star: Allocation,
    pub turns: Vec<NegotiationTurn>,
    /// Agreed allocation, or the outside option on fallback
    pub final_x: Allocation,
    pub success: bool,
    pub utilities_over_time: Vec<UtilitySample>,
    /// Utilities realized at the final allocation
    pub final_utilities: Utilities,
    pub created_at: DateTime<Utc>,
}

impl Episode {
    /// Canonical episode id for a seed
    pub fn id_for_seed(seed: u32) -> String {
        format!("water-council-{seed}")
    }
}
