//! Error types for the Water Council system
//!
//! The bargaining engine itself has no error path: malformed offers are
//! projected onto the simplex, late responses are no-ops, and an infeasible
//! grid falls back to the near-equal split. Errors only arise upstream of
//! the engine (scenario construction) or around it (episode handling).

/// Errors that can occur around the bargaining engine
#[derive(Debug, thiserror::Error)]
pub enum CouncilError {
    #[error("Outside option cannot be renormalized: components sum to {total}")]
    DegenerateOutsideOption { total: f64 },

    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    #[error("Negotiation has not concluded: turn {turn} of {max_turns}")]
    NegotiationNotConcluded { turn: u32, max_turns: u32 },
}

/// Result type alias for council operations
pub type CouncilResult<T> = Result<T, CouncilError>;
