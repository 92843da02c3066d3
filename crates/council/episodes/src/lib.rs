//! Episode assembly and storage
//!
//! Flattens a concluded negotiation into an `Episode` record and keeps
//! finished episodes in an in-memory store keyed by id. Durable persistence
//! is out of scope; the record is fully serde-serializable for whatever
//! transport or storage sits behind this seam.

#![deny(unsafe_code)]

use chrono::Utc;
use council_engine::compute_utilities;
use council_types::{CouncilError, CouncilResult, Episode, NegotiationState};
use std::collections::HashMap;
use tracing::info;

/// Flatten a terminal negotiation state into an episode record.
///
/// Fails with [`CouncilError::NegotiationNotConcluded`] when the state has
/// no final allocation yet.
pub fn build_episode(seed: u32, state: &NegotiationState) -> CouncilResult<Episode> {
    let final_x = state
        .final_x
        .ok_or(CouncilError::NegotiationNotConcluded {
            turn: state.turn,
            max_turns: state.max_turns,
        })?;
    let success = state.success.unwrap_or(false);
    Ok(Episode {
        id: Episode::id_for_seed(seed),
        seed,
        params: state.params,
        x_star: state.x_star,
        turns: state.history.clone(),
        final_x,
        success,
        utilities_over_time: state.utilities_over_time.clone(),
        final_utilities: compute_utilities(&state.params, &final_x),
        created_at: Utc::now(),
    })
}

/// In-memory episode store keyed by episode id
#[derive(Debug, Default)]
pub struct EpisodeStore {
    episodes: HashMap<String, Episode>,
}

impl EpisodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an episode, replacing any previous record with the same id
    pub fn create(&mut self, episode: Episode) -> &Episode {
        let id = episode.id.clone();
        info!(episode = %id, success = episode.success, "episode stored");
        self.episodes.insert(id.clone(), episode);
        // Present right after insertion.
        &self.episodes[&id]
    }

    pub fn get(&self, id: &str) -> CouncilResult<&Episode> {
        self.episodes
            .get(id)
            .ok_or_else(|| CouncilError::EpisodeNotFound(id.to_string()))
    }

    /// All stored episodes, in unspecified order
    pub fn list(&self) -> Vec<&Episode> {
        self.episodes.values().collect()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}
