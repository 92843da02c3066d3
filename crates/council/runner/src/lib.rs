//! Episode driver
//!
//! Runs one negotiation end to end: sample a scenario from the seed, solve
//! for the target, then alternate proposals and responses until the state
//! concludes. Rationale text is awaited from a [`RationaleGenerator`]
//! between transitions; the engine itself stays synchronous throughout.

#![deny(unsafe_code)]

use council_engine::{
    create_negotiation_state, evaluate_acceptance, propose_offer, step_negotiation, Mulberry32,
};
use council_episodes::build_episode;
use council_messages::{format_offer_json, RationaleGenerator};
use council_scenario::sample_scenario;
use council_types::{CouncilResult, Episode, NegotiationAction, Role};
use tracing::{debug, info};

/// Drive a complete seeded episode.
///
/// The seed feeds a single RNG stream used for both scenario sampling and
/// offer jitter, so the full turn-by-turn trace is a pure function of
/// `(seed, max_turns)` given a deterministic generator.
pub async fn run_episode(
    seed: u32,
    max_turns: u32,
    generator: &dyn RationaleGenerator,
) -> CouncilResult<Episode> {
    let mut rng = Mulberry32::new(seed);
    let params = sample_scenario(&mut rng)?;
    let mut state = create_negotiation_state(&params, max_turns);
    info!(seed, max_turns, x_star = %state.x_star, "episode started");

    while !state.is_terminal() {
        let proposer = state.proposer();
        let offer = propose_offer(&state, &mut rng);
        let rationale = generator.offer_message(proposer, &offer, &state.x_star).await;
        let message = format!(
            "{proposer} proposes:\n\n```json\n{}\n```\n\n{rationale}",
            format_offer_json(&offer)
        );
        state = step_negotiation(
            &state,
            &NegotiationAction::Offer {
                proposer,
                offer,
                message,
            },
        );

        for role in Role::ALL {
            if role == proposer {
                continue;
            }
            let accept = evaluate_acceptance(&state, role, &offer);
            let rationale = generator.response_message(role, accept, &offer).await;
            state = step_negotiation(
                &state,
                &NegotiationAction::Respond {
                    agent: role,
                    accept,
                    message: format!("{role}: {rationale}"),
                },
            );
            if state.is_terminal() {
                break;
            }
        }
        debug!(turn = state.turn, "round complete");
    }

    build_episode(seed, &state)
}
