//! Negotiation protocol
//!
//! A turn-based offer/response state machine. One turn is one offer plus up
//! to two responses; unanimous acceptance concludes with an agreement, and
//! exhausting the turn budget concludes with the status-quo fallback. The
//! transition function is pure: it never mutates the state it is given and
//! a terminal state absorbs every further action unchanged.
//!
//! Raw offers are projected onto the simplex rather than rejected, and a
//! response with no offer on the table is a silent no-op, so unreliable
//! callers cannot corrupt a negotiation.

use crate::geometry::{interpolate, project_to_simplex};
use crate::rng::Mulberry32;
use crate::solver::solve_nash_bargaining;
use crate::utility::{compute_utilities, nash_objective, outside_utilities};
use council_types::{
    AcceptFlags, Allocation, BargainingParams, NegotiationAction, NegotiationState,
    NegotiationTurn, Role, UtilitySample,
};
use tracing::{debug, info};

/// Default turn budget for an episode
pub const DEFAULT_MAX_TURNS: u32 = 9;

/// Fraction of the distance toward `x*` an offer drifts per proposal
const DRIFT_ALPHA: f64 = 0.6;
/// Offer jitter is uniform in `[-3, 3]` per axis
const JITTER_SPAN: f64 = 6.0;

/// Start a new negotiation: solve for the target and seed the first round
pub fn create_negotiation_state(params: &BargainingParams, max_turns: u32) -> NegotiationState {
    let x_star = solve_nash_bargaining(params);
    info!(%x_star, max_turns, "negotiation created");
    NegotiationState {
        params: *params,
        x_star,
        outside_option_allocation: params.outside_option_allocation,
        outside_utilities: outside_utilities(params),
        current_offer: None,
        best_offer: None,
        turn: 0,
        max_turns,
        proposer_index: 0,
        history: Vec::new(),
        final_x: None,
        success: None,
        utilities_over_time: Vec::new(),
    }
}

fn offer_score(state: &NegotiationState, offer: &Allocation) -> f64 {
    nash_objective(
        &compute_utilities(&state.params, offer),
        &state.outside_utilities,
    )
}

fn update_best_offer(state: &mut NegotiationState, offer: &Allocation) {
    match state.best_offer {
        None => state.best_offer = Some(*offer),
        Some(best) => {
            if offer_score(state, offer) > offer_score(state, &best) {
                state.best_offer = Some(*offer);
            }
        }
    }
}

/// Advance the negotiation by one action, returning the successor state.
///
/// Terminal states are returned unchanged, as is a response that arrives
/// with no offer on the table.
pub fn step_negotiation(state: &NegotiationState, action: &NegotiationAction) -> NegotiationState {
    if state.is_terminal() {
        return state.clone();
    }

    let mut next = state.clone();
    match action {
        NegotiationAction::Offer {
            proposer,
            offer,
            message,
        } => {
            let offer = project_to_simplex(offer);
            next.current_offer = Some(offer);
            update_best_offer(&mut next, &offer);

            let utilities = compute_utilities(&state.params, &offer);
            next.history.push(NegotiationTurn {
                turn: state.turn,
                proposer: *proposer,
                offer,
                accept_flags: AcceptFlags::for_proposer(*proposer),
                utilities,
                messages: vec![message.clone()],
            });
            next.utilities_over_time.push(UtilitySample {
                turn: state.turn,
                utilities,
            });
            debug!(turn = state.turn, proposer = %proposer, %offer, "offer recorded");
        }
        NegotiationAction::Respond {
            agent,
            accept,
            message,
        } => {
            if state.current_offer.is_none() {
                return next;
            }
            let Some(last) = next.history.last_mut() else {
                return next;
            };
            last.accept_flags.set(*agent, *accept);
            last.messages.push(message.clone());
            debug!(turn = state.turn, agent = %agent, accept = *accept, "response recorded");

            let flags = last.accept_flags;
            if flags.all_responded() {
                if flags.all_accepted() {
                    next.final_x = next.current_offer;
                    next.success = Some(true);
                    info!(turn = state.turn, "negotiation concluded with agreement");
                } else {
                    let next_turn = state.turn + 1;
                    if next_turn >= state.max_turns {
                        next.final_x = Some(state.outside_option_allocation);
                        next.success = Some(false);
                        info!(
                            turn = state.turn,
                            "turn budget exhausted, falling back to outside option"
                        );
                    } else {
                        next.turn = next_turn;
                        next.proposer_index = (state.proposer_index + 1) % Role::ALL.len();
                        next.current_offer = None;
                    }
                }
            }
        }
    }
    next
}

/// Generate the proposer's next offer: drift 60% from the current anchor
/// toward `x*`, add bounded jitter per axis, and project.
///
/// The anchor is the standing offer when one exists, else the outside
/// option, so offers approach the target as rounds accumulate even though
/// the jitter magnitude is fixed.
pub fn propose_offer(state: &NegotiationState, rng: &mut Mulberry32) -> Allocation {
    let base = state
        .current_offer
        .unwrap_or(state.outside_option_allocation);
    let drift = interpolate(&base, &state.x_star, DRIFT_ALPHA);
    let candidate = Allocation::new(
        drift.hydro + (rng.next_f64() - 0.5) * JITTER_SPAN,
        drift.agri + (rng.next_f64() - 0.5) * JITTER_SPAN,
        drift.infra + (rng.next_f64() - 0.5) * JITTER_SPAN,
    );
    project_to_simplex(&candidate)
}

/// The reference allocation a role compares offers against: a blend of the
/// target, the best offer seen so far, and the outside option.
pub fn acceptance_threshold(state: &NegotiationState) -> Allocation {
    let best = state.best_offer.unwrap_or(state.x_star);
    let blended = Allocation::new(
        0.6 * state.x_star.hydro + 0.3 * best.hydro + 0.1 * state.outside_option_allocation.hydro,
        0.6 * state.x_star.agri + 0.3 * best.agri + 0.1 * state.outside_option_allocation.agri,
        0.6 * state.x_star.infra + 0.3 * best.infra + 0.1 * state.outside_option_allocation.infra,
    );
    project_to_simplex(&blended)
}

/// Whether `role` accepts `offer`.
///
/// Each role compares only its own utility at the offer against its own
/// utility at the blended threshold. This is deliberately self-interested:
/// a role can rationally reject an offer that improves aggregate welfare.
pub fn evaluate_acceptance(state: &NegotiationState, role: Role, offer: &Allocation) -> bool {
    let threshold = acceptance_threshold(state);
    let offer_utilities = compute_utilities(&state.params, offer);
    let threshold_utilities = compute_utilities(&state.params, &threshold);
    offer_utilities.for_role(role) >= threshold_utilities.for_role(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_types::{AgriParams, HydroParams, InfraParams, TOTAL_WATER};

    // A parameter set with a genuinely feasible bargain: agriculture's
    // outside draw exceeds both watchers' caps, so reallocating water can
    // give every role a strict surplus over the status quo.
    fn params() -> BargainingParams {
        BargainingParams {
            hydro: HydroParams {
                a: 8.5,
                p: 0.8,
                cap_agri_excess: 38.0,
                drought_threshold: 24.0,
                drought_penalty: 0.6,
            },
            agri: AgriParams {
                a: 9.2,
                p: 0.7,
                cap_env_excess: 30.0,
                crop_threshold: 32.0,
                crop_penalty: 0.5,
            },
            infra: InfraParams {
                a: 8.2,
                p: 0.65,
                cap_agri_excess2: 38.0,
                service_threshold: 28.0,
                service_penalty: 0.55,
            },
            outside_option_allocation: Allocation::new(35.0, 45.0, 20.0),
            grid_step: 5.0,
        }
    }

    // Symmetric, generous parameters: thresholds below every outside share,
    // caps well above any realistic draw.
    fn generous_params() -> BargainingParams {
        BargainingParams {
            hydro: HydroParams {
                a: 8.5,
                p: 0.8,
                cap_agri_excess: 65.0,
                drought_threshold: 20.0,
                drought_penalty: 0.6,
            },
            agri: AgriParams {
                a: 9.2,
                p: 0.7,
                cap_env_excess: 65.0,
                crop_threshold: 20.0,
                crop_penalty: 0.5,
            },
            infra: InfraParams {
                a: 8.2,
                p: 0.65,
                cap_agri_excess2: 65.0,
                service_threshold: 20.0,
                service_penalty: 0.55,
            },
            outside_option_allocation: Allocation::new(34.0, 33.0, 33.0),
            grid_step: 5.0,
        }
    }

    fn offer_action(proposer: Role, offer: Allocation) -> NegotiationAction {
        NegotiationAction::Offer {
            proposer,
            offer,
            message: "offer".into(),
        }
    }

    fn respond_action(agent: Role, accept: bool) -> NegotiationAction {
        NegotiationAction::Respond {
            agent,
            accept,
            message: "response".into(),
        }
    }

    /// Drive a full episode the way the runner does
    fn drive(config: &BargainingParams, seed: u32, max_turns: u32) -> NegotiationState {
        let mut rng = Mulberry32::new(seed);
        let mut state = create_negotiation_state(config, max_turns);
        while !state.is_terminal() {
            let proposer = state.proposer();
            let offer = propose_offer(&state, &mut rng);
            state = step_negotiation(&state, &offer_action(proposer, offer));
            for role in Role::ALL {
                if role == proposer {
                    continue;
                }
                let accept = evaluate_acceptance(&state, role, &offer);
                state = step_negotiation(&state, &respond_action(role, accept));
                if state.is_terminal() {
                    break;
                }
            }
        }
        state
    }

    #[test]
    fn test_raw_offer_is_projected_before_recording() {
        let state = create_negotiation_state(&params(), 9);
        let next = step_negotiation(
            &state,
            &offer_action(Role::Hydrologist, Allocation::new(200.0, -50.0, 10.0)),
        );
        let offer = next.current_offer.expect("offer should be set");
        assert!((offer.total() - TOTAL_WATER).abs() < 1e-6);
        assert!(offer.hydro >= 0.0 && offer.agri >= 0.0 && offer.infra >= 0.0);
        assert_eq!(next.history.len(), 1);
        assert_eq!(next.history[0].offer, offer);
        assert_eq!(next.utilities_over_time.len(), 1);
    }

    #[test]
    fn test_first_offer_becomes_best_even_when_infeasible() {
        let state = create_negotiation_state(&params(), 9);
        // (34, 33, 33) leaves agriculture below its outside option.
        let infeasible = Allocation::new(34.0, 33.0, 33.0);
        let next = step_negotiation(&state, &offer_action(Role::Hydrologist, infeasible));
        assert_eq!(next.best_offer, Some(infeasible));
    }

    #[test]
    fn test_higher_scoring_offer_replaces_best() {
        let state = create_negotiation_state(&params(), 9);
        let weak = Allocation::new(34.0, 33.0, 33.0);
        let strong = Allocation::new(30.0, 35.0, 35.0);
        let mut state = step_negotiation(&state, &offer_action(Role::Hydrologist, weak));
        state = step_negotiation(&state, &offer_action(Role::Agriculture, strong));
        assert_eq!(state.best_offer, Some(strong));
        // Re-offering the weak allocation does not displace the best.
        state = step_negotiation(&state, &offer_action(Role::Infrastructure, weak));
        assert_eq!(state.best_offer, Some(strong));
    }

    #[test]
    fn test_respond_without_offer_is_noop() {
        let state = create_negotiation_state(&params(), 9);
        let next = step_negotiation(&state, &respond_action(Role::Agriculture, true));
        assert_eq!(next, state);
    }

    #[test]
    fn test_terminal_state_absorbs_all_actions() {
        let config = params();
        let state = drive(&config, 99, 9);
        assert!(state.is_terminal());
        let after_offer = step_negotiation(
            &state,
            &offer_action(Role::Hydrologist, Allocation::equal_split()),
        );
        assert_eq!(after_offer, state);
        let after_respond = step_negotiation(&state, &respond_action(Role::Agriculture, false));
        assert_eq!(after_respond, state);
    }

    #[test]
    fn test_unanimous_acceptance_concludes_with_offer() {
        let state = create_negotiation_state(&params(), 9);
        let offer = Allocation::new(30.0, 38.0, 32.0);
        let mut state = step_negotiation(&state, &offer_action(Role::Hydrologist, offer));
        let recorded = state.current_offer.expect("offer should be set");
        state = step_negotiation(&state, &respond_action(Role::Agriculture, true));
        assert!(!state.is_terminal());
        state = step_negotiation(&state, &respond_action(Role::Infrastructure, true));
        assert!(state.is_terminal());
        assert_eq!(state.success, Some(true));
        assert_eq!(state.final_x, Some(recorded));
    }

    #[test]
    fn test_rejection_advances_turn_and_rotates_proposer() {
        let state = create_negotiation_state(&params(), 9);
        assert_eq!(state.proposer(), Role::Hydrologist);
        let mut state = step_negotiation(
            &state,
            &offer_action(Role::Hydrologist, Allocation::equal_split()),
        );
        state = step_negotiation(&state, &respond_action(Role::Agriculture, false));
        state = step_negotiation(&state, &respond_action(Role::Infrastructure, true));
        assert!(!state.is_terminal());
        assert_eq!(state.turn, 1);
        assert_eq!(state.proposer(), Role::Agriculture);
        assert_eq!(state.current_offer, None);
    }

    #[test]
    fn test_exhaustion_falls_back_to_outside_option() {
        let config = params();
        let state = create_negotiation_state(&config, 1);
        let mut state = step_negotiation(
            &state,
            &offer_action(Role::Hydrologist, Allocation::equal_split()),
        );
        state = step_negotiation(&state, &respond_action(Role::Agriculture, false));
        state = step_negotiation(&state, &respond_action(Role::Infrastructure, false));
        assert!(state.is_terminal());
        assert_eq!(state.success, Some(false));
        assert_eq!(state.final_x, Some(config.outside_option_allocation));
    }

    #[test]
    fn test_driver_loop_always_terminates_within_budget() {
        for seed in [1, 7, 42, 99, 2024] {
            let state = drive(&params(), seed, 9);
            assert!(state.is_terminal());
            assert!(state.turn <= state.max_turns);
        }
    }

    #[test]
    fn test_seeded_trace_is_deterministic() {
        let first = drive(&params(), 99, 9);
        let second = drive(&params(), 99, 9);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generous_scenario_converges_near_target() {
        let config = generous_params();
        let state = drive(&config, 5, 9);
        assert_eq!(state.success, Some(true));
        assert!(state.turn <= 3, "agreed only at turn {}", state.turn);
        let final_x = state.final_x.expect("terminal state");
        assert!((final_x.hydro - state.x_star.hydro).abs() < 5.0);
        assert!((final_x.agri - state.x_star.agri).abs() < 5.0);
        assert!((final_x.infra - state.x_star.infra).abs() < 5.0);
    }

    #[test]
    fn test_role_can_reject_offer_that_helps_the_group() {
        // Acceptance is single-coordinate and self-interested: this offer
        // beats the blended threshold on aggregate welfare, yet agriculture
        // rejects it because its own coordinate falls short.
        let state = create_negotiation_state(&params(), 9);
        let offer = Allocation::new(30.0, 37.0, 33.0);
        let threshold = acceptance_threshold(&state);

        let offer_utilities = compute_utilities(&state.params, &offer);
        let threshold_utilities = compute_utilities(&state.params, &threshold);
        let offer_total =
            offer_utilities.hydro + offer_utilities.agri + offer_utilities.infra;
        let threshold_total =
            threshold_utilities.hydro + threshold_utilities.agri + threshold_utilities.infra;
        assert!(offer_total > threshold_total);

        assert!(evaluate_acceptance(&state, Role::Hydrologist, &offer));
        assert!(evaluate_acceptance(&state, Role::Infrastructure, &offer));
        assert!(!evaluate_acceptance(&state, Role::Agriculture, &offer));
    }

    #[test]
    fn test_propose_offer_is_feasible_and_seed_stable() {
        let state = create_negotiation_state(&params(), 9);
        let mut rng_a = Mulberry32::new(17);
        let mut rng_b = Mulberry32::new(17);
        let offer_a = propose_offer(&state, &mut rng_a);
        let offer_b = propose_offer(&state, &mut rng_b);
        assert_eq!(offer_a, offer_b);
        assert!((offer_a.total() - TOTAL_WATER).abs() < 1e-6);
    }
}
