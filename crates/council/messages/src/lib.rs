//! Rationale text for negotiation turns
//!
//! The engine treats every message as an opaque string; this crate is the
//! collaborator that produces them. It defines the three negotiating
//! personas, builds prompts for an LLM-backed generator, and ships a
//! deterministic templated generator used when no model is wired in.

#![deny(unsafe_code)]

use async_trait::async_trait;
use council_types::{Allocation, Role};

/// Voice and concern of one negotiating persona
#[derive(Clone, Copy, Debug)]
pub struct Persona {
    pub title: &'static str,
    pub focus: &'static str,
}

/// Persona for a role
pub fn persona(role: Role) -> Persona {
    match role {
        Role::Hydrologist => Persona {
            title: "Hydrologist",
            focus: "ecosystem sustainability and drought resilience",
        },
        Role::Agriculture => Persona {
            title: "Agriculture Lead",
            focus: "crop yield stability and irrigation reliability",
        },
        Role::Infrastructure => Persona {
            title: "Infrastructure Planner",
            focus: "reservoir reliability and city service continuity",
        },
    }
}

/// A system/user prompt pair for an LLM-backed generator
#[derive(Clone, Debug)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Render an offer as the fenced-JSON payload shared across runtimes
pub fn format_offer_json(offer: &Allocation) -> String {
    let value = serde_json::json!({
        "x_hydro": round2(offer.hydro),
        "x_agri": round2(offer.agri),
        "x_infra": round2(offer.infra),
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

fn persona_system(role: Role) -> String {
    format!(
        "You are {}, speaking as a negotiating persona. Keep responses concise, \
         professional, and grounded in Nash equilibrium reasoning.",
        persona(role).title
    )
}

/// Prompt asking a persona to justify its own offer
pub fn build_offer_prompt(role: Role, offer: &Allocation, x_star: &Allocation) -> Prompt {
    Prompt {
        system: persona_system(role),
        user: format!(
            "You are proposing a water allocation offer.\n\nNash equilibrium target x*: \
             {x_star}.\n\nYour offer (JSON):\n{}\n\nFocus on {}. Provide a 2-3 sentence \
             message that references the equilibrium target and explains why this offer \
             is acceptable.",
            format_offer_json(offer),
            persona(role).focus
        ),
    }
}

/// Prompt asking a persona to justify its accept/reject decision
pub fn build_response_prompt(role: Role, accept: bool, offer: &Allocation) -> Prompt {
    let decision = if accept { "ACCEPT" } else { "REJECT" };
    Prompt {
        system: persona_system(role),
        user: format!(
            "You are responding to an offer.\n\nOffer (JSON):\n{}\n\nDecision: {decision}. \
             Explain in 1-2 sentences how this aligns or conflicts with {}.",
            format_offer_json(offer),
            persona(role).focus
        ),
    }
}

/// Source of rationale text attached to negotiation turns.
///
/// Implementations may call out to a model; the engine only ever sees the
/// returned string.
#[async_trait]
pub trait RationaleGenerator: Send + Sync {
    async fn offer_message(&self, role: Role, offer: &Allocation, x_star: &Allocation) -> String;
    async fn response_message(&self, role: Role, accept: bool, offer: &Allocation) -> String;
}

/// Deterministic templated generator, used when no model is configured
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateMessenger;

impl TemplateMessenger {
    fn offer_focus(role: Role) -> &'static str {
        match role {
            Role::Hydrologist => {
                "Keeps ecological flows above the drought threshold while limiting agri overdraw."
            }
            Role::Agriculture => {
                "Maintains irrigation reliability without compromising environmental caps."
            }
            Role::Infrastructure => {
                "Protects reservoir reliability and service continuity for the city."
            }
        }
    }

    fn response_focus(role: Role) -> &'static str {
        match role {
            Role::Hydrologist => "ecosystem sustainability",
            Role::Agriculture => "crop yield stability",
            Role::Infrastructure => "service reliability",
        }
    }
}

#[async_trait]
impl RationaleGenerator for TemplateMessenger {
    async fn offer_message(&self, role: Role, _offer: &Allocation, x_star: &Allocation) -> String {
        format!(
            "Equilibrium guidance: target allocation x* = {x_star}. {} Proposed allocation \
             balances the basin.",
            Self::offer_focus(role)
        )
    }

    async fn response_message(&self, role: Role, accept: bool, offer: &Allocation) -> String {
        let decision = if accept { "Accept" } else { "Reject" };
        format!(
            "{decision}: based on {} against the current offer {offer}.",
            Self::response_focus(role)
        )
    }
}
