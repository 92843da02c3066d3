//! Council roles
//!
//! The council is a closed set of three stakeholders. Role-indexed data uses
//! fixed-size structures and exhaustive matches rather than string-keyed
//! maps, so a missing role is unrepresentable.

use serde::{Deserialize, Serialize};

/// One of the three negotiating stakeholders
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ecological flows and drought resilience
    Hydrologist,
    /// Irrigation and crop yield stability
    Agriculture,
    /// Reservoir reliability and city service continuity
    Infrastructure,
}

impl Role {
    /// All roles in speaking order. The negotiation proposer rotates through
    /// this list round-robin.
    pub const ALL: [Role; 3] = [Role::Hydrologist, Role::Agriculture, Role::Infrastructure];

    /// Stable string identifier used in transcripts and persisted episodes
    pub fn id(&self) -> &'static str {
        match self {
            Role::Hydrologist => "hydrologist",
            Role::Agriculture => "agriculture",
            Role::Infrastructure => "infrastructure",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Per-role utility values at some allocation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utilities {
    pub hydro: f64,
    pub agri: f64,
    pub infra: f64,
}

impl Utilities {
    /// Utility of a single role
    pub fn for_role(&self, role: Role) -> f64 {
        match role {
            Role::Hydrologist => self.hydro,
            Role::Agriculture => self.agri,
            Role::Infrastructure => self.infra,
        }
    }
}

/// Accept/reject flags collected for one negotiation turn.
///
/// A flag is `None` until the role has responded; the proposer's flag is set
/// to `Some(true)` when the offer is recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptFlags {
    pub hydrologist: Option<bool>,
    pub agriculture: Option<bool>,
    pub infrastructure: Option<bool>,
}

impl AcceptFlags {
    /// Flags for a fresh turn: the proposer implicitly accepts its own offer
    pub fn for_proposer(proposer: Role) -> Self {
        let mut flags = Self::default();
        flags.set(proposer, true);
        flags
    }

    pub fn get(&self, role: Role) -> Option<bool> {
        match role {
            Role::Hydrologist => self.hydrologist,
            Role::Agriculture => self.agriculture,
            Role::Infrastructure => self.infrastructure,
        }
    }

    pub fn set(&mut self, role: Role, accept: bool) {
        match role {
            Role::Hydrologist => self.hydrologist = Some(accept),
            Role::Agriculture => self.agriculture = Some(accept),
            Role::Infrastructure => self.infrastructure = Some(accept),
        }
    }

    /// True once every role has a recorded flag
    pub fn all_responded(&self) -> bool {
        Role::ALL.iter().all(|role| self.get(*role).is_some())
    }

    /// True when every role has responded and all of them accepted
    pub fn all_accepted(&self) -> bool {
        Role::ALL.iter().all(|role| self.get(*role) == Some(true))
    }
}
