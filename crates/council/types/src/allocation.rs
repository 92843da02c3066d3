//! Water allocations
//!
//! An allocation splits the fixed basin budget among the three roles. The
//! engine keeps allocations on the simplex `{x >= 0, sum(x) = TOTAL_WATER}`
//! by projection; raw candidates held here may violate either constraint
//! until they pass through the geometry module.

use crate::Role;
use serde::{Deserialize, Serialize};

/// Total divisible water budget shared by the council
pub const TOTAL_WATER: f64 = 100.0;

/// A three-way split of the water budget
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub hydro: f64,
    pub agri: f64,
    pub infra: f64,
}

impl Allocation {
    pub fn new(hydro: f64, agri: f64, infra: f64) -> Self {
        Self { hydro, agri, infra }
    }

    /// The degenerate-projection fallback: every role gets a third
    pub fn equal_split() -> Self {
        let third = TOTAL_WATER / 3.0;
        Self::new(third, third, third)
    }

    /// Share assigned to a single role
    pub fn share(&self, role: Role) -> f64 {
        match role {
            Role::Hydrologist => self.hydro,
            Role::Agriculture => self.agri,
            Role::Infrastructure => self.infra,
        }
    }

    pub fn total(&self) -> f64 {
        self.hydro + self.agri + self.infra
    }

    /// Apply `f` to every component
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.hydro), f(self.agri), f(self.infra))
    }

    /// Components in role order
    pub fn as_array(&self) -> [f64; 3] {
        [self.hydro, self.agri, self.infra]
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.hydro, self.agri, self.infra)
    }
}
