//! Bargaining parameters
//!
//! Each role has a concave log benefit in its own share, a penalty coupling
//! it to exactly one other role's excess above a cap, and a shortfall
//! penalty below a minimum threshold. The coupling is asymmetric by design:
//! the hydrologist and the infrastructure planner both watch agriculture's
//! draw, while agriculture watches the environmental reserve.

use crate::Allocation;
use serde::{Deserialize, Serialize};

/// Hydrologist utility parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HydroParams {
    /// Benefit coefficient on `ln(1 + share)`
    pub a: f64,
    /// Penalty coefficient on agriculture's excess draw
    pub p: f64,
    /// Agriculture share above which the excess penalty applies
    pub cap_agri_excess: f64,
    /// Minimum ecological flow before the drought penalty applies
    pub drought_threshold: f64,
    pub drought_penalty: f64,
}

/// Agriculture utility parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgriParams {
    pub a: f64,
    /// Penalty coefficient on the hydrologist's excess reserve
    pub p: f64,
    /// Environmental reserve above which the excess penalty applies
    pub cap_env_excess: f64,
    /// Minimum irrigation share before the crop penalty applies
    pub crop_threshold: f64,
    pub crop_penalty: f64,
}

/// Infrastructure utility parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfraParams {
    pub a: f64,
    /// Penalty coefficient on agriculture's excess draw
    pub p: f64,
    /// Agriculture share above which the excess penalty applies
    pub cap_agri_excess2: f64,
    /// Minimum service share before the service penalty applies
    pub service_threshold: f64,
    pub service_penalty: f64,
}

/// Full parameterization of one bargaining episode
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BargainingParams {
    pub hydro: HydroParams,
    pub agri: AgriParams,
    pub infra: InfraParams,
    /// Status-quo split each role receives absent an agreement
    pub outside_option_allocation: Allocation,
    /// Coarse search step for the Nash solver grid
    pub grid_step: f64,
}
