//! Utility model
//!
//! Each role earns a concave log benefit in its own share, pays a penalty on
//! one other role's excess above a cap, and pays a shortfall penalty below
//! its own minimum threshold. Concave benefit plus convex penalties keep the
//! Nash objective well-behaved for gradient ascent.

use crate::geometry::clamp;
use council_types::{Allocation, BargainingParams, Utilities};

/// Per-role utilities at an allocation.
///
/// The allocation is clamped non-negative first; utilities never see a
/// negative share.
pub fn compute_utilities(params: &BargainingParams, x: &Allocation) -> Utilities {
    let x = clamp(x);

    let hydro = params.hydro.a * (1.0 + x.hydro).ln()
        - params.hydro.p * (x.agri - params.hydro.cap_agri_excess).max(0.0)
        - params.hydro.drought_penalty * (params.hydro.drought_threshold - x.hydro).max(0.0);

    let agri = params.agri.a * (1.0 + x.agri).ln()
        - params.agri.p * (x.hydro - params.agri.cap_env_excess).max(0.0)
        - params.agri.crop_penalty * (params.agri.crop_threshold - x.agri).max(0.0);

    let infra = params.infra.a * (1.0 + x.infra).ln()
        - params.infra.p * (x.agri - params.infra.cap_agri_excess2).max(0.0)
        - params.infra.service_penalty * (params.infra.service_threshold - x.infra).max(0.0);

    Utilities { hydro, agri, infra }
}

/// Utilities at the outside option, the disagreement point of the bargain
pub fn outside_utilities(params: &BargainingParams) -> Utilities {
    compute_utilities(params, &params.outside_option_allocation)
}

/// Nash bargaining objective: the log product of surpluses over the outside
/// option, or negative infinity when any role does no better than walking
/// away.
pub fn nash_objective(utilities: &Utilities, outside: &Utilities) -> f64 {
    let surplus_hydro = utilities.hydro - outside.hydro;
    let surplus_agri = utilities.agri - outside.agri;
    let surplus_infra = utilities.infra - outside.infra;
    if surplus_hydro <= 0.0 || surplus_agri <= 0.0 || surplus_infra <= 0.0 {
        return f64::NEG_INFINITY;
    }
    surplus_hydro.ln() + surplus_agri.ln() + surplus_infra.ln()
}
