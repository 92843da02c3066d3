//! Scenario sampling
//!
//! Draws a full `BargainingParams` from the seeded stream, one uniform draw
//! per field in a fixed order, so a seed pins down the whole episode. The
//! sampled outside option is renormalized onto the budget; a status quo that
//! sums to nothing is the one construction fault this layer can report.

#![deny(unsafe_code)]

use council_engine::Mulberry32;
use council_types::{
    AgriParams, Allocation, BargainingParams, CouncilError, CouncilResult, HydroParams,
    InfraParams, TOTAL_WATER,
};
use tracing::debug;

/// Grid step used for sampled scenarios
pub const SAMPLED_GRID_STEP: f64 = 4.0;

/// Draw bargaining parameters from the stream.
///
/// Draw order is part of the cross-runtime contract: hydro, agri, infra,
/// then the outside option, field by field. The outside option is returned
/// raw; renormalize it with [`normalize_outside`] before use.
pub fn sample_params(rng: &mut Mulberry32) -> BargainingParams {
    let hydro = HydroParams {
        a: rng.in_range(7.5, 9.5),
        p: rng.in_range(0.6, 1.1),
        cap_agri_excess: rng.in_range(40.0, 55.0),
        drought_threshold: rng.in_range(18.0, 28.0),
        drought_penalty: rng.in_range(0.4, 0.8),
    };
    let agri = AgriParams {
        a: rng.in_range(8.0, 10.5),
        p: rng.in_range(0.4, 0.9),
        cap_env_excess: rng.in_range(45.0, 60.0),
        crop_threshold: rng.in_range(28.0, 38.0),
        crop_penalty: rng.in_range(0.35, 0.7),
    };
    let infra = InfraParams {
        a: rng.in_range(7.0, 9.0),
        p: rng.in_range(0.45, 0.85),
        cap_agri_excess2: rng.in_range(42.0, 58.0),
        service_threshold: rng.in_range(22.0, 32.0),
        service_penalty: rng.in_range(0.45, 0.75),
    };
    let outside_option_allocation = Allocation::new(
        rng.in_range(30.0, 36.0),
        rng.in_range(30.0, 36.0),
        rng.in_range(28.0, 34.0),
    );
    BargainingParams {
        hydro,
        agri,
        infra,
        outside_option_allocation,
        grid_step: SAMPLED_GRID_STEP,
    }
}

/// Rescale an outside option so its components sum to the full budget
pub fn normalize_outside(allocation: &Allocation) -> CouncilResult<Allocation> {
    let total = allocation.total();
    if total <= 0.0 {
        return Err(CouncilError::DegenerateOutsideOption { total });
    }
    let scale = TOTAL_WATER / total;
    Ok(allocation.map(|v| v * scale))
}

/// Sample a complete, normalized scenario for one episode
pub fn sample_scenario(rng: &mut Mulberry32) -> CouncilResult<BargainingParams> {
    let mut params = sample_params(rng);
    params.outside_option_allocation = normalize_outside(&params.outside_option_allocation)?;
    debug!(outside = %params.outside_option_allocation, "scenario sampled");
    Ok(params)
}
