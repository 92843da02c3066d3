//! Allocation geometry
//!
//! The feasible set is the simplex `{x >= 0, sum(x) = TOTAL_WATER}`. Raw
//! candidates from agents or gradient steps are mapped onto it by exact
//! Euclidean projection, never rejected.

use council_types::{Allocation, TOTAL_WATER};

/// Clamp negative components to zero. Does not enforce the sum invariant.
pub fn clamp(x: &Allocation) -> Allocation {
    x.map(|v| v.max(0.0))
}

/// Euclidean projection of an arbitrary point onto the simplex.
///
/// Sort-based exact projection: with components sorted descending, find the
/// largest prefix length `rho` whose threshold `theta = (cumsum - T) / rho`
/// still leaves `sorted[rho - 1]` positive, then shift every component down
/// by that threshold and clamp at zero. Every finite input qualifies at
/// prefix length 1, so the equal-split fallback only guards non-finite
/// components.
pub fn project_to_simplex(x: &Allocation) -> Allocation {
    let values = x.as_array();
    let mut sorted = values;
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut cumulative = 0.0;
    let mut rho = None;
    for (i, value) in sorted.iter().enumerate() {
        cumulative += value;
        let theta = (cumulative - TOTAL_WATER) / (i as f64 + 1.0);
        if value - theta > 0.0 {
            rho = Some(i);
        }
    }

    let Some(rho) = rho else {
        return Allocation::equal_split();
    };

    let prefix: f64 = sorted[..=rho].iter().sum();
    let theta = (prefix - TOTAL_WATER) / (rho as f64 + 1.0);
    Allocation::from_array(values.map(|v| (v - theta).max(0.0)))
}

/// Linear interpolation between two allocations, componentwise
pub fn interpolate(from: &Allocation, to: &Allocation, alpha: f64) -> Allocation {
    Allocation::new(
        from.hydro + (to.hydro - from.hydro) * alpha,
        from.agri + (to.agri - from.agri) * alpha,
        from.infra + (to.infra - from.infra) * alpha,
    )
}
