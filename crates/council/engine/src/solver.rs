//! Nash bargaining solver
//!
//! Two phases: a coarse grid search over the whole simplex, then 40
//! iterations of projected gradient ascent from the best grid point. The
//! gradient is a symmetric finite difference taken through the projection,
//! so it measures feasible-direction sensitivity. The procedure has no
//! randomness; identical parameters always yield an identical target.

use crate::geometry::project_to_simplex;
use crate::utility::{compute_utilities, nash_objective, outside_utilities};
use council_types::{Allocation, BargainingParams, TOTAL_WATER};
use tracing::debug;

const REFINE_ITERATIONS: u32 = 40;
const GRADIENT_EPS: f64 = 0.05;
const DEFAULT_GRID_STEP: f64 = 5.0;

/// Solve for the Nash bargaining target `x*`.
///
/// If no grid point gives every role a strict surplus over its outside
/// option, the coarse phase keeps the near-equal split and refinement halts
/// on its first non-finite objective, so the fallback is returned as-is.
pub fn solve_nash_bargaining(params: &BargainingParams) -> Allocation {
    let outside = outside_utilities(params);
    let step = if params.grid_step > 0.0 {
        params.grid_step
    } else {
        DEFAULT_GRID_STEP
    };

    let score_at = |candidate: &Allocation| {
        nash_objective(&compute_utilities(params, candidate), &outside)
    };

    // Coarse phase: every step-spaced point with h + a + i = TOTAL_WATER.
    let mut best = Allocation::new(33.34, 33.33, 33.33);
    let mut best_score = f64::NEG_INFINITY;
    let steps_h = (TOTAL_WATER / step).floor() as usize;
    for hi in 0..=steps_h {
        let h = hi as f64 * step;
        let steps_a = ((TOTAL_WATER - h) / step).floor() as usize;
        for ai in 0..=steps_a {
            let a = ai as f64 * step;
            let candidate = Allocation::new(h, a, TOTAL_WATER - h - a);
            let score = score_at(&candidate);
            if score > best_score {
                best_score = score;
                best = candidate;
            }
        }
    }
    debug!(%best, score = best_score, "grid search complete");

    // Refinement phase: projected gradient ascent with a decaying step.
    let mut current = best;
    for iter in 0..REFINE_ITERATIONS {
        let base_score = score_at(&current);
        if !base_score.is_finite() {
            debug!(iteration = iter, "refinement halted on infeasible point");
            break;
        }

        let mut gradient = [0.0f64; 3];
        for (axis, slot) in gradient.iter_mut().enumerate() {
            let mut plus = current.as_array();
            plus[axis] += GRADIENT_EPS;
            let mut minus = current.as_array();
            minus[axis] = (minus[axis] - GRADIENT_EPS).max(0.0);

            let plus_score = score_at(&project_to_simplex(&Allocation::from_array(plus)));
            let minus_score = score_at(&project_to_simplex(&Allocation::from_array(minus)));
            *slot = (plus_score - minus_score) / (2.0 * GRADIENT_EPS);
        }

        let step_size = 0.8 / (1.0 + f64::from(iter) / 10.0);
        let updated = Allocation::new(
            current.hydro + step_size * gradient[0],
            current.agri + step_size * gradient[1],
            current.infra + step_size * gradient[2],
        );
        current = project_to_simplex(&updated);
    }

    debug!(x_star = %current, "nash bargaining target solved");
    current
}
