//! Free-fall simulation workload: integrate the fall of independent
//! objects with air resistance.
//!
//! Each object is treated as a sphere of water density; drag grows with the
//! square of the velocity. Explicit Euler integration with 1 ms steps. The
//! per-item cost depends on height, mass and drag and can differ by orders
//! of magnitude across a batch, which is what the chunked partition
//! strategy is for. Arithmetic is identical in both runs, so the
//! equivalence tolerance is 1e-9.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::ItemError;

pub const DEFAULT_OBJECT_COUNT: usize = 12;

/// Divergence below this counts as equivalent.
pub const TOLERANCE: f64 = 1e-9;

const GRAVITY: f64 = 9.81; // m/s^2
const AIR_DENSITY: f64 = 1.225; // kg/m^3
const BODY_DENSITY: f64 = 1000.0; // kg/m^3, water
const TIME_STEP: f64 = 0.001; // s
const MAX_SIMULATED_TIME: f64 = 100.0; // s

/// One object to drop.
#[derive(Debug, Clone, Copy)]
pub struct FallingObject {
    pub id: usize,
    /// Initial height in metres.
    pub height: f64,
    /// Mass in kilograms.
    pub mass: f64,
    /// Dimensionless drag coefficient.
    pub drag_coefficient: f64,
}

/// Outcome of one simulated drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallOutcome {
    /// Seconds until the object reached the ground.
    pub fall_time: f64,
    /// Velocity at impact, m/s.
    pub final_velocity: f64,
}

/// Builds `count` objects with heights in [10, 200) m, masses in
/// [0.1, 50) kg and drag coefficients in [0.1, 1.5).
pub fn generate_objects<G: Rng>(count: usize, rng: &mut G) -> Vec<FallingObject> {
    (0..count)
        .map(|id| FallingObject {
            id,
            height: rng.gen_range(10.0..200.0),
            mass: rng.gen_range(0.1..50.0),
            drag_coefficient: rng.gen_range(0.1..1.5),
        })
        .collect()
}

/// Simulates one drop.
///
/// Fails the item for non-positive height or mass, and when the object has
/// not landed after 100 simulated seconds (a drag/mass combination outside
/// the model's validity).
pub fn simulate_fall(obj: &FallingObject) -> Result<FallOutcome, ItemError> {
    if obj.height <= 0.0 {
        return Err(ItemError::compute(format!(
            "object {}: height must be positive, got {}",
            obj.id, obj.height
        )));
    }
    if obj.mass <= 0.0 {
        return Err(ItemError::compute(format!(
            "object {}: mass must be positive, got {}",
            obj.id, obj.mass
        )));
    }

    // Projected area of a sphere with the object's mass at water density.
    let radius = (obj.mass / (4.0 / 3.0 * PI * BODY_DENSITY)).cbrt();
    let area = PI * radius * radius;
    let drag_factor = 0.5 * AIR_DENSITY * obj.drag_coefficient * area;

    let mut t = 0.0;
    let mut v = 0.0;
    let mut y = obj.height;
    while y > 0.0 {
        let net_force = obj.mass * GRAVITY - drag_factor * v * v;
        v += net_force / obj.mass * TIME_STEP;
        y -= v * TIME_STEP;
        t += TIME_STEP;
        if t > MAX_SIMULATED_TIME {
            return Err(ItemError::compute(format!(
                "object {}: no landing within {MAX_SIMULATED_TIME} simulated seconds",
                obj.id
            )));
        }
    }

    Ok(FallOutcome {
        fall_time: t,
        final_velocity: v,
    })
}

/// Larger of the absolute differences in average fall time and average
/// final velocity between the two runs.
pub fn average_outcome_divergence(pairs: &[(&FallOutcome, &FallOutcome)]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let n = pairs.len() as f64;
    let (seq_t, seq_v, par_t, par_v) = pairs.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(st, sv, pt, pv), (s, p)| {
            (
                st + s.fall_time,
                sv + s.final_velocity,
                pt + p.fall_time,
                pv + p.final_velocity,
            )
        },
    );
    let time_diff = (seq_t / n - par_t / n).abs();
    let velocity_diff = (seq_v / n - par_v / n).abs();
    time_diff.max(velocity_diff)
}
