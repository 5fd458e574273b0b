//! Route-Role Assignment
//!
//! A secondary RNG stream (seed XOR a fixed salt) hands each eligible
//! receiver role one route from a pool reserved for that role. Running on its
//! own stream keeps assignments decorrelated from the formation/coverage
//! draws: changing the primary draw sequence never shifts route picks, and
//! vice versa.

use std::collections::BTreeMap;

use crate::core::rng::PlayRng;
use crate::play::model::{ReceiverRole, RouteRole};

/// Routes the first read can draw.
pub const PRIMARY_ROUTES: &[&str] = &["streak", "post", "corner", "sluggo", "seam", "stop_n_go"];

/// Routes the second and third reads draw.
pub const SECONDARY_ROUTES: &[&str] = &[
    "curl",
    "drag",
    "slant",
    "out",
    "double_out",
    "sail",
    "pivot",
    "jerk",
    "chair",
];

/// Routes the motion man draws.
pub const MOTION_ROUTES: &[&str] = &["flat", "wheel", "angle"];

/// Routes the back draws after a blitz check.
pub const CHECK_RELEASE_ROUTES: &[&str] = &["swing_left", "swing_right", "check_release", "block"];

/// Assign a route to each eligible receiver role.
///
/// Draw order is fixed: wr1 (primary), wr2, wr3 (secondary), te (motion),
/// rb (check-release), one draw each on the secondary stream. Both secondary
/// reads share one pool; the pools themselves are disjoint.
pub fn assign_routes(seed: u32) -> BTreeMap<String, RouteRole> {
    let mut rng = PlayRng::route_stream(seed);

    let picks = [
        ("wr1", ReceiverRole::Primary, PRIMARY_ROUTES),
        ("wr2", ReceiverRole::Secondary, SECONDARY_ROUTES),
        ("wr3", ReceiverRole::Secondary, SECONDARY_ROUTES),
        ("te", ReceiverRole::Motion, MOTION_ROUTES),
        ("rb", ReceiverRole::CheckRelease, CHECK_RELEASE_ROUTES),
    ];

    picks
        .into_iter()
        .map(|(entity, role, pool)| {
            let route = rng.choice(pool).to_uppercase();
            (entity.to_string(), RouteRole { role, route })
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
