//! Play Assembly
//!
//! Puts a full `Play` record together from a config: offense placed, defense
//! derived, routes colored from the fixed palette, route roles assigned on
//! the secondary stream, one scoring objective attached.

use serde_json::json;

use crate::play::assign::assign_routes;
use crate::play::catalog::ROUTE_NAMES;
use crate::play::config::{title_case, PlayConfig};
use crate::play::layout::{defense_shell, formation_layout};
use crate::play::model::{
    Behavior, Canvas, Entity, EntityKind, Objective, ObjectiveKind, Play, Route,
};

/// Offensive entity color.
pub const OFFENSE_COLOR: &str = "#1d4ed8";

/// Defensive entity color.
pub const DEFENSE_COLOR: &str = "#dc2626";

/// Quarterback color, distinct from the rest of the offense.
pub const QB_COLOR: &str = "#facc15";

/// Route palette, cycled across the catalog.
pub const ROUTE_PALETTE: &[&str] = &[
    "#38bdf8", "#f59e0b", "#a78bfa", "#22c55e", "#f472b6", "#fb7185",
];

/// Canvas dimensions for generated plays.
pub const CANVAS: Canvas = Canvas {
    width: 900,
    height: 600,
};

/// Entity radius for generated plays.
const ENTITY_RADIUS: u32 = 12;

/// Time limit parameter on the scoring objective, in seconds.
const SCORE_TIME_LIMIT: u32 = 6;

/// Assemble the play for a config.
///
/// Byte-for-byte reproducible: two calls with equal configs serialize
/// identically.
pub fn build_play(config: &PlayConfig) -> Play {
    let offense = formation_layout(&config.formation, &config.formation_tag);
    let defense = defense_shell(&offense, &config.coverage);

    let mut entities = Vec::with_capacity(17);
    for (id, position) in offense.positions() {
        let behavior = if id == "qb" {
            Behavior::controlled()
        } else {
            Behavior::fixed()
        };
        entities.push(Entity {
            id: id.to_string(),
            kind: EntityKind::Player,
            label: id.to_uppercase(),
            x: position.x,
            y: position.y,
            radius: ENTITY_RADIUS,
            color: (if id == "qb" { QB_COLOR } else { OFFENSE_COLOR }).to_string(),
            behavior,
        });
    }

    for (id, position) in defense {
        entities.push(Entity {
            id: id.to_string(),
            kind: EntityKind::Npc,
            label: id.to_uppercase(),
            x: position.x,
            y: position.y,
            radius: ENTITY_RADIUS,
            color: DEFENSE_COLOR.to_string(),
            behavior: Behavior::defense(config.coverage.clone(), id),
        });
    }

    let routes = ROUTE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, route)| Route {
            id: route.to_uppercase(),
            name: title_case(route).replace('_', " "),
            points: Vec::new(),
            color: ROUTE_PALETTE[idx % ROUTE_PALETTE.len()].to_string(),
        })
        .collect();

    Play {
        id: config.seed,
        name: config.name.clone(),
        canvas: CANVAS,
        formation: config.formation.clone(),
        formation_tag: config.formation_tag.clone(),
        coverage: config.coverage.clone(),
        entities,
        routes,
        objectives: vec![Objective {
            id: "o1".to_string(),
            kind: ObjectiveKind::Score,
            params: json!({ "time_limit": SCORE_TIME_LIMIT }),
        }],
        route_roles: assign_routes(config.seed),
    }
}

// =============================================================================
// TESTS
// =============================================================================
