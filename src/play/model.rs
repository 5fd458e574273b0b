//! Play Record Types
//!
//! The assembled scene served to the client: entities, route catalog,
//! objectives, and route-role metadata. A `Play` is regenerated from its seed
//! on every request and is never mutated; storage of plays is caching, not
//! truth.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A 2D point on the play canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (canvas pixels, origin top-left).
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions for the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Entity category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Offensive player.
    Player,
    /// Defender (scripted).
    Npc,
    /// Static target zone.
    Target,
}

/// Plain behavior tags, serialized as bare strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleBehavior {
    /// Holds position.
    Static,
    /// Driven by the player's input.
    Controlled,
}

/// Structured behaviors, serialized as `{"type": …, …}` objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectedBehavior {
    /// Walk a closed path at fixed speed.
    Patrol {
        /// Waypoints, visited in order then looped.
        path: Vec<Point>,
        /// Pixels per second.
        speed: f64,
    },
    /// Track another entity at fixed speed.
    Follow {
        /// Target entity id.
        target: String,
        /// Pixels per second.
        speed: f64,
    },
    /// Play a defensive assignment.
    Defense {
        /// Coverage label the defender is executing.
        coverage: String,
        /// Defender role (cb1, fs, …).
        role: String,
    },
}

/// Entity behavior: either a plain tag or a structured descriptor.
///
/// The wire shape matches what the client animates against: plain tags are
/// bare strings, structured behaviors are tagged objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Behavior {
    /// Bare string tag.
    Simple(SimpleBehavior),
    /// Tagged object.
    Directed(DirectedBehavior),
}

impl Behavior {
    /// Holds position.
    pub const fn fixed() -> Self {
        Self::Simple(SimpleBehavior::Static)
    }

    /// Driven by player input.
    pub const fn controlled() -> Self {
        Self::Simple(SimpleBehavior::Controlled)
    }

    /// Defensive assignment.
    pub fn defense(coverage: impl Into<String>, role: impl Into<String>) -> Self {
        Self::Directed(DirectedBehavior::Defense {
            coverage: coverage.into(),
            role: role.into(),
        })
    }
}

/// One labeled entity in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable entity id (qb, wr1, cb2, …).
    pub id: String,
    /// Entity category.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Display label.
    pub label: String,
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Collision/render radius.
    pub radius: u32,
    /// Render color (hex).
    pub color: String,
    /// Behavior descriptor.
    pub behavior: Behavior,
}

/// One selectable route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Route id (uppercased route name).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Path points; empty until traced client-side.
    pub points: Vec<Point>,
    /// Render color (hex).
    pub color: String,
}

/// Objective category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// Reach a zone within a time limit.
    ReachZone,
    /// Avoid collisions.
    AvoidCollision,
    /// Bonus for finishing early.
    TimeBonus,
    /// Event-trace scoring (the generated plays use this).
    Score,
}

/// One scoring objective with free-form parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Objective id.
    pub id: String,
    /// Objective category.
    #[serde(rename = "type")]
    pub kind: ObjectiveKind,
    /// Type-specific parameters.
    pub params: serde_json::Value,
}

/// Receiver role a route assignment applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiverRole {
    /// First read.
    Primary,
    /// Second/third read.
    Secondary,
    /// Motion man.
    Motion,
    /// Back releasing after a blitz check.
    CheckRelease,
}

/// A route assigned to a receiver role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRole {
    /// Role of the receiver.
    pub role: ReceiverRole,
    /// Assigned route id.
    pub route: String,
}

/// The fully assembled play for one seed.
///
/// Byte-for-byte reproducible from the seed; see the golden test in
/// `play::build`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Play {
    /// Play id (the seed).
    pub id: u32,
    /// Generated or overridden play name.
    pub name: String,
    /// Canvas dimensions.
    pub canvas: Canvas,
    /// Formation, including variant ("gun trips").
    pub formation: String,
    /// Spacing tag (bunch/x/nasty).
    pub formation_tag: String,
    /// Defensive coverage — the answer the player is guessing. Never sent
    /// when serving a play; revealed only after a submission.
    pub coverage: String,
    /// Scene entities, offense first.
    pub entities: Vec<Entity>,
    /// Selectable route catalog.
    pub routes: Vec<Route>,
    /// Scoring objectives.
    pub objectives: Vec<Objective>,
    /// Per-receiver route assignments from the secondary stream.
    pub route_roles: BTreeMap<String, RouteRole>,
}

/// The client-facing projection of a [`Play`]: everything except the
/// coverage answer, plus the date it was served for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServedPlay {
    /// Play id (the seed).
    pub id: u32,
    /// Play name.
    pub name: String,
    /// Canvas dimensions.
    pub canvas: Canvas,
    /// Formation, including variant.
    pub formation: String,
    /// Spacing tag.
    pub formation_tag: String,
    /// Scene entities.
    pub entities: Vec<Entity>,
    /// Selectable route catalog.
    pub routes: Vec<Route>,
    /// Scoring objectives.
    pub objectives: Vec<Objective>,
    /// Per-receiver route assignments.
    pub route_roles: BTreeMap<String, RouteRole>,
    /// Date key the play was served for.
    pub play_date: String,
}

impl Play {
    /// Project the play for serving: drops the coverage answer.
    pub fn into_served(self, play_date: String) -> ServedPlay {
        ServedPlay {
            id: self.id,
            name: self.name,
            canvas: self.canvas,
            formation: self.formation,
            formation_tag: self.formation_tag,
            entities: self.entities,
            routes: self.routes,
            objectives: self.objectives,
            route_roles: self.route_roles,
            play_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_behavior_serializes_as_string() {
        let json = serde_json::to_value(Behavior::fixed()).unwrap();
        assert_eq!(json, serde_json::json!("static"));

        let json = serde_json::to_value(Behavior::controlled()).unwrap();
        assert_eq!(json, serde_json::json!("controlled"));
    }

    #[test]
    fn test_directed_behavior_serializes_as_tagged_object() {
        let json = serde_json::to_value(Behavior::defense("2 press", "cb1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "defense", "coverage": "2 press", "role": "cb1"})
        );
    }

    #[test]
    fn test_behavior_round_trip() {
        let patrol = Behavior::Directed(DirectedBehavior::Patrol {
            path: vec![Point::new(350.0, 150.0), Point::new(450.0, 150.0)],
            speed: 40.0,
        });
        let json = serde_json::to_string(&patrol).unwrap();
        let back: Behavior = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patrol);

        let simple: Behavior = serde_json::from_str("\"static\"").unwrap();
        assert_eq!(simple, Behavior::fixed());
    }

    #[test]
    fn test_served_play_has_no_coverage_field() {
        let play = Play {
            id: 7,
            name: "x".into(),
            canvas: Canvas {
                width: 900,
                height: 600,
            },
            formation: "gun trips".into(),
            formation_tag: "bunch".into(),
            coverage: "2 press".into(),
            entities: vec![],
            routes: vec![],
            objectives: vec![],
            route_roles: BTreeMap::new(),
        };
        let served = serde_json::to_value(play.into_served("2024-01-01".into())).unwrap();
        assert!(served.get("coverage").is_none());
        assert_eq!(served["play_date"], "2024-01-01");
    }
}
