//! Core deterministic primitives.
//!
//! Everything a play's identity rests on: the seeded generator and the
//! digest that turns a date or name into a seed. Nothing in this module may
//! observe wall-clock state except `seed::today_key`.

pub mod rng;
pub mod seed;

// Re-export core types
pub use rng::PlayRng;
pub use seed::{seed_for_date, seed_for_today, seed_from_name};
