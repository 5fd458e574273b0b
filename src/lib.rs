//! # Daily Read Server
//!
//! Deterministic daily-play generation and scoring for Daily Read.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DAILY READ SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - 32-bit LCG draw stream                    │
//! │  └── seed.rs     - Date/name → seed digest                   │
//! │                                                              │
//! │  play/           - Content generation (deterministic)        │
//! │  ├── catalog.rs  - Fixed route/formation/coverage pools      │
//! │  ├── config.rs   - Strict-order draws, play naming           │
//! │  ├── layout.rs   - Offense geometry, defense derived from it │
//! │  ├── assign.rs   - Route-role picks (secondary stream)       │
//! │  ├── build.rs    - Play assembly                             │
//! │  └── model.rs    - Play/Entity/Route/Objective records       │
//! │                                                              │
//! │  score/          - Scoring (pure)                            │
//! │  ├── event.rs    - Lenient trace parsing                     │
//! │  └── engine.rs   - Event-trace scoring rules                 │
//! │                                                              │
//! │  store/          - Persistence (SQLite behind a contract)    │
//! │  server/         - HTTP edge (non-deterministic)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/`, `play/`, and `score/` modules are **100% deterministic**:
//! - All randomness flows from one 32-bit seed through a fixed LCG
//! - Draws happen in a frozen order, one RNG step each
//! - Defense placement is a function of the computed offense, never drawn
//!   independently
//! - Scoring is a pure function of the submitted trace
//!
//! A play regenerated from its seed is byte-for-byte identical to the one
//! originally served, on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod play;
pub mod score;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use crate::core::rng::PlayRng;
pub use crate::core::seed::{seed_for_date, seed_for_today, seed_from_name};
pub use crate::play::{build_play, generate_play_config, Play, PlayConfig};
pub use crate::score::{score_attempt, TraceEvent};
pub use crate::server::{create_router, AppState};
pub use crate::store::{SqliteStore, Store};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
