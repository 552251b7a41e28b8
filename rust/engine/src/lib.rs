//! # rinkside-engine: Hockey Match Engine Core
//!
//! A dice-driven ice-hockey match simulator. A match is a state machine over
//! puck possession, zone and a shooting flag; every transition is decided by
//! percentile contests between the two teams' ratings, until the game clock
//! runs out.
//!
//! ## Core Modules
//!
//! - [`dice`] - Roll sources: seeded ChaCha20 dice and scripted dice for tests
//! - [`contest`] - Two-sided contests and one-sided skill tests
//! - [`team`] - Sides and the rating interface teams expose to the engine
//! - [`state`] - Match state, zones, possession and the box score
//! - [`phase`] - Phase selection and the five phase handlers
//! - [`rules`] - Time costs and tunable constants
//! - [`engine`] - The game loop
//! - [`logger`] - GameRecord serialization to JSONL
//! - [`errors`] - Error types for match simulation
//!
//! ## Quick Start
//!
//! ```rust
//! use rinkside_engine::engine::Engine;
//! use rinkside_engine::rules::MatchRules;
//! use rinkside_engine::team::Ratings;
//!
//! let mut engine = Engine::new(
//!     Some(42),
//!     Box::new(Ratings::uniform(77)),
//!     Box::new(Ratings::uniform(73)),
//!     MatchRules::default(),
//! )
//! .expect("valid rules");
//! let score = engine.run().expect("game completes");
//! println!("{}", score);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Every random draw goes through a [`dice::RollSource`]. The same seed
//! replays the same game:
//!
//! ```rust
//! use rinkside_engine::engine::Engine;
//! use rinkside_engine::rules::MatchRules;
//! use rinkside_engine::team::Ratings;
//!
//! let play = |seed| {
//!     Engine::new(
//!         Some(seed),
//!         Box::new(Ratings::uniform(70)),
//!         Box::new(Ratings::uniform(70)),
//!         MatchRules::default(),
//!     )
//!     .and_then(|mut e| e.run())
//! };
//! assert_eq!(play(7), play(7));
//! ```
//!
//! ## Forcing Outcomes
//!
//! Contests can be decided from explicit rolls:
//!
//! ```rust
//! use rinkside_engine::contest::{resolve_contest, Winner};
//!
//! // defender succeeds with the larger margin
//! let outcome = resolve_contest(60, 80, 40, 20);
//! assert_eq!(outcome.winner, Winner::Defender);
//! ```

pub mod contest;
pub mod dice;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod phase;
pub mod rules;
pub mod state;
pub mod team;
