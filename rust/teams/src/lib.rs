//! # rinkside-teams: Team Ratings for Match Simulation
//!
//! Supplies the skill ratings the match engine consumes. The engine only
//! asks a team for five numbers through [`RatingProvider`]; this crate decides
//! where those numbers come from.
//!
//! ## Core Components
//!
//! - [`TeamStyle`] - How a team spreads its strength across the five ratings
//! - [`styled`] - [`StyledTeam`](styled::StyledTeam), ratings derived from a
//!   base strength and a style
//! - [`create_team`] - Factory returning a boxed rating provider
//!
//! ## Quick Start
//!
//! ```rust
//! use rinkside_engine::engine::Engine;
//! use rinkside_engine::rules::MatchRules;
//! use rinkside_teams::{create_team, TeamStyle};
//!
//! let home = create_team(TeamStyle::Flat, 77);
//! let away = create_team(TeamStyle::Defensive, 73);
//!
//! let mut engine = Engine::new(Some(42), home, away, MatchRules::default())
//!     .expect("default rules are valid");
//! let score = engine.run().expect("game completes");
//! println!("{}", score);
//! ```

use std::fmt;
use std::str::FromStr;

use rinkside_engine::team::RatingProvider;
use serde::{Deserialize, Serialize};

pub mod styled;

pub use styled::StyledTeam;

/// Lowest rating a team can field.
pub const MIN_RATING: u8 = 1;
/// Highest rating a team can field.
///
/// Kept below 100 so a roll of 100 always fails.
pub const MAX_RATING: u8 = 99;

/// How a team weights its base strength across the five ratings.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamStyle {
    /// Every rating equals the base strength
    #[default]
    Flat,
    /// Stronger carrying and shooting, weaker in its own end
    Offensive,
    /// Stronger checking and blocking, weaker going forward
    Defensive,
    /// Built around the goalie
    Goaltending,
}

impl TeamStyle {
    pub const ALL: [TeamStyle; 4] = [
        TeamStyle::Flat,
        TeamStyle::Offensive,
        TeamStyle::Defensive,
        TeamStyle::Goaltending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamStyle::Flat => "flat",
            TeamStyle::Offensive => "offensive",
            TeamStyle::Defensive => "defensive",
            TeamStyle::Goaltending => "goaltending",
        }
    }
}

impl fmt::Display for TeamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a style name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown team style '{}' (expected flat, offensive, defensive or goaltending)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for TeamStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(TeamStyle::Flat),
            "offensive" | "offense" => Ok(TeamStyle::Offensive),
            "defensive" | "defense" => Ok(TeamStyle::Defensive),
            "goaltending" | "goalie" => Ok(TeamStyle::Goaltending),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

/// Builds a team of the given style around `strength`.
///
/// # Example
///
/// ```rust
/// use rinkside_engine::team::RatingProvider;
/// use rinkside_teams::{create_team, TeamStyle};
///
/// let team = create_team(TeamStyle::Flat, 77);
/// assert_eq!(team.face_off(), 77);
/// assert_eq!(team.shooting(), 77);
/// ```
pub fn create_team(style: TeamStyle, strength: u8) -> Box<dyn RatingProvider> {
    Box::new(StyledTeam::new(style, strength))
}

/// Clamps a rating into `MIN_RATING..=MAX_RATING`.
pub fn clamp_rating(value: i16) -> u8 {
    value.clamp(i16::from(MIN_RATING), i16::from(MAX_RATING)) as u8
}
