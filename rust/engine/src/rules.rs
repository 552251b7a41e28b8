use serde::{Deserialize, Serialize};

use crate::errors::MatchError;

/// Default regulation length in seconds.
pub const DEFAULT_GAME_LENGTH: u32 = 120;

/// Seconds charged by each phase of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCosts {
    pub face_off: u32,
    pub reclaim: u32,
    pub advance: u32,
    pub secure_shot: u32,
    pub take_shot: u32,
}

impl Default for TimeCosts {
    fn default() -> Self {
        Self {
            face_off: 2,
            reclaim: 3,
            advance: 5,
            secure_shot: 5,
            take_shot: 3,
        }
    }
}

impl TimeCosts {
    pub fn min(&self) -> u32 {
        [
            self.face_off,
            self.reclaim,
            self.advance,
            self.secure_shot,
            self.take_shot,
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }
}

/// Tunable constants of a match.
///
/// # Examples
///
/// ```
/// use rinkside_engine::rules::MatchRules;
///
/// let rules = MatchRules::default();
/// assert_eq!(rules.game_length, 120);
/// assert!(rules.validate().is_ok());
/// // every tick costs at least two seconds, so a game has at most 60 ticks
/// assert_eq!(rules.max_ticks(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub game_length: u32,
    pub time_costs: TimeCosts,
    /// Margin a goalie must beat the shooter by to smother the rebound
    pub goalie_control_differential: i32,
    /// Offense added to the next securing-a-shot contest when the bonus is pending
    pub securing_a_shot_bonus: u8,
    /// Shooting added per point of shot-quality multiplier
    pub shot_quality_step: u8,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            game_length: DEFAULT_GAME_LENGTH,
            time_costs: TimeCosts::default(),
            goalie_control_differential: 25,
            securing_a_shot_bonus: 10,
            shot_quality_step: 5,
        }
    }
}

impl MatchRules {
    pub fn with_game_length(mut self, seconds: u32) -> Self {
        self.game_length = seconds;
        self
    }

    /// Every phase must consume time, otherwise the game loop could spin forever.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.game_length == 0 {
            return Err(MatchError::InvalidRules("game_length must be >0".into()));
        }
        if self.time_costs.min() == 0 {
            return Err(MatchError::InvalidRules("every phase time cost must be >0".into()));
        }
        if self.goalie_control_differential < 0 {
            return Err(MatchError::InvalidRules("goalie_control_differential must be >=0".into()));
        }
        Ok(())
    }

    /// Upper bound on dispatcher ticks before the clock runs out.
    pub fn max_ticks(&self) -> u32 {
        match self.time_costs.min() {
            0 => u32::MAX,
            m => self.game_length.div_ceil(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time_cost_is_rejected() {
        let mut rules = MatchRules::default();
        rules.time_costs.reclaim = 0;
        assert!(matches!(
            rules.validate(),
            Err(MatchError::InvalidRules(_))
        ));
    }

    #[test]
    fn zero_length_is_rejected() {
        let rules = MatchRules::default().with_game_length(0);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn max_ticks_rounds_up() {
        let rules = MatchRules::default().with_game_length(121);
        assert_eq!(rules.max_ticks(), 61);
    }
}
