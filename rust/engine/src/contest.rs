//! Percentile checks that drive every phase of a match.
//!
//! A contest pits an attacking rating against a defending one: both sides
//! roll a d100 and succeed by rolling under their rating. A skill test is the
//! one-sided version used when a shooter and a goalie are judged separately.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{is_critical, is_fumble, RollSource};

/// Which slot of a contest came out on top.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Winner {
    /// Neither side succeeded by enough to claim the contest
    Nobody,
    /// The side rolling against the attack rating
    Attacker,
    /// The side rolling against the defense rating
    Defender,
}

/// Result of a two-sided contest.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContestOutcome {
    pub winner: Winner,
    /// The winner rolled a critical face
    pub winner_critical: bool,
    /// The loser rolled a fumble face
    pub loser_fumble: bool,
}

impl ContestOutcome {
    pub fn no_winner() -> Self {
        Self {
            winner: Winner::Nobody,
            winner_critical: false,
            loser_fumble: false,
        }
    }
}

/// Result of a one-sided skill test.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct SkillTestOutcome {
    /// Rating minus roll; positive means the test passed
    pub margin: i32,
    /// The roll landed on either extreme (critical or fumble face)
    pub critical: bool,
}

/// Resolves a contest from already-drawn rolls.
///
/// The defender takes every tie in which it succeeded. The attacker needs a
/// success with a strictly larger margin.
///
/// # Examples
///
/// ```
/// use rinkside_engine::contest::{resolve_contest, Winner};
///
/// let outcome = resolve_contest(75, 75, 50, 90);
/// assert_eq!(outcome.winner, Winner::Attacker);
/// assert!(!outcome.winner_critical);
/// assert!(!outcome.loser_fumble);
///
/// // equal margins favour the defender
/// let outcome = resolve_contest(60, 60, 30, 30);
/// assert_eq!(outcome.winner, Winner::Defender);
/// ```
pub fn resolve_contest(
    attack_rating: u8,
    defense_rating: u8,
    attack_roll: u8,
    defense_roll: u8,
) -> ContestOutcome {
    let attack_margin = i32::from(attack_rating) - i32::from(attack_roll);
    let defense_margin = i32::from(defense_rating) - i32::from(defense_roll);

    if defense_margin > 0 && defense_margin >= attack_margin {
        ContestOutcome {
            winner: Winner::Defender,
            winner_critical: is_critical(defense_roll),
            loser_fumble: is_fumble(attack_roll),
        }
    } else if attack_margin > 0 && attack_margin > defense_margin {
        ContestOutcome {
            winner: Winner::Attacker,
            winner_critical: is_critical(attack_roll),
            loser_fumble: is_fumble(defense_roll),
        }
    } else {
        ContestOutcome::no_winner()
    }
}

/// Rolls both sides of a contest and resolves it.
pub fn contest<R: RollSource + ?Sized>(
    dice: &mut R,
    attack_rating: u8,
    defense_rating: u8,
) -> ContestOutcome {
    let attack_roll = dice.roll_d100();
    let defense_roll = dice.roll_d100();
    let outcome = resolve_contest(attack_rating, defense_rating, attack_roll, defense_roll);
    debug!(
        attack_rating,
        attack_roll,
        defense_rating,
        defense_roll,
        winner = ?outcome.winner,
        critical = outcome.winner_critical,
        fumble = outcome.loser_fumble,
        "contest"
    );
    outcome
}

/// Resolves a skill test from an already-drawn roll.
///
/// Ratings above 100 (a rating plus bonuses) are allowed and simply widen
/// the margin.
pub fn resolve_skill_test(rating: u16, roll: u8) -> SkillTestOutcome {
    SkillTestOutcome {
        margin: i32::from(rating) - i32::from(roll),
        critical: is_critical(roll) || is_fumble(roll),
    }
}

/// Rolls a one-sided skill test.
pub fn skill_test<R: RollSource + ?Sized>(dice: &mut R, rating: u16) -> SkillTestOutcome {
    let roll = dice.roll_d100();
    let outcome = resolve_skill_test(rating, roll);
    debug!(rating, roll, margin = outcome.margin, critical = outcome.critical, "skill test");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn both_fail_means_no_winner() {
        let o = resolve_contest(40, 40, 80, 90);
        assert_eq!(o, ContestOutcome::no_winner());
    }

    #[test]
    fn defender_wins_when_only_defender_succeeds() {
        let o = resolve_contest(40, 60, 70, 30);
        assert_eq!(o.winner, Winner::Defender);
    }

    #[test]
    fn attacker_needs_strictly_larger_margin() {
        // attack margin 20, defense margin 20 -> defender
        assert_eq!(resolve_contest(70, 50, 50, 30).winner, Winner::Defender);
        // attack margin 21, defense margin 20 -> attacker
        assert_eq!(resolve_contest(71, 50, 50, 30).winner, Winner::Attacker);
    }

    #[test]
    fn attacker_wins_when_defender_fails() {
        let o = resolve_contest(50, 10, 40, 60);
        assert_eq!(o.winner, Winner::Attacker);
    }

    #[test]
    fn defender_critical_and_attacker_fumble() {
        let o = resolve_contest(75, 75, 100, 2);
        assert_eq!(o.winner, Winner::Defender);
        assert!(o.winner_critical);
        assert!(o.loser_fumble);
    }

    #[test]
    fn attacker_critical_and_defender_fumble() {
        let o = resolve_contest(75, 75, 1, 99);
        assert_eq!(o.winner, Winner::Attacker);
        assert!(o.winner_critical);
        assert!(o.loser_fumble);
    }

    #[test]
    fn extremes_without_a_winner_raise_no_flags() {
        // attack fails on a fumble, defense fails too
        let o = resolve_contest(0, 0, 100, 1);
        assert_eq!(o, ContestOutcome::no_winner());
    }

    #[test]
    fn contest_draws_attack_then_defense() {
        let mut dice = ScriptedDice::new([50, 90]);
        let o = contest(&mut dice, 75, 75);
        assert_eq!(o.winner, Winner::Attacker);
        assert_eq!(dice.consumed(), 2);
    }

    #[test]
    fn skill_test_margin_and_extremes() {
        assert_eq!(
            resolve_skill_test(70, 30),
            SkillTestOutcome {
                margin: 40,
                critical: false
            }
        );
        assert!(resolve_skill_test(70, 1).critical);
        assert!(resolve_skill_test(70, 100).critical);
        assert_eq!(resolve_skill_test(70, 70).margin, 0);
    }
}
