//! The five phases of play and the rule that picks between them.
//!
//! Each handler resolves one contest (two skill tests for a shot), applies
//! the outcome to [`MatchState`], and charges the phase's time cost. A handler
//! called in a state it does not apply to logs a warning and leaves the state
//! untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contest::{contest, skill_test, ContestOutcome, Winner};
use crate::dice::RollSource;
use crate::errors::MatchError;
use crate::rules::MatchRules;
use crate::state::{MatchState, Possession};
use crate::team::{RatingProvider, Side};

/// Phase of play selected for a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    FaceOff,
    Reclaim,
    Advance,
    SecureShot,
    TakeShot,
}

impl Phase {
    /// Picks the single phase that applies to `state`.
    ///
    /// Checked in priority order: face-off when the puck is dead, reclaim
    /// when it is loose, a pending shot, then securing a shot from the
    /// attacking zone, and otherwise moving the puck up ice.
    pub fn select(state: &MatchState) -> Phase {
        if !state.is_in_play() {
            Phase::FaceOff
        } else if state.possession() == Possession::Loose {
            Phase::Reclaim
        } else if state.is_shooting() {
            Phase::TakeShot
        } else if state.in_attacking_zone() {
            Phase::SecureShot
        } else {
            Phase::Advance
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::FaceOff => "face_off",
            Phase::Reclaim => "reclaim",
            Phase::Advance => "advance",
            Phase::SecureShot => "secure_shot",
            Phase::TakeShot => "take_shot",
        }
    }

    /// Runs this phase's handler.
    pub fn resolve<R: RollSource + ?Sized>(
        self,
        state: &mut MatchState,
        matchup: &Matchup<'_>,
        dice: &mut R,
    ) -> Result<PhaseEntry, MatchError> {
        match self {
            Phase::FaceOff => face_off(state, matchup, dice),
            Phase::Reclaim => reclaim(state, matchup, dice),
            Phase::Advance => advance(state, matchup, dice),
            Phase::SecureShot => secure_shot(state, matchup, dice),
            Phase::TakeShot => take_shot(state, matchup, dice),
        }
    }
}

/// Whether a handler acted on the state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PhaseEntry {
    Resolved,
    /// The state did not fit the phase; nothing changed
    Rejected,
}

/// The two teams and the rules a match is played under.
pub struct Matchup<'a> {
    pub home: &'a dyn RatingProvider,
    pub away: &'a dyn RatingProvider,
    pub rules: &'a MatchRules,
}

impl std::fmt::Debug for Matchup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matchup")
            .field("home", &self.home.ratings())
            .field("away", &self.away.ratings())
            .field("rules", self.rules)
            .finish()
    }
}

impl<'a> Matchup<'a> {
    pub fn new(
        home: &'a dyn RatingProvider,
        away: &'a dyn RatingProvider,
        rules: &'a MatchRules,
    ) -> Self {
        Self { home, away, rules }
    }

    pub fn team(&self, side: Side) -> &'a dyn RatingProvider {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// Maps a contest winner back to a team given which side rolled as attacker.
fn winning_side(outcome: &ContestOutcome, attacker: Side) -> Option<Side> {
    match outcome.winner {
        Winner::Attacker => Some(attacker),
        Winner::Defender => Some(attacker.opponent()),
        Winner::Nobody => None,
    }
}

/// Restarts play at a dead puck. Away rolls in the attacker slot.
pub fn face_off<R: RollSource + ?Sized>(
    state: &mut MatchState,
    matchup: &Matchup<'_>,
    dice: &mut R,
) -> Result<PhaseEntry, MatchError> {
    if state.possession() != Possession::Loose {
        warn!(
            possession = %state.possession(),
            "face-off requested while a team has possession of the puck"
        );
        return Ok(PhaseEntry::Rejected);
    }

    let outcome = contest(dice, matchup.away.face_off(), matchup.home.face_off());
    let winner = winning_side(&outcome, Side::Away);
    state.set_possession(winner.map_or(Possession::Loose, Possession::from));
    state.set_in_play(true);

    if winner.is_some() {
        state.anchor_zone();
        if outcome.loser_fumble {
            state.breakaway()?;
        } else if outcome.winner_critical {
            state.advance_zone()?;
        }
    }

    state.charge(matchup.rules.time_costs.face_off);
    debug!(?winner, zone = ?state.zone(), "face-off");
    Ok(PhaseEntry::Resolved)
}

/// Scramble for a loose puck, offense against offense. Away rolls in the
/// attacker slot.
pub fn reclaim<R: RollSource + ?Sized>(
    state: &mut MatchState,
    matchup: &Matchup<'_>,
    dice: &mut R,
) -> Result<PhaseEntry, MatchError> {
    if state.possession() != Possession::Loose {
        warn!(
            possession = %state.possession(),
            "reclaim requested while a team has possession of the puck"
        );
        return Ok(PhaseEntry::Rejected);
    }
    if !state.is_in_play() {
        warn!("reclaim requested while the puck is dead");
        return Ok(PhaseEntry::Rejected);
    }

    let outcome = contest(
        dice,
        matchup.away.overall_offensive(),
        matchup.home.overall_offensive(),
    );
    let winner = winning_side(&outcome, Side::Away);
    state.set_possession(winner.map_or(Possession::Loose, Possession::from));

    if winner.is_some() {
        state.anchor_zone();
        if outcome.loser_fumble {
            state.breakaway()?;
        } else if outcome.winner_critical {
            if state.in_attacking_zone() {
                state.grant_secure_bonus();
            } else {
                state.advance_zone()?;
            }
        }
    }

    state.charge(matchup.rules.time_costs.reclaim);
    debug!(?winner, zone = ?state.zone(), "reclaim");
    Ok(PhaseEntry::Resolved)
}

/// Carries the puck up ice, possessor's offense against the other defense.
pub fn advance<R: RollSource + ?Sized>(
    state: &mut MatchState,
    matchup: &Matchup<'_>,
    dice: &mut R,
) -> Result<PhaseEntry, MatchError> {
    let Some(attacker) = state.possession().side() else {
        warn!("moving the puck requested while the puck is loose");
        return Ok(PhaseEntry::Rejected);
    };
    if !state.is_in_play() || state.is_shooting() {
        warn!(
            in_play = state.is_in_play(),
            shooting = state.is_shooting(),
            "moving the puck requested outside of open play"
        );
        return Ok(PhaseEntry::Rejected);
    }

    let outcome = contest(
        dice,
        matchup.team(attacker).overall_offensive(),
        matchup.team(attacker.opponent()).overall_defensive(),
    );
    match outcome.winner {
        Winner::Attacker => {
            state.advance_zone()?;
            if outcome.loser_fumble {
                state.breakaway()?;
            } else if outcome.winner_critical {
                state.advance_zone()?;
            }
        }
        Winner::Defender => {
            if outcome.loser_fumble {
                state.flip_possession()?;
                state.breakaway()?;
            } else if outcome.winner_critical {
                state.flip_possession()?;
            }
        }
        Winner::Nobody => {}
    }

    state.charge(matchup.rules.time_costs.advance);
    debug!(
        winner = ?outcome.winner,
        possession = %state.possession(),
        zone = ?state.zone(),
        "moving the puck"
    );
    Ok(PhaseEntry::Resolved)
}

/// Works the puck into a shooting lane from the attacking zone.
///
/// A pending securing-a-shot bonus is spent on this contest. A win records
/// the shot quality the following shot is taken with.
pub fn secure_shot<R: RollSource + ?Sized>(
    state: &mut MatchState,
    matchup: &Matchup<'_>,
    dice: &mut R,
) -> Result<PhaseEntry, MatchError> {
    let Some(attacker) = state.possession().side() else {
        warn!("securing a shot requested while the puck is loose");
        return Ok(PhaseEntry::Rejected);
    };
    if !state.is_in_play() || state.is_shooting() || !state.in_attacking_zone() {
        warn!(
            zone = ?state.zone(),
            shooting = state.is_shooting(),
            "securing a shot requested outside the attacking zone"
        );
        return Ok(PhaseEntry::Rejected);
    }

    let bonus = if state.take_secure_bonus() {
        matchup.rules.securing_a_shot_bonus
    } else {
        0
    };
    let outcome = contest(
        dice,
        matchup
            .team(attacker)
            .overall_offensive()
            .saturating_add(bonus),
        matchup.team(attacker.opponent()).overall_defensive(),
    );
    match outcome.winner {
        Winner::Attacker => {
            state.set_shooting(true);
            let quality = if outcome.loser_fumble {
                1
            } else if outcome.winner_critical {
                2
            } else {
                0
            };
            state.set_shot_quality(quality);
        }
        Winner::Defender => {
            if outcome.loser_fumble {
                state.flip_possession()?;
                state.advance_zone()?;
            } else if outcome.winner_critical {
                state.flip_possession()?;
            }
        }
        Winner::Nobody => {}
    }

    state.charge(matchup.rules.time_costs.secure_shot);
    debug!(winner = ?outcome.winner, bonus, shooting = state.is_shooting(), "securing a shot");
    Ok(PhaseEntry::Resolved)
}

/// Shooter against goalie, judged as two separate skill tests.
pub fn take_shot<R: RollSource + ?Sized>(
    state: &mut MatchState,
    matchup: &Matchup<'_>,
    dice: &mut R,
) -> Result<PhaseEntry, MatchError> {
    let Some(shooter) = state.possession().side() else {
        warn!("taking a shot requested while the puck is loose");
        return Ok(PhaseEntry::Rejected);
    };
    if !state.is_shooting() || !state.in_attacking_zone() {
        warn!(
            zone = ?state.zone(),
            shooting = state.is_shooting(),
            "taking a shot requested without a shot lined up"
        );
        return Ok(PhaseEntry::Rejected);
    }
    let goalie = shooter.opponent();

    state.set_shooting(false);
    let quality = state.take_shot_quality();
    let rating = u16::from(matchup.team(shooter).shooting())
        + u16::from(quality) * u16::from(matchup.rules.shot_quality_step);
    let shot = skill_test(dice, rating);

    if shot.margin <= 0 {
        if shot.critical {
            // shot blocked on the way and cleared by the defense
            state.flip_possession()?;
        } else {
            state.set_possession(Possession::Loose);
        }
        debug!(?shooter, margin = shot.margin, "missed shot");
    } else {
        state.stats_mut(shooter).shots_on_goal += 1;
        let save = skill_test(dice, u16::from(matchup.team(goalie).blocking()));
        if save.margin < shot.margin {
            state.stats_mut(shooter).score += 1;
            state.set_possession(Possession::Loose);
            state.clear_zone();
            state.set_in_play(false);
            debug!(?shooter, "goal");
        } else if save.margin < shot.margin + matchup.rules.goalie_control_differential {
            state.stats_mut(goalie).saves += 1;
            state.set_possession(Possession::Loose);
            debug!(?goalie, "save, rebound loose");
        } else {
            state.flip_possession()?;
            debug!(?goalie, "save, goalie controls");
        }
    }

    state.charge(matchup.rules.time_costs.take_shot);
    Ok(PhaseEntry::Resolved)
}
