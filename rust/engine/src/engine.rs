use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dice::{Dice, RollSource};
use crate::errors::MatchError;
use crate::phase::{Matchup, Phase, PhaseEntry};
use crate::rules::MatchRules;
use crate::state::{BoxScore, MatchState, Possession, Zone};
use crate::team::{RatingProvider, Side};

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Snapshot taken after each dispatcher tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// 1-based tick number
    pub tick: u32,
    pub phase: Phase,
    /// Clock before the phase was resolved
    pub clock_before: i32,
    pub clock: i32,
    pub in_play: bool,
    pub possession: Possession,
    pub zone: Option<Zone>,
    pub shooting: bool,
    pub home_score: u32,
    pub away_score: u32,
}

/// Game loop for one match between two rated teams.
///
/// Each tick selects exactly one phase from the current state, resolves it,
/// and repeats until the clock runs out.
///
/// # Examples
///
/// ```
/// use rinkside_engine::engine::Engine;
/// use rinkside_engine::rules::MatchRules;
/// use rinkside_engine::team::Ratings;
///
/// let mut engine = Engine::new(
///     Some(12345),
///     Box::new(Ratings::uniform(77)),
///     Box::new(Ratings::uniform(73)),
///     MatchRules::default(),
/// )
/// .expect("default rules are valid");
///
/// let box_score = engine.run().expect("game completes");
/// assert!(engine.is_finished());
/// assert_eq!(box_score, engine.box_score());
/// ```
pub struct Engine<R: RollSource = Dice> {
    state: MatchState,
    home: Box<dyn RatingProvider>,
    away: Box<dyn RatingProvider>,
    rules: MatchRules,
    dice: R,
    ticks: u32,
}

impl<R: RollSource + std::fmt::Debug> std::fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("home", &self.home.ratings())
            .field("away", &self.away.ratings())
            .field("rules", &self.rules)
            .field("dice", &self.dice)
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl Engine<Dice> {
    /// Engine with seeded ChaCha dice.
    pub fn new(
        seed: Option<u64>,
        home: Box<dyn RatingProvider>,
        away: Box<dyn RatingProvider>,
        rules: MatchRules,
    ) -> Result<Self, MatchError> {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Self::with_dice(Dice::new_with_seed(seed), home, away, rules)
    }
}

impl<R: RollSource> Engine<R> {
    pub fn with_dice(
        dice: R,
        home: Box<dyn RatingProvider>,
        away: Box<dyn RatingProvider>,
        rules: MatchRules,
    ) -> Result<Self, MatchError> {
        rules.validate()?;
        Ok(Self {
            state: MatchState::new(rules.game_length),
            home,
            away,
            rules,
            dice,
            ticks: 0,
        })
    }

    /// Replaces the starting state, e.g. to pick up play mid-game.
    pub fn with_state(mut self, state: MatchState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_expired()
    }

    pub fn box_score(&self) -> BoxScore {
        self.state.box_score()
    }

    /// Resolves exactly one phase.
    ///
    /// # Errors
    ///
    /// - [`MatchError::ClockExpired`] if the game is already over
    /// - [`MatchError::PhaseRejected`] if the selected handler refused the
    ///   state, which means selection and handler guards disagree
    /// - any invariant violation raised by the handler
    pub fn tick(&mut self) -> Result<TickRecord, MatchError> {
        if self.state.is_expired() {
            return Err(MatchError::ClockExpired);
        }
        let phase = Phase::select(&self.state);
        let clock_before = self.state.clock();
        let matchup = Matchup::new(self.home.as_ref(), self.away.as_ref(), &self.rules);

        match phase.resolve(&mut self.state, &matchup, &mut self.dice)? {
            PhaseEntry::Resolved => {}
            PhaseEntry::Rejected => {
                return Err(MatchError::PhaseRejected {
                    phase: phase.as_str(),
                })
            }
        }
        self.ticks += 1;
        debug!(tick = self.ticks, phase = phase.as_str(), state = %self.state, "tick");

        let home = self.state.stats(Side::Home).score;
        let away = self.state.stats(Side::Away).score;
        Ok(TickRecord {
            tick: self.ticks,
            phase,
            clock_before,
            clock: self.state.clock(),
            in_play: self.state.is_in_play(),
            possession: self.state.possession(),
            zone: self.state.zone(),
            shooting: self.state.is_shooting(),
            home_score: home,
            away_score: away,
        })
    }

    /// Plays until the clock expires and returns the final box score.
    pub fn run(&mut self) -> Result<BoxScore, MatchError> {
        self.run_with(|_| {})
    }

    /// Like [`Engine::run`], handing every tick to `observer`.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<BoxScore, MatchError>
    where
        F: FnMut(&TickRecord),
    {
        while !self.state.is_expired() {
            let record = self.tick()?;
            observer(&record);
        }
        let score = self.state.box_score();
        info!(
            ticks = self.ticks,
            home = score.home.score,
            away = score.away.score,
            "game complete"
        );
        Ok(score)
    }
}
