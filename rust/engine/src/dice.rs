use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Number of faces on the percentile die every check is rolled against.
pub const DIE_FACES: u8 = 100;

/// Rolls that count as a critical success (the two lowest faces).
pub const CRITICAL: [u8; 2] = [1, 2];

/// Rolls that count as a fumble (the two highest faces).
pub const FUMBLE: [u8; 2] = [99, 100];

pub fn is_critical(roll: u8) -> bool {
    CRITICAL.contains(&roll)
}

pub fn is_fumble(roll: u8) -> bool {
    FUMBLE.contains(&roll)
}

/// Source of percentile rolls consumed by contests and skill tests.
///
/// Every random draw in a match goes through this trait so tests can
/// substitute a scripted sequence.
pub trait RollSource {
    /// Returns a roll in `1..=100`.
    fn roll_d100(&mut self) -> u8;
}

/// Seeded percentile dice backed by ChaCha20.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha20Rng,
}

impl Dice {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl RollSource for Dice {
    fn roll_d100(&mut self) -> u8 {
        self.rng.random_range(1..=DIE_FACES)
    }
}

/// Replays a fixed list of rolls, cycling once the list is used up.
///
/// Rolls outside `1..=100` are clamped into range. An empty script always
/// rolls 100.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: Vec<u8>,
    position: usize,
}

impl ScriptedDice {
    pub fn new<I>(rolls: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self {
            rolls: rolls
                .into_iter()
                .map(|r| r.clamp(1, DIE_FACES))
                .collect(),
            position: 0,
        }
    }

    /// Number of rolls drawn so far.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RollSource for ScriptedDice {
    fn roll_d100(&mut self) -> u8 {
        if self.rolls.is_empty() {
            return DIE_FACES;
        }
        let r = self.rolls[self.position % self.rolls.len()];
        self.position += 1;
        r
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn roll_d100(&mut self) -> u8 {
        (**self).roll_d100()
    }
}

impl<R: RollSource + ?Sized> RollSource for Box<R> {
    fn roll_d100(&mut self) -> u8 {
        (**self).roll_d100()
    }
}
