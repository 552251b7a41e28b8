use thiserror::Error;

/// Errors raised while setting up or simulating a match.
///
/// The zone, possession and phase variants mean the state machine reached a
/// state its own selection rule should make impossible. They are fatal: the
/// game loop stops instead of clamping or guessing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Zone {zone} cannot advance further toward zone {attacking}")]
    ZoneOutOfBounds { zone: u8, attacking: u8 },
    #[error("Cannot {operation} while no side holds possession")]
    NoPossession { operation: &'static str },
    #[error("Cannot {operation} before a zone has been anchored")]
    NoZone { operation: &'static str },
    #[error("The {phase} phase was selected but refused the current state")]
    PhaseRejected { phase: &'static str },
    #[error("The game clock has already expired")]
    ClockExpired,
    #[error("Invalid match rules: {0}")]
    InvalidRules(String),
}
