//! `rng`: show the percentile rolls a seed produces.
//!
//! Useful for checking that a seed replays the same dice on another
//! machine.

use std::io::Write;

use rinkside_engine::dice::{is_critical, is_fumble, Dice, RollSource};

use crate::error::CliError;

pub fn handle_rng_command(
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(CliError::InvalidInput("count must be >= 1".to_string()));
    }
    let s = seed.unwrap_or_else(rand::random);
    let mut dice = Dice::new_with_seed(s);
    let rolls: Vec<u8> = (0..count).map(|_| dice.roll_d100()).collect();
    let criticals = rolls.iter().filter(|r| is_critical(**r)).count();
    let fumbles = rolls.iter().filter(|r| is_fumble(**r)).count();

    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "Rolls: {:?}", rolls)?;
    writeln!(out, "Criticals: {}  Fumbles: {}", criticals, fumbles)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: Option<u64>, count: usize) -> String {
        let mut out = Vec::new();
        handle_rng_command(seed, count, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn same_seed_same_rolls() {
        assert_eq!(sample(Some(42), 20), sample(Some(42), 20));
        assert_ne!(sample(Some(42), 20), sample(Some(43), 20));
    }

    #[test]
    fn prints_requested_count_in_range() {
        let text = sample(Some(9), 50);
        let rolls_line = text.lines().nth(1).unwrap();
        let inner = rolls_line
            .trim_start_matches("Rolls: [")
            .trim_end_matches(']');
        let rolls: Vec<u8> = inner.split(", ").map(|v| v.parse().unwrap()).collect();
        assert_eq!(rolls.len(), 50);
        assert!(rolls.iter().all(|r| (1..=100).contains(r)));
    }

    #[test]
    fn unseeded_sample_still_reports_its_seed() {
        assert!(sample(None, 3).starts_with("Seed: "));
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut out = Vec::new();
        assert!(handle_rng_command(Some(1), 0, &mut out).is_err());
    }
}
