//! Command handlers, one module per subcommand.
//!
//! Each module exposes `handle_<name>_command`, takes its output streams as
//! `&mut dyn Write`, and reports failures as [`CliError`](crate::error::CliError).

pub mod cfg;
pub mod game;
pub mod rng;
pub mod sim;
pub mod stats;
pub mod verify;

pub use cfg::handle_cfg_command;
pub use game::{handle_game_command, GameOptions};
pub use rng::handle_rng_command;
pub use sim::{handle_sim_command, SimOptions};
pub use stats::handle_stats_command;
pub use verify::handle_verify_command;

use std::io::Write;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Loads the layered configuration, reporting a bad one on `err`.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    config::load().or_else(|e| {
        ui::write_error(err, &format!("Invalid configuration: {}", e))?;
        Err(CliError::from(e))
    })
}

/// Rejects a zero-length game before the engine sees it.
pub(crate) fn check_length(length: u32, err: &mut dyn Write) -> Result<u32, CliError> {
    if length == 0 {
        ui::write_error(err, "length must be >= 1")?;
        return Err(CliError::InvalidInput("length must be >= 1".to_string()));
    }
    Ok(length)
}
