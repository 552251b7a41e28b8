//! `cfg`: print the resolved configuration.
//!
//! Each setting is shown with the layer it came from:
//!
//! ```json
//! {
//!   "game_length": {
//!     "value": 120,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::from(e));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "game_length": {
            "value": config.game_length,
            "source": sources.game_length,
        },
        "home_strength": {
            "value": config.home_strength,
            "source": sources.home_strength,
        },
        "away_strength": {
            "value": config.away_strength,
            "source": sources.away_strength,
        },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
