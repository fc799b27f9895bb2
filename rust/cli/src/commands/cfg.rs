//! Configuration command handler.
//!
//! Prints every setting with the layer it came from:
//!
//! ```json
//! {
//!   "site": {
//!     "value": "winamax",
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "site": {
            "value": config.site,
            "source": sources.site,
        },
        "history_dir": {
            "value": config.history_dir,
            "source": sources.history_dir,
        },
        "workers": {
            "value": config.workers,
            "source": sources.workers,
        },
        "json": {
            "value": config.json,
            "source": sources.json,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
