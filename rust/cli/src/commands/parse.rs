//! Single-file parse command.

use std::io::Write;
use std::path::Path;

use handscope_engine::loader::HistoryLoader;
use handscope_engine::parser::{PokerStars, Winamax};

use crate::config::{self, CliOverrides, SiteKind};
use crate::error::CliError;
use crate::ui;

/// Parses `file` on the calling thread. With `--json` the whole site is
/// printed, hands and actions included.
pub fn handle_parse_command(
    file: &str,
    overrides: CliOverrides,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::resolve(&overrides)?.config;
    let path = Path::new(file);
    if !path.is_file() {
        return Err(CliError::InvalidInput(format!("file not found: {}", file)));
    }

    let site = match cfg.site {
        SiteKind::Winamax => HistoryLoader::new(Winamax).load_file(path),
        SiteKind::Pokerstars => HistoryLoader::new(PokerStars).load_file(path),
    };
    let Some(site) = site else {
        return Err(CliError::Engine(format!("no game parsed from {}", file)));
    };

    if cfg.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&site)?)?;
    } else {
        ui::write_site_summary(out, &site)?;
    }
    Ok(())
}
