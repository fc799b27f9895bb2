//! Directory load command.
//!
//! Runs the concurrent loader over one history directory and prints a
//! summary of the aggregate site. An empty result is reported as a warning,
//! not an error: a rejected directory and a directory without histories look
//! the same from here.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use handscope_engine::loader::{HistoryLoader, LoadProgress};
use handscope_engine::parser::{HistoryFormat, PokerStars, Winamax};
use handscope_engine::pool;
use handscope_engine::site::Site;
use tracing::info;

use crate::config::{self, CliOverrides, SiteKind};
use crate::error::CliError;
use crate::ui::{self, ProgressCounter};

pub fn handle_load_command(
    overrides: CliOverrides,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::resolve(&overrides)?.config;
    let Some(dir) = cfg.history_dir else {
        return Err(CliError::InvalidInput(
            "history directory required (--dir or HANDSCOPE_HISTORY_DIR)".into(),
        ));
    };
    let dir = PathBuf::from(dir);

    if let Some(workers) = cfg.workers
        && !pool::init_global(workers)
    {
        ui::display_warning(err, "worker pool already running; --workers ignored")?;
    }

    let progress = Arc::new(ProgressCounter::default());
    let site = match cfg.site {
        SiteKind::Winamax => load_with(Winamax, &dir, progress.clone()),
        SiteKind::Pokerstars => load_with(PokerStars, &dir, progress.clone()),
    };

    progress.write_report(err)?;
    if site.is_empty() {
        ui::display_warning(
            err,
            &format!("no hand histories loaded from {}", dir.display()),
        )?;
    }

    if cfg.json {
        let summary = ui::site_summary_json(&site);
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        ui::write_site_summary(out, &site)?;
    }
    Ok(())
}

fn load_with<F>(format: F, dir: &Path, progress: Arc<dyn LoadProgress>) -> Site
where
    F: HistoryFormat + 'static,
{
    let loader = HistoryLoader::new(format);
    info!(site = loader.format().site_name(), dir = %dir.display(), "load requested");
    loader.load_directory(dir, progress)
}
