//! Terminal output helpers shared by the commands.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use handscope_engine::loader::LoadProgress;
use handscope_engine::site::Site;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Counts loader notifications. Callbacks arrive on pool threads, so the
/// report is written after the load returns.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    total: AtomicUsize,
    processed: AtomicUsize,
    done: AtomicUsize,
}

impl ProgressCounter {
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst) > 0
    }

    pub fn write_report(&self, err: &mut dyn Write) -> std::io::Result<()> {
        writeln!(err, "Processed {}/{} files", self.processed(), self.total())
    }
}

impl LoadProgress for ProgressCounter {
    fn on_file_count_known(&self, count: usize) {
        self.total.store(count, Ordering::SeqCst);
    }

    fn on_file_processed(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_done(&self) {
        self.done.fetch_add(1, Ordering::SeqCst);
    }
}

/// Plain-text site summary.
pub fn write_site_summary(out: &mut dyn Write, site: &Site) -> std::io::Result<()> {
    writeln!(out, "Site: {}", site.name())?;
    writeln!(
        out,
        "Games: {} ({} cash, {} tournaments)",
        site.game_count(),
        site.cash_games().len(),
        site.tournaments().len()
    )?;
    writeln!(out, "Hands: {}", site.hand_count())?;
    writeln!(out, "Actions: {}", site.action_count())?;
    writeln!(out, "Players: {}", site.player_count())?;
    if let Some(hero) = site.hero() {
        writeln!(out, "Hero: {}", hero.name())?;
    }
    Ok(())
}

/// Same figures as [`write_site_summary`], as a JSON object.
pub fn site_summary_json(site: &Site) -> serde_json::Value {
    serde_json::json!({
        "site": site.name(),
        "games": site.game_count(),
        "cash_games": site.cash_games().len(),
        "tournaments": site.tournaments().len(),
        "hands": site.hand_count(),
        "actions": site.action_count(),
        "players": site.player_count(),
        "hero": site.hero().map(|p| p.name()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use handscope_engine::player::Player;

    #[test]
    fn summary_names_the_hero() {
        let mut site = Site::new("Winamax");
        let mut hero = Player::new("Hero", "Winamax").unwrap();
        hero.set_hero(true);
        site.add_player(hero);

        let mut out = Vec::new();
        write_site_summary(&mut out, &site).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Site: Winamax"));
        assert!(text.contains("Hero: Hero"));
        assert_eq!(site_summary_json(&site)["players"], 1);
    }

    #[test]
    fn counter_tracks_callbacks() {
        let counter = ProgressCounter::default();
        counter.on_file_count_known(3);
        counter.on_file_processed();
        counter.on_file_processed();
        counter.on_done();
        let mut err = Vec::new();
        counter.write_report(&mut err).unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Processed 2/3 files\n");
        assert!(counter.is_done());
    }
}
