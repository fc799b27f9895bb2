//! Multi-file history loader.
//!
//! One task per eligible file runs on the global [`ThreadPool`]; results are
//! collected on the calling thread in submission order and merged into one
//! aggregate [`Site`]. Each task parses with its own [`PlayerCache`] and hands
//! the players back inside its per-file site. Players of merged files are
//! folded into one batch cache, where hero marks from any file stick, and the
//! batch cache is drained into the aggregate once collection ends. A file that
//! fails or is discarded by a stop contributes no players.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::parser::HistoryFormat;
use crate::player_cache::PlayerCache;
use crate::pool::{self, TaskHandle, ThreadPool};
use crate::site::Site;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Progress notifications of one load. All methods default to no-ops.
pub trait LoadProgress: Send + Sync {
    /// Number of eligible files, sent once and only when non-zero.
    fn on_file_count_known(&self, _count: usize) {}

    /// One file attempted, whatever its outcome.
    fn on_file_processed(&self) {}

    /// Collection finished. Sent exactly once per load.
    fn on_done(&self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl LoadProgress for NoProgress {}

type FileTask = TaskHandle<Option<Site>>;

pub struct HistoryLoader<F> {
    format: Arc<F>,
    pool: Option<&'static ThreadPool>,
    stopped: Arc<AtomicBool>,
    tasks: Mutex<Vec<Option<FileTask>>>,
}

impl<F> HistoryLoader<F>
where
    F: HistoryFormat + 'static,
{
    /// Loader running on the process-global pool.
    pub fn new(format: F) -> Self {
        Self {
            format: Arc::new(format),
            pool: None,
            stopped: Arc::new(AtomicBool::new(false)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pool(format: F, pool: &'static ThreadPool) -> Self {
        Self {
            pool: Some(pool),
            ..Self::new(format)
        }
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn task_table(&self) -> MutexGuard<'_, Vec<Option<FileTask>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Eligible history files below `dir`, sorted by path. `None` when the
    /// directory does not have the shape the format expects.
    pub fn eligible_files(&self, dir: &Path) -> Option<Vec<PathBuf>> {
        let Some(history) = self.format.history_dir(dir) else {
            warn!(
                dir = %dir.display(),
                site = self.format.site_name(),
                "history directory rejected"
            );
            return None;
        };
        let entries = match std::fs::read_dir(&history) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %history.display(), error = %e, "history directory unreadable");
                return None;
            }
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.format.is_eligible_file(path))
            .collect();
        files.sort();
        Some(files)
    }

    /// Loads every eligible file of `dir` into one site. Never fails: a
    /// rejected directory or a broken file shows up in the log and as
    /// missing content.
    ///
    /// Blocks the calling thread until every task is collected. From async
    /// code, run it through `tokio::task::spawn_blocking`.
    pub fn load_directory(&self, dir: &Path, progress: Arc<dyn LoadProgress>) -> Site {
        self.stopped.store(false, Ordering::SeqCst);
        let site_name = self.format.site_name();
        let mut site = Site::new(site_name);

        let files = match self.eligible_files(dir) {
            Some(files) if !files.is_empty() => files,
            Some(_) => {
                info!(dir = %dir.display(), "no history files found");
                progress.on_done();
                return site;
            }
            None => {
                progress.on_done();
                return site;
            }
        };

        let pool = match self.pool.map_or_else(pool::global, Ok) {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "cannot load histories");
                progress.on_done();
                return site;
            }
        };

        info!(dir = %dir.display(), files = files.len(), site = site_name, "loading histories");
        progress.on_file_count_known(files.len());

        let batch = PlayerCache::new(site_name);
        self.dispatch(pool, &files, &progress);
        let merged = self.collect(&mut site, &batch);

        let players = batch.drain_into(&mut site);
        info!(
            games = merged,
            hands = site.hand_count(),
            players,
            stopped = self.is_stopped(),
            "histories loaded"
        );
        progress.on_done();
        site
    }

    fn dispatch(
        &self,
        pool: &ThreadPool,
        files: &[PathBuf],
        progress: &Arc<dyn LoadProgress>,
    ) {
        let mut table = self.task_table();
        table.clear();
        for path in files {
            if self.is_stopped() {
                table.push(None);
                continue;
            }
            let format = Arc::clone(&self.format);
            let stopped = Arc::clone(&self.stopped);
            let progress = Arc::clone(progress);
            let path = path.clone();
            table.push(Some(pool.submit(move || {
                let site = parse_into_site(format.as_ref(), &path);
                if !stopped.load(Ordering::SeqCst) {
                    progress.on_file_processed();
                }
                site
            })));
        }
    }

    /// Awaits the tasks in submission order and merges their sites. Slots
    /// emptied by [`stop_loading`](Self::stop_loading) are skipped, and
    /// nothing is merged once the stop flag is up. A task stays in its slot
    /// until it is finished, so a concurrent stop sees it as outstanding.
    fn collect(&self, site: &mut Site, batch: &PlayerCache) -> usize {
        let count = self.task_table().len();
        let mut merged = 0;
        for index in 0..count {
            let Some(task) = self.take_when_ready(index) else {
                continue;
            };
            let Some(Some(mut file_site)) = task.wait() else {
                continue;
            };
            if self.is_stopped() {
                continue;
            }
            let players = file_site.take_players();
            match site.merge(file_site) {
                Ok(()) => {
                    batch.absorb(players);
                    merged += 1;
                }
                Err(e) => error!(error = %e, "site merge failed"),
            }
        }
        self.task_table().clear();
        merged
    }

    /// Polls slot `index` until its task finishes, then takes it. `None`
    /// when the slot is empty or was emptied by a stop.
    fn take_when_ready(&self, index: usize) -> Option<FileTask> {
        loop {
            {
                let mut table = self.task_table();
                let ready = table.get(index)?.as_ref().map(TaskHandle::is_ready)?;
                if ready {
                    return table[index].take();
                }
            }
            std::thread::sleep(DRAIN_POLL_INTERVAL);
        }
    }

    /// Raises the stop flag, then waits for every outstanding task to finish,
    /// dropping results as they complete. Running parses are not interrupted.
    pub fn stop_loading(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        loop {
            let outstanding = {
                let mut table = self.task_table();
                for slot in table.iter_mut() {
                    if slot.as_ref().is_some_and(TaskHandle::is_ready) {
                        *slot = None;
                    }
                }
                table.iter().filter(|slot| slot.is_some()).count()
            };
            if outstanding == 0 {
                break;
            }
            debug!(outstanding, "waiting for loader tasks");
            std::thread::sleep(DRAIN_POLL_INTERVAL);
        }
    }

    /// Re-parses one file outside the pool. Returns `None` when the file
    /// yields no game.
    pub fn load_file(&self, path: &Path) -> Option<Site> {
        parse_into_site(self.format.as_ref(), path)
    }
}

/// Parses one file into a site holding its game and its players. Parse
/// failures are logged with the file name and turn into `None`, dropping
/// every player the file had registered.
fn parse_into_site<F: HistoryFormat + ?Sized>(format: &F, path: &Path) -> Option<Site> {
    let cache = PlayerCache::new(format.site_name());
    match format.parse_file(path, &cache) {
        Ok(Some(game)) => {
            debug!(file = %path.display(), hands = game.hand_count(), "file parsed");
            let mut site = Site::new(format.site_name());
            site.add_game(game);
            cache.drain_into(&mut site);
            Some(site)
        }
        Ok(None) => {
            debug!(file = %path.display(), "file produced no game");
            None
        }
        Err(e) => {
            error!(file = %path.display(), error = %e, "failed to parse history file");
            None
        }
    }
}
