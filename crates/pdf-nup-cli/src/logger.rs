use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

/// Stderr logger that also keeps the most recent entries for the end-of-job summary
#[derive(Clone)]
pub struct CliLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    /// Records seen per level since startup, indexed by `level as usize - 1`
    totals: Arc<[AtomicUsize; 5]>,
    max_entries: usize,
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(max_entries: usize, level: LevelFilter) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            totals: Arc::new(Default::default()),
            max_entries,
            level,
        }
    }

    /// Level filter for `-v` repetitions: warnings by default, then info, then debug
    pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn entries(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records logged at exactly `level` since startup, including ones no longer retained
    pub fn total(&self, level: Level) -> usize {
        self.totals[level as usize - 1].load(Ordering::Relaxed)
    }

    pub fn latest_message(&self, level: Level) -> Option<String> {
        self.entries()
            .iter()
            .rev()
            .find(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = LogEntry {
                timestamp: Local::now(),
                level: record.level(),
                message: format!("{}", record.args()),
            };
            eprintln!(
                "{} {:<5} {}",
                entry.timestamp.format("%H:%M:%S%.3f"),
                entry.level,
                entry.message
            );

            self.totals[entry.level as usize - 1].fetch_add(1, Ordering::Relaxed);
            let mut entries = self.entries();
            entries.push(entry);

            // Keep only the most recent entries
            if entries.len() > self.max_entries {
                let excess = entries.len() - self.max_entries;
                entries.drain(0..excess);
            }
        }
    }

    fn flush(&self) {}
}
