//! Daily backup of the SQLite storage file.
//!
//! [`BackupScheduler`] wakes on a short tick and, once the configured
//! interval has elapsed since its last attempt, copies the database file to
//! `<backup_dir>/<prefix>_<DD_MM_YYYY>.<ext>`. At most one backup exists per
//! calendar day (display zone): an existing file for today turns the attempt
//! into a no-op. Failures are logged and retried on the next interval.

use std::fs::FileTimes;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use qabank_core::timestamp::today_in_display_zone;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::env_parse;

/// Default time between backup attempts: 24 hours.
const DEFAULT_INTERVAL_SECS: u64 = 24 * 3600;

/// Default wake-up period of the scheduler loop.
const DEFAULT_TICK_SECS: u64 = 60;

/// Lower bound for the tick; `tokio::time::interval` rejects a zero period.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Where and how often the storage file is backed up.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// The live database file.
    pub source_path: PathBuf,
    /// Directory backups are written to (created on demand).
    pub backup_dir: PathBuf,
    /// Filename prefix, e.g. `qa` in `qa_05_03_2025.db`.
    pub name_prefix: String,
    /// Filename extension without the dot.
    pub extension: String,
    /// Minimum time between two backup attempts.
    pub interval: Duration,
    /// How often the loop wakes up to check whether a backup is due.
    pub tick: Duration,
}

impl BackupConfig {
    /// Load backup settings from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `BACKUP_DIR`           | `backups` |
    /// | `BACKUP_PREFIX`        | `qa`      |
    /// | `BACKUP_EXTENSION`     | `db`      |
    /// | `BACKUP_INTERVAL_SECS` | `86400`   |
    /// | `BACKUP_TICK_SECS`     | `60`      |
    pub fn from_env(source_path: PathBuf) -> Self {
        Self {
            source_path,
            backup_dir: PathBuf::from(
                std::env::var("BACKUP_DIR").unwrap_or_else(|_| "backups".into()),
            ),
            name_prefix: std::env::var("BACKUP_PREFIX").unwrap_or_else(|_| "qa".into()),
            extension: std::env::var("BACKUP_EXTENSION").unwrap_or_else(|_| "db".into()),
            interval: Duration::from_secs(env_parse("BACKUP_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)),
            tick: Duration::from_secs(env_parse("BACKUP_TICK_SECS", DEFAULT_TICK_SECS)),
        }
    }

    /// Backup file path for the given calendar day.
    pub fn target_path(&self, date: NaiveDate) -> PathBuf {
        self.backup_dir.join(format!(
            "{}_{}.{}",
            self.name_prefix,
            date.format("%d_%m_%Y"),
            self.extension
        ))
    }
}

/// Result of a single backup attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new backup file was written.
    Created(PathBuf),
    /// Today's backup already existed; nothing was written.
    AlreadyExists(PathBuf),
    /// The storage file does not exist yet; nothing was written.
    SourceMissing,
}

/// Background service that copies the storage file once per interval.
pub struct BackupScheduler {
    config: BackupConfig,
    last_run: Instant,
}

impl BackupScheduler {
    /// Create a scheduler. The first attempt happens one full interval
    /// after construction.
    pub fn new(config: BackupConfig) -> Self {
        Self {
            config,
            last_run: Instant::now(),
        }
    }

    /// Whether the interval has elapsed since the last attempt.
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_run) >= self.config.interval
    }

    /// Run the scheduler loop until `cancel` fires.
    ///
    /// Errors from individual attempts are logged and never end the loop.
    pub async fn run(mut self, cancel: CancellationToken) {
        let tick = self.config.tick.max(MIN_TICK);

        tracing::info!(
            source = %self.config.source_path.display(),
            backup_dir = %self.config.backup_dir.display(),
            interval_secs = self.config.interval.as_secs(),
            tick_secs = tick.as_secs(),
            "Backup scheduler started"
        );

        let mut ticker = tokio::time::interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Backup scheduler stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    if !self.is_due(now) {
                        continue;
                    }
                    self.last_run = now;

                    if let Err(e) = self.backup_once().await {
                        tracing::error!(error = %e, "Backup failed, retrying next interval");
                    }
                }
            }
        }
    }

    /// Back up the storage file for today's date.
    pub async fn backup_once(&self) -> io::Result<BackupOutcome> {
        self.backup_for_date(today_in_display_zone()).await
    }

    /// Back up the storage file under the name for `date`.
    pub async fn backup_for_date(&self, date: NaiveDate) -> io::Result<BackupOutcome> {
        let source = &self.config.source_path;
        let target = self.config.target_path(date);

        if !tokio::fs::try_exists(source).await? {
            tracing::warn!(
                source = %source.display(),
                "Database file not found, skipping backup"
            );
            return Ok(BackupOutcome::SourceMissing);
        }

        if tokio::fs::try_exists(&target).await? {
            tracing::info!(path = %target.display(), "Backup for today already exists");
            return Ok(BackupOutcome::AlreadyExists(target));
        }

        tokio::fs::create_dir_all(&self.config.backup_dir).await?;

        // A failed copy must never leave a file under today's name.
        let partial = target.with_extension(format!("{}.partial", self.config.extension));
        if let Err(e) = copy_preserving_times(source, &partial).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }
        tokio::fs::rename(&partial, &target).await?;

        tracing::info!(path = %target.display(), "Backup created");

        Ok(BackupOutcome::Created(target))
    }
}

/// Byte-for-byte copy that also carries over permissions and the
/// access/modification times of `source`.
async fn copy_preserving_times(source: &Path, target: &Path) -> io::Result<()> {
    tokio::fs::copy(source, target).await?;

    let meta = tokio::fs::metadata(source).await?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }

    let file = tokio::fs::OpenOptions::new()
        .write(true)
        .open(target)
        .await?
        .into_std()
        .await;
    file.set_times(times)
}
