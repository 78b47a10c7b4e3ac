// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{APP_ID, Config};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "anaconda-mountpoints.log";
const RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn env_filter(config: &Config) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    // Keep our crates at the configured level, and zbus chatter at warn.
    let level = config.log_level.as_directive();
    Ok(EnvFilter::try_new(format!(
        "warn,anaconda_mountpoints={level},mountpoint_editor={level},mountpoint_contracts={level},zbus=warn"
    ))?)
}

/// Log to stderr, and to a daily rolling file when `log_to_disk` is set.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let env_filter = env_filter(config)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if !config.log_to_disk {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .try_init()?;
        return Ok(());
    }

    match file_writer(&log_dir(config)) {
        Ok((writer, guard)) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;

            // Keep the background logging worker alive for the duration of the process.
            let _ = LOG_GUARD.set(guard);
        }
        Err(e) => {
            eprintln!("{APP_ID}: failed to initialize file logging: {e:#}");
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .try_init()?;
        }
    }

    Ok(())
}

fn file_writer(dir: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    prune_logs(dir, SystemTime::now());

    let appender = tracing_appender::rolling::daily(dir, LOG_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

/// `log-dir` from the config, else the XDG state directory.
///
/// The installer image runs as root without a state directory, so the
/// temporary directory is the last resort.
pub fn log_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".local/state")))
        .map(|state| state.join(APP_ID))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_ID))
}

fn is_stale(entry: &fs::DirEntry, cutoff: SystemTime) -> bool {
    entry.file_name().to_string_lossy().starts_with(LOG_PREFIX)
        && entry
            .metadata()
            .ok()
            .filter(fs::Metadata::is_file)
            .and_then(|metadata| metadata.modified().ok())
            .is_some_and(|modified| modified < cutoff)
}

/// Delete rolled log files last written more than [`RETENTION`] before `now`.
fn prune_logs(dir: &Path, now: SystemTime) {
    let Some(cutoff) = now.checked_sub(RETENTION) else {
        return;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten().filter(|entry| is_stale(entry, cutoff)) {
        let _ = fs::remove_file(entry.path());
    }
}
