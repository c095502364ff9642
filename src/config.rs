//! Environment configuration.
//!
//! Every setting comes from a `JARVIS_*` variable; a `.env` file in the
//! working directory is loaded first if present.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{FixedOffset, Local, Offset};

use crate::scheduler::{
    SchedulerConfig, DEFAULT_GRACE, DEFAULT_NOTIFY_TIMEOUT, DEFAULT_POLL_INTERVAL,
};

/// Default store directory.
pub const DEFAULT_STORE: &str = ".jarvis";
/// Default log filter.
pub const DEFAULT_LOG: &str = "warn";

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `tasks.yaml` and `notebook.yaml`.
    pub store: PathBuf,
    /// Secondary store directory used while the primary fails. Defaults to
    /// `<store>.fallback`.
    pub fallback_store: PathBuf,
    /// Scheduler timing.
    pub scheduler: SchedulerConfig,
    /// Offset used to read and print clock times.
    pub utc_offset: FixedOffset,
    /// Extra program run for each reminder.
    pub notify_command: Option<String>,
    /// `env_logger` filter.
    pub log: String,
}

impl Config {
    /// Loads `.env` if present and reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if any value is invalid.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if any value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let poll = seconds(get("JARVIS_POLL_SECS"), "JARVIS_POLL_SECS", DEFAULT_POLL_INTERVAL)?;
        if poll.is_zero() {
            return Err("JARVIS_POLL_SECS must be at least 1".to_string());
        }
        let scheduler = SchedulerConfig {
            poll_interval: poll,
            grace: seconds(get("JARVIS_GRACE_SECS"), "JARVIS_GRACE_SECS", DEFAULT_GRACE)?,
            notify_timeout: seconds(
                get("JARVIS_NOTIFY_TIMEOUT_SECS"),
                "JARVIS_NOTIFY_TIMEOUT_SECS",
                DEFAULT_NOTIFY_TIMEOUT,
            )?,
        };

        let utc_offset = match get("JARVIS_UTC_OFFSET") {
            Some(raw) => parse_offset(&raw)
                .ok_or_else(|| format!("JARVIS_UTC_OFFSET must look like +05:30, got {raw:?}"))?,
            None => Local::now().offset().fix(),
        };

        let store = get("JARVIS_STORE").map_or_else(|| PathBuf::from(DEFAULT_STORE), PathBuf::from);
        let fallback_store =
            get("JARVIS_FALLBACK_STORE").map_or_else(|| fallback_for(&store), PathBuf::from);

        Ok(Self {
            store,
            fallback_store,
            scheduler,
            utc_offset,
            notify_command: get("JARVIS_NOTIFY_COMMAND"),
            log: get("JARVIS_LOG").unwrap_or_else(|| DEFAULT_LOG.to_string()),
        })
    }
}

/// Sibling of `store` named `<store>.fallback`.
fn fallback_for(store: &Path) -> PathBuf {
    let mut path = store.components().as_path().as_os_str().to_owned();
    path.push(".fallback");
    PathBuf::from(path)
}

fn seconds(raw: Option<String>, name: &str, default: Duration) -> Result<Duration, String> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| format!("{name} must be a whole number of seconds, got {raw:?}")),
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM`, `+HH` or `Z`.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
