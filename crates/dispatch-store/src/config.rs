use std::env;
use std::time::Duration;

use dispatch_types::domain::bucket::Bucket;

/// Per-bucket polling cadence. `None` means the bucket is fetched on
/// demand only. Defaults match the dashboard screens: incoming 2s,
/// accepted 1s, in-progress 3s, completed untimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollIntervals {
    pub incoming: Option<Duration>,
    pub accepted: Option<Duration>,
    pub in_progress: Option<Duration>,
    pub completed: Option<Duration>,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            incoming: Some(Duration::from_secs(2)),
            accepted: Some(Duration::from_secs(1)),
            in_progress: Some(Duration::from_secs(3)),
            completed: None,
        }
    }
}

impl PollIntervals {
    pub fn for_bucket(&self, bucket: Bucket) -> Option<Duration> {
        match bucket {
            Bucket::Incoming => self.incoming,
            Bucket::Accepted => self.accepted,
            Bucket::InProgress => self.in_progress,
            Bucket::Completed => self.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
    pub poll: PollIntervals,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            env::var("DISPATCH_BASE_URL").unwrap_or_else(|_| "http://localhost:9056".into());
        let request_timeout = env_millis("DISPATCH_REQUEST_TIMEOUT_MS")
            .flatten()
            .unwrap_or(Duration::from_secs(5));
        let defaults = PollIntervals::default();
        let poll = PollIntervals {
            incoming: env_millis("DISPATCH_POLL_INCOMING_MS").unwrap_or(defaults.incoming),
            accepted: env_millis("DISPATCH_POLL_ACCEPTED_MS").unwrap_or(defaults.accepted),
            in_progress: env_millis("DISPATCH_POLL_IN_PROGRESS_MS").unwrap_or(defaults.in_progress),
            completed: env_millis("DISPATCH_POLL_COMPLETED_MS").unwrap_or(defaults.completed),
        };
        Ok(Self {
            base_url,
            request_timeout,
            poll,
        })
    }
}

/// Outer `None` = variable unset (use the default); inner `None` = set to
/// 0 or unparseable (polling disabled).
fn env_millis(key: &str) -> Option<Option<Duration>> {
    let raw = env::var(key).ok()?;
    Some(
        raw.parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis),
    )
}
