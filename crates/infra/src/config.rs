use std::{fmt::Display, str::FromStr};
use tally_reminders_utils::create_random_secret;
use tracing::{info, warn};

/// Longest allowed tick cadence. Anything coarser could step over a whole
/// eligibility window (±5 minutes) without observing it.
pub const MAX_TICK_INTERVAL_SECS: u64 = 5 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between two dispatch ticks of the in-process job scheduler
    pub tick_interval_secs: u64,
    /// Upper bound for a single transport call. A slow push service only
    /// delays the completion of the tick, never the other recipients.
    pub transport_timeout_millis: u64,
    /// Forwarded as the `TTL` header to the push gateway
    pub push_ttl_secs: u64,
    /// Optional bearer key for the push gateway
    pub push_gateway_key: Option<String>,
    /// Secret that an external scheduler must present to trigger a tick
    pub cron_secret: String,
    /// Remove subscriptions that the push service reported as expired
    pub prune_expired_subscriptions: bool,
    /// Run the dispatch tick in process. Turn off when an external
    /// scheduler calls the tick endpoint instead.
    pub job_schedulers_enabled: bool,
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(val) => val,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let cron_secret = match std::env::var("CRON_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                info!("Did not find CRON_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(24);
                info!("Secret for triggering dispatch ticks was generated and set to: {}", secret);
                secret
            }
        };

        let mut tick_interval_secs = parse_env("TICK_INTERVAL_SECS", 60u64);
        if tick_interval_secs == 0 || tick_interval_secs > MAX_TICK_INTERVAL_SECS {
            warn!(
                "TICK_INTERVAL_SECS: {} must be between 1 and {}, using {}.",
                tick_interval_secs, MAX_TICK_INTERVAL_SECS, MAX_TICK_INTERVAL_SECS
            );
            tick_interval_secs = MAX_TICK_INTERVAL_SECS;
        }

        Self {
            port: parse_env("PORT", 5000usize),
            tick_interval_secs,
            transport_timeout_millis: parse_env("TRANSPORT_TIMEOUT_MILLIS", 10_000u64),
            push_ttl_secs: parse_env("PUSH_TTL_SECS", 60 * 60 * 24u64),
            push_gateway_key: std::env::var("PUSH_GATEWAY_KEY").ok().filter(|k| !k.is_empty()),
            cron_secret,
            prune_expired_subscriptions: parse_env("PRUNE_EXPIRED_SUBSCRIPTIONS", true),
            job_schedulers_enabled: std::env::var("DISABLE_JOB_SCHEDULERS").is_err(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
