use std::str::FromStr;
use std::time::Duration;

use crate::clock::Clock;
use crate::error::{AppError, Result};

const DEFAULT_LAST_PLAYED_COUNT: usize = 4;
const DEFAULT_LONGEST_COUNT: usize = 3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub phishin_token: String,
    pub phishnet_token: String,
    pub clock: Clock,
    pub last_played_count: usize,
    pub longest_count: usize,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing tokens become empty strings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let clock = match lookup("BOT_TIMEZONE") {
            Some(value) => value.parse()?,
            None => Clock::default(),
        };

        let last_played_count =
            parse_or(&lookup, "LAST_PLAYED_COUNT", DEFAULT_LAST_PLAYED_COUNT)?;
        let longest_count = parse_or(&lookup, "LONGEST_COUNT", DEFAULT_LONGEST_COUNT)?;
        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        if last_played_count == 0 || longest_count == 0 {
            return Err(AppError::Config(
                "LAST_PLAYED_COUNT and LONGEST_COUNT must be at least 1".into(),
            ));
        }

        Ok(Self {
            discord_token: token("DISCORD_TOKEN"),
            phishin_token: token("PHISHIN_TOKEN"),
            phishnet_token: token("PHISHNET_TOKEN"),
            clock,
            last_played_count,
            longest_count,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Settings needed to answer commands at all.
    pub fn missing_for_queries(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.phishin_token.is_empty() {
            missing.push("PHISHIN_TOKEN".to_string());
        }
        if self.phishnet_token.is_empty() {
            missing.push("PHISHNET_TOKEN".to_string());
        }

        missing
    }

    /// Settings needed to connect to Discord and answer commands.
    pub fn missing_for_bot(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.discord_token.is_empty() {
            missing.push("DISCORD_TOKEN".to_string());
        }
        missing.extend(self.missing_for_queries());

        missing
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", key, value))),
        _ => Ok(default),
    }
}
