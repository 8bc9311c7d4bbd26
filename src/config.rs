//! Process-level settings read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HOST` | `0.0.0.0` | bind address |
//! | `PORT` | `5000` | listening port |
//! | `CONVERGENCE_CHECK` | `feasible` | `feasible` or `non-empty` |
//! | `POPULATION_SIZE` | `50` | candidates per generation |
//! | `GENERATION_COUNT` | `40` | generation budget per request |
//! | `SEED` | `1` | seed of every run |
//!
//! Invalid values are logged and replaced by the default.

use crate::steel::{ConvergenceCheck, RunConfig};
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Settings of the HTTP process.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub convergence: ConvergenceCheck,

    /// Run settings applied to every request before the request's own fields.
    pub run_defaults: RunConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            convergence: ConvergenceCheck::default(),
            run_defaults: RunConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which returns the raw value of a
    /// variable if set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let run = defaults.run_defaults.clone();

        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let port = parse_or("PORT", &lookup, defaults.port, |p: &u16| *p > 0);
        let convergence = parse_or("CONVERGENCE_CHECK", &lookup, defaults.convergence, |_| true);
        let population_size = parse_or("POPULATION_SIZE", &lookup, run.population_size, |n| *n >= 2);
        let generation_count = parse_or("GENERATION_COUNT", &lookup, run.generation_count, |n| *n >= 1);
        let seed = parse_or("SEED", &lookup, run.seed, |_| true);

        Self {
            host,
            port,
            convergence,
            run_defaults: run
                .with_population_size(population_size)
                .with_generation_count(generation_count)
                .with_seed(seed),
        }
    }
}

fn parse_or<T, F, V>(key: &str, lookup: &F, default: T, valid: V) -> T
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
    V: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        Ok(value) => {
            warn!("{key}={value} is out of range; using default {default}");
            default
        }
        Err(err) => {
            warn!("{key}='{raw}' is invalid ({err}); using default {default}");
            default
        }
    }
}
