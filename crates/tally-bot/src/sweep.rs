//! Background retention sweep
//!
//! Runs independently of the dispatch loop on its own timer, sharing only
//! the database. Every run is one transactional purge; failures are logged
//! and retried on the next tick, never terminating the task.
//!
//! Configuration via environment variables:
//!
//! - `TALLY_SWEEP_SCHEDULE`: Interval in hours (e.g., "24" for daily)
//! - `TALLY_RETENTION_DAYS`: Soft-deletion retention window (default: 30)

use std::time::Duration;

use tokio::time::interval;
use tracing::{error, info, warn};

use tally_core::{Database, DEFAULT_RETENTION_DAYS};

/// Configuration for the retention sweep
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Interval between sweeps in hours
    pub interval_hours: u64,
    /// Days a soft-deleted category survives before hard deletion
    pub retention_days: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_hours: 24,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl SweepConfig {
    /// Parse configuration from environment variables
    ///
    /// Returns None if sweeping is not configured (TALLY_SWEEP_SCHEDULE not
    /// set or zero).
    pub fn from_env() -> Option<Self> {
        let interval_hours: u64 = std::env::var("TALLY_SWEEP_SCHEDULE")
            .ok()
            .and_then(|s| s.parse().ok())?;

        if interval_hours == 0 {
            warn!("TALLY_SWEEP_SCHEDULE is 0, retention sweep disabled");
            return None;
        }

        let retention_days = std::env::var("TALLY_RETENTION_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RETENTION_DAYS);

        Some(Self {
            interval_hours,
            retention_days,
        })
    }
}

/// Start the retention sweeper as a background task
///
/// Spawns a tokio task that runs indefinitely, purging expired soft-deleted
/// categories at the configured interval.
pub fn start_retention_sweeper(db: Database, config: SweepConfig) {
    info!(
        "Starting retention sweeper: every {} hours, {} day retention",
        config.interval_hours, config.retention_days
    );

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(config.interval_hours * 3600));

        // Skip the first immediate tick - we don't want to sweep on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match db.purge_deleted_categories(config.retention_days) {
                Ok(result) if result.is_empty() => {
                    info!("Retention sweep completed: nothing to purge");
                }
                Ok(result) => {
                    info!(
                        "Retention sweep completed: {} expenses, {} categories removed",
                        result.expenses_deleted, result.categories_deleted
                    );
                }
                Err(e) => {
                    error!("Retention sweep failed (will retry next tick): {}", e);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_not_set() {
        // When TALLY_SWEEP_SCHEDULE is not set, should return None
        std::env::remove_var("TALLY_SWEEP_SCHEDULE");
        assert!(SweepConfig::from_env().is_none());
    }

    #[test]
    fn test_config_from_env_zero() {
        // When TALLY_SWEEP_SCHEDULE is 0, should return None
        std::env::set_var("TALLY_SWEEP_SCHEDULE", "0");
        assert!(SweepConfig::from_env().is_none());
        std::env::remove_var("TALLY_SWEEP_SCHEDULE");
    }

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.interval_hours, 24);
        assert_eq!(config.retention_days, 30);
    }
}
