//! Launcher tuning knobs.

use std::time::Duration;

/// Configuration for a [`crate::ServiceLauncher`].
///
/// The defaults match the service contract (10 s startup deadline, 5 s
/// stop grace); tests shrink them via the builder methods.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Total time to wait for the startup handshake
    pub(crate) startup_deadline: Duration,
    /// Pause between readiness polls
    pub(crate) poll_interval: Duration,
    /// Time between SIGTERM and SIGKILL on stop
    pub(crate) stop_grace: Duration,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            startup_deadline: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
            stop_grace: Duration::from_secs(5),
        }
    }
}

impl LauncherConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total startup deadline.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_startup_deadline(mut self, deadline: Duration) -> Self {
        self.startup_deadline = deadline;
        self
    }

    /// Set the pause between readiness polls.
    ///
    /// Defaults to 100 milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the grace period before SIGTERM escalates to SIGKILL.
    ///
    /// Defaults to 5 seconds.
    #[must_use]
    pub const fn with_stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LauncherConfig::new();
        assert_eq!(config.startup_deadline, Duration::from_secs(10));
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.stop_grace, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = LauncherConfig::new()
            .with_startup_deadline(Duration::from_millis(300))
            .with_poll_interval(Duration::from_millis(10))
            .with_stop_grace(Duration::from_millis(50));
        assert_eq!(config.startup_deadline, Duration::from_millis(300));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.stop_grace, Duration::from_millis(50));
    }
}
