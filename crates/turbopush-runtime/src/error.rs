//! Error types for service launch operations.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for launch operations.
pub type LaunchResult<T> = Result<T, LaunchError>;

/// Errors that can occur while starting or using the Turbo Push service.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Child process exited before announcing readiness.
    #[error("Turbo Push service failed to start: {stderr}")]
    LaunchFailure {
        /// Captured standard-error output of the dead child
        stderr: String,
    },

    /// No valid handshake arrived within the startup deadline.
    #[error("Turbo Push service did not become ready within {waited:?}")]
    LaunchTimeout {
        /// How long we waited
        waited: Duration,
    },

    /// A client was requested before a successful `start()`.
    #[error("service not started; call start() before requesting a client")]
    NotReady,

    /// Spawning or talking to the child process failed at the OS level.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_failure_carries_stderr() {
        let error = LaunchError::LaunchFailure {
            stderr: "bind: address already in use".to_string(),
        };
        assert!(error.to_string().contains("address already in use"));
    }

    #[test]
    fn test_timeout_mentions_duration() {
        let error = LaunchError::LaunchTimeout {
            waited: Duration::from_secs(10),
        };
        assert!(error.to_string().contains("10s"));
    }
}
