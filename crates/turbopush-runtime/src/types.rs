//! Shared types for service lifecycle management.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Parsed startup handshake the binary prints on stdout once it is ready.
///
/// `pid` and `port` are required; a JSON line missing either is treated as
/// diagnostic noise, not a handshake. Binary-specific fields we do not
/// model land in `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Process ID the binary reports for itself
    pub pid: i64,
    /// TCP port the local API is listening on
    pub port: u16,
    /// Bearer token when the binary is already authenticated
    #[serde(default)]
    pub auth: Option<String>,
    /// Whether a user session is active
    #[serde(default)]
    pub login: bool,
    /// The binary's data/config directory
    #[serde(default)]
    pub home: PathBuf,
    /// Path to the bundled browser component
    #[serde(default)]
    pub chrome: PathBuf,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle state of a [`crate::ServiceLauncher`].
///
/// `Ready` is entered at most once, on the first successful handshake
/// parse. The failure states are terminal for a launch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    NotStarted,
    Starting,
    Ready,
    Stopped,
    FailedToStart,
    StartTimedOut,
}
