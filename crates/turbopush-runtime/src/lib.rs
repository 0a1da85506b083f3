#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod config;
mod error;
mod launcher;
mod platform;
mod resolver;
mod shutdown;
mod stream;
mod types;

// ============================================================================
// Public API
// ============================================================================

// Launcher
pub use launcher::ServiceLauncher;

// Configuration
pub use config::LauncherConfig;

// Platform identification
pub use platform::{CpuArch, HostInfo, OsFamily, PlatformKey};

// Binary resolution
pub use resolver::{Resolution, candidate_names, resolve};

// Graceful child shutdown, usable on its own
pub use shutdown::shutdown_child;

// Lifecycle types
pub use types::{LaunchState, ServiceConfig};

// Errors
pub use error::{LaunchError, LaunchResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
