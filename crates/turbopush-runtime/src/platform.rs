//! Host platform identification.
//!
//! The raw OS/architecture strings are interpreted exactly once, here.
//! Everything downstream (the resolver in particular) operates on the
//! closed [`PlatformKey`] type instead of ad hoc string checks.

use std::fmt;
use std::path::PathBuf;

/// Operating system family the binary ships variants for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    /// Anything else; gets the generic binary name
    Other,
}

/// CPU architecture the binary ships variants for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuArch {
    Arm64,
    X86_64,
    /// Anything else; architecture-specific names are skipped
    Other,
}

/// Normalized (OS, architecture) pair used to select binary candidates.
///
/// Derived once at startup and immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    pub os: OsFamily,
    pub arch: CpuArch,
}

impl PlatformKey {
    /// Build a key explicitly (useful in tests).
    #[must_use]
    pub const fn new(os: OsFamily, arch: CpuArch) -> Self {
        Self { os, arch }
    }

    /// The key for the machine we are running on.
    #[must_use]
    pub fn host() -> Self {
        let os = match std::env::consts::OS {
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::MacOs,
            "linux" => OsFamily::Linux,
            _ => OsFamily::Other,
        };
        let arch = match std::env::consts::ARCH {
            "aarch64" => CpuArch::Arm64,
            "x86_64" => CpuArch::X86_64,
            _ => CpuArch::Other,
        };
        Self { os, arch }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for CpuArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arm64 => "arm64",
            Self::X86_64 => "x86_64",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Diagnostic snapshot of the host environment for CLI output.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub platform: PlatformKey,
    pub os: &'static str,
    pub arch: &'static str,
    pub working_dir: Option<PathBuf>,
    pub version: &'static str,
}

impl HostInfo {
    /// Gather the current host's details.
    #[must_use]
    pub fn gather() -> Self {
        Self {
            platform: PlatformKey::host(),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            working_dir: std::env::current_dir().ok(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
