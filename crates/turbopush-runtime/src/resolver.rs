//! On-disk binary resolution.
//!
//! The Turbo Push binary has shipped under several historical and synonym
//! names per platform. Resolution is a pure function of the search
//! directory and the [`PlatformKey`]: it tries a fixed, ranked candidate
//! list and never fails — when nothing matches it degrades to the
//! most-preferred name as a best guess so callers always get a
//! deterministic path to attempt.

use crate::platform::{CpuArch, OsFamily, PlatformKey};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ranked executable-name candidates for a platform, most preferred first.
///
/// Never empty; the last-resort platforms still get the generic name.
#[must_use]
pub const fn candidate_names(key: PlatformKey) -> &'static [&'static str] {
    match (key.os, key.arch) {
        (OsFamily::Windows, _) => &[
            "turbo_push.exe",
            "turbo_push_windows.exe",
            "turbo_push_win.exe",
        ],
        (OsFamily::MacOs, CpuArch::Arm64) => &[
            "turbo_push",
            "turbo_push_arm64",
            "turbo_push_apple_silicon",
            "turbo_push_m1",
            "turbo_push_mac",
        ],
        (OsFamily::MacOs, _) => &[
            "turbo_push",
            "turbo_push_intel",
            "turbo_push_x86_64",
            "turbo_push_mac_intel",
            "turbo_push_mac",
        ],
        (OsFamily::Linux, CpuArch::Arm64) => {
            &["turbo_push", "turbo_push_linux_arm64", "turbo_push_linux"]
        }
        (OsFamily::Linux, _) => &["turbo_push", "turbo_push_linux_amd64", "turbo_push_linux"],
        (OsFamily::Other, _) => &["turbo_push"],
    }
}

/// Outcome of binary resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Path to hand to the launcher
    pub path: PathBuf,
    /// False when no candidate existed and `path` is the best guess;
    /// callers typically log that as a warning
    pub found: bool,
}

impl Resolution {
    /// Whether this is the no-match best-guess default.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        !self.found
    }
}

/// Pick the binary to launch from `search_dir` for the given platform.
///
/// Returns the highest-priority candidate that exists on disk, or the join
/// of `search_dir` with the most-preferred name when none do. Read-only:
/// the only side effect is filesystem existence checks.
pub fn resolve(search_dir: &Path, key: PlatformKey) -> Resolution {
    let candidates = candidate_names(key);

    for name in candidates {
        let path = search_dir.join(name);
        if path.exists() {
            debug!(path = %path.display(), platform = %key, "found Turbo Push binary");
            return Resolution { path, found: true };
        }
    }

    let path = search_dir.join(candidates[0]);
    debug!(
        path = %path.display(),
        platform = %key,
        "no Turbo Push binary found, falling back to preferred name"
    );
    Resolution { path, found: false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    const ALL_KEYS: [PlatformKey; 12] = [
        PlatformKey::new(OsFamily::Windows, CpuArch::Arm64),
        PlatformKey::new(OsFamily::Windows, CpuArch::X86_64),
        PlatformKey::new(OsFamily::Windows, CpuArch::Other),
        PlatformKey::new(OsFamily::MacOs, CpuArch::Arm64),
        PlatformKey::new(OsFamily::MacOs, CpuArch::X86_64),
        PlatformKey::new(OsFamily::MacOs, CpuArch::Other),
        PlatformKey::new(OsFamily::Linux, CpuArch::Arm64),
        PlatformKey::new(OsFamily::Linux, CpuArch::X86_64),
        PlatformKey::new(OsFamily::Linux, CpuArch::Other),
        PlatformKey::new(OsFamily::Other, CpuArch::Arm64),
        PlatformKey::new(OsFamily::Other, CpuArch::X86_64),
        PlatformKey::new(OsFamily::Other, CpuArch::Other),
    ];

    #[test]
    fn test_candidate_lists_never_empty() {
        for key in ALL_KEYS {
            assert!(!candidate_names(key).is_empty(), "empty list for {key}");
        }
    }

    #[test]
    fn test_candidate_table_matches_policy() {
        assert_eq!(
            candidate_names(PlatformKey::new(OsFamily::Windows, CpuArch::X86_64)),
            &[
                "turbo_push.exe",
                "turbo_push_windows.exe",
                "turbo_push_win.exe"
            ]
        );
        assert_eq!(
            candidate_names(PlatformKey::new(OsFamily::MacOs, CpuArch::Arm64)),
            &[
                "turbo_push",
                "turbo_push_arm64",
                "turbo_push_apple_silicon",
                "turbo_push_m1",
                "turbo_push_mac"
            ]
        );
        assert_eq!(
            candidate_names(PlatformKey::new(OsFamily::MacOs, CpuArch::X86_64)),
            &[
                "turbo_push",
                "turbo_push_intel",
                "turbo_push_x86_64",
                "turbo_push_mac_intel",
                "turbo_push_mac"
            ]
        );
        assert_eq!(
            candidate_names(PlatformKey::new(OsFamily::Linux, CpuArch::Arm64)),
            &["turbo_push", "turbo_push_linux_arm64", "turbo_push_linux"]
        );
        assert_eq!(
            candidate_names(PlatformKey::new(OsFamily::Linux, CpuArch::X86_64)),
            &["turbo_push", "turbo_push_linux_amd64", "turbo_push_linux"]
        );
        assert_eq!(
            candidate_names(PlatformKey::new(OsFamily::Other, CpuArch::Other)),
            &["turbo_push"]
        );
    }

    #[test]
    fn test_resolve_prefers_highest_priority() {
        let dir = TempDir::new().unwrap();
        let key = PlatformKey::new(OsFamily::Linux, CpuArch::X86_64);
        // Create two candidates; the higher-priority one must win
        File::create(dir.path().join("turbo_push_linux_amd64")).unwrap();
        File::create(dir.path().join("turbo_push_linux")).unwrap();

        let resolution = resolve(dir.path(), key);
        assert!(resolution.found);
        assert_eq!(resolution.path, dir.path().join("turbo_push_linux_amd64"));
    }

    #[test]
    fn test_resolve_finds_lower_priority_when_alone() {
        let dir = TempDir::new().unwrap();
        let key = PlatformKey::new(OsFamily::MacOs, CpuArch::Arm64);
        File::create(dir.path().join("turbo_push_mac")).unwrap();

        let resolution = resolve(dir.path(), key);
        assert!(resolution.found);
        assert_eq!(resolution.path, dir.path().join("turbo_push_mac"));
    }

    #[test]
    fn test_resolve_fallback_is_first_candidate() {
        let dir = TempDir::new().unwrap();
        for key in ALL_KEYS {
            let resolution = resolve(dir.path(), key);
            assert!(resolution.is_fallback());
            assert_eq!(resolution.path, dir.path().join(candidate_names(key)[0]));
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let key = PlatformKey::new(OsFamily::Windows, CpuArch::X86_64);
        assert_eq!(resolve(dir.path(), key), resolve(dir.path(), key));
    }
}
