//! Service lifecycle management.
//!
//! [`ServiceLauncher`] spawns the resolved Turbo Push binary, waits for its
//! single-line JSON handshake on stdout within a bounded deadline, and
//! owns the child process until `stop()`. Exactly one caller drives
//! `start()`/`stop()`; the `&mut self` receivers enforce that statically,
//! so no internal locking is needed.

use crate::config::LauncherConfig;
use crate::error::{LaunchError, LaunchResult};
use crate::platform::PlatformKey;
use crate::resolver::resolve;
use crate::shutdown::shutdown_child;
use crate::stream::{CaptureBuffer, decode_line, spawn_stream_drain};
use crate::types::{LaunchState, ServiceConfig};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, warn};
use turbopush_client::{ClientConfig, TurboPushClient};

/// Launches and owns one Turbo Push child process.
///
/// Lifecycle: `NotStarted → Starting → Ready → Stopped`, with
/// `FailedToStart`/`StartTimedOut` as terminal failure states for an
/// attempt. The handshake config is written once on success and only read
/// afterwards.
pub struct ServiceLauncher {
    binary_path: PathBuf,
    launch_config: LauncherConfig,
    state: LaunchState,
    child: Option<tokio::process::Child>,
    service_config: Option<ServiceConfig>,
    drain_handles: Vec<JoinHandle<()>>,
}

impl ServiceLauncher {
    /// Create a launcher for an explicit binary path.
    #[must_use]
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self::with_config(binary_path, LauncherConfig::default())
    }

    /// Create a launcher with custom timing configuration.
    #[must_use]
    pub fn with_config(binary_path: impl Into<PathBuf>, config: LauncherConfig) -> Self {
        Self {
            binary_path: binary_path.into(),
            launch_config: config,
            state: LaunchState::NotStarted,
            child: None,
            service_config: None,
            drain_handles: Vec::new(),
        }
    }

    /// Create a launcher by resolving the platform binary in `search_dir`.
    ///
    /// When no candidate exists on disk the preferred name is still used,
    /// so the subsequent `start()` reports a spawn error rather than this
    /// constructor failing.
    #[must_use]
    pub fn discover(search_dir: impl AsRef<Path>) -> Self {
        let resolution = resolve(search_dir.as_ref(), PlatformKey::host());
        if resolution.is_fallback() {
            warn!(
                path = %resolution.path.display(),
                "no Turbo Push binary found on disk, will attempt the preferred name"
            );
        }
        Self::new(resolution.path)
    }

    /// The binary this launcher will spawn.
    #[must_use]
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LaunchState {
        self.state
    }

    /// The parsed handshake, if a launch has succeeded.
    #[must_use]
    pub const fn config(&self) -> Option<&ServiceConfig> {
        self.service_config.as_ref()
    }

    /// Start the service and wait for its startup handshake.
    ///
    /// Spawns the binary with piped stdout/stderr (stdin closed), then
    /// polls until the child either exits (`LaunchFailure` with captured
    /// stderr), announces readiness with a parseable JSON line
    /// (`Ready`), or the deadline elapses (`LaunchTimeout`; the child is
    /// terminated before returning so nothing leaks).
    ///
    /// Lines that do not begin with `{`, and JSON lines that do not carry
    /// the handshake fields, are diagnostic noise and are skipped.
    pub async fn start(&mut self) -> LaunchResult<ServiceConfig> {
        if self.child.is_some() {
            return Err(LaunchError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "service already running; call stop() first",
            )));
        }

        ensure_executable(&self.binary_path)?;

        info!(path = %self.binary_path.display(), "starting Turbo Push service");
        self.state = LaunchState::Starting;

        let mut child = match Command::new(&self.binary_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                self.state = LaunchState::FailedToStart;
                return Err(e.into());
            }
        };

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

        // Drain stderr from spawn time so the pipe can never back up; the
        // capture buffer feeds LaunchFailure messages.
        let stderr_capture: CaptureBuffer = Arc::new(Mutex::new(String::new()));
        let mut stderr_drain = spawn_stream_drain(stderr, "stderr", Some(stderr_capture.clone()));

        let mut reader = BufReader::new(stdout);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        let deadline = Instant::now() + self.launch_config.startup_deadline;

        loop {
            if Instant::now() >= deadline {
                warn!("startup deadline elapsed, terminating child");
                let _ = shutdown_child(child, self.launch_config.stop_grace).await;
                stderr_drain.abort();
                self.state = LaunchState::StartTimedOut;
                return Err(LaunchError::LaunchTimeout {
                    waited: self.launch_config.startup_deadline,
                });
            }

            if let Some(status) = child.try_wait()? {
                // The pipes just closed; give the drain a moment to flush
                let _ = timeout(Duration::from_millis(500), &mut stderr_drain).await;
                let stderr_text = stderr_capture.lock().unwrap().clone();
                debug!(%status, "child exited before announcing readiness");
                self.state = LaunchState::FailedToStart;
                return Err(LaunchError::LaunchFailure {
                    stderr: stderr_text,
                });
            }

            // read_until is cancel safe: a partial line survives the
            // timeout in `buf` and the next call keeps appending to it.
            match timeout(
                self.launch_config.poll_interval,
                reader.read_until(b'\n', &mut buf),
            )
            .await
            {
                Err(_) => {} // no complete line yet; re-check exit and deadline
                Ok(Ok(0)) => {
                    // stdout closed; the exit check above will observe it
                    sleep(self.launch_config.poll_interval).await;
                }
                Ok(Ok(_)) => {
                    let line = decode_line(&buf);
                    buf.clear();
                    if let Some(config) = parse_handshake(&line) {
                        info!(port = config.port, pid = config.pid, "Turbo Push service ready");
                        // Keep both pipes drained for the life of the session
                        self.drain_handles.push(stderr_drain);
                        self.drain_handles
                            .push(spawn_stream_drain(reader, "stdout", None));
                        self.child = Some(child);
                        self.service_config = Some(config.clone());
                        self.state = LaunchState::Ready;
                        return Ok(config);
                    }
                }
                Ok(Err(e)) => {
                    debug!(error = %e, "stdout read error while waiting for handshake");
                    sleep(self.launch_config.poll_interval).await;
                }
            }
        }
    }

    /// Stop the service.
    ///
    /// Requests graceful termination, escalating to a forced kill after
    /// the grace period. Idempotent and infallible: calling it twice, or
    /// without a prior `start()`, just leaves the launcher `Stopped`.
    pub async fn stop(&mut self) {
        if let Some(child) = self.child.take() {
            info!("stopping Turbo Push service");
            match shutdown_child(child, self.launch_config.stop_grace).await {
                Ok(status) => debug!(%status, "service stopped"),
                Err(e) => warn!(error = %e, "error while stopping service (ignored)"),
            }
        }
        for handle in self.drain_handles.drain(..) {
            handle.abort();
        }
        self.state = LaunchState::Stopped;
    }

    /// A REST client bound to the running service.
    ///
    /// Fails with [`LaunchError::NotReady`] until `start()` has succeeded.
    pub fn client(&self) -> LaunchResult<TurboPushClient> {
        let config = self.service_config.as_ref().ok_or(LaunchError::NotReady)?;
        Ok(TurboPushClient::new(
            ClientConfig::for_port(config.port).with_optional_token(config.auth.clone()),
        ))
    }
}

impl Drop for ServiceLauncher {
    fn drop(&mut self) {
        // stop() is the graceful path; this only prevents a leaked child
        if let Some(child) = self.child.as_mut() {
            let _ = child.start_kill();
        }
        for handle in self.drain_handles.drain(..) {
            handle.abort();
        }
    }
}

/// Try to interpret one stdout line as the startup handshake.
///
/// Anything not starting with `{`, and any JSON that does not deserialize
/// into [`ServiceConfig`], is noise.
fn parse_handshake(line: &str) -> Option<ServiceConfig> {
    let trimmed = line.trim();
    if !trimmed.starts_with('{') {
        if !trimmed.is_empty() {
            debug!("ignoring startup noise: {}", trimmed);
        }
        return None;
    }
    match serde_json::from_str::<ServiceConfig>(trimmed) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!(error = %e, "ignoring unparseable JSON line before handshake");
            None
        }
    }
}

/// Make sure the binary carries execute permission (no-op off Unix, and
/// when the file does not exist yet).
fn ensure_executable(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
