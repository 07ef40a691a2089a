//! Screen wake lock held while a track is open
//!
//! The lock is an inhibitor child process (`systemd-inhibit` on Linux,
//! `caffeinate` on macOS). Dropping the lock kills the child, so replacing or
//! clearing the session's lock always releases the previous one.

use anyhow::Context;
use tokio::process::{Child, Command};

#[derive(Debug)]
pub struct WakeLock {
    child: Child,
}

impl WakeLock {
    /// Platform default inhibitor, if there is one
    pub fn default_command() -> Option<Vec<String>> {
        let argv: &[&str] = if cfg!(target_os = "linux") {
            &[
                "systemd-inhibit",
                "--what=idle",
                "--who=lyrasync",
                "--why=Reading lyrics",
                "--mode=block",
                "sleep",
                "infinity",
            ]
        } else if cfg!(target_os = "macos") {
            &["caffeinate", "-d"]
        } else {
            return None;
        };
        Some(argv.iter().map(|s| s.to_string()).collect())
    }

    /// Spawn `argv` as the inhibitor. Must run inside a tokio runtime.
    pub fn acquire(argv: &[String]) -> anyhow::Result<Self> {
        let (program, args) = argv.split_first().context("empty inhibitor command")?;
        let child = Command::new(program)
            .args(args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawn {program}"))?;
        tracing::debug!(program = %program, pid = ?child.id(), "wake lock acquired");
        Ok(Self { child })
    }

    /// Release and wait for the inhibitor to exit
    pub async fn release(mut self) -> anyhow::Result<()> {
        self.child.kill().await.context("stop inhibitor")?;
        tracing::debug!("wake lock released");
        Ok(())
    }

    pub fn is_held(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// OS pid of the inhibitor while it runs
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }
}

impl Drop for WakeLock {
    fn drop(&mut self) {
        // Best-effort; kill_on_drop covers the rest.
        let _ = self.child.start_kill();
    }
}

/// Wait up to two seconds for `pid` to exit (gone or zombie)
#[cfg(all(test, target_os = "linux"))]
pub(crate) async fn wait_for_exit(pid: u32) -> bool {
    for _ in 0..40 {
        let exited = match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
            Ok(stat) => stat
                .rsplit_once(')')
                .and_then(|(_, rest)| rest.trim_start().chars().next())
                .is_some_and(|state| state == 'Z' || state == 'X'),
            Err(_) => true,
        };
        if exited {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    false
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sleeper() -> Vec<String> {
        vec!["sleep".to_string(), "30".to_string()]
    }

    #[tokio::test]
    async fn test_acquire_and_release() {
        let mut lock = WakeLock::acquire(&sleeper()).unwrap();
        assert!(lock.is_held());
        lock.release().await.unwrap();
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_drop_kills_inhibitor() {
        let lock = WakeLock::acquire(&sleeper()).unwrap();
        let pid = lock.pid().unwrap();
        assert!(std::path::Path::new(&format!("/proc/{pid}")).exists());

        drop(lock);
        assert!(wait_for_exit(pid).await);
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let argv = vec!["lyrasync-no-such-inhibitor".to_string()];
        assert!(WakeLock::acquire(&argv).is_err());
        assert!(WakeLock::acquire(&[]).is_err());
    }
}
