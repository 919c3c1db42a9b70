/*!
Hook dispatch: runs the user-supplied executable once per event.

The hook is a full child-process contract, not a shell one-liner: the event
JSON is written to the child's standard input which is then closed, the wait
is bounded by a wall-clock timeout, and a child that outlives the timeout is
terminated politely (SIGTERM to its process group) before being killed
outright. Exit status and spawn failures are reported as typed reasons so the
orchestrator can log them without ever being taken down by a broken hook.
*/

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

use crate::core::monitor::diag::DiagLogger;

/// Grace period between the polite signal and the forced kill.
#[cfg(unix)]
const TERM_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum HookFailure {
    #[error("timeout after {0:.1}s")]
    Timeout(f64),
    #[error("exit_status({0})")]
    ExitStatus(i32),
    #[error("terminated by signal")]
    Signalled,
    #[error("not_executable: {0}")]
    NotExecutable(String),
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stdin write failed: {0}")]
    Stdin(String),
}

impl HookFailure {
    /// Stable key for once-per-mode failure reporting; carries the exit code
    /// so different hook exit statuses count as distinct modes.
    pub fn mode(&self) -> String {
        match self {
            HookFailure::Timeout(_) => "timeout".to_string(),
            HookFailure::ExitStatus(code) => format!("exit_status({})", code),
            HookFailure::Signalled => "signalled".to_string(),
            HookFailure::NotExecutable(_) => "not_executable".to_string(),
            HookFailure::Spawn(_) => "spawn".to_string(),
            HookFailure::Stdin(_) => "stdin".to_string(),
        }
    }
}

pub struct HookRunner {
    path: PathBuf,
    timeout: Duration,
    diag: Option<Arc<DiagLogger>>,
}

impl HookRunner {
    pub fn new(path: PathBuf, timeout: Duration, diag: Option<Arc<DiagLogger>>) -> Self {
        Self {
            path,
            timeout,
            diag,
        }
    }

    /// Spawns the hook with the serialized event on stdin and waits for it,
    /// bounded by the configured timeout. The child inherits the parent's
    /// environment. Stdout is discarded; stderr is captured for diagnostics
    /// when a diagnostic logger is attached.
    pub async fn run(&self, payload: &str) -> Result<(), HookFailure> {
        let mut cmd = Command::new(&self.path);
        cmd.stdin(Stdio::piped()).stdout(Stdio::null());
        cmd.stderr(if self.diag.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                HookFailure::NotExecutable(self.path.display().to_string())
            }
            _ => HookFailure::Spawn(e.to_string()),
        })?;

        let stderr_task = child.stderr.take().map(|mut pipe| {
            tokio::spawn(async move {
                let mut buf = String::new();
                use tokio::io::AsyncReadExt;
                let _ = pipe.read_to_string(&mut buf).await;
                buf
            })
        });

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(payload.as_bytes()).await {
                Ok(()) => {}
                // A hook that exits without reading stdin is not an error;
                // its exit status decides.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => {
                    self.terminate(&mut child).await;
                    return Err(HookFailure::Stdin(e.to_string()));
                }
            }
            // Dropping the handle closes the child's stdin.
        }

        let result = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => match status.code() {
                Some(code) => Err(HookFailure::ExitStatus(code)),
                None => Err(HookFailure::Signalled),
            },
            Ok(Err(e)) => Err(HookFailure::Spawn(e.to_string())),
            Err(_) => {
                self.terminate(&mut child).await;
                Err(HookFailure::Timeout(self.timeout.as_secs_f64()))
            }
        };

        if let (Some(task), Some(diag)) = (stderr_task, self.diag.as_ref()) {
            if let Ok(captured) = task.await {
                let trimmed = captured.trim();
                if !trimmed.is_empty() {
                    diag.debug("HookRunner", &format!("hook stderr: {}", trimmed));
                }
            }
        }

        result
    }

    /// Polite-then-forceful shutdown. The child was spawned as its own
    /// process group leader, so the signal reaches any grandchildren too.
    async fn terminate(&self, child: &mut Child) {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            unsafe {
                libc::killpg(pid as libc::pid_t, libc::SIGTERM);
            }
            if tokio::time::timeout(TERM_GRACE, child.wait()).await.is_ok() {
                return;
            }
            unsafe {
                libc::killpg(pid as libc::pid_t, libc::SIGKILL);
            }
        }
        let _ = child.kill().await;
        let _ = child.wait().await;
    }
}
