// Timeout-bounded subprocess execution for OS-level Wi-Fi queries.
use std::time::Duration;

use tokio::process::Command;

use crate::core::os::OsError;

/// Runs platform tools (`networksetup`, `nmcli`, ...) with a hard wall-clock
/// bound so a wedged helper can never stall a sampling tick beyond its
/// timeout.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Executes `program args...` and returns its stdout as UTF-8 (lossy).
    /// Non-zero exit, a missing binary, and a timeout all collapse to typed
    /// errors; callers decide whether that means `false`, `None` or a
    /// surfaced failure.
    pub async fn run(&self, program: &str, args: &[&str]) -> Result<String, OsError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(program).args(args).output(),
        )
        .await
        .map_err(|_| OsError::Timeout {
            program: program.to_string(),
            timeout: self.timeout,
        })?
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => OsError::ProgramMissing {
                program: program.to_string(),
            },
            _ => OsError::CommandFailed {
                program: program.to_string(),
                detail: e.to_string(),
            },
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OsError::CommandFailed {
                program: program.to_string(),
                detail: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
