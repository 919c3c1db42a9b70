/*!
Diagnostic logging for the monitor and the OS layer.

This is a flat-text debug channel, distinct from the NDJSON event sink: it
exists for operators chasing a misbehaving probe or hook, is disabled unless
`--verbose` is given or `WIFISCOPE_DEBUG=true` is set, and rotates itself so
a long-running `log` session cannot fill the disk. Lines that might carry
Wi-Fi credentials are redacted before they reach the file.
*/

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use flate2::{write::GzEncoder, Compression};
use fs2::FileExt;
use regex::Regex;
use uuid::Uuid;

use crate::core::monitor::types::local_timestamp;

const ROTATION_SIZE_BYTES: u64 = 4 * 1024 * 1024;
const MAX_ARCHIVES: usize = 3;
const ROTATION_CHECK_EVERY: u32 = 128;

/// Append-only flat-text log with size-based rotation into gzip archives.
/// Rotation is guarded by an advisory lock so two wifiscope processes
/// sharing a log path cannot both rotate at once.
struct RotatingFile {
    path: PathBuf,
    write_count: AtomicU32,
}

impl RotatingFile {
    fn new(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        Self {
            path,
            write_count: AtomicU32::new(0),
        }
    }

    fn append(&self, line: &str) -> Result<(), std::io::Error> {
        if self.write_count.fetch_add(1, Ordering::Relaxed) % ROTATION_CHECK_EVERY == 0 {
            let _ = self.rotate_if_oversize();
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    fn rotate_if_oversize(&self) -> Result<(), std::io::Error> {
        let len = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => return Ok(()),
        };
        if len < ROTATION_SIZE_BYTES {
            return Ok(());
        }

        let lock_path = self.path.with_extension("lock");
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;
        if lock.try_lock_exclusive().is_err() {
            // Another process is rotating.
            return Ok(());
        }

        let result = self.rotate();
        let _ = lock.unlock();
        let _ = std::fs::remove_file(&lock_path);
        result
    }

    fn rotate(&self) -> Result<(), std::io::Error> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archive_path = self.path.with_extension(format!("{}.gz", stamp));

        let rotating = self.path.with_extension("rotating");
        std::fs::rename(&self.path, &rotating)?;

        let source = File::open(&rotating)?;
        let target = File::create(&archive_path)?;
        let mut encoder = GzEncoder::new(target, Compression::default());
        std::io::copy(&mut BufReader::new(source), &mut encoder)?;
        encoder.finish()?;
        std::fs::remove_file(&rotating)?;

        self.prune_archives();
        Ok(())
    }

    fn prune_archives(&self) {
        let Some(dir) = self.path.parent() else {
            return;
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return;
        };
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };

        let mut archives: Vec<(PathBuf, std::time::SystemTime)> = entries
            .flatten()
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.starts_with(stem) && name.ends_with(".gz")
            })
            .filter_map(|entry| {
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some((entry.path(), modified))
            })
            .collect();

        archives.sort_by_key(|(_, modified)| *modified);
        if archives.len() > MAX_ARCHIVES {
            for (path, _) in &archives[..archives.len() - MAX_ARCHIVES] {
                let _ = std::fs::remove_file(path);
            }
        }
    }
}

pub struct DiagLogger {
    enabled: bool,
    file: Option<Mutex<RotatingFile>>,
    session_id: String,
    redactions: Vec<Regex>,
}

impl DiagLogger {
    /// Enabled when the CLI asked for verbose output or `WIFISCOPE_DEBUG`
    /// is truthy. A disabled logger costs one branch per call.
    pub fn new(verbose: bool) -> Self {
        Self::at_path(Self::default_path(), verbose || Self::env_enabled())
    }

    /// Construct against an explicit path (used by tests).
    pub fn at_path(path: PathBuf, enabled: bool) -> Self {
        let file = enabled.then(|| Mutex::new(RotatingFile::new(path)));
        Self {
            enabled,
            file,
            session_id: Uuid::new_v4().to_string()[..8].to_string(),
            redactions: Self::redaction_patterns(),
        }
    }

    fn env_enabled() -> bool {
        matches!(
            std::env::var("WIFISCOPE_DEBUG")
                .unwrap_or_default()
                .trim()
                .to_lowercase()
                .as_str(),
            "true" | "1" | "yes" | "on"
        )
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".wifiscope");
        path.push("wifiscope-debug.log");
        path
    }

    fn redaction_patterns() -> Vec<Regex> {
        // Wi-Fi credentials show up in connect commands and hook stderr.
        let patterns = [
            r"(?i)password[:=\s]+\S+",
            r"(?i)\bpsk[:=\s]+\S+",
            r"(?i)passphrase[:=\s]+\S+",
        ];
        patterns
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    }

    fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for regex in &self.redactions {
            out = regex.replace_all(&out, "[REDACTED]").to_string();
        }
        out
    }

    fn write(&self, level: &str, component: &str, message: &str) {
        let Some(file) = &self.file else {
            return;
        };
        let line = format!(
            "{} {} [{}] {} sid={}",
            local_timestamp(),
            level,
            component,
            self.redact(message),
            self.session_id
        );
        if let Ok(file) = file.lock() {
            let _ = file.append(&line);
        }
    }

    pub fn debug(&self, component: &str, message: &str) {
        self.write("DEBUG", component, message);
    }

    pub fn error(&self, component: &str, message: &str) {
        self.write("ERROR", component, message);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
