// Append-only NDJSON event sink.
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// File sink for emitted events: one JSON document per line.
///
/// The file is opened in append mode for every write so that concurrent
/// writers from other processes do not interleave lines and an externally
/// rotated file is picked up on the next event. Each write is flushed so a
/// crash loses at most the in-flight event. There is no rotation, size cap
/// or compaction here; that is the operator's responsibility.
pub struct EventLogFile {
    path: PathBuf,
    reported_failures: HashSet<String>,
}

impl EventLogFile {
    /// Resolves the sink path, creating missing parent directories. Failing
    /// to create the directory tree is a startup error; write failures later
    /// on are not.
    pub fn create(path: PathBuf) -> Result<Self, std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // Prove the path is writable before the loop starts.
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            reported_failures: HashSet::new(),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Appends one JSON line. I/O failures are reported to standard error
    /// once per distinct failure mode and otherwise swallowed; a broken file
    /// sink must not stop the loop or the other sinks.
    pub fn append(&mut self, json_line: &str) {
        if let Err(e) = self.write_line(json_line) {
            let mode = format!("{:?}", e.kind());
            if self.reported_failures.insert(mode) {
                eprintln!(
                    "wifiscope: log file {} unwritable: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }

    fn write_line(&self, json_line: &str) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json_line)?;
        file.flush()
    }
}
