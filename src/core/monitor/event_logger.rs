/*!
The event-logger orchestrator.

One logical thread of control drives everything: a timer ticks at the
configured interval, each tick samples the composite network state, the
classifier diffs it against the previous sample, and every resulting event
fans out to the enabled sinks in a fixed order (log file, hook, stdout).
Sinks fail independently; only configuration problems at startup and the
loss of standard streams ever escape the loop. A shutdown signal lets the
current tick finish its fan-out before the loop exits.
*/

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::core::monitor::classifier;
use crate::core::monitor::diag::DiagLogger;
use crate::core::monitor::hook::HookRunner;
use crate::core::monitor::log_file::EventLogFile;
use crate::core::monitor::sampler::StateSampler;
use crate::core::monitor::types::{utc_timestamp, Event, LoggerConfig, MonitorError, NetworkState};

pub struct EventLogger {
    config: LoggerConfig,
    sampler: StateSampler,
    log_file: Option<EventLogFile>,
    hook: Option<HookRunner>,
    diag: Option<Arc<DiagLogger>>,
    prev: Option<NetworkState>,
    reported_hook_failures: HashSet<String>,
}

impl EventLogger {
    /// Builds the orchestrator and its sinks. An unwritable log file path or
    /// uncreatable parent directory is a startup failure here, not a
    /// recoverable sink error. Diagnostic logging (and with it hook-stderr
    /// capture) is gated by `config.verbose`.
    pub fn new(config: LoggerConfig, sampler: StateSampler) -> Result<Self, MonitorError> {
        let diag = Arc::new(DiagLogger::new(config.verbose));
        let diag = diag.is_enabled().then_some(diag);

        let log_file = match &config.log_file_path {
            Some(path) => Some(EventLogFile::create(path.clone())?),
            None => None,
        };
        let hook = config.hook_path.as_ref().map(|path| {
            HookRunner::new(
                path.clone(),
                Duration::from_secs_f64(config.hook_timeout_seconds),
                diag.clone(),
            )
        });
        Ok(Self {
            config,
            sampler,
            log_file,
            hook,
            diag,
            prev: None,
            reported_hook_failures: HashSet::new(),
        })
    }

    /// Blocks until SIGINT/SIGTERM. The timer fires at interval boundaries
    /// relative to loop start; an overrunning tick makes the next one start
    /// immediately, and ticks never overlap.
    pub async fn run(&mut self) -> Result<(), MonitorError> {
        self.print_header()?;

        let mut ticker =
            tokio::time::interval(Duration::from_secs_f64(self.config.interval_seconds));
        let mut shutdown = Shutdown::new()?;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    self.tick().await?;
                }
            }
        }

        if let Some(diag) = &self.diag {
            diag.debug("EventLogger", "shutdown signal received, loop exited");
        }
        Ok(())
    }

    /// One iteration: sample, classify, fan out. Public so tests can drive
    /// the loop without the timer. Returns the events emitted this tick.
    pub async fn tick(&mut self) -> Result<Vec<Event>, MonitorError> {
        let curr = self.sampler.sample().await;
        let timestamp = utc_timestamp();
        let events = classifier::classify(self.prev.as_ref(), &curr, &timestamp);

        if self.config.emit_to_stdout {
            self.emit_stdout(&format!("[{}] {}", timestamp, format_status_line(&curr)))?;
        }

        for event in &events {
            // Serialize once; every sink sees the same document.
            let json = match serde_json::to_string(event) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("wifiscope: failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Some(log_file) = &mut self.log_file {
                log_file.append(&json);
            }
            if let Some(hook) = &self.hook {
                if let Err(failure) = hook.run(&json).await {
                    // Same throttle as the file sink: a persistently broken
                    // hook reports each failure mode once, not once per tick.
                    if self.reported_hook_failures.insert(failure.mode()) {
                        eprintln!("wifiscope: hook failed for {}: {}", event.kind, failure);
                    }
                    if let Some(diag) = &self.diag {
                        diag.error("HookRunner", &format!("{}: {}", event.kind, failure));
                    }
                }
            }
            if self.config.emit_to_stdout {
                self.emit_stdout(&format_event_line(event))?;
            }
        }

        if let Some(diag) = &self.diag {
            diag.debug(
                "EventLogger",
                &format!(
                    "tick: wifi={} ssid={:?} internet={} events={}",
                    curr.wifi_on,
                    curr.network_name,
                    curr.internet_connected,
                    events.len()
                ),
            );
        }

        self.prev = Some(curr);
        Ok(events)
    }

    fn print_header(&mut self) -> Result<(), MonitorError> {
        if !self.config.emit_to_stdout {
            return Ok(());
        }
        let mut sinks = vec!["stdout".to_string()];
        if let Some(log_file) = &self.log_file {
            sinks.push(format!("file {}", log_file.path().display()));
        }
        if let Some(path) = &self.config.hook_path {
            sinks.push(format!("hook {}", path.display()));
        }
        self.emit_stdout(&format!(
            "wifiscope: sampling every {}s, sinks: {}",
            self.config.interval_seconds,
            sinks.join(", ")
        ))
    }

    /// Losing stdout while it is an enabled sink is fatal; everything else
    /// in the loop degrades, this does not.
    fn emit_stdout(&self, line: &str) -> Result<(), MonitorError> {
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

/// The continuous per-tick status feed, one line per sample.
pub fn format_status_line(state: &NetworkState) -> String {
    format!(
        "wifi={} ssid={} tcp={} dns={} internet={}",
        on_off(state.wifi_on),
        state.network_name.as_deref().unwrap_or("-"),
        up_down(state.tcp_working),
        up_down(state.dns_working),
        up_down(state.internet_connected),
    )
}

/// The event-marker line interleaved with the status feed.
pub fn format_event_line(event: &Event) -> String {
    match &event.details.network_name {
        Some(name) => format!("[{}] {} ({})", event.timestamp, event.kind, name),
        None => format!("[{}] {}", event.timestamp, event.kind),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn up_down(value: bool) -> &'static str {
    if value {
        "up"
    } else {
        "down"
    }
}

/// Waits for SIGINT or SIGTERM (Ctrl+C elsewhere).
#[cfg(unix)]
struct Shutdown {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Shutdown {
    fn new() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) {
        use std::task::Poll;
        futures::future::poll_fn(|cx| {
            if self.sigint.poll_recv(cx).is_ready() || self.sigterm.poll_recv(cx).is_ready() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

#[cfg(not(unix))]
struct Shutdown;

#[cfg(not(unix))]
impl Shutdown {
    fn new() -> Result<Self, std::io::Error> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}
