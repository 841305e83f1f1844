//! Execution Session
//!
//! One probe run from start request to terminal state. The session owns the
//! child process handle exclusively: a single worker task drains the merged
//! output stream and reports events over a channel, which the surface
//! drains with [`ExecutionSession::pump`] on its own thread. Cancellation
//! is a polite terminate request escalated to a force kill after a bounded
//! grace period, so a child that ignores the request can never wedge the
//! worker.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::command::CommandSpec;
use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::exec::events::{SessionEvent, SessionState, TerminationReason};
use crate::exec::spawn::{ChildProcess, ProcessSpawner};
use crate::exec::stream::LineAssembler;
use crate::models::{LineKind, LogLine};

/// Extra slack on top of the grace period before the worker is abandoned
const SHUTDOWN_MARGIN: Duration = Duration::from_secs(1);

/// How long leftover output is drained after a force kill
const KILL_DRAIN: Duration = Duration::from_millis(250);

/// Tunables handed to each session
#[derive(Debug, Clone)]
pub struct ExecSettings {
    /// Grace period between terminate request and force kill
    pub cancel_grace: Duration,
    /// Retained output cap; older lines are dropped first
    pub max_log_lines: usize,
}

impl ExecSettings {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            cancel_grace: Duration::from_millis(config.cancel_grace_ms),
            max_log_lines: config.max_log_lines,
        }
    }
}

impl Default for ExecSettings {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default())
    }
}

/// One child-process run: state, buffered output, and the worker feeding it
pub struct ExecutionSession {
    id: Uuid,
    display: String,
    state: SessionState,
    termination: Option<TerminationReason>,
    lines: VecDeque<LogLine>,
    next_line_number: usize,
    max_log_lines: usize,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    cancel_tx: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl ExecutionSession {
    /// Start a new run for a built command
    ///
    /// Rejects an argv without a real target before the spawner is touched;
    /// no process is created on the validation path. On success the worker
    /// task owns the child and this handle is the only way to observe it.
    pub fn start(
        spec: CommandSpec,
        spawner: Arc<dyn ProcessSpawner>,
        settings: ExecSettings,
        runtime: &tokio::runtime::Handle,
    ) -> Result<Self> {
        if !spec.has_target() {
            return Err(Error::EmptyTarget);
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let command_display = spec.display.clone();
        let worker = runtime.spawn(run_worker(
            spec,
            spawner,
            settings.cancel_grace,
            events_tx,
            cancel_rx,
        ));

        info!(command = %command_display, "execution session started");
        Ok(Self {
            id: Uuid::new_v4(),
            display: command_display,
            state: SessionState::Running,
            termination: None,
            lines: VecDeque::new(),
            next_line_number: 0,
            max_log_lines: settings.max_log_lines.max(1),
            events_rx,
            cancel_tx,
            worker,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The command string this session runs, as previewed
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn termination(&self) -> Option<&TerminationReason> {
        self.termination.as_ref()
    }

    /// Buffered output lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Drain pending worker events into the session state.
    ///
    /// This is the only place session state changes, and it runs on the
    /// caller's (surface) thread. Returns true if anything changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            changed = true;
            match event {
                SessionEvent::Started { command, pid } => {
                    debug!(?pid, "probe process running");
                    self.push(LogLine::notice(format!("Running: {}", command)));
                }
                SessionEvent::Line(line) => self.push(line),
                SessionEvent::Exited { reason } => {
                    self.state = reason.state();
                    // Failure reasons already arrived as an error line; a
                    // normal end gets its closing marker here.
                    if self.state == SessionState::Completed {
                        self.push(LogLine::notice(format!("-- {} --", reason.describe())));
                    }
                    info!(reason = %reason.describe(), "execution session ended");
                    self.termination = Some(reason);
                }
            }
        }
        changed
    }

    /// Signal intent to stop the run.
    ///
    /// Idempotent, and a no-op once the process has already exited.
    pub fn request_cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    /// Cancel and wait for the worker to finish.
    ///
    /// Bounded: after the grace period plus a margin the worker is
    /// abandoned rather than waited on forever.
    pub async fn shutdown(self, grace: Duration) {
        let _ = self.cancel_tx.send(true);
        let mut worker = self.worker;
        if timeout(grace + SHUTDOWN_MARGIN, &mut worker).await.is_err() {
            warn!("session worker did not stop in time, aborting it");
            worker.abort();
            let _ = worker.await;
        }
    }

    /// Blocking variant of [`Self::shutdown`] for the surface thread
    pub fn shutdown_blocking(self, runtime: &tokio::runtime::Handle, grace: Duration) {
        runtime.block_on(self.shutdown(grace));
    }

    fn push(&mut self, mut line: LogLine) {
        line.line_number = self.next_line_number;
        self.next_line_number += 1;
        if self.lines.len() >= self.max_log_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }
}

/// Why the streaming loop stopped
enum StreamOutcome {
    /// Both output pipes reached end-of-file
    Eof,
    /// A read on the merged stream failed
    ReadError(String),
    /// Cancellation was requested (or the session handle was dropped)
    Cancelled,
}

/// Worker task: spawn the child, stream its output, report the end.
///
/// The worker is the sole owner of the child handle. It blocks only on
/// the merged stream and the cancel signal, never on the surface.
async fn run_worker(
    spec: CommandSpec,
    spawner: Arc<dyn ProcessSpawner>,
    grace: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let mut child = match spawner.spawn(&spec.argv).await {
        Ok(child) => child,
        Err(e) => {
            warn!(command = %spec.display, error = %e, "failed to spawn probe process");
            let _ = events.send(SessionEvent::Line(LogLine::error(format!("Error: {}", e))));
            let _ = events.send(SessionEvent::Exited {
                reason: TerminationReason::Failed {
                    reason: e.to_string(),
                },
            });
            return;
        }
    };

    let _ = events.send(SessionEvent::Started {
        command: spec.display.clone(),
        pid: child.pid(),
    });

    let mut assembler = LineAssembler::new();

    let outcome = loop {
        tokio::select! {
            chunk = child.next_chunk() => match chunk {
                Some(Ok(bytes)) => {
                    for text in assembler.push(&bytes) {
                        let _ = events.send(SessionEvent::Line(LogLine::output(text)));
                    }
                }
                Some(Err(e)) => break StreamOutcome::ReadError(e.to_string()),
                None => break StreamOutcome::Eof,
            },
            res = cancel_rx.changed() => match res {
                Ok(()) => {
                    if *cancel_rx.borrow_and_update() {
                        break StreamOutcome::Cancelled;
                    }
                }
                // Sender dropped: the owner discarded the session.
                Err(_) => break StreamOutcome::Cancelled,
            },
        }
    };

    let reason = match outcome {
        StreamOutcome::Eof => {
            flush_remainder(&mut assembler, &events);
            match timeout(grace, child.wait()).await {
                Ok(Ok(code)) => TerminationReason::Exited { code },
                Ok(Err(e)) => {
                    let _ =
                        events.send(SessionEvent::Line(LogLine::error(format!("Error: {}", e))));
                    TerminationReason::Failed {
                        reason: e.to_string(),
                    }
                }
                Err(_) => {
                    // Output closed but the process lingers; stop it.
                    debug!("child closed its output without exiting, forcing kill");
                    let _ = child.force_kill().await;
                    let _ = child.wait().await;
                    TerminationReason::Exited { code: None }
                }
            }
        }
        StreamOutcome::ReadError(reason) => {
            // Don't leave the child running against a dead stream.
            let _ = child.force_kill().await;
            flush_remainder(&mut assembler, &events);
            let error = Error::StreamRead { reason };
            warn!(command = %spec.display, "{}", error);
            let _ = events.send(SessionEvent::Line(LogLine::error(format!("Error: {}", error))));
            TerminationReason::Failed {
                reason: error.to_string(),
            }
        }
        StreamOutcome::Cancelled => {
            stop_child(&mut *child, &mut assembler, grace, &events).await;
            flush_remainder(&mut assembler, &events);
            TerminationReason::Stopped
        }
    };

    let _ = events.send(SessionEvent::Exited { reason });
}

/// Stop a child on cancellation: polite terminate, drain output for the
/// grace window, then force kill if it has not exited.
async fn stop_child(
    child: &mut dyn ChildProcess,
    assembler: &mut LineAssembler,
    grace: Duration,
    events: &mpsc::UnboundedSender<SessionEvent>,
) {
    if let Err(e) = child.terminate() {
        // Already gone, or signalling is unavailable; the kill below settles it.
        debug!("terminate request not delivered: {}", e);
    }

    let deadline = Instant::now() + grace;
    let mut exited = false;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match timeout(remaining, child.next_chunk()).await {
            Ok(Some(Ok(bytes))) => {
                for text in assembler.push(&bytes) {
                    let _ = events.send(SessionEvent::Line(LogLine::output(text)));
                }
            }
            Ok(Some(Err(_))) | Ok(None) => {
                exited = true;
                break;
            }
            Err(_) => break,
        }
    }

    if !exited {
        debug!("child ignored terminate request within grace period, forcing kill");
        let _ = child.force_kill().await;
        // Drain what was still buffered, bounded as well: a grandchild
        // holding the pipe open must not wedge the worker.
        let drain_deadline = Instant::now() + KILL_DRAIN;
        loop {
            let remaining = drain_deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match timeout(remaining, child.next_chunk()).await {
                Ok(Some(Ok(bytes))) => {
                    for text in assembler.push(&bytes) {
                        let _ = events.send(SessionEvent::Line(LogLine::output(text)));
                    }
                }
                Ok(Some(Err(_))) | Ok(None) | Err(_) => break,
            }
        }
    }

    if let Err(e) = child.wait().await {
        debug!("failed to reap stopped child: {}", e);
    }
}

fn flush_remainder(assembler: &mut LineAssembler, events: &mpsc::UnboundedSender<SessionEvent>) {
    if let Some(text) = assembler.flush() {
        let _ = events.send(SessionEvent::Line(LogLine::new(text, LineKind::Output)));
    }
}
