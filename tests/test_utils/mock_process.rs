//! Scripted process doubles for exercising execution sessions without
//! spawning real child processes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use pingdeck::error::{Error, Result};
use pingdeck::exec::{ChildProcess, ProcessSpawner};

/// One scripted step of a mock child's merged output stream
#[derive(Debug, Clone)]
pub enum Step {
    /// Emit a raw chunk
    Chunk(Vec<u8>),
    /// Fail the next read
    ReadError(String),
    /// Produce nothing until the child is stopped
    HangUntilStopped,
}

impl Step {
    pub fn text(text: &str) -> Self {
        Step::Chunk(text.as_bytes().to_vec())
    }
}

/// Script for one mock child
#[derive(Debug, Clone, Default)]
pub struct ChildScript {
    pub steps: Vec<Step>,
    /// Ignore the polite terminate request; only a force kill stops it
    pub ignore_terminate: bool,
    /// Exit code reported after the stream ends
    pub exit_code: Option<i32>,
}

impl ChildScript {
    pub fn emitting(chunks: &[&str]) -> Self {
        Self {
            steps: chunks.iter().map(|c| Step::text(c)).collect(),
            ignore_terminate: false,
            exit_code: Some(0),
        }
    }
}

/// Observable outcome flags for one spawned mock child
#[derive(Debug, Default)]
pub struct ChildFlags {
    pub terminated: AtomicBool,
    pub killed: AtomicBool,
}

impl ChildFlags {
    pub fn was_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    pub fn was_killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }
}

/// A scripted child process
pub struct MockChild {
    steps: VecDeque<Step>,
    exit_code: Option<i32>,
    ignore_terminate: bool,
    flags: Arc<ChildFlags>,
    stopped: Arc<Notify>,
    done: bool,
}

impl MockChild {
    fn stop_observed(&self) -> bool {
        self.flags.was_killed() || (!self.ignore_terminate && self.flags.was_terminated())
    }
}

#[async_trait]
impl ChildProcess for MockChild {
    fn pid(&self) -> Option<u32> {
        Some(4242)
    }

    async fn next_chunk(&mut self) -> Option<std::io::Result<Vec<u8>>> {
        loop {
            if self.done || self.stop_observed() {
                self.done = true;
                return None;
            }

            // The hang step stays in the queue so a dropped-and-retried
            // read keeps hanging until the child is actually stopped.
            if matches!(self.steps.front(), Some(Step::HangUntilStopped)) {
                self.stopped.notified().await;
                continue;
            }

            match self.steps.pop_front() {
                Some(Step::Chunk(bytes)) => return Some(Ok(bytes)),
                Some(Step::ReadError(reason)) => {
                    self.done = true;
                    return Some(Err(std::io::Error::other(reason)));
                }
                Some(Step::HangUntilStopped) => unreachable!(),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
    }

    fn terminate(&mut self) -> Result<()> {
        self.flags.terminated.store(true, Ordering::SeqCst);
        if !self.ignore_terminate {
            self.stopped.notify_one();
        }
        Ok(())
    }

    async fn force_kill(&mut self) -> Result<()> {
        self.flags.killed.store(true, Ordering::SeqCst);
        self.stopped.notify_one();
        Ok(())
    }

    async fn wait(&mut self) -> Result<Option<i32>> {
        if self.flags.was_killed() {
            return Ok(None);
        }
        Ok(self.exit_code)
    }
}

/// Spawner double: hands out scripted children and records every spawn
#[derive(Default)]
pub struct MockSpawner {
    scripts: Mutex<VecDeque<ChildScript>>,
    spawn_error: Option<String>,
    spawn_count: AtomicUsize,
    children: Mutex<Vec<Arc<ChildFlags>>>,
}

impl MockSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: ChildScript) -> Self {
        let spawner = Self::default();
        spawner.push_script(script);
        spawner
    }

    /// A spawner whose every spawn attempt fails
    pub fn failing(reason: &str) -> Self {
        Self {
            spawn_error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn push_script(&self, script: ChildScript) {
        self.scripts.lock().unwrap().push_back(script);
    }

    /// How many times `spawn` was invoked
    pub fn spawn_count(&self) -> usize {
        self.spawn_count.load(Ordering::SeqCst)
    }

    /// Outcome flags of the n-th spawned child
    pub fn child_flags(&self, index: usize) -> Option<Arc<ChildFlags>> {
        self.children.lock().unwrap().get(index).cloned()
    }
}

#[async_trait]
impl ProcessSpawner for MockSpawner {
    async fn spawn(&self, argv: &[String]) -> Result<Box<dyn ChildProcess>> {
        self.spawn_count.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.spawn_error {
            return Err(Error::SpawnFailed {
                command: argv.first().cloned().unwrap_or_default(),
                reason: reason.clone(),
            });
        }

        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        let flags = Arc::new(ChildFlags::default());
        self.children.lock().unwrap().push(Arc::clone(&flags));

        Ok(Box::new(MockChild {
            steps: script.steps.into(),
            exit_code: script.exit_code,
            ignore_terminate: script.ignore_terminate,
            flags,
            stopped: Arc::new(Notify::new()),
            done: false,
        }))
    }
}
