//! Process Spawning Seam
//!
//! The boundary between the execution session and the host environment:
//! start a child process from an argument vector and expose its merged
//! stdout/stderr as a chunk stream, plus the handful of control operations
//! the session needs (terminate, force kill, reap). Production code uses
//! [`TokioSpawner`]; tests substitute scripted doubles.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{Error, Result};

/// A running child process as seen by the session worker
#[async_trait]
pub trait ChildProcess: Send {
    /// OS process id, if the process is still attached
    fn pid(&self) -> Option<u32>;

    /// Next raw chunk of the merged stdout/stderr stream.
    /// `None` means both streams reached end-of-file.
    async fn next_chunk(&mut self) -> Option<std::io::Result<Vec<u8>>>;

    /// Polite termination request. Safe to call after exit.
    fn terminate(&mut self) -> Result<()>;

    /// Forceful termination; resolves once the process is gone
    async fn force_kill(&mut self) -> Result<()>;

    /// Reap the process and return its exit code, if it produced one
    async fn wait(&mut self) -> Result<Option<i32>>;
}

/// Starts child processes from argument vectors
#[async_trait]
pub trait ProcessSpawner: Send + Sync {
    async fn spawn(&self, argv: &[String]) -> Result<Box<dyn ChildProcess>>;
}

/// Production spawner backed by `tokio::process`
///
/// stdout and stderr are piped and forwarded by two reader tasks into one
/// channel, forming the merged stream. stdin is closed so the probe never
/// waits on input.
pub struct TokioSpawner;

#[async_trait]
impl ProcessSpawner for TokioSpawner {
    async fn spawn(&self, argv: &[String]) -> Result<Box<dyn ChildProcess>> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::Other("empty argument vector".to_string()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::SpawnFailed {
                command: program.clone(),
                reason: e.to_string(),
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            forward_chunks(stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            forward_chunks(stderr, tx);
        }

        debug!(pid = ?child.id(), command = %program, "child process spawned");
        Ok(Box::new(TokioChild {
            child,
            output_rx: rx,
        }))
    }
}

/// Forward one pipe into the merged channel until EOF or read failure
fn forward_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<std::io::Result<Vec<u8>>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(Ok(buf[..n].to_vec())).is_err() {
                        // Receiver gone; the session no longer cares.
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });
}

struct TokioChild {
    child: Child,
    output_rx: mpsc::UnboundedReceiver<std::io::Result<Vec<u8>>>,
}

#[async_trait]
impl ChildProcess for TokioChild {
    fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    async fn next_chunk(&mut self) -> Option<std::io::Result<Vec<u8>>> {
        // Returns None once both forwarders have dropped their senders.
        self.output_rx.recv().await
    }

    fn terminate(&mut self) -> Result<()> {
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = self.child.id() {
                return kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(|e| {
                    Error::SignalSendFailed {
                        pid,
                        reason: e.to_string(),
                    }
                });
            }
        }

        // No signal support, or the process is already detached: go straight
        // to the kill request.
        self.child.start_kill().map_err(Error::Io)
    }

    async fn force_kill(&mut self) -> Result<()> {
        self.child.kill().await.map_err(Error::Io)
    }

    async fn wait(&mut self) -> Result<Option<i32>> {
        let status = self.child.wait().await?;
        Ok(status.code())
    }
}
