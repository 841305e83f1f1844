//! Child-process execution and live output streaming
//!
//! One probe run is one [`ExecutionSession`]: the child process is spawned
//! through the [`ProcessSpawner`] seam, a worker task drains its merged
//! stdout/stderr stream into complete lines, and every line plus the
//! terminal state transition is handed to the surface over a channel. The
//! surface never touches the child or its streams directly.

pub mod events;
pub mod session;
pub mod spawn;
pub mod stream;

pub use events::{SessionEvent, SessionState, TerminationReason};
pub use session::{ExecSettings, ExecutionSession};
pub use spawn::{ChildProcess, ProcessSpawner, TokioSpawner};
pub use stream::LineAssembler;
