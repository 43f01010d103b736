use crate::response::CommandResponse;
use crate::shell::Shell;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Whatever executes queued command lines.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn dispatch(&self, line: &str) -> CommandResponse;
}

#[async_trait]
impl CommandSink for tokio::sync::Mutex<Shell> {
    async fn dispatch(&self, line: &str) -> CommandResponse {
        self.lock().await.run(line)
    }
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<String>,
    draining: bool,
}

/// FIFO of command lines executed one at a time with a fixed pause between
/// them. At most one drain task runs; lines queued while it runs are picked
/// up by that same task.
pub struct CommandQueue<S: CommandSink + 'static> {
    sink: Arc<S>,
    state: Arc<Mutex<QueueState>>,
    delay: Duration,
}

impl<S: CommandSink + 'static> Clone for CommandQueue<S> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
            state: self.state.clone(),
            delay: self.delay,
        }
    }
}

impl<S: CommandSink + 'static> CommandQueue<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self::with_delay(sink, DEFAULT_DELAY)
    }

    pub fn with_delay(sink: Arc<S>, delay: Duration) -> Self {
        Self {
            sink,
            state: Arc::new(Mutex::new(QueueState::default())),
            delay,
        }
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Append one line. Returns the drain task if this call started it.
    /// Must be called from within a tokio runtime.
    pub fn queue_command(&self, line: impl Into<String>) -> Option<JoinHandle<()>> {
        self.enqueue(std::iter::once(line.into()))
    }

    /// Append a batch, same contract as [`CommandQueue::queue_command`].
    pub fn execute_command_queue<I>(&self, lines: I) -> Option<JoinHandle<()>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.enqueue(lines.into_iter().map(Into::into))
    }

    fn enqueue(&self, lines: impl Iterator<Item = String>) -> Option<JoinHandle<()>> {
        let mut state = self.state.lock();
        state.pending.extend(lines);
        if state.draining || state.pending.is_empty() {
            return None;
        }
        state.draining = true;
        drop(state);

        tracing::debug!("Starting command queue drain");
        let sink = self.sink.clone();
        let state = self.state.clone();
        let delay = self.delay;
        Some(tokio::spawn(drain(sink, state, delay)))
    }

    pub fn pending(&self) -> Vec<String> {
        self.state.lock().pending.iter().cloned().collect()
    }

    pub fn is_draining(&self) -> bool {
        self.state.lock().draining
    }

    /// Drop everything not yet started. A running drain stops after its
    /// current command.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.pending.len();
        state.pending.clear();
        tracing::debug!("Cleared {} queued commands", dropped);
    }
}

/// Clears `draining` if the drain task dies early (panicking sink or an
/// aborted handle) so later enqueues can start a fresh drain.
struct DrainGuard {
    state: Arc<Mutex<QueueState>>,
    finished: bool,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Command queue drain stopped early");
            self.state.lock().draining = false;
        }
    }
}

async fn drain<S: CommandSink>(sink: Arc<S>, state: Arc<Mutex<QueueState>>, delay: Duration) {
    let mut guard = DrainGuard {
        state,
        finished: false,
    };
    loop {
        let next = {
            let mut state = guard.state.lock();
            match state.pending.pop_front() {
                Some(line) => line,
                None => {
                    state.draining = false;
                    guard.finished = true;
                    break;
                }
            }
        };

        let response = sink.dispatch(&next).await;
        tracing::debug!("Queued '{}' finished (success={})", next, response.success);
        tokio::time::sleep(delay).await;
    }
    tracing::debug!("Command queue drained");
}
