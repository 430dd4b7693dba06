//! # Action Streams
//!
//! Channel-backed event streams for the orchestration flows. Each flow
//! spawns its work onto the runtime and hands the caller an
//! `ActionStream` to consume lifecycle actions from.
//!
//! Ordering: within one sub-flow, actions arrive in emission order, so a
//! `*Requested` action always precedes its terminal action. Across merged
//! sub-flows no ordering holds; actions interleave by completion order of
//! the underlying network calls.
//!
//! Cancellation: dropping the stream, or calling `cancel`, aborts the
//! flow tasks and stops delivery. Network calls already dispatched are
//! not guaranteed to be aborted.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default per-flow channel capacity
pub(crate) const FLOW_CHANNEL_CAPACITY: usize = 16;

/// A stream of lifecycle actions produced by one orchestration flow
#[derive(Debug)]
pub struct ActionStream<A> {
    rx: mpsc::Receiver<A>,
    tasks: Vec<JoinHandle<()>>,
}

impl<A> ActionStream<A> {
    pub(crate) fn new(rx: mpsc::Receiver<A>, tasks: Vec<JoinHandle<()>>) -> Self {
        Self { rx, tasks }
    }

    /// Receive the next action, or `None` once the flow has completed
    /// or was cancelled
    pub async fn next(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Drain the stream to completion and return every delivered action
    pub async fn collect(mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Some(action) = self.rx.recv().await {
            actions.push(action);
        }
        actions
    }

    /// Stop the flow: aborts its tasks and ends delivery. Best-effort
    /// only; an in-flight network call may still reach the server.
    pub fn cancel(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
        self.rx.close();
    }
}

impl<A> Drop for ActionStream<A> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
