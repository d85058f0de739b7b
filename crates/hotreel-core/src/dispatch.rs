//! UI task queue
//!
//! Hotkey callbacks and media backend signals arrive on threads that do
//! not own the window. They hand work to the UI context through a
//! [`UiDispatcher`], which enqueues and returns immediately. The UI loop
//! owns the matching [`UiQueue`] and drains it once per frame.

use crate::types::SessionId;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, trace};

/// Callback that asks the UI loop to run another frame
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Work executed on the UI-owning context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiTask {
    /// Start playback for a fired binding
    Play { combo: String, path: String },
    /// Query native video dimensions of a session
    ProbeDimensions(SessionId),
    /// The session reached the end of its media
    EndOfMedia(SessionId),
    /// The native player reported a fatal error
    PlaybackFailed { session: SessionId, message: String },
}

/// Create a connected dispatcher/queue pair
pub fn ui_channel(waker: Option<Waker>) -> (UiDispatcher, UiQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = UiDispatcher { tx, waker };
    let queue = UiQueue {
        rx,
        deferred: Vec::new(),
    };
    (dispatcher, queue)
}

/// Sending half, safe to use from any thread
#[derive(Clone)]
pub struct UiDispatcher {
    tx: mpsc::UnboundedSender<UiTask>,
    waker: Option<Waker>,
}

impl UiDispatcher {
    /// Enqueue a task for the UI context. Returns false once the queue is gone.
    pub fn send(&self, task: UiTask) -> bool {
        trace!(?task, "Dispatching to UI");
        let sent = self.tx.send(task).is_ok();
        self.wake();
        sent
    }

    /// Request a UI frame without enqueuing work
    pub fn wake(&self) {
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

impl fmt::Debug for UiDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiDispatcher")
            .field("closed", &self.tx.is_closed())
            .field("waker", &self.waker.is_some())
            .finish()
    }
}

/// Receiving half, owned by the UI loop
#[derive(Debug)]
pub struct UiQueue {
    rx: mpsc::UnboundedReceiver<UiTask>,
    deferred: Vec<(Instant, UiTask)>,
}

impl UiQueue {
    /// Run `task` on a later drain, no earlier than `delay` from now
    pub fn schedule_after(&mut self, delay: Duration, task: UiTask) {
        self.schedule_at(Instant::now() + delay, task);
    }

    pub fn schedule_at(&mut self, due: Instant, task: UiTask) {
        self.deferred.push((due, task));
    }

    /// Earliest pending deferred task, used to schedule the next frame
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deferred.iter().map(|(due, _)| *due).min()
    }

    /// Collect due deferred tasks, then everything that arrived since the
    /// last drain.
    ///
    /// Only the most recent pending `Play` survives: if several hotkeys
    /// fired between frames, the last one wins.
    pub fn drain(&mut self, now: Instant) -> Vec<UiTask> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.deferred.len() {
            if self.deferred[index].0 <= now {
                due.push(self.deferred.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|(at, _)| *at);
        let mut tasks: Vec<UiTask> = due.into_iter().map(|(_, task)| task).collect();

        let mut received = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(task) => received.push(task),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        let last_play = received
            .iter()
            .rposition(|task| matches!(task, UiTask::Play { .. }));
        let mut coalesced = 0;
        for (position, task) in received.into_iter().enumerate() {
            if matches!(task, UiTask::Play { .. }) && Some(position) != last_play {
                coalesced += 1;
                continue;
            }
            tasks.push(task);
        }
        if coalesced > 0 {
            debug!(coalesced, "Superseded play requests dropped");
        }

        tasks
    }
}
