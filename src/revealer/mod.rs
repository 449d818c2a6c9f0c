//! Incremental revealer
//!
//! Exposes a growing prefix of a reply on a fixed cadence to animate a
//! typed-out response. Each reveal runs as one tokio task owned by a
//! [`RevealHandle`]; cancelling or dropping the handle stops the timer and
//! guarantees the completion callback never runs afterwards.

mod state;

pub use state::{RevealState, Tick};

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

const MIN_CADENCE: Duration = Duration::from_millis(1);

/// Owned handle to a running (or finished) reveal
#[derive(Debug)]
pub struct RevealHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    state: watch::Receiver<RevealState>,
}

impl RevealHandle {
    /// Stop the timer. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Snapshot of the current progress
    pub fn state(&self) -> RevealState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every tick
    pub fn subscribe(&self) -> watch::Receiver<RevealState> {
        self.state.clone()
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().is_active() && !self.cancel.is_cancelled()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start revealing `full_text`, one character per `cadence`.
///
/// Empty text reports an inactive state right away and schedules nothing.
/// `on_complete` runs once, on the tick that reveals the last character.
/// Must be called from within a tokio runtime.
pub fn start<F>(full_text: &str, cadence: Duration, on_complete: F) -> RevealHandle
where
    F: FnOnce() + Send + 'static,
{
    let initial = RevealState::new(full_text);
    let (tx, rx) = watch::channel(initial.clone());
    let cancel = CancellationToken::new();

    let task = if initial.is_active() {
        tracing::debug!(chars = full_text.chars().count(), ?cadence, "reveal started");
        Some(tokio::spawn(run(
            initial,
            tx,
            cadence.max(MIN_CADENCE),
            cancel.clone(),
            on_complete,
        )))
    } else {
        None
    };

    RevealHandle {
        cancel,
        task,
        state: rx,
    }
}

async fn run<F>(
    mut state: RevealState,
    tx: watch::Sender<RevealState>,
    cadence: Duration,
    cancel: CancellationToken,
    on_complete: F,
) where
    F: FnOnce(),
{
    let mut interval = time::interval_at(Instant::now() + cadence, cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(revealed = state.revealed_text().len(), "reveal cancelled");
                return;
            }
            _ = interval.tick() => {}
        }

        let tick = state.tick();
        tx.send_replace(state.clone());

        if tick != Tick::Advanced {
            if !cancel.is_cancelled() {
                tracing::debug!("reveal complete");
                on_complete();
            }
            return;
        }
    }
}

/// Revealer for a single message; at most one timer is live at a time.
#[derive(Debug, Default)]
pub struct Revealer {
    current: Option<RevealHandle>,
}

impl Revealer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any reveal in progress with a new one
    pub fn start<F>(
        &mut self,
        full_text: &str,
        cadence: Duration,
        on_complete: F,
    ) -> watch::Receiver<RevealState>
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let handle = start(full_text, cadence, on_complete);
        let rx = handle.subscribe();
        self.current = Some(handle);
        rx
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<RevealState> {
        self.current.as_ref().map(RevealHandle::state)
    }

    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(RevealHandle::is_active)
    }
}
