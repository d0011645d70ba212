//! Timer Actor: Dedicated thread for delivering delayed events.
//!
//! This actor carries out [`Command::Schedule`](super::Command::Schedule)
//! for the host: each request is queued with a deadline and the event is
//! sent on the shared event channel once the deadline passes. The main loop
//! never sleeps on a timer itself.
//!
//! Scheduled events cannot be cancelled. A blink that arrives for a widget
//! that is gone is simply ignored by the host.

use super::messages::Event;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Longest the timer thread waits before re-checking the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// An event waiting for its deadline.
#[derive(Debug)]
struct Pending {
    deadline: Instant,
    /// Arrival order, so equal deadlines fire first-come first-served.
    seq: u64,
    event: Event,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// Timer actor that sends events after a delay.
pub struct TimerActor {
    /// Handle to the timer thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Requests for the timer thread.
    request_tx: Sender<(Instant, Event)>,
}

impl TimerActor {
    /// Spawn the timer thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel the delayed events are delivered on.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the timer thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn(sender: Sender<Event>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let (request_tx, request_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("flywheel-timer".to_string())
            .spawn(move || {
                Self::run_loop(&request_rx, &sender, &shutdown_clone);
            })
            .expect("Failed to spawn timer thread");

        Self {
            handle: Some(handle),
            shutdown,
            request_tx,
        }
    }

    /// Deliver `event` once `delay` has elapsed.
    pub fn schedule(&self, delay: Duration, event: Event) {
        let deadline = Instant::now() + delay;
        if self.request_tx.send((deadline, event)).is_err() {
            tracing::warn!(target: "actor.timer", "timer thread is gone; dropping scheduled event");
        }
    }

    /// Signal the timer to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the timer thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main timer loop.
    fn run_loop(requests: &Receiver<(Instant, Event)>, sender: &Sender<Event>, shutdown: &AtomicBool) {
        let mut pending: BinaryHeap<Reverse<Pending>> = BinaryHeap::new();
        let mut seq = 0u64;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Fire everything that is due
            let now = Instant::now();
            while pending.peek().is_some_and(|Reverse(next)| next.deadline <= now) {
                let Some(Reverse(due)) = pending.pop() else { break };
                tracing::trace!(target: "actor.timer", event = ?due.event, "fire");
                if sender.send(due.event).is_err() {
                    // Receiver dropped, exit
                    return;
                }
            }

            let wait = pending
                .peek()
                .map_or(POLL_INTERVAL, |Reverse(next)| next.deadline.saturating_duration_since(now))
                .min(POLL_INTERVAL);

            match requests.recv_timeout(wait) {
                Ok((deadline, event)) => {
                    pending.push(Reverse(Pending { deadline, seq, event }));
                    seq += 1;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

impl Drop for TimerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
