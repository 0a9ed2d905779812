//! Background animation tasks.
//!
//! An [`AnimationTask`] moves an [`Animator`] onto a dedicated thread that
//! produces one frame per interval and publishes it over an `mpsc` channel.
//! The owning model drains frames on its own thread (`Model::tick`), so model
//! state is never written by two threads.
//!
//! # Cancellation
//!
//! Cancellation is cooperative: the worker waits for the next frame on an
//! explicit stop channel (`recv_timeout`), so a stop request is observed
//! within one frame interval. [`AnimationTask::stop`] and `Drop` both signal
//! and then join the thread.
//!
//! ```text
//! owner thread                    worker thread
//! ────────────                    ─────────────
//! spawn(animator) ──────────────▶ loop {
//!                                   stop_rx.recv_timeout(interval)?
//! drain() ◀── frames ──────────────  animator.next_frame()
//! stop() ──── stop ──────────────▶ }
//! ```

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{DemoError, DemoResult};

/// Produces animation frames on a worker thread.
pub trait Animator: Send + 'static {
    /// Frame published to the owner.
    type Frame: Send + 'static;

    /// Advance by `dt` and return the next frame, or `None` when finished.
    fn next_frame(&mut self, dt: Duration) -> Option<Self::Frame>;
}

/// Handle to a running animation.
#[derive(Debug)]
pub struct AnimationTask<F> {
    name: String,
    frames: Receiver<F>,
    stop: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl<F: Send + 'static> AnimationTask<F> {
    /// Spawn `animator` on a named thread producing a frame every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Animation`] if the thread cannot be spawned.
    pub fn spawn<A>(name: &str, mut animator: A, interval: Duration) -> DemoResult<Self>
    where
        A: Animator<Frame = F>,
    {
        let (frame_tx, frame_rx) = mpsc::channel::<F>();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_name = name.to_string();

        let handle = thread::Builder::new()
            .name(format!("anim-{name}"))
            .spawn(move || {
                let mut frames = 0_u64;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                    let Some(frame) = animator.next_frame(interval) else {
                        break;
                    };
                    if frame_tx.send(frame).is_err() {
                        break;
                    }
                    frames += 1;
                }
                trace!(task = %thread_name, frames, "animation loop exited");
            })
            .map_err(|e| DemoError::animation(format!("cannot spawn '{name}': {e}")))?;

        debug!(task = name, interval_ms = interval.as_millis(), "animation started");
        Ok(Self {
            name: name.to_string(),
            frames: frame_rx,
            stop: stop_tx,
            handle: Some(handle),
        })
    }

    /// Task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All frames published since the last drain, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<F> {
        self.frames.try_iter().collect()
    }

    /// Most recent pending frame, discarding older ones.
    #[must_use]
    pub fn latest(&self) -> Option<F> {
        self.frames.try_iter().last()
    }

    /// Whether the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the animator finishes on its own, then return the
    /// remaining frames. Never returns for endless animations.
    #[must_use]
    pub fn wait(mut self) -> Vec<F> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.drain()
    }

    /// Signal the worker to stop and join it.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!(task = %self.name, "animation stopped");
        }
    }
}

impl<F> Drop for AnimationTask<F> {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Countdown(u32);

    impl Animator for Countdown {
        type Frame = u32;

        fn next_frame(&mut self, _dt: Duration) -> Option<u32> {
            if self.0 == 0 {
                return None;
            }
            self.0 -= 1;
            Some(self.0)
        }
    }

    struct Endless(Arc<AtomicUsize>);

    impl Animator for Endless {
        type Frame = usize;

        fn next_frame(&mut self, _dt: Duration) -> Option<usize> {
            Some(self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    #[test]
    fn test_finite_animation_runs_to_completion() {
        let task = AnimationTask::spawn("countdown", Countdown(5), Duration::from_millis(1))
            .expect("spawn");
        assert_eq!(task.name(), "countdown");
        let frames = task.wait();
        assert_eq!(frames, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_stop_ends_endless_animation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = AnimationTask::spawn(
            "endless",
            Endless(Arc::clone(&counter)),
            Duration::from_millis(1),
        )
        .expect("spawn");
        std::thread::sleep(Duration::from_millis(20));
        task.stop();

        let after_stop = counter.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_drop_joins_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _task = AnimationTask::spawn(
                "dropped",
                Endless(Arc::clone(&counter)),
                Duration::from_millis(1),
            )
            .expect("spawn");
            std::thread::sleep(Duration::from_millis(5));
        }
        let after_drop = counter.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(counter.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn test_latest_discards_older_frames() {
        let task = AnimationTask::spawn("latest", Countdown(3), Duration::from_millis(1))
            .expect("spawn");
        while !task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(task.latest(), Some(0));
        assert!(task.drain().is_empty());
    }
}
