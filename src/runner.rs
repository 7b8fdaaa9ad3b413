use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// What the animation loop asks for on every tick.
///
/// Implemented by the display's shared state. `tick` must take the same lock
/// that guards the operation stack, and must return `false` once the loop's
/// generation is stale; the loop then exits without drawing.
pub(crate) trait FrameSource: Send + Sync + 'static {
    fn tick(&self, generation: u64) -> bool;
}

/// Handle to the single live animation loop.
///
/// Dropping the handle without [`RenderTask::stop`] detaches the thread; it
/// still exits at its next tick because its generation is stale by then.
#[derive(Debug)]
pub(crate) struct RenderTask {
    generation: u64,
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl RenderTask {
    /// Spawns a loop that calls `source.tick(generation)` every `interval`
    /// until stopped or until the source reports a stale generation.
    pub(crate) fn spawn<S: FrameSource>(
        source: std::sync::Arc<S>, generation: u64, interval: Duration,
    ) -> Result<Self, std::io::Error> {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name("nested-progress-render".into())
            .spawn(move || {
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if !source.tick(generation) {
                        break;
                    }
                }
                tracing::trace!(generation, "render loop exited");
            })?;
        tracing::debug!(generation, ?interval, "render loop started");
        Ok(Self {
            generation,
            stop,
            handle,
        })
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Signals the loop and blocks until its thread has exited.
    ///
    /// Must not be called while holding the lock that [`FrameSource::tick`]
    /// takes, or the join can deadlock against a tick in progress.
    pub(crate) fn stop(self) {
        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            tracing::debug!(generation = self.generation, "render loop panicked");
        }
    }
}
