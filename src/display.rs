use std::io::{IsTerminal, Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::noop::NoopProgressDisplay;
use crate::operation::{Operation, OperationStack};
use crate::runner::{FrameSource, RenderTask};
use crate::sink::SyncWriter;
use crate::util::{Glyphs, Spinner};
use crate::writer::{Terminal, accomplishment_line, failure_line, success_line};
use crate::ProgressReporter;

/// Configures and builds a [`ProgressDisplay`].
///
/// ```rust
/// use std::time::Duration;
/// use nested_progress::{ProgressDisplay, SharedBuffer};
/// use nested_progress::util::Spinner;
///
/// let display = ProgressDisplay::builder()
///     .interval(Duration::from_millis(50))
///     .timing_threshold(Duration::from_millis(250))
///     .spinner(Spinner::line())
///     .build(SharedBuffer::new());
/// ```
#[derive(Debug, Clone)]
pub struct ProgressDisplayBuilder {
    interval: Duration,
    timing_threshold: Duration,
    spinner: Spinner,
    colors: bool,
}

impl Default for ProgressDisplayBuilder {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(80),
            timing_threshold: Duration::from_millis(100),
            spinner: Spinner::dots(),
            colors: false,
        }
    }
}

impl ProgressDisplayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repaint interval of the spinner line.
    pub fn interval(mut self, d: Duration) -> Self {
        self.interval = d;
        self
    }

    /// Operations running at least this long get a `(took Nms)` annotation.
    pub fn timing_threshold(mut self, d: Duration) -> Self {
        self.timing_threshold = d;
        self
    }

    pub fn spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    /// Paint the completion glyphs green and red.
    pub fn colors(mut self, yes: bool) -> Self {
        self.colors = yes;
        self
    }

    pub fn build<W: Write + Send + 'static>(self, writer: W) -> ProgressDisplay<W> {
        let glyphs = match self.colors {
            true => Glyphs::colored(),
            false => Glyphs::plain(),
        };
        let state = State {
            stack: OperationStack::new(),
            term: Terminal::new(SyncWriter::new(writer)),
            spinner: self.spinner,
            glyphs,
            interval: self.interval,
            timing_threshold: self.timing_threshold,
            paused: false,
            closed: false,
            driver: None,
            retired: None,
            generation: 0,
        };
        ProgressDisplay {
            shared: Arc::new(Shared {
                calls: Mutex::new(()),
                state: Mutex::new(state),
            }),
        }
    }
}

/// Renders nested, concurrently-running operations as spinner lines that
/// collapse into `✓`/`✗` completion lines.
///
/// All methods take `&self`; share the display between threads with an
/// [`Arc`]. Only one display should drive a given terminal at a time, since
/// each instance assumes it owns the cursor.
///
/// ```rust
/// use nested_progress::{ProgressDisplay, ProgressReporter, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let display = ProgressDisplay::new(buffer.clone());
///
/// display.start("Setting up environment")?;
/// display.start("Downloading dependencies")?;
/// display.finish("Downloading dependencies")?;
/// assert!(display.is_active());
/// display.finish("Setting up environment")?;
/// assert!(!display.is_active());
///
/// assert!(buffer.contents().contains("✓ Setting up environment"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ProgressDisplay<W: Write + Send + 'static = Stdout> {
    shared: Arc<Shared<W>>,
}

struct Shared<W> {
    /// Serializes public calls, so a stopped render loop is joined before the
    /// next call can spawn another.
    calls: Mutex<()>,
    state: Mutex<State<W>>,
}

struct State<W> {
    stack: OperationStack,
    term: Terminal<W>,
    spinner: Spinner,
    glyphs: Glyphs,
    interval: Duration,
    timing_threshold: Duration,
    paused: bool,
    closed: bool,
    driver: Option<RenderTask>,
    /// A loop disarmed during the current call, joined once the state lock
    /// is released.
    retired: Option<RenderTask>,
    /// Generation of the live loop. Frames from any other generation are
    /// discarded.
    generation: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ProgressDisplay<Stdout> {
    /// A display writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn builder() -> ProgressDisplayBuilder {
        ProgressDisplayBuilder::new()
    }
}

impl Default for ProgressDisplay<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send + 'static> ProgressDisplay<W> {
    /// A display with default settings writing to `writer`.
    pub fn new(writer: W) -> Self {
        ProgressDisplayBuilder::new().build(writer)
    }

    /// Snapshot of the in-flight operations, outermost first.
    pub fn operations(&self) -> Vec<Operation> {
        lock(&self.shared.state).stack.iter().cloned().collect()
    }

    fn call<T>(&self, f: impl FnOnce(&mut State<W>, &Arc<Shared<W>>) -> T) -> T {
        let _serial = lock(&self.shared.calls);
        let (out, retired) = {
            let mut state = lock(&self.shared.state);
            let out = f(&mut *state, &self.shared);
            (out, state.retired.take())
        };
        if let Some(task) = retired {
            task.stop();
        }
        out
    }

    fn push(&self, label: &str, persistent: bool) -> Result<(), std::io::Error> {
        self.call(|state, shared| {
            if state.closed {
                return Ok(());
            }
            let id = state.stack.push(label, persistent);
            tracing::debug!(?id, label, persistent, depth = state.stack.len() - 1, "operation started");
            state.arm(shared)
        })
    }
}

impl<W: Write + Send + 'static> State<W> {
    /// Draws the top immediately and makes sure a render loop is running.
    fn arm(&mut self, shared: &Arc<Shared<W>>) -> Result<(), std::io::Error> {
        if self.paused || self.closed || self.stack.is_empty() {
            return Ok(());
        }
        if self.driver.is_none() {
            self.generation += 1;
            let task = RenderTask::spawn(Arc::clone(shared), self.generation, self.interval)?;
            self.driver = Some(task);
        }
        self.term.hide_cursor()?;
        self.draw_top()
    }

    fn disarm(&mut self) {
        if let Some(task) = self.driver.take() {
            self.generation += 1;
            tracing::debug!(generation = task.generation(), "render loop disarmed");
            self.retired = Some(task);
        }
    }

    fn armed(&self) -> bool {
        self.driver.is_some() && !self.paused
    }

    fn draw_top(&mut self) -> Result<(), std::io::Error> {
        match self.stack.top() {
            Some(top) => self
                .term
                .draw_progress(self.spinner.frame(), top.depth(), top.label()),
            None => Ok(()),
        }
    }

    /// Writes a completion line for an operation that was just popped, then
    /// points the loop at the new top or shuts it down.
    fn settle(&mut self, shared: &Arc<Shared<W>>, line: &str) -> Result<(), std::io::Error> {
        if self.stack.is_empty() {
            self.disarm();
        }
        let written = self.term.write_line(line);
        let redrawn = match self.stack.is_empty() {
            true => self.term.show_cursor(),
            false => self.arm(shared),
        };
        written.and(redrawn)
    }

    /// Drops every operation and gives the terminal back.
    fn reset(&mut self) -> Result<(), std::io::Error> {
        self.stack.clear();
        self.disarm();
        self.spinner.reset();
        self.term.release()
    }
}

impl<W: Write + Send + 'static> FrameSource for Shared<W> {
    fn tick(&self, generation: u64) -> bool {
        let mut state = lock(&self.state);
        if state.generation != generation || !state.armed() || state.stack.is_empty() {
            return false;
        }
        state.spinner.tick();
        if let Err(error) = state.draw_top() {
            tracing::debug!(%error, "dropped spinner frame");
        }
        true
    }
}

impl<W: Write + Send + 'static> ProgressReporter for ProgressDisplay<W> {
    fn start(&self, label: &str) -> Result<(), std::io::Error> {
        self.push(label, false)
    }

    fn update(&self, label: &str) -> Result<(), std::io::Error> {
        self.call(|state, _| {
            if state.closed || !state.stack.update_label(label) {
                return Ok(());
            }
            match state.armed() {
                true => state.draw_top(),
                false => Ok(()),
            }
        })
    }

    fn finish(&self, label: &str) -> Result<(), std::io::Error> {
        self.call(|state, shared| {
            if state.closed {
                return Ok(());
            }
            let Some(op) = state.stack.pop(label, false) else {
                tracing::trace!(label, "finish without a matching operation");
                return Ok(());
            };
            tracing::debug!(id = ?op.id(), label, elapsed = ?op.elapsed(), "operation finished");
            let line = success_line(
                &state.glyphs,
                op.depth(),
                label,
                op.elapsed(),
                state.timing_threshold,
            );
            state.settle(shared, &line)
        })
    }

    fn fail(&self, label: &str, error: &dyn std::error::Error) -> Result<(), std::io::Error> {
        self.call(|state, shared| {
            if state.closed {
                return Ok(());
            }
            let Some(op) = state.stack.pop(label, false) else {
                tracing::trace!(label, "fail without a matching operation");
                return Ok(());
            };
            tracing::debug!(id = ?op.id(), label, %error, "operation failed");
            let line = failure_line(&state.glyphs, op.depth(), label, error);
            state.settle(shared, &line)
        })
    }

    fn is_active(&self) -> bool {
        let state = lock(&self.shared.state);
        !state.closed && !state.stack.is_empty()
    }

    fn clear(&self) -> Result<(), std::io::Error> {
        self.call(|state, _| {
            if state.closed {
                return Ok(());
            }
            tracing::debug!(dropped = state.stack.len(), "display cleared");
            state.reset()
        })
    }

    fn pause(&self) -> Result<(), std::io::Error> {
        self.call(|state, _| {
            if state.closed || state.paused {
                return Ok(());
            }
            state.paused = true;
            state.disarm();
            tracing::debug!("display paused");
            state.term.release()
        })
    }

    fn resume(&self) -> Result<(), std::io::Error> {
        self.call(|state, shared| {
            if state.closed || !state.paused {
                return Ok(());
            }
            state.paused = false;
            tracing::debug!(active = state.stack.len(), "display resumed");
            state.arm(shared)
        })
    }

    fn is_paused(&self) -> bool {
        lock(&self.shared.state).paused
    }

    fn start_persistent(&self, label: &str) -> Result<(), std::io::Error> {
        self.push(label, true)
    }

    fn log_accomplishment(&self, text: &str) -> Result<(), std::io::Error> {
        self.call(|state, _| {
            if state.closed {
                return Ok(());
            }
            let depth = state.stack.log_accomplishment(text).unwrap_or(0);
            tracing::trace!(text, depth, "accomplishment logged");
            let line = accomplishment_line(&state.glyphs, depth, text);
            state.term.write_line(&line)?;
            match state.armed() {
                true => state.draw_top(),
                false => Ok(()),
            }
        })
    }

    fn finish_persistent(&self, label: &str) -> Result<(), std::io::Error> {
        self.call(|state, shared| {
            if state.closed {
                return Ok(());
            }
            let Some(op) = state.stack.pop_persistent(label) else {
                tracing::trace!(label, "finish_persistent without a persistent operation");
                return Ok(());
            };
            tracing::debug!(
                id = ?op.id(),
                header = op.label(),
                accomplishments = op.accomplishments().len(),
                "persistent operation finished"
            );
            let line = success_line(
                &state.glyphs,
                op.depth(),
                label,
                op.elapsed(),
                state.timing_threshold,
            );
            state.settle(shared, &line)
        })
    }

    fn fail_persistent(
        &self, label: &str, error: &dyn std::error::Error,
    ) -> Result<(), std::io::Error> {
        self.call(|state, shared| {
            if state.closed {
                return Ok(());
            }
            let Some(op) = state.stack.pop_persistent(label) else {
                tracing::trace!(label, "fail_persistent without a persistent operation");
                return Ok(());
            };
            tracing::debug!(id = ?op.id(), header = op.label(), %error, "persistent operation failed");
            let line = failure_line(&state.glyphs, op.depth(), label, error);
            state.settle(shared, &line)
        })
    }

    fn close(&self) -> Result<(), std::io::Error> {
        self.call(|state, _| {
            if state.closed {
                return Ok(());
            }
            state.closed = true;
            state.paused = false;
            tracing::debug!(
                dropped = state.stack.len(),
                cursor_hidden = state.term.cursor_hidden(),
                "display closed"
            );
            state.reset()
        })
    }
}

impl<W: Write + Send + 'static> Drop for ProgressDisplay<W> {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::debug!(%error, "failed to restore terminal on drop");
        }
    }
}

impl<W: Write + Send + 'static> std::fmt::Debug for ProgressDisplay<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.shared.state);
        f.debug_struct("ProgressDisplay")
            .field("operations", &state.stack.len())
            .field("paused", &state.paused)
            .field("closed", &state.closed)
            .field("armed", &state.driver.is_some())
            .finish()
    }
}

/// A [`ProgressDisplay`] on standard output when it is a terminal, a
/// [`NoopProgressDisplay`] otherwise.
pub fn reporter_for_stdout() -> Box<dyn ProgressReporter> {
    let stdout = std::io::stdout();
    match stdout.is_terminal() {
        true => Box::new(ProgressDisplay::new(stdout)),
        false => Box::new(NoopProgressDisplay::new()),
    }
}
