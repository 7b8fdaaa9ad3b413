#![doc = include_str!("../README.md")]

pub(crate) mod display;
pub(crate) mod noop;
pub(crate) mod operation;
pub(crate) mod runner;
pub(crate) mod sink;
#[cfg(feature = "layer")]
pub(crate) mod tracing;
pub mod util;
pub(crate) mod writer;


/// Re-exports of all public types and traits.
pub mod prelude {
    pub use crate::ProgressReporter;
    pub use crate::display::{ProgressDisplay, ProgressDisplayBuilder, reporter_for_stdout};
    pub use crate::noop::NoopProgressDisplay;
    pub use crate::operation::{Operation, OperationId, OperationStack};
    pub use crate::sink::{SharedBuffer, SyncWriter};
    #[cfg(feature = "layer")]
    pub use crate::tracing::ProgressLayer;
}

pub use crate::prelude::*;

/// Reports progress of nested, possibly concurrent operations.
///
/// Implemented by [`ProgressDisplay`], which draws to a terminal, and by
/// [`NoopProgressDisplay`], which does nothing. Code that reports progress
/// should depend on this trait only, so either can be swapped in.
///
/// Misuse is silent: finishing a label that is not in flight, updating with
/// nothing in flight, or calling anything after [`close`](Self::close) does
/// nothing and returns `Ok`. The only errors are I/O errors from the
/// underlying output, and the display's state is updated before the write is
/// attempted, so a failed write never leaves it inconsistent.
pub trait ProgressReporter: Send + Sync {
    /// Starts an operation nested under whatever is currently in flight.
    fn start(&self, label: &str) -> Result<(), std::io::Error>;

    /// Relabels the innermost operation.
    fn update(&self, label: &str) -> Result<(), std::io::Error>;

    /// Completes the most recently started operation named `label` with a
    /// `✓` line, annotated with its duration when it ran long.
    fn finish(&self, label: &str) -> Result<(), std::io::Error>;

    /// Completes the most recently started operation named `label` with a
    /// `✗` line carrying `error`'s message.
    fn fail(&self, label: &str, error: &dyn std::error::Error) -> Result<(), std::io::Error>;

    /// Whether any operation is in flight.
    fn is_active(&self) -> bool;

    /// Drops every operation without writing completion lines.
    fn clear(&self) -> Result<(), std::io::Error>;

    /// Stops the animation and wipes the spinner line, e.g. before prompting.
    fn pause(&self) -> Result<(), std::io::Error>;

    fn resume(&self) -> Result<(), std::io::Error>;

    fn is_paused(&self) -> bool;

    /// Starts an operation whose spinner stays up while accomplishments are
    /// logged beneath it.
    fn start_persistent(&self, label: &str) -> Result<(), std::io::Error>;

    /// Writes a permanent `✓` line. Works with or without a persistent
    /// operation in flight.
    fn log_accomplishment(&self, text: &str) -> Result<(), std::io::Error>;

    /// Completes the innermost persistent operation, writing `label` as its
    /// completion text.
    fn finish_persistent(&self, label: &str) -> Result<(), std::io::Error>;

    fn fail_persistent(&self, label: &str, error: &dyn std::error::Error)
    -> Result<(), std::io::Error>;

    /// Stops everything and restores the terminal. Idempotent.
    fn close(&self) -> Result<(), std::io::Error>;
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for std::sync::Arc<P> {
    fn start(&self, label: &str) -> Result<(), std::io::Error> {
        (**self).start(label)
    }

    fn update(&self, label: &str) -> Result<(), std::io::Error> {
        (**self).update(label)
    }

    fn finish(&self, label: &str) -> Result<(), std::io::Error> {
        (**self).finish(label)
    }

    fn fail(&self, label: &str, error: &dyn std::error::Error) -> Result<(), std::io::Error> {
        (**self).fail(label, error)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn clear(&self) -> Result<(), std::io::Error> {
        (**self).clear()
    }

    fn pause(&self) -> Result<(), std::io::Error> {
        (**self).pause()
    }

    fn resume(&self) -> Result<(), std::io::Error> {
        (**self).resume()
    }

    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn start_persistent(&self, label: &str) -> Result<(), std::io::Error> {
        (**self).start_persistent(label)
    }

    fn log_accomplishment(&self, text: &str) -> Result<(), std::io::Error> {
        (**self).log_accomplishment(text)
    }

    fn finish_persistent(&self, label: &str) -> Result<(), std::io::Error> {
        (**self).finish_persistent(label)
    }

    fn fail_persistent(
        &self, label: &str, error: &dyn std::error::Error,
    ) -> Result<(), std::io::Error> {
        (**self).fail_persistent(label, error)
    }

    fn close(&self) -> Result<(), std::io::Error> {
        (**self).close()
    }
}
