//! Drive a [`ProgressReporter`](crate::ProgressReporter) from `tracing` spans.

mod layer;

pub use layer::ProgressLayer;
