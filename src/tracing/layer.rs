use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use crate::ProgressReporter;

/// A `tracing` [`Layer`] that mirrors spans as operations on a
/// [`ProgressReporter`].
///
/// Opening a span starts an operation and closing it finishes it. Fields:
///
/// | field            | on    | effect                                      |
/// |------------------|-------|---------------------------------------------|
/// | `message`        | span  | label (defaults to the span name)           |
/// | `persistent`     | span  | `true` starts a persistent operation        |
/// | `error`          | span  | recorded before close, fails the operation  |
/// | `accomplishment` | event | logs an accomplishment line                 |
///
/// ```rust
/// use std::sync::Arc;
/// use nested_progress::{ProgressDisplay, ProgressLayer, SharedBuffer};
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let buffer = SharedBuffer::new();
/// let display = Arc::new(ProgressDisplay::new(buffer.clone()));
/// let subscriber = tracing_subscriber::registry().with(ProgressLayer::new(display.clone()));
///
/// tracing::subscriber::with_default(subscriber, || {
///     let deploy = tracing::info_span!("deploy", persistent = true);
///     deploy.in_scope(|| tracing::info!(accomplishment = "Built container"));
/// });
/// assert!(buffer.contents().contains("✓ deploy"));
/// ```
#[derive(Debug)]
pub struct ProgressLayer<P> {
    reporter: P,
}

impl<P: ProgressReporter + 'static> ProgressLayer<P> {
    pub fn new(reporter: P) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }
}

/// Stored in span extensions between open and close.
#[derive(Debug)]
struct SpanOperation {
    label: String,
    persistent: bool,
    error: Option<String>,
}

#[derive(Debug)]
struct ReportedError(String);

impl std::fmt::Display for ReportedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ReportedError {}

impl<S, P> Layer<S> for ProgressLayer<P>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    P: ProgressReporter + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);

        let op = SpanOperation {
            label: fields
                .message
                .unwrap_or_else(|| attrs.metadata().name().to_owned()),
            persistent: fields.persistent,
            error: fields.error,
        };
        let _ = match op.persistent {
            true => self.reporter.start_persistent(&op.label),
            false => self.reporter.start(&op.label),
        };

        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(op);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut fields = SpanFields::default();
        values.record(&mut fields);
        let (Some(error), Some(span)) = (fields.error, ctx.span(id)) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(op) = extensions.get_mut::<SpanOperation>() {
            op.error = Some(error);
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(op) = span.extensions_mut().remove::<SpanOperation>() else {
            return;
        };
        let _ = match (op.persistent, op.error) {
            (false, None) => self.reporter.finish(&op.label),
            (true, None) => self.reporter.finish_persistent(&op.label),
            (false, Some(error)) => self.reporter.fail(&op.label, &ReportedError(error)),
            (true, Some(error)) => self.reporter.fail_persistent(&op.label, &ReportedError(error)),
        };
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = SpanFields::default();
        event.record(&mut fields);
        if let Some(text) = fields.accomplishment {
            let _ = self.reporter.log_accomplishment(&text);
        }
    }
}

#[derive(Debug, Default)]
struct SpanFields {
    message: Option<String>,
    persistent: bool,
    error: Option<String>,
    accomplishment: Option<String>,
}

impl SpanFields {
    fn slot(&mut self, field: &Field) -> Option<&mut Option<String>> {
        match field.name() {
            "message" => Some(&mut self.message),
            "error" => Some(&mut self.error),
            "accomplishment" => Some(&mut self.accomplishment),
            _ => None,
        }
    }
}

impl Visit for SpanFields {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "persistent" {
            self.persistent = value;
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let Some(slot) = self.slot(field) {
            *slot = Some(value.to_owned());
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        if let Some(slot) = self.slot(field) {
            *slot = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if let Some(slot) = self.slot(field) {
            *slot = Some(format!("{value:?}"));
        }
    }
}
