//! Callbacks through which a calculation reports to its host.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Receiver of calculation events.
///
/// A calculation calls `complete` or `error` exactly once, unless it was stopped,
/// in which case neither is called.
pub trait Observer {
    /// Progress of the calculation in `[0, 1]`. Values never decrease within one calculation.
    fn progress(&mut self, fraction: f64);

    /// Partial value of π before the final convergence.
    fn digits_update(&mut self, _partial: &str) {}

    /// The calculation finished with the validated value.
    fn complete(&mut self, result: &str);

    /// The calculation failed.
    fn error(&mut self, message: &str);

    /// Polled by the calculation. Returning true makes it abort at the next check.
    fn is_stopped(&self) -> bool {
        false
    }
}

impl<T: Observer + ?Sized> Observer for &mut T {
    fn progress(&mut self, fraction: f64) {
        (**self).progress(fraction)
    }

    fn digits_update(&mut self, partial: &str) {
        (**self).digits_update(partial)
    }

    fn complete(&mut self, result: &str) {
        (**self).complete(result)
    }

    fn error(&mut self, message: &str) {
        (**self).error(message)
    }

    fn is_stopped(&self) -> bool {
        (**self).is_stopped()
    }
}

/// Observer ignoring all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn progress(&mut self, _fraction: f64) {}

    fn complete(&mut self, _result: &str) {}

    fn error(&mut self, _message: &str) {}
}

/// Shared cancellation flag.
#[derive(Debug, Default, Clone)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a flag which is not set.
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Set the flag. Returns true if the flag was already set.
    pub fn stop(&self) -> bool {
        self.0.swap(true, Ordering::AcqRel)
    }

    /// Returns true if the flag is set.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Part of the overall `[0, 1]` progress range allotted to a phase of a calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    start: f64,
    end: f64,
}

impl Span {
    /// The whole range.
    pub const FULL: Span = Span { start: 0.0, end: 1.0 };

    /// Create a span. Bounds are clamped to `[0, 1]`.
    pub fn new(start: f64, end: f64) -> Self {
        let start = start.clamp(0.0, 1.0);
        Span {
            start,
            end: end.clamp(start, 1.0),
        }
    }

    /// Maps a local fraction of this span to the overall range.
    pub fn at(&self, local: f64) -> f64 {
        self.start + (self.end - self.start) * local.clamp(0.0, 1.0)
    }

    /// Returns the part of this span between the local fractions `start` and `end`.
    pub fn sub(&self, start: f64, end: f64) -> Span {
        Span::new(self.at(start), self.at(end))
    }
}

/// Progress tracker wrapping an observer. Keeps reported values non-decreasing.
pub struct Progress<'a> {
    observer: &'a mut dyn Observer,
    last: f64,
}

impl<'a> Progress<'a> {
    /// Wrap `observer`.
    pub fn new(observer: &'a mut dyn Observer) -> Self {
        Progress {
            observer,
            last: 0.0,
        }
    }

    /// Report overall progress `fraction`.
    pub fn report(&mut self, fraction: f64) {
        let f = fraction.clamp(self.last, 1.0);
        self.last = f;
        tracing::trace!(progress = f);
        self.observer.progress(f);
    }

    /// Report the local fraction `local` of `span`.
    pub fn report_in(&mut self, span: Span, local: f64) {
        self.report(span.at(local))
    }

    /// Pass a partial value to the observer.
    pub fn preview(&mut self, partial: &str) {
        self.observer.digits_update(partial);
    }

    /// Last reported value.
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Returns true if the observer requested to stop.
    pub fn is_stopped(&self) -> bool {
        self.observer.is_stopped()
    }
}
