//! Background calculation on a dedicated thread.

use crate::calc::CalculationRequest;
use crate::calc::CalculationResult;
use crate::calc::Calculator;
use crate::defs::Error;
use crate::observer::Observer;
use crate::observer::StopFlag;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;

/// Name of the worker thread.
pub const WORKER_THREAD_NAME: &str = "pi-worker";

/// Handle of a calculation running on its own thread.
#[derive(Debug)]
pub struct Worker {
    stop: StopFlag,
    handle: JoinHandle<Option<CalculationResult>>,
}

impl Worker {
    /// Starts `request` on a new thread. Events are delivered to `observer` on that thread.
    ///
    /// ## Errors
    ///
    ///  - Spawn: the thread could not be created.
    pub fn spawn<O>(calculator: Calculator, request: CalculationRequest, observer: O) -> Result<Self, Error>
    where
        O: Observer + Send + 'static,
    {
        let stop = StopFlag::new();
        let mut observer = Stoppable {
            inner: observer,
            stop: stop.clone(),
        };

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || calculator.run(&request, &mut observer))
            .map_err(|e| Error::Spawn(e.to_string()))?;

        tracing::debug!(algorithm = %request.algorithm(), digits = request.digits(), "worker started");

        Ok(Worker { stop, handle })
    }

    /// Requests the calculation to stop. Returns true if a stop was already requested.
    pub fn stop(&self) -> bool {
        self.stop.stop()
    }

    /// Returns the flag stopping this calculation.
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Returns true if the thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the thread to finish. Returns the result, or `None` if the calculation
    /// failed or was stopped.
    pub fn join(self) -> Option<CalculationResult> {
        match self.handle.join() {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }
}

// Observer which is also stopped by the worker's flag.
struct Stoppable<O> {
    inner: O,
    stop: StopFlag,
}

impl<O: Observer> Observer for Stoppable<O> {
    fn progress(&mut self, fraction: f64) {
        self.inner.progress(fraction)
    }

    fn digits_update(&mut self, partial: &str) {
        self.inner.digits_update(partial)
    }

    fn complete(&mut self, result: &str) {
        self.inner.complete(result)
    }

    fn error(&mut self, message: &str) {
        self.inner.error(message)
    }

    fn is_stopped(&self) -> bool {
        self.stop.is_stopped() || self.inner.is_stopped()
    }
}

/// Calculation event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Progress in `[0, 1]`.
    Progress(f64),

    /// Partial value.
    Digits(String),

    /// Final value.
    Complete(String),

    /// Failure description.
    Error(String),
}

/// Observer sending events over a channel. Once the receiver is dropped the calculation
/// is stopped.
#[derive(Debug)]
pub struct ChannelObserver {
    tx: Sender<Event>,
    disconnected: bool,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        (
            ChannelObserver {
                tx,
                disconnected: false,
            },
            rx,
        )
    }

    fn send(&mut self, event: Event) {
        if self.tx.send(event).is_err() {
            self.disconnected = true;
        }
    }
}

impl Observer for ChannelObserver {
    fn progress(&mut self, fraction: f64) {
        self.send(Event::Progress(fraction))
    }

    fn digits_update(&mut self, partial: &str) {
        self.send(Event::Digits(partial.to_owned()))
    }

    fn complete(&mut self, result: &str) {
        self.send(Event::Complete(result.to_owned()))
    }

    fn error(&mut self, message: &str) {
        self.send(Event::Error(message.to_owned()))
    }

    fn is_stopped(&self) -> bool {
        self.disconnected
    }
}
