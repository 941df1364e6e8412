use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use thiserror::Error;

use crate::engine::action_consumer::ActionConsumer;
use crate::engine::engine_logger::EngineLogger;
use crate::engine::gesture_classifier::GestureClassifier;
use crate::landmarks::domain::landmark_provider::LandmarkProvider;
use crate::shared::gesture::GestureEvent;

pub type SharedProvider = Arc<Mutex<Box<dyn LandmarkProvider>>>;
pub type SharedConsumer = Arc<Mutex<Box<dyn ActionConsumer>>>;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("failed to spawn tick thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("tick thread panicked")]
    Panicked,
}

/// Why a session's tick loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Cancelled by `disable`.
    Disabled,
    /// The provider reported it will produce no more frames.
    Exhausted,
}

/// Cooperative tick loop for one detection session.
///
/// One tick = request a frame, classify it, deliver any event. Ticks never
/// overlap, so the classifier's session state has a single writer. The
/// cancellation flag is checked before each request, after each request
/// resolves, and under the consumer lock before delivery.
pub struct TickScheduler {
    provider: SharedProvider,
    consumer: SharedConsumer,
    classifier: GestureClassifier,
    logger: Box<dyn EngineLogger>,
    cancelled: Arc<AtomicBool>,
}

impl TickScheduler {
    pub fn new(
        provider: SharedProvider,
        consumer: SharedConsumer,
        classifier: GestureClassifier,
        logger: Box<dyn EngineLogger>,
    ) -> Self {
        Self {
            provider,
            consumer,
            classifier,
            logger,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs the loop on the calling thread until cancelled or exhausted.
    pub fn run(mut self) -> SessionEnd {
        let end = loop {
            if self.is_cancelled() {
                break SessionEnd::Disabled;
            }

            let result = lock(&self.provider).next_frame();

            if self.is_cancelled() {
                log::debug!("Discarding landmark result that resolved after disable");
                break SessionEnd::Disabled;
            }

            match result {
                Ok(frame) => {
                    if let Some(event) = self.classifier.process(&frame, self.logger.as_mut()) {
                        self.deliver(event);
                    }
                }
                Err(e) if e.is_terminal() => {
                    log::info!("Landmark stream ended: {e}");
                    break SessionEnd::Exhausted;
                }
                Err(e) => self.logger.provider_failure(&e.to_string()),
            }
        };

        self.logger.summary();
        end
    }

    /// Runs the loop on a dedicated thread.
    pub fn spawn(self) -> Result<SessionHandle, SchedulerError> {
        let cancelled = self.cancelled.clone();
        let consumer = self.consumer.clone();
        let handle = std::thread::Builder::new()
            .name("gesture-tick".to_string())
            .spawn(move || self.run())
            .map_err(SchedulerError::Spawn)?;
        Ok(SessionHandle {
            cancelled,
            consumer,
            handle,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn deliver(&self, event: GestureEvent) {
        let mut consumer = lock(&self.consumer);
        if self.is_cancelled() {
            log::debug!("Dropping {} emitted after disable", event.code());
            return;
        }
        consumer.on_gesture(event);
    }
}

/// Control handle for a running tick loop.
pub struct SessionHandle {
    cancelled: Arc<AtomicBool>,
    consumer: SharedConsumer,
    handle: JoinHandle<SessionEnd>,
}

impl SessionHandle {
    /// Stops the session without waiting for an in-flight frame request.
    ///
    /// Once this returns, the session will never invoke the consumer again.
    /// Must not be called from inside `ActionConsumer::on_gesture`.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Waits out a delivery that passed its flag check before the store.
        drop(lock(&self.consumer));
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<SessionEnd, SchedulerError> {
        self.handle.join().map_err(|_| SchedulerError::Panicked)
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::detection::domain::pointing_detector::tests::pointing_hand;
    use crate::engine::engine_logger::NullEngineLogger;
    use crate::landmarks::domain::frame::Frame;
    use crate::landmarks::domain::landmark_provider::ProviderError;
    use crate::shared::gesture::GestureCode;
    use crossbeam_channel::{Receiver, Sender};
    use std::collections::VecDeque;

    /// Replays a fixed script, then reports exhaustion.
    pub(crate) struct ScriptedProvider {
        script: VecDeque<Result<Frame, ProviderError>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(script: Vec<Result<Frame, ProviderError>>) -> Self {
            Self {
                script: script.into(),
            }
        }
    }

    impl LandmarkProvider for ScriptedProvider {
        fn next_frame(&mut self) -> Result<Frame, ProviderError> {
            self.script.pop_front().unwrap_or(Err(ProviderError::Exhausted))
        }
    }

    /// Blocks each request until the test feeds a result, announcing
    /// every request it receives.
    pub(crate) struct GatedProvider {
        requested: Sender<()>,
        results: Receiver<Result<Frame, ProviderError>>,
    }

    impl GatedProvider {
        pub(crate) fn new() -> (Self, Receiver<()>, Sender<Result<Frame, ProviderError>>) {
            let (req_tx, req_rx) = crossbeam_channel::unbounded();
            let (res_tx, res_rx) = crossbeam_channel::unbounded();
            let provider = Self {
                requested: req_tx,
                results: res_rx,
            };
            (provider, req_rx, res_tx)
        }
    }

    impl LandmarkProvider for GatedProvider {
        fn next_frame(&mut self) -> Result<Frame, ProviderError> {
            let _ = self.requested.send(());
            self.results.recv().unwrap_or(Err(ProviderError::Exhausted))
        }
    }

    pub(crate) fn recording_consumer() -> (SharedConsumer, Arc<Mutex<Vec<GestureEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let consumer: Box<dyn ActionConsumer> =
            Box::new(move |event: GestureEvent| sink.lock().unwrap().push(event));
        (Arc::new(Mutex::new(consumer)), events)
    }

    fn scheduler(provider: Box<dyn LandmarkProvider>, consumer: SharedConsumer) -> TickScheduler {
        TickScheduler::new(
            Arc::new(Mutex::new(provider)),
            consumer,
            GestureClassifier::default(),
            Box::new(NullEngineLogger),
        )
    }

    fn pointing(t: u64, offset: f64) -> Frame {
        Frame::new(t, 640, None, vec![pointing_hand(offset)])
    }

    #[test]
    fn test_runs_until_exhausted_and_delivers_events() {
        let provider = ScriptedProvider::new(vec![
            Ok(pointing(0, 0.06)),
            Ok(pointing(800, -0.06)),
        ]);
        let (consumer, events) = recording_consumer();

        let end = scheduler(Box::new(provider), consumer).run();

        assert_eq!(end, SessionEnd::Exhausted);
        let codes: Vec<GestureCode> = events.lock().unwrap().iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec![GestureCode::NextSection, GestureCode::PreviousSection]);
    }

    #[test]
    fn test_provider_failure_is_not_fatal() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Estimation("model hiccup".into())),
            Ok(pointing(0, 0.06)),
            Err(ProviderError::Estimation("again".into())),
            Ok(pointing(1000, -0.06)),
        ]);
        let (consumer, events) = recording_consumer();

        let end = scheduler(Box::new(provider), consumer).run();

        assert_eq!(end, SessionEnd::Exhausted);
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_cancel_before_start_never_requests() {
        let (provider, requested, _results) = GatedProvider::new();
        let (consumer, _events) = recording_consumer();
        let sched = scheduler(Box::new(provider), consumer);
        sched.cancelled.store(true, Ordering::SeqCst);

        assert_eq!(sched.run(), SessionEnd::Disabled);
        assert!(requested.try_recv().is_err());
    }

    #[test]
    fn test_result_resolving_after_cancel_is_discarded() {
        let (provider, requested, results) = GatedProvider::new();
        let (consumer, events) = recording_consumer();
        let handle = scheduler(Box::new(provider), consumer).spawn().unwrap();

        requested.recv().unwrap();
        handle.cancel();
        results.send(Ok(pointing(0, 0.06))).unwrap();

        assert_eq!(handle.join().unwrap(), SessionEnd::Disabled);
        assert!(events.lock().unwrap().is_empty());
        assert!(requested.try_recv().is_err());
    }

    #[test]
    fn test_spawned_loop_processes_ticks_in_order() {
        let (provider, requested, results) = GatedProvider::new();
        let (consumer, events) = recording_consumer();
        let handle = scheduler(Box::new(provider), consumer).spawn().unwrap();

        requested.recv().unwrap();
        results.send(Ok(pointing(0, 0.06))).unwrap();
        // The next request only arrives once the previous tick finished.
        requested.recv().unwrap();
        assert_eq!(events.lock().unwrap().len(), 1);

        results.send(Err(ProviderError::Exhausted)).unwrap();
        assert_eq!(handle.join().unwrap(), SessionEnd::Exhausted);
    }
}
