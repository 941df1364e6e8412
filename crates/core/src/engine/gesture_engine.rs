use std::sync::{Arc, Mutex};

use crate::engine::action_consumer::ActionConsumer;
use crate::engine::engine_config::EngineConfig;
use crate::engine::engine_logger::{EngineLogger, LogEngineLogger};
use crate::engine::gesture_classifier::GestureClassifier;
use crate::engine::tick_scheduler::{
    SchedulerError, SessionEnd, SessionHandle, SharedConsumer, SharedProvider, TickScheduler,
};
use crate::landmarks::domain::landmark_provider::LandmarkProvider;

type LoggerFactory = Box<dyn Fn() -> Box<dyn EngineLogger> + Send>;

/// Control surface of the gesture engine: `enable` / `disable`.
///
/// Each enable starts a fresh session (new timers, cooldowns, and debounce
/// history) on its own tick thread; disable stops it and discards that
/// state. Nothing carries over between sessions.
pub struct GestureEngine {
    config: EngineConfig,
    provider: SharedProvider,
    consumer: SharedConsumer,
    logger_factory: LoggerFactory,
    session: Option<SessionHandle>,
}

impl GestureEngine {
    pub fn new(
        config: EngineConfig,
        provider: Box<dyn LandmarkProvider>,
        consumer: Box<dyn ActionConsumer>,
    ) -> Self {
        Self {
            config,
            provider: Arc::new(Mutex::new(provider)),
            consumer: Arc::new(Mutex::new(consumer)),
            logger_factory: Box::new(|| Box::new(LogEngineLogger::new())),
            session: None,
        }
    }

    /// Replaces how each session's logger is built.
    pub fn with_logger_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn EngineLogger> + Send + 'static,
    {
        self.logger_factory = Box::new(factory);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether a session's tick loop is currently running.
    pub fn is_enabled(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_finished())
    }

    /// Starts a fresh session. No-op while a session is still running.
    pub fn enable(&mut self) -> Result<(), SchedulerError> {
        if self.is_enabled() {
            return Ok(());
        }
        self.session = None;

        let scheduler = TickScheduler::new(
            self.provider.clone(),
            self.consumer.clone(),
            GestureClassifier::new(&self.config),
            (self.logger_factory)(),
        );
        self.session = Some(scheduler.spawn()?);
        log::info!("Gesture engine enabled");
        Ok(())
    }

    /// Stops ticking and discards the session. Returns immediately even if
    /// a frame request is still in flight; its result will be ignored.
    pub fn disable(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel();
            log::info!("Gesture engine disabled");
        }
    }

    /// Blocks until the current session ends on its own (e.g. a finite
    /// provider runs out of frames). Returns `None` if nothing is running.
    pub fn wait(&mut self) -> Result<Option<SessionEnd>, SchedulerError> {
        match self.session.take() {
            Some(session) => session.join().map(Some),
            None => Ok(None),
        }
    }
}

impl Drop for GestureEngine {
    fn drop(&mut self) {
        self.disable();
    }
}
