use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use crate::shared::gesture::{GestureCode, GestureEvent, Timestamp};

/// Cross-cutting observer for tick-loop events.
///
/// Keeps the classifier and scheduler free of output concerns so callers
/// (CLI, tests, a host UI) can watch engine behavior without changing it.
pub trait EngineLogger: Send {
    /// A frame was received and is about to be evaluated.
    fn tick(&mut self, timestamp: Timestamp);

    /// Record how long a named stage took for one tick.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// A detector offered a candidate.
    fn candidate(&mut self, detector: &str, code: GestureCode);

    /// The debounce gate admitted an event.
    fn emitted(&mut self, event: &GestureEvent);

    /// The debounce gate rejected the tick's leading candidate.
    fn dropped(&mut self, code: GestureCode, timestamp: Timestamp);

    /// The landmark provider failed for one tick.
    fn provider_failure(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullEngineLogger;

impl EngineLogger for NullEngineLogger {
    fn tick(&mut self, _timestamp: Timestamp) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn candidate(&mut self, _detector: &str, _code: GestureCode) {}
    fn emitted(&mut self, _event: &GestureEvent) {}
    fn dropped(&mut self, _code: GestureCode, _timestamp: Timestamp) {}
    fn provider_failure(&mut self, _message: &str) {}
}

/// Running aggregate for one timed stage.
#[derive(Clone, Copy, Debug, Default)]
struct StageTiming {
    total_ms: f64,
    count: usize,
}

impl StageTiming {
    fn average_ms(&self) -> f64 {
        self.total_ms / self.count.max(1) as f64
    }
}

/// Logger backed by the `log` facade that also counts what it sees and
/// reports a summary when the session ends.
pub struct LogEngineLogger {
    start_time: Instant,
    ticks: usize,
    provider_failures: usize,
    dropped: usize,
    candidates: HashMap<String, usize>,
    emissions: BTreeMap<GestureCode, usize>,
    timings: HashMap<String, StageTiming>,
}

impl LogEngineLogger {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            provider_failures: 0,
            dropped: 0,
            candidates: HashMap::new(),
            emissions: GestureCode::ALL.iter().map(|&code| (code, 0)).collect(),
            timings: HashMap::new(),
        }
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn provider_failures(&self) -> usize {
        self.provider_failures
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    pub fn emissions_for(&self, code: GestureCode) -> usize {
        self.emissions.get(&code).copied().unwrap_or(0)
    }

    pub fn candidates_for(&self, detector: &str) -> usize {
        self.candidates.get(detector).copied().unwrap_or(0)
    }

    /// Mean duration recorded for `stage`, if it was ever timed.
    pub fn average_timing(&self, stage: &str) -> Option<f64> {
        self.timings.get(stage).map(StageTiming::average_ms)
    }

    /// Returns the formatted summary string, or `None` if no tick ran.
    pub fn summary_string(&self) -> Option<String> {
        if self.ticks == 0 && self.provider_failures == 0 {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Gesture session summary ({} ticks, {} provider failures, {elapsed_s:.1}s):",
            self.ticks, self.provider_failures
        )];

        let mut detectors: Vec<_> = self.candidates.keys().collect();
        detectors.sort();
        for name in detectors {
            lines.push(format!("  {name:16}: {} candidates", self.candidates[name]));
        }

        for (code, count) in &self.emissions {
            lines.push(format!("  {code:16}: {count} emitted"));
        }
        lines.push(format!("  Dropped by debounce: {}", self.dropped));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let avg = self.timings[stage].average_ms();
            lines.push(format!("  {stage:16}: avg {avg:.3}ms"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogEngineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineLogger for LogEngineLogger {
    fn tick(&mut self, timestamp: Timestamp) {
        self.ticks += 1;
        log::trace!("Tick at {timestamp}ms");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        let entry = self.timings.entry(stage.to_string()).or_default();
        entry.total_ms += duration_ms;
        entry.count += 1;
    }

    fn candidate(&mut self, detector: &str, code: GestureCode) {
        *self.candidates.entry(detector.to_string()).or_default() += 1;
        log::debug!("{detector} offered {code}");
    }

    fn emitted(&mut self, event: &GestureEvent) {
        *self.emissions.entry(event.code()).or_default() += 1;
        log::info!("Gesture {} at {}ms", event.code(), event.fired_at());
    }

    fn dropped(&mut self, code: GestureCode, timestamp: Timestamp) {
        self.dropped += 1;
        log::debug!("Debounced {code} at {timestamp}ms");
    }

    fn provider_failure(&mut self, message: &str) {
        self.provider_failures += 1;
        log::warn!("Landmark provider failed: {message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
