use std::time::Instant;

use crate::detection::domain::debounce_gate::DebounceGate;
use crate::detection::domain::eye_blink_hold_detector::EyeBlinkHoldDetector;
use crate::detection::domain::gesture_detector::GestureDetector;
use crate::detection::domain::pointing_detector::PointingDetector;
use crate::detection::domain::session_state::DetectorSessionState;
use crate::detection::domain::two_hand_shape_detector::TwoHandShapeDetector;
use crate::engine::engine_config::EngineConfig;
use crate::engine::engine_logger::EngineLogger;
use crate::landmarks::domain::frame::Frame;
use crate::shared::gesture::{GestureCode, GestureEvent};

/// Runs one tick: every detector in priority order, then the debounce gate.
///
/// Owns the session state for exactly one detection session. Every detector
/// runs on every tick so its timers stay current, even when an earlier
/// detector already produced the tick's winning candidate.
pub struct GestureClassifier {
    detectors: Vec<Box<dyn GestureDetector>>,
    gate: DebounceGate,
    session: DetectorSessionState,
}

impl GestureClassifier {
    pub fn new(config: &EngineConfig) -> Self {
        let detectors: Vec<Box<dyn GestureDetector>> = vec![
            Box::new(EyeBlinkHoldDetector::new(
                config.ear_closed_threshold,
                config.eye_hold_ms,
            )),
            Box::new(TwoHandShapeDetector::new(
                config.hand_stability_ms,
                config.hand_cooldown_ms,
            )),
            Box::new(PointingDetector::new(
                config.pointing_min_offset,
                config.pointing_cooldown_ms,
                config.default_frame_width,
            )),
        ];
        Self::with_detectors(detectors, DebounceGate::new(config.global_debounce_ms))
    }

    /// Builds a classifier from detectors listed in priority order.
    pub fn with_detectors(detectors: Vec<Box<dyn GestureDetector>>, gate: DebounceGate) -> Self {
        Self {
            detectors,
            gate,
            session: DetectorSessionState::new(),
        }
    }

    pub fn session(&self) -> &DetectorSessionState {
        &self.session
    }

    pub fn process(&mut self, frame: &Frame, logger: &mut dyn EngineLogger) -> Option<GestureEvent> {
        let now = frame.timestamp_ms();
        logger.tick(now);
        let start = Instant::now();

        let mut leading: Option<GestureCode> = None;
        for detector in &self.detectors {
            for code in detector.detect(frame, &mut self.session) {
                logger.candidate(detector.name(), code);
                leading.get_or_insert(code);
            }
        }

        let result = leading.and_then(|code| {
            let admitted = self.gate.admit(code, now, &mut self.session);
            match &admitted {
                Some(event) => logger.emitted(event),
                None => logger.dropped(code, now),
            }
            admitted
        });

        logger.timing("classify", start.elapsed().as_secs_f64() * 1000.0);
        result
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::eye_blink_hold_detector::tests::face_with_ear;
    use crate::detection::domain::pointing_detector::tests::pointing_hand;
    use crate::detection::domain::two_hand_shape_detector::tests::shaped_hand;
    use crate::engine::engine_logger::{LogEngineLogger, NullEngineLogger};
    use crate::landmarks::domain::face_landmarks::FaceLandmarks;
    use crate::landmarks::domain::hand_observation::{HandObservation, Handedness};

    const TICK_MS: u64 = 100;

    fn frame(t: u64, face: Option<FaceLandmarks>, hands: Vec<HandObservation>) -> Frame {
        Frame::new(t, 640, face, hands)
    }

    fn run(classifier: &mut GestureClassifier, frames: &[Frame]) -> Vec<GestureEvent> {
        let mut logger = NullEngineLogger;
        frames
            .iter()
            .filter_map(|f| classifier.process(f, &mut logger))
            .collect()
    }

    fn ticks(from: u64, to: u64) -> impl Iterator<Item = u64> {
        (from..=to).step_by(TICK_MS as usize)
    }

    #[test]
    fn test_eye_hold_fires_at_2000_then_debounced_to_2700() {
        let mut classifier = GestureClassifier::default();
        let frames: Vec<Frame> = ticks(0, 3200)
            .map(|t| frame(t, Some(face_with_ear(0.10)), Vec::new()))
            .collect();

        let events = run(&mut classifier, &frames);
        let times: Vec<u64> = events.iter().map(|e| e.fired_at()).collect();
        assert_eq!(times, vec![2000, 2700]);
        assert!(events.iter().all(|e| e.code() == GestureCode::NextSong));
    }

    #[test]
    fn test_eye_hold_to_2500_fires_exactly_once() {
        let mut classifier = GestureClassifier::default();
        let frames: Vec<Frame> = ticks(0, 2500)
            .map(|t| frame(t, Some(face_with_ear(0.10)), Vec::new()))
            .collect();

        let events = run(&mut classifier, &frames);
        assert_eq!(events, vec![GestureEvent::new(GestureCode::NextSong, 2000)]);
    }

    #[test]
    fn test_ear_at_threshold_never_fires() {
        let mut classifier = GestureClassifier::default();
        let frames: Vec<Frame> = ticks(0, 3000)
            .map(|t| frame(t, Some(face_with_ear(0.20)), Vec::new()))
            .collect();

        assert!(run(&mut classifier, &frames).is_empty());
    }

    #[test]
    fn test_two_open_hands_fire_at_1000_and_4000() {
        let mut classifier = GestureClassifier::default();
        let hands = || {
            vec![
                shaped_hand(Handedness::Left, 150.0, true),
                shaped_hand(Handedness::Right, 450.0, true),
            ]
        };
        let frames: Vec<Frame> = ticks(0, 4500).map(|t| frame(t, None, hands())).collect();

        let times: Vec<u64> = run(&mut classifier, &frames)
            .iter()
            .map(|e| e.fired_at())
            .collect();
        assert_eq!(times, vec![1000, 4000]);
    }

    #[test]
    fn test_pointing_edge_trigger_through_gate() {
        // Gate spacing shortened so only the pointing family throttles.
        let config = EngineConfig {
            global_debounce_ms: 0,
            ..EngineConfig::default()
        };
        let mut classifier = GestureClassifier::new(&config);
        let frames = vec![
            frame(0, None, vec![pointing_hand(0.06)]),
            frame(200, None, vec![pointing_hand(0.06)]),
            frame(300, None, vec![pointing_hand(-0.06)]),
        ];

        let events = run(&mut classifier, &frames);
        assert_eq!(
            events,
            vec![
                GestureEvent::new(GestureCode::NextSection, 0),
                GestureEvent::new(GestureCode::PreviousSection, 300),
            ]
        );
    }

    #[test]
    fn test_pointing_flip_inside_global_window_is_dropped() {
        let mut classifier = GestureClassifier::default();
        let frames = vec![
            frame(0, None, vec![pointing_hand(0.06)]),
            frame(300, None, vec![pointing_hand(-0.06)]),
        ];

        let events = run(&mut classifier, &frames);
        assert_eq!(events, vec![GestureEvent::new(GestureCode::NextSection, 0)]);
        // The detector still recorded its own fire.
        assert_eq!(
            classifier.session().last_pointed_code,
            Some(GestureCode::PreviousSection)
        );
    }

    #[test]
    fn test_eye_blink_wins_over_pointing_in_same_tick() {
        let mut classifier = GestureClassifier::default();
        let mut frames: Vec<Frame> = ticks(0, 1900)
            .map(|t| frame(t, Some(face_with_ear(0.10)), Vec::new()))
            .collect();
        frames.push(frame(2000, Some(face_with_ear(0.10)), vec![pointing_hand(0.06)]));
        frames.push(frame(2100, Some(face_with_ear(0.10)), vec![pointing_hand(-0.06)]));

        let events = run(&mut classifier, &frames);
        assert_eq!(events, vec![GestureEvent::new(GestureCode::NextSong, 2000)]);

        let session = classifier.session();
        assert_eq!(session.last_global_emission_at, Some(2000));
        assert_eq!(session.last_point_fire_at[&GestureCode::NextSection], 2000);
        assert_eq!(session.last_point_fire_at[&GestureCode::PreviousSection], 2100);
    }

    #[test]
    fn test_two_pointing_hands_emit_only_first() {
        let mut classifier = GestureClassifier::default();
        let frames = vec![frame(
            0,
            None,
            vec![pointing_hand(-0.06), pointing_hand(0.06)],
        )];

        let events = run(&mut classifier, &frames);
        assert_eq!(events, vec![GestureEvent::new(GestureCode::PreviousSection, 0)]);
        assert_eq!(
            classifier.session().last_pointed_code,
            Some(GestureCode::NextSection)
        );
    }

    #[test]
    fn test_deterministic_across_runs() {
        let frames: Vec<Frame> = ticks(0, 5000)
            .map(|t| {
                let face = (t < 2600).then(|| face_with_ear(0.10));
                let hands = if t % 700 < 300 {
                    vec![pointing_hand(0.06)]
                } else {
                    vec![pointing_hand(-0.07)]
                };
                frame(t, face, hands)
            })
            .collect();

        let first = run(&mut GestureClassifier::default(), &frames);
        let second = run(&mut GestureClassifier::default(), &frames);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_logger_sees_candidates_emissions_and_drops() {
        let mut classifier = GestureClassifier::default();
        let mut logger = LogEngineLogger::new();

        classifier.process(&frame(0, None, vec![pointing_hand(0.06)]), &mut logger);
        classifier.process(&frame(100, None, vec![pointing_hand(-0.06)]), &mut logger);

        assert_eq!(logger.ticks(), 2);
        assert_eq!(logger.candidates_for("pointing"), 2);
        assert_eq!(logger.emissions_for(GestureCode::NextSection), 1);
        assert_eq!(logger.dropped_count(), 1);
    }
}
