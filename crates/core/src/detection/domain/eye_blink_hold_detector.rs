use crate::detection::domain::geometry::ear;
use crate::detection::domain::gesture_detector::GestureDetector;
use crate::detection::domain::session_state::{elapsed_at_least, DetectorSessionState};
use crate::landmarks::domain::face_landmarks::FaceLandmarks;
use crate::landmarks::domain::frame::Frame;
use crate::shared::constants::{EAR_CLOSED_THRESHOLD, EYE_HOLD_MS};
use crate::shared::gesture::GestureCode;
use crate::shared::point::Point;

/// Offers `NextSong` while both eyes have been held closed for `hold_ms`.
///
/// The hold timer is not reset on fire: once past the hold, the candidate
/// is re-offered every tick and the debounce gate spaces the emissions.
/// There is deliberately no eyes-closed path to `PreviousSong`.
pub struct EyeBlinkHoldDetector {
    closed_threshold: f64,
    hold_ms: u64,
}

impl EyeBlinkHoldDetector {
    pub fn new(closed_threshold: f64, hold_ms: u64) -> Self {
        Self {
            closed_threshold,
            hold_ms,
        }
    }

    fn both_eyes_closed(&self, face: &FaceLandmarks) -> bool {
        let closed = |eye: Option<[Point; 6]>| {
            eye.map(|pts| ear(&pts)).unwrap_or(f64::INFINITY) < self.closed_threshold
        };
        closed(face.left_eye()) && closed(face.right_eye())
    }
}

impl Default for EyeBlinkHoldDetector {
    fn default() -> Self {
        Self::new(EAR_CLOSED_THRESHOLD, EYE_HOLD_MS)
    }
}

impl GestureDetector for EyeBlinkHoldDetector {
    fn name(&self) -> &'static str {
        "eye_blink_hold"
    }

    fn detect(&self, frame: &Frame, session: &mut DetectorSessionState) -> Vec<GestureCode> {
        let now = frame.timestamp_ms();

        let closed = frame.face().is_some_and(|face| self.both_eyes_closed(face));
        if !closed {
            session.eyes_closed_since = None;
            return Vec::new();
        }

        match session.eyes_closed_since {
            None => {
                session.eyes_closed_since = Some(now);
                Vec::new()
            }
            Some(since) if elapsed_at_least(now, since, self.hold_ms) => {
                vec![GestureCode::NextSong]
            }
            Some(_) => Vec::new(),
        }
    }
}
