use crate::detection::domain::geometry::{is_hand_closed, is_hand_open};
use crate::detection::domain::gesture_detector::GestureDetector;
use crate::detection::domain::session_state::{elapsed_at_least, DetectorSessionState};
use crate::landmarks::domain::frame::Frame;
use crate::landmarks::domain::hand_observation::HandObservation;
use crate::shared::constants::{HAND_COOLDOWN_MS, HAND_STABILITY_MS};
use crate::shared::gesture::GestureCode;

/// Both hands open offers `NextSong`; both closed offers `PreviousSong`.
///
/// Active only on ticks with exactly two hands. The shape must hold for
/// `stability_ms` before the first offer, and the family then waits
/// `cooldown_ms` between offers.
pub struct TwoHandShapeDetector {
    stability_ms: u64,
    cooldown_ms: u64,
}

impl TwoHandShapeDetector {
    pub fn new(stability_ms: u64, cooldown_ms: u64) -> Self {
        Self {
            stability_ms,
            cooldown_ms,
        }
    }

    fn classify(first: &HandObservation, second: &HandObservation) -> Option<GestureCode> {
        if is_hand_open(first) && is_hand_open(second) {
            Some(GestureCode::NextSong)
        } else if is_hand_closed(first) && is_hand_closed(second) {
            Some(GestureCode::PreviousSong)
        } else {
            None
        }
    }
}

impl Default for TwoHandShapeDetector {
    fn default() -> Self {
        Self::new(HAND_STABILITY_MS, HAND_COOLDOWN_MS)
    }
}

impl GestureDetector for TwoHandShapeDetector {
    fn name(&self) -> &'static str {
        "two_hand_shape"
    }

    fn detect(&self, frame: &Frame, session: &mut DetectorSessionState) -> Vec<GestureCode> {
        let now = frame.timestamp_ms();

        let code = match frame.hands() {
            [first, second] => Self::classify(first, second),
            _ => None,
        };
        let Some(code) = code else {
            session.hand_shape_stable_since = None;
            return Vec::new();
        };

        let Some(since) = session.hand_shape_stable_since else {
            session.hand_shape_stable_since = Some(now);
            return Vec::new();
        };
        if !elapsed_at_least(now, since, self.stability_ms) {
            return Vec::new();
        }

        let cooled = session
            .last_hand_family_fire_at
            .map_or(true, |last| elapsed_at_least(now, last, self.cooldown_ms));
        if !cooled {
            return Vec::new();
        }

        session.last_hand_family_fire_at = Some(now);
        vec![code]
    }
}
