use crate::detection::domain::geometry::horizontal_offset_fraction;
use crate::detection::domain::gesture_detector::GestureDetector;
use crate::detection::domain::session_state::{elapsed_at_least, DetectorSessionState};
use crate::landmarks::domain::frame::Frame;
use crate::landmarks::domain::hand_observation::HandObservation;
use crate::shared::constants::{DEFAULT_FRAME_WIDTH, POINTING_COOLDOWN_MS, POINTING_MIN_OFFSET};
use crate::shared::gesture::{GestureCode, Timestamp};

/// Edge-triggered section navigation from index-finger pointing.
///
/// Each hand is evaluated independently. A new direction fires at once;
/// repeating the last direction is throttled to one offer per
/// `cooldown_ms`.
pub struct PointingDetector {
    min_offset: f64,
    cooldown_ms: u64,
    default_frame_width: u32,
}

impl PointingDetector {
    pub fn new(min_offset: f64, cooldown_ms: u64, default_frame_width: u32) -> Self {
        Self {
            min_offset,
            cooldown_ms,
            default_frame_width,
        }
    }

    fn direction(&self, hand: &HandObservation, frame_width: f64) -> Option<GestureCode> {
        let offset = horizontal_offset_fraction(hand.index_tip(), hand.wrist(), frame_width);
        if offset.abs() < self.min_offset {
            None
        } else if offset > 0.0 {
            Some(GestureCode::NextSection)
        } else {
            Some(GestureCode::PreviousSection)
        }
    }

    fn accept(&self, code: GestureCode, now: Timestamp, session: &mut DetectorSessionState) -> bool {
        let repeat = session.last_pointed_code == Some(code);
        let cooled = session
            .last_point_fire_at
            .get(&code)
            .map_or(true, |&last| elapsed_at_least(now, last, self.cooldown_ms));
        if repeat && !cooled {
            return false;
        }
        session.last_pointed_code = Some(code);
        session.last_point_fire_at.insert(code, now);
        true
    }
}

impl Default for PointingDetector {
    fn default() -> Self {
        Self::new(POINTING_MIN_OFFSET, POINTING_COOLDOWN_MS, DEFAULT_FRAME_WIDTH)
    }
}

impl GestureDetector for PointingDetector {
    fn name(&self) -> &'static str {
        "pointing"
    }

    fn detect(&self, frame: &Frame, session: &mut DetectorSessionState) -> Vec<GestureCode> {
        let now = frame.timestamp_ms();
        let width = match frame.width() {
            0 => self.default_frame_width,
            w => w,
        };
        let width = f64::from(width);

        frame
            .hands()
            .iter()
            .filter_map(|hand| self.direction(hand, width))
            .filter(|&code| self.accept(code, now, session))
            .collect()
    }
}
