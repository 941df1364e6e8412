//! Stateless landmark geometry: eye aspect ratio, finger state, and
//! horizontal displacement.

use crate::landmarks::domain::hand_observation::HandObservation;
use crate::shared::constants::FINGER_TIP_BASE_PAIRS;
use crate::shared::point::Point;

/// Eye aspect ratio of six outline points `p1..p6`:
/// `(|p2-p6| + |p3-p5|) / (2 * |p1-p4|)`.
///
/// A zero horizontal span is unmeasurable and yields `f64::INFINITY`,
/// which every closing threshold classifies as open.
pub fn ear(eye: &[Point; 6]) -> f64 {
    let horizontal = eye[0].distance(&eye[3]);
    if horizontal == 0.0 {
        return f64::INFINITY;
    }
    let vertical = eye[1].distance(&eye[5]) + eye[2].distance(&eye[4]);
    vertical / (2.0 * horizontal)
}

/// A finger is open when its tip sits strictly above its base.
pub fn is_finger_open(tip: Point, base: Point) -> bool {
    tip.y < base.y
}

pub fn is_hand_open(hand: &HandObservation) -> bool {
    FINGER_TIP_BASE_PAIRS
        .iter()
        .all(|&(tip, base)| is_finger_open(hand.point(tip), hand.point(base)))
}

pub fn is_hand_closed(hand: &HandObservation) -> bool {
    FINGER_TIP_BASE_PAIRS
        .iter()
        .all(|&(tip, base)| !is_finger_open(hand.point(tip), hand.point(base)))
}

/// Signed horizontal displacement `tip - wrist` as a fraction of frame width.
/// Positive means the tip is to the right of the wrist in image space.
pub fn horizontal_offset_fraction(tip: Point, wrist: Point, frame_width: f64) -> f64 {
    (tip.x - wrist.x) / frame_width
}
