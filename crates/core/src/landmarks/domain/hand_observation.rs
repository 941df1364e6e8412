use serde::{Deserialize, Serialize};

use crate::shared::constants::{HAND_LANDMARK_COUNT, INDEX_TIP, WRIST};
use crate::shared::point::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand: 21 keypoints in the fixed hand-pose topology
/// (0 = wrist, 4/8/12/16/20 = fingertips).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    handedness: Handedness,
    points: [Point; HAND_LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(handedness: Handedness, points: [Point; HAND_LANDMARK_COUNT]) -> Self {
        Self { handedness, points }
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn points(&self) -> &[Point; HAND_LANDMARK_COUNT] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn wrist(&self) -> Point {
        self.points[WRIST]
    }

    pub fn index_tip(&self) -> Point {
        self.points[INDEX_TIP]
    }
}
