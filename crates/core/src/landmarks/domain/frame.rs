use serde::{Deserialize, Serialize};

use crate::landmarks::domain::face_landmarks::FaceLandmarks;
use crate::landmarks::domain::hand_observation::HandObservation;
use crate::shared::gesture::Timestamp;

/// One sampled landmark observation.
///
/// Frames are produced fresh each tick and never retained by the engine
/// beyond the tick that consumed them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    timestamp_ms: Timestamp,
    /// Source image width in pixels; 0 when the provider does not know it.
    #[serde(default)]
    width: u32,
    #[serde(default)]
    face: Option<FaceLandmarks>,
    #[serde(default)]
    hands: Vec<HandObservation>,
}

impl Frame {
    pub fn new(
        timestamp_ms: Timestamp,
        width: u32,
        face: Option<FaceLandmarks>,
        hands: Vec<HandObservation>,
    ) -> Self {
        Self {
            timestamp_ms,
            width,
            face,
            hands,
        }
    }

    pub fn timestamp_ms(&self) -> Timestamp {
        self.timestamp_ms
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn face(&self) -> Option<&FaceLandmarks> {
        self.face.as_ref()
    }

    pub fn hands(&self) -> &[HandObservation] {
        &self.hands
    }
}
