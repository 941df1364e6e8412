//! Face-mesh landmarks as reported by the landmark provider.
//!
//! The mesh is an ordered point list following the provider's published
//! topology; only the twelve eye-outline indices are read by the engine.

use serde::{Deserialize, Serialize};

use crate::shared::constants::{LEFT_EYE_INDICES, RIGHT_EYE_INDICES};
use crate::shared::point::Point;

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceLandmarks {
    points: Vec<Point>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gathers the six outline points `p1..p6` of one eye.
    ///
    /// Returns `None` if the mesh is too short to contain every index.
    pub fn eye(&self, indices: &[usize; 6]) -> Option<[Point; 6]> {
        let mut out = [Point::default(); 6];
        for (slot, &idx) in out.iter_mut().zip(indices) {
            *slot = *self.points.get(idx)?;
        }
        Some(out)
    }

    pub fn left_eye(&self) -> Option<[Point; 6]> {
        self.eye(&LEFT_EYE_INDICES)
    }

    pub fn right_eye(&self) -> Option<[Point; 6]> {
        self.eye(&RIGHT_EYE_INDICES)
    }
}
