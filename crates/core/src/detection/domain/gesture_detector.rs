use crate::detection::domain::session_state::DetectorSessionState;
use crate::landmarks::domain::frame::Frame;
use crate::shared::gesture::GestureCode;

/// Domain interface for a pattern detector.
///
/// A detector reads the current frame, updates only its own slice of the
/// session state, and returns the candidates it offers this tick in the
/// order it produced them. Detectors never see each other's output.
pub trait GestureDetector: Send {
    fn name(&self) -> &'static str;

    fn detect(&self, frame: &Frame, session: &mut DetectorSessionState) -> Vec<GestureCode>;
}
