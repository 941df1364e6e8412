use crate::detection::domain::session_state::{elapsed_at_least, DetectorSessionState};
use crate::shared::constants::GLOBAL_DEBOUNCE_MS;
use crate::shared::gesture::{GestureCode, GestureEvent, Timestamp};

/// Final arbiter: at most one emission per tick, spaced at least
/// `min_spacing_ms` apart across all detectors.
///
/// Rejected candidates are dropped, never queued.
pub struct DebounceGate {
    min_spacing_ms: u64,
}

impl DebounceGate {
    pub fn new(min_spacing_ms: u64) -> Self {
        Self { min_spacing_ms }
    }

    /// Admits `candidate` (the first this tick in priority order) if the
    /// global spacing allows, recording the emission time.
    pub fn admit(
        &self,
        candidate: GestureCode,
        now: Timestamp,
        session: &mut DetectorSessionState,
    ) -> Option<GestureEvent> {
        let open = session
            .last_global_emission_at
            .map_or(true, |last| elapsed_at_least(now, last, self.min_spacing_ms));
        if !open {
            return None;
        }
        session.last_global_emission_at = Some(now);
        Some(GestureEvent::new(candidate, now))
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(GLOBAL_DEBOUNCE_MS)
    }
}
