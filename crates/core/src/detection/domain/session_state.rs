use std::collections::HashMap;

use crate::shared::gesture::{GestureCode, Timestamp};

/// Timers and last-fired bookkeeping that must survive across ticks.
///
/// Owned by exactly one tick loop; created on enable and dropped on disable.
/// Every `*_since` field is set on the tick its condition first holds and
/// cleared on the first tick it stops holding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectorSessionState {
    pub eyes_closed_since: Option<Timestamp>,
    pub hand_shape_stable_since: Option<Timestamp>,
    pub last_hand_family_fire_at: Option<Timestamp>,
    pub last_point_fire_at: HashMap<GestureCode, Timestamp>,
    pub last_pointed_code: Option<GestureCode>,
    pub last_global_emission_at: Option<Timestamp>,
}

impl DetectorSessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Whether at least `window` ms have passed since `since`.
///
/// A clock that steps backwards never satisfies a window.
pub fn elapsed_at_least(now: Timestamp, since: Timestamp, window: u64) -> bool {
    now >= since && now - since >= window
}
