/// Both eyes count as closed when each EAR is strictly below this.
pub const EAR_CLOSED_THRESHOLD: f64 = 0.20;
pub const EYE_HOLD_MS: u64 = 2000;

pub const HAND_STABILITY_MS: u64 = 1000;
pub const HAND_COOLDOWN_MS: u64 = 3000;

/// Minimum |fingertip - wrist| horizontal span, as a fraction of frame width.
pub const POINTING_MIN_OFFSET: f64 = 0.05;
pub const POINTING_COOLDOWN_MS: u64 = 1000;

/// Minimum spacing between any two emitted gestures.
pub const GLOBAL_DEBOUNCE_MS: u64 = 700;

/// Measurement width used when a frame reports width 0 (unknown).
pub const DEFAULT_FRAME_WIDTH: u32 = 640;

/// Face-mesh indices `p1..p6` outlining each eye (468-point mesh topology).
pub const LEFT_EYE_INDICES: [usize; 6] = [33, 160, 158, 133, 153, 144];
pub const RIGHT_EYE_INDICES: [usize; 6] = [362, 385, 387, 263, 373, 380];

pub const HAND_LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const INDEX_TIP: usize = 8;

/// (tip, base) landmark pairs for thumb, index, middle, ring, pinky.
pub const FINGER_TIP_BASE_PAIRS: [(usize, usize); 5] = [(4, 2), (8, 6), (12, 10), (16, 14), (20, 18)];

pub const CONFIG_DIR_NAME: &str = "GestureControl";
pub const CONFIG_FILE_NAME: &str = "engine.json";
