pub mod debounce_gate;
pub mod eye_blink_hold_detector;
pub mod geometry;
pub mod gesture_detector;
pub mod pointing_detector;
pub mod session_state;
pub mod two_hand_shape_detector;
