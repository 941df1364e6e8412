pub mod face_landmarks;
pub mod frame;
pub mod hand_observation;
pub mod landmark_provider;
