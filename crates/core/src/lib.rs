pub mod detection;
pub mod engine;
pub mod landmarks;
pub mod shared;
