pub mod constants;
pub mod gesture;
pub mod point;
