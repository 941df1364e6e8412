pub mod action_consumer;
pub mod engine_config;
pub mod engine_logger;
pub mod gesture_classifier;
pub mod gesture_engine;
pub mod infrastructure;
pub mod tick_scheduler;
