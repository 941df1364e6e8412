pub mod channel_action_consumer;
