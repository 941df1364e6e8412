pub mod jsonl_landmark_provider;
