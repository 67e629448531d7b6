pub mod error;
pub mod fusion;
pub mod interaction_tracker;
pub mod profile;
pub mod recommendation_service;
pub mod similarity;
pub mod strategies;
