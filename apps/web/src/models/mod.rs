pub mod admin;
pub mod prediction;
pub mod retrain;
