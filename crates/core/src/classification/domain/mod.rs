pub mod classifier;
pub mod prediction;
