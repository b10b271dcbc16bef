pub mod classification;
pub mod detection;
pub mod shared;
pub mod workflow;
