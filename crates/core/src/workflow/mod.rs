pub mod infrastructure;
pub mod navigation;
pub mod prediction_outcome;
pub mod processing_stage;
pub mod processing_use_case;
pub mod result_stage;
pub mod upload_stage;
pub mod workflow_error;
pub mod workflow_logger;
