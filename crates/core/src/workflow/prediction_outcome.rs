use crate::classification::domain::prediction::Prediction;
use crate::workflow::workflow_error::WorkflowError;

/// Terminal result of one workflow run, handed from processing to the result screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Classified(Prediction),
    Failed(WorkflowError),
}

impl PredictionOutcome {
    pub fn is_classified(&self) -> bool {
        matches!(self, PredictionOutcome::Classified(_))
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            PredictionOutcome::Classified(p) => Some(p),
            PredictionOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            PredictionOutcome::Classified(_) => None,
            PredictionOutcome::Failed(e) => Some(e),
        }
    }
}
