//! State machine behind the processing screen.
//!
//! Network mode: `Idle → AwaitingExtraction → AwaitingPrediction → Terminal`
//! (a face-mesh input enters at `AwaitingPrediction`). Simulated mode:
//! `Idle → SimulatedDelay → Terminal`, always positive. Neither mode starts
//! without a photo or face mesh.
//!
//! The stage performs no I/O. Each transition returns the next
//! [`ProcessingStep`] for the driver to carry out, and the driver feeds the
//! result back in. The cancellation flag is checked before every mutation,
//! so once torn down the stage never changes again.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::classification::domain::prediction::{Label, Prediction};
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::selected_image::SelectedImage;
use crate::shared::service_error::ServiceError;
use crate::workflow::navigation::ProcessingInput;
use crate::workflow::prediction_outcome::PredictionOutcome;
use crate::workflow::workflow_error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    Network,
    /// Wait a fixed delay and report a positive result. The input is
    /// required but not inspected.
    Simulated(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingState {
    Idle,
    AwaitingExtraction,
    AwaitingPrediction,
    SimulatedDelay,
    Terminal(PredictionOutcome),
}

impl ProcessingState {
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingState::Idle => "idle",
            ProcessingState::AwaitingExtraction => "awaiting_extraction",
            ProcessingState::AwaitingPrediction => "awaiting_prediction",
            ProcessingState::SimulatedDelay => "simulated_delay",
            ProcessingState::Terminal(_) => "terminal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingState::Terminal(_))
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Work requested by the stage. At most one is outstanding at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingStep {
    Extract(SelectedImage),
    Predict(LandmarkPayload),
    Wait(Duration),
    /// The run is over; hand this outcome to the result screen.
    Complete(PredictionOutcome),
}

pub struct ProcessingStage {
    mode: ProcessingMode,
    state: ProcessingState,
    cancelled: Arc<AtomicBool>,
}

impl ProcessingStage {
    pub fn new(mode: ProcessingMode) -> Self {
        Self::with_cancel_token(mode, Arc::new(AtomicBool::new(false)))
    }

    pub fn with_cancel_token(mode: ProcessingMode, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            mode,
            state: ProcessingState::Idle,
            cancelled,
        }
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// The screen is going away. Pending work must not touch the stage after this.
    pub fn teardown(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match &self.state {
            ProcessingState::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn start(&mut self, input: Option<ProcessingInput>) -> Option<ProcessingStep> {
        if !self.accepts("start", &ProcessingState::Idle) {
            return None;
        }
        let Some(input) = input else {
            log::warn!("Processing started without a photo or face mesh");
            return self.finish(PredictionOutcome::Failed(WorkflowError::InputMissing));
        };
        match (self.mode, input) {
            (ProcessingMode::Simulated(delay), _) => {
                self.state = ProcessingState::SimulatedDelay;
                Some(ProcessingStep::Wait(delay))
            }
            (ProcessingMode::Network, ProcessingInput::SelectedFile(image)) => {
                self.state = ProcessingState::AwaitingExtraction;
                Some(ProcessingStep::Extract(image))
            }
            (ProcessingMode::Network, ProcessingInput::FaceMesh(mesh)) => {
                self.state = ProcessingState::AwaitingPrediction;
                Some(ProcessingStep::Predict(mesh))
            }
        }
    }

    pub fn on_extracted(
        &mut self,
        result: Result<LandmarkPayload, ServiceError>,
    ) -> Option<ProcessingStep> {
        if !self.accepts("extraction result", &ProcessingState::AwaitingExtraction) {
            return None;
        }
        match result {
            Ok(mesh) => {
                self.state = ProcessingState::AwaitingPrediction;
                Some(ProcessingStep::Predict(mesh))
            }
            Err(e) => {
                log::warn!("Face mesh extraction failed: {e}");
                self.finish(PredictionOutcome::Failed(WorkflowError::from_extraction(e)))
            }
        }
    }

    pub fn on_predicted(
        &mut self,
        result: Result<Prediction, ServiceError>,
    ) -> Option<ProcessingStep> {
        if !self.accepts("prediction result", &ProcessingState::AwaitingPrediction) {
            return None;
        }
        match result {
            Ok(prediction) => self.finish(PredictionOutcome::Classified(prediction)),
            Err(e) => {
                log::warn!("Prediction failed: {e}");
                self.finish(PredictionOutcome::Failed(WorkflowError::from_prediction(e)))
            }
        }
    }

    pub fn on_delay_elapsed(&mut self) -> Option<ProcessingStep> {
        if !self.accepts("delay elapsed", &ProcessingState::SimulatedDelay) {
            return None;
        }
        self.finish(PredictionOutcome::Classified(Prediction::new(
            Label::Positive,
            None,
        )))
    }

    fn accepts(&self, event: &str, expected: &ProcessingState) -> bool {
        if self.is_torn_down() {
            log::debug!("Discarding {event}: stage torn down");
            return false;
        }
        if &self.state != expected {
            log::debug!("Discarding {event} in state {}", self.state);
            return false;
        }
        true
    }

    fn finish(&mut self, outcome: PredictionOutcome) -> Option<ProcessingStep> {
        self.state = ProcessingState::Terminal(outcome.clone());
        Some(ProcessingStep::Complete(outcome))
    }
}
