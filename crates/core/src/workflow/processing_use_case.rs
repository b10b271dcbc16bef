use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::prediction::Prediction;
use crate::detection::domain::face_mesh_extractor::FaceMeshExtractor;
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::selected_image::SelectedImage;
use crate::shared::service_error::ServiceError;
use crate::workflow::navigation::ProcessingInput;
use crate::workflow::prediction_outcome::PredictionOutcome;
use crate::workflow::processing_stage::{
    ProcessingMode, ProcessingStage, ProcessingState, ProcessingStep,
};
use crate::workflow::workflow_logger::WorkflowLogger;

/// How often a simulated delay checks for cancellation.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Called with every state the stage enters.
pub type StateFn = Box<dyn Fn(&ProcessingState) + Send>;

pub enum ProcessingBackend {
    Network {
        extractor: Box<dyn FaceMeshExtractor>,
        classifier: Box<dyn Classifier>,
    },
    Simulated {
        delay: Duration,
    },
}

/// Drives a [`ProcessingStage`] to completion: performs each requested step
/// on the calling thread and feeds the result back.
pub struct ProcessingUseCase {
    backend: ProcessingBackend,
    logger: Box<dyn WorkflowLogger>,
    on_state: Option<StateFn>,
}

impl ProcessingUseCase {
    pub fn new(backend: ProcessingBackend, logger: Box<dyn WorkflowLogger>) -> Self {
        Self {
            backend,
            logger,
            on_state: None,
        }
    }

    pub fn set_state_listener(&mut self, on_state: StateFn) {
        self.on_state = Some(on_state);
    }

    pub fn mode(&self) -> ProcessingMode {
        match self.backend {
            ProcessingBackend::Network { .. } => ProcessingMode::Network,
            ProcessingBackend::Simulated { delay } => ProcessingMode::Simulated(delay),
        }
    }

    /// Run one workflow. Returns `None` if `cancelled` was raised before the
    /// run reached its terminal state; whatever was in flight is discarded.
    pub fn execute(
        &mut self,
        input: Option<ProcessingInput>,
        cancelled: Arc<AtomicBool>,
    ) -> Option<PredictionOutcome> {
        let mut stage = ProcessingStage::with_cancel_token(self.mode(), cancelled.clone());
        let mut next = stage.start(input);

        loop {
            self.report(stage.state());
            let step = match next {
                Some(step) => step,
                None => {
                    self.logger.info("Processing abandoned");
                    return None;
                }
            };
            next = match step {
                ProcessingStep::Extract(image) => {
                    let result = self.extract(&image);
                    stage.on_extracted(result)
                }
                ProcessingStep::Predict(mesh) => {
                    let result = self.predict(&mesh);
                    stage.on_predicted(result)
                }
                ProcessingStep::Wait(delay) => {
                    if !wait_cancellable(delay, &cancelled) {
                        self.logger.info("Processing abandoned");
                        return None;
                    }
                    stage.on_delay_elapsed()
                }
                ProcessingStep::Complete(outcome) => {
                    self.logger.summary();
                    return Some(outcome);
                }
            };
        }
    }

    fn extract(&mut self, image: &SelectedImage) -> Result<LandmarkPayload, ServiceError> {
        let ProcessingBackend::Network { extractor, .. } = &self.backend else {
            return Err(no_backend("extraction"));
        };
        self.logger.info(&format!("Extracting face mesh from {}", image.file_name()));
        let start = Instant::now();
        let result = extractor.extract(image);
        self.logger.timing("extract", elapsed_ms(start));
        result
    }

    fn predict(&mut self, mesh: &LandmarkPayload) -> Result<Prediction, ServiceError> {
        let ProcessingBackend::Network { classifier, .. } = &self.backend else {
            return Err(no_backend("prediction"));
        };
        self.logger.info("Requesting prediction");
        let start = Instant::now();
        let result = classifier.predict(mesh);
        self.logger.timing("predict", elapsed_ms(start));
        result
    }

    fn report(&mut self, state: &ProcessingState) {
        self.logger.state(state.name());
        if let Some(ref cb) = self.on_state {
            cb(state);
        }
    }
}

/// Sleep for `delay` unless cancelled first. Returns whether the full delay elapsed.
pub fn wait_cancellable(delay: Duration, cancelled: &AtomicBool) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if cancelled.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(CANCEL_POLL_INTERVAL));
    }
}

fn no_backend(call: &str) -> ServiceError {
    ServiceError::Transport {
        url: String::new(),
        reason: format!("no {call} service configured"),
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
