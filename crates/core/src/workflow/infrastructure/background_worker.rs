use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::detection::domain::face_mesh_extractor::FaceMeshExtractor;
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::selected_image::SelectedImage;
use crate::shared::service_config::ConfigError;
use crate::shared::service_error::ServiceError;
use crate::workflow::navigation::ProcessingInput;
use crate::workflow::prediction_outcome::PredictionOutcome;
use crate::workflow::processing_stage::ProcessingState;
use crate::workflow::processing_use_case::ProcessingUseCase;
use crate::workflow::workflow_error::WorkflowError;

/// Messages sent from the processing worker to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingEvent {
    State(ProcessingState),
    Finished(PredictionOutcome),
}

pub type ExtractionResult = Result<LandmarkPayload, ServiceError>;

/// Worker side of a background job.
pub struct WorkerContext<T> {
    tx: Sender<T>,
    cancelled: Arc<AtomicBool>,
}

impl<T> Clone for WorkerContext<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            cancelled: self.cancelled.clone(),
        }
    }
}

impl<T> WorkerContext<T> {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Deliver `msg` unless the job was cancelled. Returns whether it was sent.
    pub fn send(&self, msg: T) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.tx.send(msg).is_ok()
    }
}

/// UI side of a background job. Dropping the handle cancels the job.
///
/// Once cancelled the handle delivers nothing, even messages the worker
/// queued before it noticed.
pub struct WorkerHandle<T> {
    rx: Receiver<T>,
    cancelled: Arc<AtomicBool>,
}

impl<T> WorkerHandle<T> {
    pub fn try_recv(&self) -> Option<T> {
        if self.is_cancelled() {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        if self.is_cancelled() {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(msg) if !self.is_cancelled() => Some(msg),
            Ok(_) | Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Block until the next message, or `None` once the worker is gone.
    pub fn recv(&self) -> Option<T> {
        let msg = self.rx.recv().ok()?;
        if self.is_cancelled() {
            return None;
        }
        Some(msg)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl<T> Drop for WorkerHandle<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `job` on its own thread. Returns the receiving handle.
pub fn spawn<T, F>(job: F) -> WorkerHandle<T>
where
    T: Send + 'static,
    F: FnOnce(WorkerContext<T>) + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::unbounded::<T>();
    let cancelled = Arc::new(AtomicBool::new(false));
    let ctx = WorkerContext {
        tx,
        cancelled: cancelled.clone(),
    };

    thread::spawn(move || job(ctx));

    WorkerHandle { rx, cancelled }
}

/// Run a whole processing stage in the background, reporting each state.
///
/// `build` runs on the worker thread, so blocking HTTP clients are created
/// and dropped outside the caller's async runtime.
pub fn spawn_processing<F>(build: F, input: Option<ProcessingInput>) -> WorkerHandle<ProcessingEvent>
where
    F: FnOnce() -> Result<ProcessingUseCase, ConfigError> + Send + 'static,
{
    spawn(move |ctx: WorkerContext<ProcessingEvent>| {
        let mut use_case = match build() {
            Ok(use_case) => use_case,
            Err(e) => {
                log::error!("Cannot start processing: {e}");
                let outcome = PredictionOutcome::Failed(WorkflowError::TransportFailure(e.to_string()));
                ctx.send(ProcessingEvent::Finished(outcome));
                return;
            }
        };
        let state_ctx = ctx.clone();
        use_case.set_state_listener(Box::new(move |state| {
            state_ctx.send(ProcessingEvent::State(state.clone()));
        }));
        match use_case.execute(input, ctx.cancel_token()) {
            Some(outcome) => {
                ctx.send(ProcessingEvent::Finished(outcome));
            }
            None => log::debug!("Processing worker exiting after cancellation"),
        }
    })
}

/// Run a single face mesh extraction in the background (upload screen).
pub fn spawn_extraction<F>(build: F, image: SelectedImage) -> WorkerHandle<ExtractionResult>
where
    F: FnOnce() -> Result<Box<dyn FaceMeshExtractor>, ConfigError> + Send + 'static,
{
    spawn(move |ctx: WorkerContext<ExtractionResult>| {
        let result = match build() {
            Ok(extractor) => extractor.extract(&image),
            Err(e) => Err(ServiceError::Transport {
                url: String::new(),
                reason: e.to_string(),
            }),
        };
        if !ctx.send(result) {
            log::debug!("Discarding extraction result for {}", image.file_name());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::classifier::Classifier;
    use crate::classification::domain::prediction::{Label, Prediction};
    use crate::workflow::processing_use_case::ProcessingBackend;
    use crate::shared::service_config::ServiceConfig;
    use crate::workflow::workflow_error::COMMUNICATION_ERROR;
    use crate::workflow::workflow_logger::NullWorkflowLogger;
    use serde_json::json;
    use std::sync::Mutex;

    const TIMEOUT: Duration = Duration::from_secs(5);

    // --- Stubs ---

    /// Blocks inside `extract` until the test releases the gate.
    struct GatedExtractor {
        gate: Receiver<()>,
        entered: Sender<()>,
    }

    impl FaceMeshExtractor for GatedExtractor {
        fn extract(&self, _image: &SelectedImage) -> Result<LandmarkPayload, ServiceError> {
            let _ = self.entered.send(());
            let _ = self.gate.recv_timeout(TIMEOUT);
            Ok(mesh())
        }
    }

    struct InstantExtractor;

    impl FaceMeshExtractor for InstantExtractor {
        fn extract(&self, _image: &SelectedImage) -> Result<LandmarkPayload, ServiceError> {
            Ok(mesh())
        }
    }

    struct CountingClassifier {
        calls: Arc<Mutex<usize>>,
    }

    impl Classifier for CountingClassifier {
        fn predict(&self, _mesh: &LandmarkPayload) -> Result<Prediction, ServiceError> {
            *self.calls.lock().unwrap() += 1;
            Ok(Prediction::new(Label::Positive, Some(0.82)))
        }
    }

    // --- Helpers ---

    fn mesh() -> LandmarkPayload {
        LandmarkPayload::from_value(json!([[1, 2, 0.0]])).unwrap()
    }

    fn photo() -> SelectedImage {
        SelectedImage::new("photo.jpg", "image/jpeg", vec![0xff, 0xd8])
    }

    fn use_case(extractor: Box<dyn FaceMeshExtractor>, calls: &Arc<Mutex<usize>>) -> ProcessingUseCase {
        ProcessingUseCase::new(
            ProcessingBackend::Network {
                extractor,
                classifier: Box::new(CountingClassifier {
                    calls: calls.clone(),
                }),
            },
            Box::new(NullWorkflowLogger),
        )
    }

    fn drain(handle: &WorkerHandle<ProcessingEvent>) -> Vec<ProcessingEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.recv_timeout(TIMEOUT) {
            let done = matches!(event, ProcessingEvent::Finished(_));
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    // --- Tests ---

    #[test]
    fn test_processing_reports_states_then_outcome() {
        let calls = Arc::new(Mutex::new(0));
        let built = use_case(Box::new(InstantExtractor), &calls);
        let handle = spawn_processing(
            move || Ok(built),
            Some(ProcessingInput::SelectedFile(photo())),
        );

        let events = drain(&handle);
        let outcome = PredictionOutcome::Classified(Prediction::new(Label::Positive, Some(0.82)));
        assert_eq!(
            events,
            vec![
                ProcessingEvent::State(ProcessingState::AwaitingExtraction),
                ProcessingEvent::State(ProcessingState::AwaitingPrediction),
                ProcessingEvent::State(ProcessingState::Terminal(outcome.clone())),
                ProcessingEvent::Finished(outcome),
            ]
        );
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_cancel_while_request_outstanding_delivers_nothing() {
        let (release, gate) = crossbeam_channel::unbounded();
        let (entered_tx, entered) = crossbeam_channel::unbounded();
        let calls = Arc::new(Mutex::new(0));
        let built = use_case(
            Box::new(GatedExtractor {
                gate,
                entered: entered_tx,
            }),
            &calls,
        );
        let handle = spawn_processing(
            move || Ok(built),
            Some(ProcessingInput::SelectedFile(photo())),
        );

        entered.recv_timeout(TIMEOUT).unwrap();
        handle.cancel();
        release.send(()).unwrap();

        assert_eq!(handle.recv_timeout(Duration::from_millis(200)), None);
        assert_eq!(handle.try_recv(), None);
        // Give the worker time to (not) call the classifier.
        thread::sleep(Duration::from_millis(100));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_dropping_handle_cancels_job() {
        let (release, gate) = crossbeam_channel::unbounded();
        let (entered_tx, entered) = crossbeam_channel::unbounded();
        let calls = Arc::new(Mutex::new(0));
        let built = use_case(
            Box::new(GatedExtractor {
                gate,
                entered: entered_tx,
            }),
            &calls,
        );
        let handle = spawn_processing(
            move || Ok(built),
            Some(ProcessingInput::SelectedFile(photo())),
        );

        entered.recv_timeout(TIMEOUT).unwrap();
        drop(handle);
        release.send(()).unwrap();

        thread::sleep(Duration::from_millis(100));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_extraction_worker_delivers_result() {
        let handle = spawn_extraction(
            || Ok(Box::new(InstantExtractor) as Box<dyn FaceMeshExtractor>),
            photo(),
        );
        assert_eq!(handle.recv_timeout(TIMEOUT), Some(Ok(mesh())));
    }

    #[test]
    fn test_build_failure_finishes_with_communication_error() {
        let handle = spawn_processing(
            || Err(ServiceConfig::new("ftp://example.test").unwrap_err()),
            Some(ProcessingInput::SelectedFile(photo())),
        );
        let events = drain(&handle);
        assert_eq!(events.len(), 1);
        let ProcessingEvent::Finished(outcome) = &events[0] else {
            panic!("expected a finished event, got {:?}", events[0]);
        };
        assert_eq!(
            outcome.error().map(WorkflowError::user_message),
            Some(COMMUNICATION_ERROR)
        );
    }

    #[test]
    fn test_extraction_build_failure_is_transport_error() {
        let handle = spawn_extraction(
            || Err(ServiceConfig::new("not a url").unwrap_err()),
            photo(),
        );
        assert!(matches!(
            handle.recv_timeout(TIMEOUT),
            Some(Err(ServiceError::Transport { .. }))
        ));
    }

    #[test]
    fn test_messages_queued_before_cancel_are_discarded() {
        let handle = spawn(|ctx: WorkerContext<u32>| {
            ctx.send(1);
            ctx.send(2);
        });
        thread::sleep(Duration::from_millis(50));
        handle.cancel();
        assert_eq!(handle.try_recv(), None);
        assert_eq!(handle.recv(), None);
    }

    #[test]
    fn test_context_refuses_to_send_after_cancel() {
        let (done_tx, done) = crossbeam_channel::unbounded();
        let handle = spawn(move |ctx: WorkerContext<u32>| {
            while !ctx.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            done_tx.send(ctx.send(7)).unwrap();
        });
        handle.cancel();
        assert_eq!(done.recv_timeout(TIMEOUT), Ok(false));
    }
}
