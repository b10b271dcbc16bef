use crate::detection::domain::face_mesh_extractor::FaceMeshExtractor;
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::selected_image::SelectedImage;
use crate::shared::service_error::ServiceError;
use crate::workflow::navigation::ProcessingInput;
use crate::workflow::workflow_error::WorkflowError;

/// What the upload screen does when the user continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// Hand the photo to processing, which extracts and then predicts.
    #[default]
    Forward,
    /// Extract the face mesh right away and hand the mesh to processing.
    /// Failures keep the user on the upload screen.
    ExtractFirst,
}

/// Work the caller must perform to complete a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    /// Navigate to processing with this payload.
    Navigate(ProcessingInput),
    /// Run extraction on this photo, then call [`UploadStage::finish_extraction`].
    Extract(SelectedImage),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing selected or a submission already outstanding.
    Inert,
    Navigate(ProcessingInput),
    /// Extraction failed; the user stays on the upload screen.
    Failed(WorkflowError),
}

/// Holds the user's photo until it is submitted.
#[derive(Debug, Default)]
pub struct UploadStage {
    mode: SubmitMode,
    selected: Option<SelectedImage>,
    submitting: bool,
    error: Option<WorkflowError>,
}

impl UploadStage {
    pub fn new(mode: SubmitMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    /// Replace the current photo, if any. Ignored while a submission is out.
    pub fn select(&mut self, image: SelectedImage) -> bool {
        if self.submitting {
            return false;
        }
        if let Some(previous) = &self.selected {
            log::debug!("Replacing {} with {}", previous.file_name(), image.file_name());
        }
        self.selected = Some(image);
        self.error = None;
        true
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Inline error from the last extraction attempt.
    pub fn error(&self) -> Option<&WorkflowError> {
        self.error.as_ref()
    }

    /// The continue control is enabled exactly when this is true.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.submitting
    }

    /// Start a submission. `None` means the submit is inert.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.can_submit() {
            log::debug!("Submit ignored: nothing to send");
            return None;
        }
        match self.mode {
            SubmitMode::Forward => {
                let image = self.selected.take()?;
                Some(SubmitRequest::Navigate(ProcessingInput::SelectedFile(image)))
            }
            SubmitMode::ExtractFirst => {
                let image = self.selected.clone()?;
                self.submitting = true;
                self.error = None;
                Some(SubmitRequest::Extract(image))
            }
        }
    }

    /// Complete an [`SubmitMode::ExtractFirst`] submission.
    pub fn finish_extraction(
        &mut self,
        result: Result<LandmarkPayload, ServiceError>,
    ) -> SubmitOutcome {
        if !self.submitting {
            return SubmitOutcome::Inert;
        }
        self.submitting = false;
        match result {
            Ok(mesh) => {
                self.selected = None;
                SubmitOutcome::Navigate(ProcessingInput::FaceMesh(mesh))
            }
            Err(e) => {
                log::warn!("Face mesh extraction failed: {e}");
                let err = WorkflowError::from_extraction(e);
                self.error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Abandon an outstanding extraction; its result will be ignored.
    pub fn abandon_submit(&mut self) {
        self.submitting = false;
    }

    /// Submit synchronously, running extraction inline when the mode needs it.
    pub fn submit(&mut self, extractor: &dyn FaceMeshExtractor) -> SubmitOutcome {
        match self.begin_submit() {
            None => SubmitOutcome::Inert,
            Some(SubmitRequest::Navigate(input)) => SubmitOutcome::Navigate(input),
            Some(SubmitRequest::Extract(image)) => {
                let result = extractor.extract(&image);
                self.finish_extraction(result)
            }
        }
    }
}
