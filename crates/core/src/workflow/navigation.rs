//! Screen-to-screen navigation for the wizard.
//!
//! Each transition moves its payload by value: the upload screen hands a
//! [`ProcessingInput`] to processing, processing hands a
//! [`PredictionOutcome`] to the result screen. Nothing is kept in an ambient
//! state bag.

use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::constants::INSTRUCTION_SLIDE_COUNT;
use crate::shared::selected_image::SelectedImage;
use crate::workflow::prediction_outcome::PredictionOutcome;

pub const INSTRUCTION_SLIDES: [&str; INSTRUCTION_SLIDE_COUNT] = [
    "Take the photo from about 0.5 meters away, with the camera at face height.",
    "This is how the photo should look: the whole face visible, centered and well lit.",
    "Avoid accessories such as glasses or hats that may cover the face. Keep a neutral \
     expression with the head straight. This analysis is only a reference and does not \
     replace a consultation with a qualified professional.",
];

/// What the upload screen hands to processing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingInput {
    /// The photo itself; processing runs extraction then prediction.
    SelectedFile(SelectedImage),
    /// A mesh already extracted on upload; processing only predicts.
    FaceMesh(LandmarkPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Opening,
    Instructions { slide: usize },
    Upload,
    Processing,
    Result(PredictionOutcome),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Opening => "opening",
            Screen::Instructions { .. } => "instructions",
            Screen::Upload => "upload",
            Screen::Processing => "processing",
            Screen::Result(_) => "result",
        }
    }
}

/// Linear wizard: opening → instructions → upload → processing → result.
///
/// Every transition returns whether it happened; requests made from the
/// wrong screen are ignored.
#[derive(Debug)]
pub struct Wizard {
    screen: Screen,
    handoff: Option<ProcessingInput>,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            screen: Screen::Opening,
            handoff: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn start(&mut self) -> bool {
        if self.screen != Screen::Opening {
            return self.reject("start");
        }
        self.go(Screen::Instructions { slide: 0 })
    }

    /// Next instruction slide, or the upload screen after the last one.
    pub fn next_slide(&mut self) -> bool {
        let Screen::Instructions { slide } = self.screen else {
            return self.reject("next_slide");
        };
        if slide + 1 < INSTRUCTION_SLIDE_COUNT {
            self.go(Screen::Instructions { slide: slide + 1 })
        } else {
            self.go(Screen::Upload)
        }
    }

    pub fn previous_slide(&mut self) -> bool {
        match self.screen {
            Screen::Instructions { slide } if slide > 0 => {
                self.go(Screen::Instructions { slide: slide - 1 })
            }
            _ => self.reject("previous_slide"),
        }
    }

    pub fn submit_upload(&mut self, input: ProcessingInput) -> bool {
        if self.screen != Screen::Upload {
            return self.reject("submit_upload");
        }
        self.handoff = Some(input);
        self.go(Screen::Processing)
    }

    /// Hand the upload payload to the processing stage. Yields it once.
    pub fn take_processing_input(&mut self) -> Option<ProcessingInput> {
        if self.screen != Screen::Processing {
            return None;
        }
        self.handoff.take()
    }

    pub fn finish_processing(&mut self, outcome: PredictionOutcome) -> bool {
        if self.screen != Screen::Processing {
            return self.reject("finish_processing");
        }
        self.handoff = None;
        self.go(Screen::Result(outcome))
    }

    /// Back to the upload screen to try again. Allowed from processing
    /// (abandoning the run) and from the result screen.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.screen, Screen::Processing | Screen::Result(_)) {
            return self.reject("restart");
        }
        self.handoff = None;
        self.go(Screen::Upload)
    }

    fn go(&mut self, next: Screen) -> bool {
        log::debug!("Navigate {} -> {}", self.screen.name(), next.name());
        self.screen = next;
        true
    }

    fn reject(&self, transition: &str) -> bool {
        log::debug!("Ignoring {transition} on {} screen", self.screen.name());
        false
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
