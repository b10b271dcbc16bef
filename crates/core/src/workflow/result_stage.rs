use std::fmt;

use crate::classification::domain::prediction::Label;
use crate::workflow::prediction_outcome::PredictionOutcome;

pub const RESULT_TITLE: &str = "Analysis Result";
pub const POSITIVE_INDICATION: &str = "Our algorithm detected signs of autism.";
pub const NEGATIVE_INDICATION: &str = "Our algorithm did not detect signs of autism.";
pub const PROFESSIONAL_ADVICE: &str =
    "For a more complete and reliable assessment, consult a specialized professional.";

/// What the result screen shows. Exactly one of the three views, derived
/// from the outcome alone, so rendering is repeatable.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Error { message: String },
    PositiveIndication { confidence: Option<f64> },
    NegativeIndication { confidence: Option<f64> },
}

impl ResultView {
    pub fn render(outcome: &PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Failed(err) => ResultView::Error {
                message: err.user_message().to_string(),
            },
            PredictionOutcome::Classified(p) => match p.label {
                Label::Positive => ResultView::PositiveIndication {
                    confidence: p.confidence,
                },
                Label::Negative => ResultView::NegativeIndication {
                    confidence: p.confidence,
                },
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultView::Error { .. })
    }

    pub fn message(&self) -> String {
        match self {
            ResultView::Error { message } => format!("An error occurred: {message}"),
            ResultView::PositiveIndication { .. } => POSITIVE_INDICATION.to_string(),
            ResultView::NegativeIndication { .. } => NEGATIVE_INDICATION.to_string(),
        }
    }

    pub fn confidence_text(&self) -> Option<String> {
        match self {
            ResultView::PositiveIndication {
                confidence: Some(c),
            }
            | ResultView::NegativeIndication {
                confidence: Some(c),
            } => Some(format!("Model score: {:.0}%", c * 100.0)),
            _ => None,
        }
    }

    /// Shown with every classification, never with an error.
    pub fn advice(&self) -> Option<&'static str> {
        if self.is_error() {
            None
        } else {
            Some(PROFESSIONAL_ADVICE)
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RESULT_TITLE}")?;
        write!(f, "{}", self.message())?;
        if let Some(confidence) = self.confidence_text() {
            write!(f, "\n{confidence}")?;
        }
        if let Some(advice) = self.advice() {
            write!(f, "\n{advice}")?;
        }
        Ok(())
    }
}
