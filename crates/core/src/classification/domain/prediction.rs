use serde_json::Value;

/// Binary label produced by the classification endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// `0`: no indication found.
    Negative,
    /// `1`: indication found.
    Positive,
}

impl Label {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Raw model score in `[0, 1]`, when the service reports one.
    pub confidence: Option<f64>,
}

impl Prediction {
    pub fn new(label: Label, confidence: Option<f64>) -> Self {
        Self { label, confidence }
    }

    /// Validate the `prediction` / `confidence` fields of a success response.
    pub fn from_fields(prediction: Option<&Value>, confidence: Option<&Value>) -> Result<Self, String> {
        let label = match prediction {
            None | Some(Value::Null) => return Err("missing prediction".to_string()),
            Some(value) => parse_label(value)
                .ok_or_else(|| format!("prediction must be 0 or 1, got {value}"))?,
        };

        let confidence = match confidence {
            None | Some(Value::Null) => None,
            Some(value) => {
                let score = value
                    .as_f64()
                    .ok_or_else(|| format!("confidence must be a number, got {value}"))?;
                if !(0.0..=1.0).contains(&score) {
                    return Err(format!("confidence must be within [0, 1], got {score}"));
                }
                Some(score)
            }
        };

        Ok(Self { label, confidence })
    }
}

fn parse_label(value: &Value) -> Option<Label> {
    if let Some(code) = value.as_u64() {
        return Label::from_code(code);
    }
    // Some serializers emit whole floats for integer classes.
    match value.as_f64() {
        Some(f) if f == 0.0 => Some(Label::Negative),
        Some(f) if f == 1.0 => Some(Label::Positive),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_positive_with_confidence() {
        let p = Prediction::from_fields(Some(&json!(1)), Some(&json!(0.82))).unwrap();
        assert_eq!(p.label, Label::Positive);
        assert_relative_eq!(p.confidence.unwrap(), 0.82);
    }

    #[test]
    fn test_negative_without_confidence() {
        let p = Prediction::from_fields(Some(&json!(0)), None).unwrap();
        assert_eq!(p, Prediction::new(Label::Negative, None));
    }

    #[test]
    fn test_null_confidence_is_absent() {
        let p = Prediction::from_fields(Some(&json!(1)), Some(&json!(null))).unwrap();
        assert!(p.confidence.is_none());
    }

    #[test]
    fn test_whole_float_label_accepted() {
        let p = Prediction::from_fields(Some(&json!(1.0)), None).unwrap();
        assert_eq!(p.label, Label::Positive);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::null(Some(json!(null)))]
    #[case::two(Some(json!(2)))]
    #[case::negative(Some(json!(-1)))]
    #[case::fraction(Some(json!(0.5)))]
    #[case::string(Some(json!("1")))]
    fn test_invalid_label_rejected(#[case] prediction: Option<Value>) {
        assert!(Prediction::from_fields(prediction.as_ref(), None).is_err());
    }

    #[rstest]
    #[case(json!(1.5))]
    #[case(json!(-0.1))]
    #[case(json!("high"))]
    fn test_invalid_confidence_rejected(#[case] confidence: Value) {
        assert!(Prediction::from_fields(Some(&json!(1)), Some(&confidence)).is_err());
    }

    #[test]
    fn test_label_codes_round_trip() {
        for label in [Label::Negative, Label::Positive] {
            assert_eq!(Label::from_code(label.code() as u64), Some(label));
        }
        assert_eq!(Label::from_code(7), None);
    }
}
