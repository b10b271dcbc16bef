//! Face mesh returned by the extraction endpoint.
//!
//! The workflow never looks inside the mesh: it is forwarded verbatim to the
//! prediction endpoint. Only an absent or empty mesh is rejected here.

use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LandmarkPayload(Value);

impl LandmarkPayload {
    pub fn from_value(value: Value) -> Result<Self, &'static str> {
        match &value {
            Value::Null => Err("face mesh is null"),
            Value::Array(points) if points.is_empty() => Err("face mesh has no landmarks"),
            Value::Object(fields) if fields.is_empty() => Err("face mesh is an empty object"),
            _ => Ok(Self(value)),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Number of landmarks when the mesh is a list of points.
    pub fn point_count(&self) -> Option<usize> {
        self.0.as_array().map(Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_point_list_accepted() {
        let payload = LandmarkPayload::from_value(json!([[10, 20, -0.01], [11, 21, 0.02]])).unwrap();
        assert_eq!(payload.point_count(), Some(2));
    }

    #[test]
    fn test_opaque_object_accepted() {
        let payload = LandmarkPayload::from_value(json!({"landmarks": [1, 2, 3]})).unwrap();
        assert_eq!(payload.point_count(), None);
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::empty_list(json!([]))]
    #[case::empty_object(json!({}))]
    fn test_empty_mesh_rejected(#[case] value: Value) {
        assert!(LandmarkPayload::from_value(value).is_err());
    }

    #[test]
    fn test_serializes_as_inner_value() {
        let payload = LandmarkPayload::from_value(json!([[1, 2, 0.5]])).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!([[1, 2, 0.5]]));
    }
}
