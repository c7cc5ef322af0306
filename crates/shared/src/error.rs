use serde::{Deserialize, Serialize};

/// Error payload some task stores attach to non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl StoreErrorBody {
    /// Best-effort one-line reason extracted from a raw response body.
    pub fn summarize(raw: &str) -> String {
        match serde_json::from_str::<StoreErrorBody>(raw) {
            Ok(StoreErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(StoreErrorBody {
                detail: serde_json::Value::Null,
            })
            | Err(_) => raw.trim().to_string(),
            Ok(StoreErrorBody { detail }) => detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreErrorBody;

    #[test]
    fn summarizes_string_detail() {
        assert_eq!(
            StoreErrorBody::summarize(r#"{"detail":"Task not found"}"#),
            "Task not found"
        );
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(
            StoreErrorBody::summarize("  Internal Server Error\n"),
            "Internal Server Error"
        );
    }

    #[test]
    fn keeps_structured_detail_as_json() {
        let summary = StoreErrorBody::summarize(r#"{"detail":[{"msg":"field required"}]}"#);
        assert!(summary.contains("field required"));
    }
}
