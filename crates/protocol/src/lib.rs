use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Inbound invocation envelope.
///
/// Callers send `{"input": {"prompt": ...}}`; older clients put the prompt at
/// the top level, and some omit it entirely. All fields are optional so that
/// any well-formed JSON object deserializes.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct InvokeRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub input: Option<InvokeInput>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct InvokeInput {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl InvokeRequest {
    /// Resolves the prompt: a non-empty `input.prompt`, then the top-level
    /// `prompt`, then the empty string. An empty nested prompt falls through
    /// instead of masking a usable top-level one.
    pub fn prompt(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|input| input.prompt.as_deref())
            .filter(|prompt| !prompt.is_empty())
            .or(self.prompt.as_deref())
            .unwrap_or_default()
    }
}

/// Outbound invocation envelope. `session_id` echoes the request verbatim,
/// serialized as `null` when the caller sent none.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InvokeResponse {
    pub result: String,
    pub session_id: Option<String>,
}

impl InvokeResponse {
    pub fn new(result: String, session_id: Option<String>) -> Self {
        Self { result, session_id }
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_prefers_nested_input() {
        let request: InvokeRequest = serde_json::from_str(
            r#"{"mode":"single","input":{"prompt":"nested"},"prompt":"legacy","session_id":"s-1"}"#,
        )
        .unwrap();
        assert_eq!(request.prompt(), "nested");
        assert_eq!(request.session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn prompt_falls_back_to_top_level() {
        let request: InvokeRequest =
            serde_json::from_str(r#"{"prompt":"legacy"}"#).unwrap();
        assert_eq!(request.prompt(), "legacy");
    }

    #[test]
    fn prompt_defaults_to_empty() {
        let request: InvokeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.prompt(), "");
        assert_eq!(request.session_id, None);
    }

    #[test]
    fn nested_object_without_prompt_falls_through() {
        let request: InvokeRequest =
            serde_json::from_str(r#"{"input":{},"prompt":"legacy"}"#).unwrap();
        assert_eq!(request.prompt(), "legacy");
    }

    #[test]
    fn empty_nested_prompt_falls_back_to_top_level() {
        let request: InvokeRequest =
            serde_json::from_str(r#"{"input":{"prompt":""},"prompt":"legacy"}"#).unwrap();
        assert_eq!(request.prompt(), "legacy");

        let request: InvokeRequest =
            serde_json::from_str(r#"{"input":{"prompt":""}}"#).unwrap();
        assert_eq!(request.prompt(), "");
    }

    #[test]
    fn response_serializes_null_session() {
        let response = InvokeResponse::new("advice".to_string(), None);
        let raw = serialize_json(&response).unwrap();
        assert_eq!(raw, r#"{"result":"advice","session_id":null}"#);
    }

    #[test]
    fn response_round_trips_session() {
        let response = InvokeResponse::new("advice".to_string(), Some("s-2".to_string()));
        let raw = serialize_json(&response).unwrap();
        let back: InvokeResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, response);
    }
}
