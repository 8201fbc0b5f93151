//! Inbound chat request and terminal response types.

use serde::{Deserialize, Serialize};

/// A chat request from the client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The raw message text.
    pub message: String,

    /// Explicit content URL, preferred over any URL found in the
    /// message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,

    /// Session to continue; absent means a fresh session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Backend model override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// The terminal response of a single-shot chat turn.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The generated assistant message.
    pub message: String,

    /// The session this turn belongs to (new or continued).
    pub session_id: String,

    /// The content URL resolved for this turn, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,

    /// The model requested, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_camel_case() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"hi","webUrl":"https://a.io","sessionId":"s1","model":"m"}"#,
        )
        .unwrap();
        assert_eq!(req.message, "hi");
        assert_eq!(req.web_url.as_deref(), Some("https://a.io"));
        assert_eq!(req.session_id.as_deref(), Some("s1"));
        assert_eq!(req.model.as_deref(), Some("m"));
    }

    #[test]
    fn request_fields_default_to_none() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(req.web_url.is_none());
        assert!(req.session_id.is_none());
        assert!(req.model.is_none());
    }

    #[test]
    fn response_omits_absent_fields() {
        let resp = ChatResponse {
            message: "ok".into(),
            session_id: "s1".into(),
            web_url: None,
            model: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"message":"ok","sessionId":"s1"}"#);
    }
}
