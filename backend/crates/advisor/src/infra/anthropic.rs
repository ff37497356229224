//! Reqwest-backed Messages API client.
//!
//! This adapter owns transport details only: request serialisation, timeout,
//! HTTP error mapping and extraction of the reply text.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::config::AdvisorConfig;
use crate::domain::completion::{CompletionRequest, CompletionService};
use crate::error::{AdvisorError, AdvisorResult};

const API_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/v1/messages";
const KEY_PREFIX: &str = "sk-ant-";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Completion service backed by the Anthropic Messages API
pub struct AnthropicClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl AnthropicClient {
    /// Build a client with an explicit request timeout
    ///
    /// A missing key is not an error here: the client is built and every
    /// call fails with `NotConfigured`.
    pub fn new(config: &AdvisorConfig) -> Result<Self, reqwest::Error> {
        match config.api_key.as_deref() {
            None => tracing::warn!("Completion API key is missing; advisor chat is disabled"),
            Some(key) if !key.starts_with(KEY_PREFIX) => {
                tracing::warn!("Completion API key does not look valid")
            }
            Some(_) => {}
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", config.endpoint.trim_end_matches('/'), MESSAGES_PATH),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

impl CompletionService for AnthropicClient {
    async fn complete(&self, request: &CompletionRequest) -> AdvisorResult<Option<String>> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::NotConfigured)?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: [Message {
                role: "user",
                content: &request.message,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }

        parse_reply(&bytes)
    }
}

fn parse_reply(body: &[u8]) -> AdvisorResult<Option<String>> {
    let decoded: MessagesResponse = serde_json::from_slice(body)
        .map_err(|e| AdvisorError::Upstream(format!("invalid response JSON: {e}")))?;

    Ok(decoded
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .filter(|text| !text.is_empty()))
}

fn map_transport_error(error: reqwest::Error) -> AdvisorError {
    if error.is_timeout() || error.is_connect() {
        AdvisorError::Unavailable(error.to_string())
    } else {
        AdvisorError::Upstream(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AdvisorError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdvisorError::AuthFailed,
        _ => AdvisorError::Upstream(format!("status {}: {}", status.as_u16(), body_preview(body))),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_takes_first_text_block() {
        let body = br#"{
            "id": "msg_1",
            "content": [
                {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                {"type": "text", "text": "Hello there"},
                {"type": "text", "text": "ignored"}
            ]
        }"#;
        assert_eq!(parse_reply(body).unwrap(), Some("Hello there".to_string()));
    }

    #[test]
    fn test_parse_reply_without_text() {
        assert_eq!(parse_reply(br#"{"content": []}"#).unwrap(), None);
        assert_eq!(parse_reply(br#"{}"#).unwrap(), None);
        assert_eq!(
            parse_reply(br#"{"content": [{"type": "text", "text": ""}]}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_reply_rejects_garbage() {
        assert!(matches!(
            parse_reply(b"<html>bad gateway</html>"),
            Err(AdvisorError::Upstream(_))
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED, b""),
            AdvisorError::AuthFailed
        ));
        assert!(matches!(
            map_status_error(StatusCode::FORBIDDEN, b""),
            AdvisorError::AuthFailed
        ));
        match map_status_error(StatusCode::BAD_REQUEST, b"{\n  \"error\": \"bad\"\n}") {
            AdvisorError::Upstream(detail) => {
                assert_eq!(detail, "status 400: { \"error\": \"bad\" }")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let body = MessagesRequest {
            model: "m",
            max_tokens: 10,
            system: "sys",
            messages: [Message {
                role: "user",
                content: "hi",
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "m",
                "max_tokens": 10,
                "system": "sys",
                "messages": [{"role": "user", "content": "hi"}]
            })
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = AnthropicClient::new(&AdvisorConfig::default()).unwrap();
        let request = CompletionRequest {
            system: "sys".into(),
            message: "hi".into(),
            max_tokens: 10,
        };
        assert!(matches!(
            client.complete(&request).await,
            Err(AdvisorError::NotConfigured)
        ));
    }
}
