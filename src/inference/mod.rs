//! Inference client
//!
//! Sends the user's prompt, and any attached files, to the assistant
//! backend's invoke endpoint and returns the reply text. Single request,
//! no retry.

mod attachment;

pub use attachment::Attachment;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

use crate::config::Inference;
use crate::error::{Result, VerionError};

/// Prompt sent alongside files when the user typed nothing
pub const DEFAULT_FILE_PROMPT: &str = "Please analyze this document";

/// Reply used when the backend answers without text
pub const EMPTY_REPLY: &str = "No response from agent";

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    output: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the invoke endpoint
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    url: String,
}

impl InferenceClient {
    pub fn new(config: &Inference) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            url: config.url(),
        })
    }

    /// Ask the assistant. Text-only prompts go as JSON, prompts with files
    /// as a multipart form.
    pub async fn invoke(&self, prompt: &str, attachments: &[Attachment]) -> Result<String> {
        let request = self.http.post(&self.url);
        let request = if attachments.is_empty() {
            request.json(&json!({ "text": prompt }))
        } else {
            request.multipart(multipart_form(prompt, attachments))
        };

        tracing::info!(url = %self.url, files = attachments.len(), "sending inference request");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%status, "inference response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(VerionError::Inference(message));
        }

        let data: InvokeResponse = response.json().await?;
        Ok(reply_text(data))
    }
}

fn multipart_form(prompt: &str, attachments: &[Attachment]) -> Form {
    let input = if prompt.trim().is_empty() {
        DEFAULT_FILE_PROMPT.to_string()
    } else {
        prompt.to_string()
    };

    attachments
        .iter()
        .fold(Form::new().text("input", input), |form, attachment| {
            let part = Part::bytes(attachment.bytes.clone()).file_name(attachment.name.clone());
            form.part("file_data", part)
                .text("file_type", attachment.file_type.clone())
        })
}

fn reply_text(data: InvokeResponse) -> String {
    data.response
        .filter(|s| !s.is_empty())
        .or(data.output.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}

#[cfg(test)]
mod tests {
    use super::attachment::detect_file_type;
    use super::*;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> InferenceClient {
        let config = Inference {
            api_base_url: server.uri(),
            ..Inference::default()
        };
        InferenceClient::new(&config).unwrap()
    }

    fn attachment(name: &str, body: &[u8]) -> Attachment {
        Attachment {
            name: name.to_string(),
            file_type: detect_file_type(name, body),
            bytes: body.to_vec(),
        }
    }

    #[test]
    fn test_reply_text_prefers_response() {
        let data = InvokeResponse {
            response: Some("a".to_string()),
            output: Some("b".to_string()),
        };
        assert_eq!(reply_text(data), "a");
    }

    #[test]
    fn test_reply_text_falls_back_to_output_then_default() {
        let data = InvokeResponse {
            response: Some(String::new()),
            output: Some("b".to_string()),
        };
        assert_eq!(reply_text(data), "b");

        let data = InvokeResponse {
            response: None,
            output: None,
        };
        assert_eq!(reply_text(data), EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_text_prompt_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke"))
            .and(body_json(json!({ "text": "What is an NDA?" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "# NDA\nA confidentiality contract." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .invoke("What is an NDA?", &[])
            .await
            .unwrap();
        assert_eq!(reply, "# NDA\nA confidentiality contract.");
    }

    #[tokio::test]
    async fn test_files_post_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke"))
            .and(body_string_contains(DEFAULT_FILE_PROMPT))
            .and(body_string_contains("name=\"file_data\"; filename=\"lease.txt\""))
            .and(body_string_contains("name=\"file_type\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "output": "Summary" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let files = [attachment("lease.txt", b"The tenant shall pay.")];
        let reply = client_for(&server).invoke("", &files).await.unwrap();
        assert_eq!(reply, "Summary");
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "model offline" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).invoke("hi", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Inference error: model offline");
    }

    #[tokio::test]
    async fn test_error_without_body_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).invoke("hi", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Inference error: HTTP error! status: 503");
    }
}
