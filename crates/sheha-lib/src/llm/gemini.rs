//! Blocking client for the Gemini `generateContent` REST endpoint.
//!
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! Only single-turn, non-streaming text generation is supported.

use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::Generate;
use super::error::{ConfigError, GenerateError, make_snippet};
use super::settings::{API_KEY_VAR, GeminiSettings};

/// Thin blocking client for one Gemini model.
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    model: String,
    url: String,
}

impl GeminiClient {
    /// Build a client from `settings`.
    ///
    /// Fails before any request is made when the API key is missing, the
    /// endpoint has no http(s) scheme, or the HTTP client cannot be built.
    pub fn new(settings: &GeminiSettings) -> Result<Self, GenerateError> {
        let api_key = settings.api_key()?;
        let base = settings.base_url()?;

        let mut key_header =
            HeaderValue::from_str(api_key).map_err(|e| ConfigError::InvalidVar {
                var: API_KEY_VAR,
                reason: e.to_string(),
            })?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key_header);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()?;

        let url = format!("{base}/v1beta/models/{}:generateContent", settings.model);

        info!(
            model = %settings.model,
            endpoint = %base,
            timeout_secs = settings.timeout.as_secs(),
            "Gemini client initialized"
        );

        Ok(Self {
            client,
            model: settings.model.clone(),
            url,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Generate for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let started = Instant::now();
        let body = GenerateContentRequest::user_prompt(prompt);

        debug!(model = %self.model, prompt_len = prompt.len(), "POST {}", self.url);

        let resp = self.client.post(&self.url).json(&body).send()?;
        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            let snippet = make_snippet(&text);
            error!(
                %status,
                url = %self.url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "generateContent returned non-success status"
            );
            return Err(GenerateError::HttpStatus {
                status,
                url: self.url.clone(),
                snippet,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| GenerateError::Decode(e.to_string()))?;
        let output = extract_text(parsed)?;

        debug!(
            model = %self.model,
            output_len = output.len(),
            latency_ms = started.elapsed().as_millis(),
            "generateContent completed"
        );
        Ok(output)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    fn user_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(resp: GenerateContentResponse) -> Result<String, GenerateError> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(GenerateError::Blocked(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerateError::EmptyResponse(
            candidate
                .finish_reason
                .unwrap_or_else(|| "unknown".to_string()),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    fn parse(value: &serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value.clone()).unwrap()
    }

    fn settings_with_key() -> GeminiSettings {
        GeminiSettings {
            api_key: Some("test-key".to_string()),
            ..GeminiSettings::default()
        }
    }

    #[test]
    fn request_body_wraps_prompt_as_user_content() {
        let body = serde_json::to_value(GenerateContentRequest::user_prompt("Hi there")).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Hi there"}]}]})
        );
    }

    #[test]
    fn text_parts_are_concatenated() {
        let resp = parse(&json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "I'm Sheha!"}]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(extract_text(resp).unwrap(), "Hello, I'm Sheha!");
    }

    #[test]
    fn only_first_candidate_is_used() {
        let resp = parse(&json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }));
        assert_eq!(extract_text(resp).unwrap(), "first");
    }

    #[test]
    fn blocked_prompt_reports_block_reason() {
        let resp = parse(&json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        let err = extract_text(resp).unwrap_err();
        assert_eq!(err.to_string(), "prompt blocked: SAFETY");
    }

    #[test]
    fn candidate_without_text_is_empty_response() {
        let resp = parse(&json!({"candidates": [{"finishReason": "MAX_TOKENS"}]}));
        let err = extract_text(resp).unwrap_err();
        assert_eq!(err.to_string(), "empty response (finish reason: MAX_TOKENS)");
    }

    #[test]
    fn new_requires_api_key() {
        let err = GeminiClient::new(&GeminiSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Config(ConfigError::MissingVar("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn new_rejects_endpoint_without_scheme() {
        let settings = GeminiSettings {
            endpoint: "localhost:8080".to_string(),
            ..settings_with_key()
        };
        let err = GeminiClient::new(&settings).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Config(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn url_targets_configured_model() {
        let settings = GeminiSettings {
            endpoint: "https://example.test/".to_string(),
            model: "gemini-test".to_string(),
            timeout: Duration::from_secs(5),
            ..settings_with_key()
        };
        let client = GeminiClient::new(&settings).unwrap();
        assert_eq!(client.model(), "gemini-test");
        assert_eq!(
            client.url,
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn new_rejects_api_key_that_is_not_a_header_value() {
        let settings = GeminiSettings {
            api_key: Some("bad\nkey".to_string()),
            ..GeminiSettings::default()
        };
        let err = GeminiClient::new(&settings).unwrap_err();
        assert!(
            matches!(
                err,
                GenerateError::Config(ConfigError::InvalidVar {
                    var: "GEMINI_API_KEY",
                    ..
                })
            ),
            "{err:?}"
        );
    }

    /// What the local server saw of the single request it answered.
    struct Received {
        request_line: String,
        api_key: Option<String>,
        body: String,
    }

    /// Answer exactly one HTTP request on a loopback port with `status` and `body`.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Received>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut api_key = None;
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    let value = value.trim();
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.parse().unwrap();
                    } else if name.eq_ignore_ascii_case("x-goog-api-key") {
                        api_key = Some(value.to_string());
                    }
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();

            Received {
                request_line: request_line.trim_end().to_string(),
                api_key,
                body: String::from_utf8(request_body).unwrap(),
            }
        });
        (endpoint, handle)
    }

    fn client_for(endpoint: String) -> GeminiClient {
        GeminiClient::new(&GeminiSettings {
            endpoint,
            model: "gemini-test".to_string(),
            timeout: Duration::from_secs(10),
            ..settings_with_key()
        })
        .unwrap()
    }

    #[test]
    fn generate_posts_prompt_and_returns_candidate_text() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hi, I'm Sheha!"}]},"finishReason":"STOP"}]}"#,
        );
        let client = client_for(endpoint);

        let text = client.generate("Who are you?").unwrap();
        let received = server.join().unwrap();

        assert_eq!(text, "Hi, I'm Sheha!");
        assert_eq!(
            received.request_line,
            "POST /v1beta/models/gemini-test:generateContent HTTP/1.1"
        );
        assert_eq!(received.api_key.as_deref(), Some("test-key"));
        let body: serde_json::Value = serde_json::from_str(&received.body).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Who are you?"}]}]})
        );
    }

    #[test]
    fn generate_maps_error_status_to_http_status_with_snippet() {
        let (endpoint, server) = serve_once(
            "503 Service Unavailable",
            "{\n  \"error\": {\n    \"message\":   \"quota exhausted\"\n  }\n}\n",
        );
        let client = client_for(endpoint.clone());

        let err = client.generate("Who are you?").unwrap_err();
        server.join().unwrap();

        match err {
            GenerateError::HttpStatus {
                status,
                url,
                snippet,
            } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(
                    url,
                    format!("{endpoint}/v1beta/models/gemini-test:generateContent")
                );
                assert_eq!(snippet, r#"{ "error": { "message": "quota exhausted" } }"#);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn generate_maps_non_json_body_to_decode() {
        let (endpoint, server) = serve_once("200 OK", "not json");
        let client = client_for(endpoint);

        let err = client.generate("Who are you?").unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, GenerateError::Decode(_)), "{err:?}");
    }
}
