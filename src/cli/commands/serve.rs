//! HTTP gateway for the notes generator.
//!
//! Exposes the agent behind a small JSON API for frontend integration.

use crate::agent::{Agent, MessageContent, NotesGenerator};
use crate::cli::Output;
use crate::config::{ServerSettings, Settings};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    generator: Arc<dyn NotesGenerator>,
}

/// Run the HTTP gateway.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let agent = Agent::from_settings(&settings)?;

    let state = Arc::new(AppState {
        generator: Arc::new(agent),
    });

    let app = router(state).layer(cors_layer(&settings.server));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Notegen API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Info", "GET  /");
    Output::kv("Generate", "POST /generate");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/generate", post(generate))
        .with_state(state)
}

/// CORS layer restricted to the configured frontend origins.
///
/// Credentialed requests rule out wildcards, so methods and headers mirror
/// the preflight request instead.
fn cors_layer(server: &ServerSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

// === Request/Response Types ===

#[derive(Serialize)]
struct GenerateResponse {
    html_content: String,
    messages: Vec<TranscriptEntry>,
}

/// A transcript message as exposed over HTTP. Only messages that actually
/// carry content appear here.
#[derive(Serialize)]
struct TranscriptEntry {
    role: String,
    content: MessageContent,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// An error response with the FastAPI-style `{"detail": ...}` body shape
/// the frontend expects.
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

// === Handlers ===

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Notes Generator API is running. Use the /generate endpoint (POST) to submit content."
    }))
}

/// Generate notes for the submitted syllabus content.
///
/// The body is parsed by hand rather than through a typed extractor: a
/// missing or empty `content` field must map to 400 with a fixed message,
/// while an unparseable body maps to 500, and extractors impose their own
/// status codes.
async fn generate(State(state): State<Arc<AppState>>, body: String) -> Response {
    let data: serde_json::Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            error!("Error processing request: {}", e);
            return ApiError::internal(format!("Failed to process request: {}", e))
                .into_response();
        }
    };

    let content = data
        .get("content")
        .and_then(|value| value.as_str())
        .filter(|content| !content.is_empty());

    let Some(content) = content else {
        return ApiError::bad_request("Missing 'content' in request body").into_response();
    };

    match state.generator.generate(content).await {
        Ok(response) => {
            let messages = response
                .transcript
                .into_iter()
                .filter_map(|msg| {
                    msg.content.map(|content| TranscriptEntry {
                        role: msg.role,
                        content,
                    })
                })
                .collect();

            Json(GenerateResponse {
                html_content: response.content,
                messages,
            })
            .into_response()
        }
        Err(e) => {
            error!("Error during agent execution: {}", e);
            ApiError::internal(format!("An error occurred during generation: {}", e))
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentResponse, TranscriptMessage};
    use crate::error::{NotegenError, Result};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    /// Stub generator so handler behavior can be tested without a model.
    struct StubGenerator {
        html: String,
        transcript: Vec<TranscriptMessage>,
        fail_with: Option<String>,
    }

    #[async_trait::async_trait]
    impl NotesGenerator for StubGenerator {
        async fn generate(&self, _content: &str) -> Result<AgentResponse> {
            if let Some(message) = &self.fail_with {
                return Err(NotegenError::Agent(message.clone()));
            }
            Ok(AgentResponse {
                content: self.html.clone(),
                transcript: self.transcript.clone(),
                tool_calls: Vec::new(),
                iterations: 1,
            })
        }
    }

    fn test_router(stub: StubGenerator) -> Router {
        router(Arc::new(AppState {
            generator: Arc::new(stub),
        }))
    }

    fn ok_stub() -> StubGenerator {
        StubGenerator {
            html: "<html><body>notes</body></html>".to_string(),
            transcript: vec![
                TranscriptMessage::text("system", "prompt"),
                TranscriptMessage::text("user", "task"),
                TranscriptMessage::empty("assistant"),
                TranscriptMessage::text("tool", "Found 2 results"),
                TranscriptMessage::text("assistant", "<html><body>notes</body></html>"),
            ],
            fail_with: None,
        }
    }

    fn post_generate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_running_message() {
        let app = test_router(ok_stub());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["message"],
            "Notes Generator API is running. Use the /generate endpoint (POST) to submit content."
        );
    }

    #[tokio::test]
    async fn test_generate_missing_content() {
        for body in [r#"{}"#, r#"{"content": null}"#, r#"{"content": ""}"#] {
            let app = test_router(ok_stub());
            let response = app.oneshot(post_generate(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert_eq!(json["detail"], "Missing 'content' in request body");
        }
    }

    #[tokio::test]
    async fn test_generate_non_string_content_rejected() {
        let app = test_router(ok_stub());
        let response = app
            .oneshot(post_generate(r#"{"content": 42}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let app = test_router(ok_stub());
        let response = app.oneshot(post_generate("not json at all")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        let detail = json["detail"].as_str().unwrap();
        assert!(detail.starts_with("Failed to process request: "));
    }

    #[tokio::test]
    async fn test_generate_success_shape() {
        let app = test_router(ok_stub());
        let response = app
            .oneshot(post_generate(r#"{"content": "B-trees"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        // Exactly two top-level keys.
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(json["html_content"], "<html><body>notes</body></html>");

        // The content-less assistant turn is dropped; order is preserved.
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        let roles: Vec<&str> = messages
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "tool", "assistant"]);
    }

    #[tokio::test]
    async fn test_generate_agent_failure() {
        let mut stub = ok_stub();
        stub.fail_with = Some("image quota exceeded".to_string());
        let app = test_router(stub);

        let response = app
            .oneshot(post_generate(r#"{"content": "B-trees"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        let detail = json["detail"].as_str().unwrap();
        assert!(detail.starts_with("An error occurred during generation: "));
        assert!(detail.contains("image quota exceeded"));
    }

    #[tokio::test]
    async fn test_generate_structured_tool_content_passes_through() {
        let stub = StubGenerator {
            html: "<p>x</p>".to_string(),
            transcript: vec![
                TranscriptMessage::text("user", "task"),
                TranscriptMessage {
                    role: "tool".to_string(),
                    content: Some(MessageContent::from_result(
                        r#"["https://a.png","https://b.png"]"#,
                    )),
                },
                TranscriptMessage::text("assistant", "<p>x</p>"),
            ],
            fail_with: None,
        };
        let app = test_router(stub);

        let response = app
            .oneshot(post_generate(r#"{"content": "topic"}"#))
            .await
            .unwrap();
        let json = body_json(response).await;

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages[1]["role"], "tool");
        assert_eq!(
            messages[1]["content"],
            serde_json::json!(["https://a.png", "https://b.png"])
        );
    }

    #[test]
    fn test_cors_layer_accepts_configured_origins() {
        // Construction must not panic with an explicit origin list plus
        // credentials (wildcards would).
        let _ = cors_layer(&ServerSettings::default());
    }
}
