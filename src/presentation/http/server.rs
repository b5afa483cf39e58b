use axum::{Router, extract::DefaultBodyLimit};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppContainer;
use crate::presentation::http::{
    handlers::{ChatHandler, DocumentHandler, QuizHandler, VideoHandler},
    routes::{chat_routes, document_routes, health_routes, quiz_routes, video_routes},
};

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub struct HttpServer {
    document_handler: Arc<DocumentHandler>,
    quiz_handler: Arc<QuizHandler>,
    chat_handler: Arc<ChatHandler>,
    video_handler: Arc<VideoHandler>,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
    port: u16,
}

impl HttpServer {
    pub fn new(container: &AppContainer) -> Self {
        Self {
            document_handler: container.document_handler.clone(),
            quiz_handler: container.quiz_handler.clone(),
            chat_handler: container.chat_handler.clone(),
            video_handler: container.video_handler.clone(),
            upload_dir: container.config.upload_dir.clone(),
            max_upload_bytes: container.config.max_upload_bytes,
            port: container.config.port,
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let body_limit = self.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

        let api = Router::new()
            .merge(health_routes())
            .merge(document_routes(self.document_handler.clone()))
            .merge(quiz_routes(self.quiz_handler.clone()))
            .merge(chat_routes(self.chat_handler.clone()))
            .merge(video_routes(self.video_handler.clone()));

        Router::new()
            .nest("/api", api)
            .nest_service("/uploads", ServeDir::new(&self.upload_dir))
            .layer(cors)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;

        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::ports::{CompletionProvider, VideoProvider};
    use crate::infrastructure::AppConfig;
    use crate::infrastructure::container::AppPorts;
    use crate::testing::{
        FakeDocumentExtractor, InMemoryAttemptRepository, InMemoryChatSessionRepository,
        InMemoryDocumentRepository, InMemoryFileStorage, StubCompletionProvider,
        StubVideoProvider,
    };

    const BOUNDARY: &str = "coursebook-test-boundary";

    const THREE_MCQ: &str = r#"{"questions": [
        {"question": "What does Newton's first law describe?",
         "options": ["Inertia", "Gravity", "Friction", "Momentum"],
         "correct_answer": "Inertia",
         "explanation": "A body keeps its state of motion unless a force acts on it."},
        {"question": "Which expression gives the net force?",
         "options": ["ma", "mv", "mg", "m/a"],
         "correct_answer": "ma",
         "explanation": "Second law."},
        {"question": "Every action has an equal and opposite what?",
         "options": ["Reaction", "Force", "Mass", "Speed"],
         "correct_answer": "Reaction",
         "explanation": "Third law."}
    ]}"#;

    fn app_with(
        completion_provider: Arc<dyn CompletionProvider>,
        video_provider: Arc<dyn VideoProvider>,
    ) -> Router {
        let config = AppConfig {
            upload_dir: std::env::temp_dir().join("coursebook-router-tests"),
            ..AppConfig::default()
        };
        let ports = AppPorts {
            document_repository: Arc::new(InMemoryDocumentRepository::default()),
            attempt_repository: Arc::new(InMemoryAttemptRepository::default()),
            chat_session_repository: Arc::new(InMemoryChatSessionRepository::default()),
            document_extractor: Arc::new(FakeDocumentExtractor),
            file_storage: Arc::new(InMemoryFileStorage::default()),
            completion_provider,
            video_provider,
        };

        let container = AppContainer::from_parts(config, ports).unwrap();
        HttpServer::new(&container).router()
    }

    fn app(reply: &str) -> Router {
        app_with(
            Arc::new(StubCompletionProvider::replying(reply)),
            Arc::new(StubVideoProvider::unconfigured()),
        )
    }

    fn upload_request(field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn newton_text() -> String {
        let mut text = "Newton's laws of motion ".repeat(30);
        text.truncate(600);
        text
    }

    #[tokio::test]
    async fn test_ping_and_health() {
        let app = app("unused");

        let (status, body) = send(&app, get("/api/ping")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));

        let (status, body) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_upload_quiz_and_grade_end_to_end() {
        let app = app(THREE_MCQ);

        let (status, body) = send(
            &app,
            upload_request("pdf", "newton.pdf", &FakeDocumentExtractor::pdf(&newton_text())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "newton.pdf");
        assert_eq!(body["success"], true);
        assert_eq!(body["chunks"], 1);

        let (_, body) = send(&app, get("/api/pdfs")).await;
        assert_eq!(body, json!(["newton.pdf"]));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/generate-quiz",
                json!({"pdfName": "newton.pdf", "questionType": "MCQ", "count": 3}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let questions = body["questions"].clone();
        assert_eq!(questions.as_array().unwrap().len(), 3);
        assert_eq!(questions[0]["correct_answer"], "Inertia");

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/submit-quiz",
                json!({
                    "pdfName": "newton.pdf",
                    "questions": questions,
                    "answers": ["Inertia", "mv", "Force"],
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 1);
        assert_eq!(body["total"], 3);
        let attempt_id = body["attemptId"].clone();

        let (status, body) = send(&app, get("/api/progress?limit=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], attempt_id);
        assert_eq!(body[0]["pdf_name"], "newton.pdf");
        assert_eq!(body[0]["score"], 1);
    }

    #[tokio::test]
    async fn test_upload_failures() {
        let app = app("unused");

        let (status, body) = send(&app, upload_request("pdf", "noise.pdf", &[7u8; 64])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");

        let (status, body) = send(
            &app,
            upload_request("file", "newton.pdf", &FakeDocumentExtractor::pdf("text")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "NO_FILE_PROVIDED");

        let (_, body) = send(&app, get("/api/pdfs")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_quiz_error_statuses() {
        let unconfigured = app_with(
            Arc::new(StubCompletionProvider::unconfigured()),
            Arc::new(StubVideoProvider::unconfigured()),
        );
        let (status, body) = send(
            &unconfigured,
            json_request("POST", "/api/generate-quiz", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "GATEWAY_UNAVAILABLE");

        let app = app("this is not json");
        let (status, _) = send(
            &app,
            json_request("POST", "/api/generate-quiz", json!({"pdfName": "missing.pdf"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(
            &app,
            upload_request("pdf", "newton.pdf", &FakeDocumentExtractor::pdf(&newton_text())),
        )
        .await;
        let (status, body) = send(
            &app,
            json_request("POST", "/api/generate-quiz", json!({"pdfName": "newton.pdf"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/submit-quiz",
                json!({"questions": [], "answers": []}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/submit-quiz")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_session_lifecycle() {
        let app = app("Inertia is resistance to changes in motion.");

        let (status, session) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/chat/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let session_id = session["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/chat",
                json!({"message": "What is inertia?", "sessionId": session_id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Inertia is resistance to changes in motion.");
        assert_eq!(body["sessionId"], session_id.as_str());

        let uri = format!("/api/chat/sessions/{}", session_id);
        let (status, body) = send(&app, get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "What is inertia?...");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["role"], "assistant");

        let (_, body) = send(&app, get("/api/chat/sessions")).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert!(body[0].get("messages").is_none());

        let delete = Request::builder()
            .method("DELETE")
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_chat_error_statuses() {
        let app = app("hello");
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/chat",
                json!({"message": "hi", "sessionId": uuid::Uuid::new_v4()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, json_request("POST", "/api/chat", json!({"message": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let failing = app_with(
            Arc::new(StubCompletionProvider::failing("upstream 500")),
            Arc::new(StubVideoProvider::unconfigured()),
        );
        let (status, body) = send(&failing, json_request("POST", "/api/chat", json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "GATEWAY_ERROR");
    }

    #[tokio::test]
    async fn test_video_recommendations() {
        let app = app("unused");

        let (status, _) = send(&app, get("/api/youtube-recommendations?topic=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, get("/api/youtube-recommendations?topic=optics")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["videos"].as_array().unwrap().len(), 3);
        assert_eq!(body["videos"][0]["id"], "placeholder-1");
    }
}
