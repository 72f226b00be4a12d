pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard;
use crate::generation::handlers;
use crate::state::AppState;

/// Assembles the application router.
///
/// Both resume operations are POST-only: axum's method routing answers any
/// other verb with 405 before a handler (or the generator) is touched.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-resume", post(handlers::handle_generate_resume))
        .route("/optimize-resume", post(handlers::handle_optimize_resume))
        .route("/dashboard/usage-stats", get(dashboard::handle_usage_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    use crate::config::Config;
    use crate::dashboard::DashboardManager;
    use crate::generation::client::tests::{success_reply, StubGenerator};
    use crate::llm_client::{ReplyBody, STATUS_ERROR, STATUS_SUCCESS};

    fn test_state(stub: StubGenerator) -> AppState {
        AppState {
            generator: Arc::new(stub),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
            dashboard: DashboardManager::new(),
        }
    }

    fn generation_success_stub() -> StubGenerator {
        StubGenerator::replying(success_reply(ReplyBody {
            status: STATUS_SUCCESS.to_string(),
            resume_content: Some("Generated resume text".to_string()),
            ..Default::default()
        }))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valid_generate_body() -> String {
        json!({
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "industry": "Technology",
            "experience_level": "senior",
            "skills": "Rust, distributed systems",
            "summary": "Systems engineer"
        })
        .to_string()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_wrong_method_yields_405_and_no_generator_call() {
        let stub = generation_success_stub();
        let calls = stub.calls.clone();
        let app = build_router(test_state(stub));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/generate-resume")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected_before_generator() {
        let stub = generation_success_stub();
        let calls = stub.calls.clone();
        let app = build_router(test_state(stub));

        let response = app
            .oneshot(post_json("/generate-resume", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_happy_path_returns_content() {
        let state = test_state(generation_success_stub());
        let dashboard = state.dashboard.clone();
        let app = build_router(state);

        let response = app
            .oneshot(post_json("/generate-resume", &valid_generate_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["resume_content"], "Generated resume text");
        assert_eq!(dashboard.usage_stats().total_resumes, 1);
    }

    #[tokio::test]
    async fn test_generate_missing_required_field_is_400() {
        let stub = generation_success_stub();
        let calls = stub.calls.clone();
        let app = build_router(test_state(stub));

        let body = json!({
            "full_name": "Ada Lovelace",
            "industry": "Technology",
            "experience_level": "senior"
        })
        .to_string();

        let response = app.oneshot(post_json("/generate-resume", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required field: email");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_optimize_upstream_error_maps_to_500_with_reason() {
        let stub = StubGenerator::replying(success_reply(ReplyBody {
            status: STATUS_ERROR.to_string(),
            error: Some("bad input".to_string()),
            ..Default::default()
        }));
        let app = build_router(test_state(stub));

        let body = json!({
            "existingResume": "old resume",
            "jobDescription": "staff role"
        })
        .to_string();

        let response = app.oneshot(post_json("/optimize-resume", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "bad input");
    }

    #[tokio::test]
    async fn test_optimize_connection_fault_surfaces_fault_message() {
        let stub = StubGenerator::faulting("connection refused");
        let app = build_router(test_state(stub));

        let body = json!({
            "resume_content": "old resume",
            "job_description": "staff role"
        })
        .to_string();

        let response = app.oneshot(post_json("/optimize-resume", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_optimize_missing_job_description_is_400() {
        let app = build_router(test_state(generation_success_stub()));

        let body = json!({ "resume_content": "old resume" }).to_string();
        let response = app.oneshot(post_json("/optimize-resume", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing job description");
    }

    #[tokio::test]
    async fn test_responses_carry_permissive_cors_header() {
        let app = build_router(test_state(generation_success_stub()))
            .layer(CorsLayer::permissive());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_usage_stats_reports_activity() {
        let state = test_state(generation_success_stub());
        state.dashboard.log_resume_optimization("ada@example.com");
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/dashboard/usage-stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_optimizations"], 1);
        assert_eq!(body["recent_activities"][0]["type"], "resume_optimization");
    }
}
