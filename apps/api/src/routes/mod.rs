pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::career::handlers as career;
use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/parse", post(extraction::handle_parse_resume))
        .route("/api/v1/resumes/analyze", post(analysis::handle_analyze_resume))
        // Jobs & career API
        .route("/api/v1/jobs/match", post(matching::handle_match_jobs))
        .route("/api/v1/career-paths", post(career::handle_career_paths))
        .route("/api/v1/market/insights", post(analysis::handle_market_insights))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::career::CareerRules;
    use crate::config::Config;
    use crate::extraction::document::tests::build_docx;
    use crate::extraction::ResumeParser;

    const BOUNDARY: &str = "jobify-test-boundary";

    fn app_with(config: Config) -> Router {
        build_router(AppState::new(
            config,
            ResumeParser::default(),
            CareerRules::default(),
        ))
    }

    fn app() -> Router {
        app_with(Config::from_lookup(|_| None).unwrap())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/resumes/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn postings() -> Value {
        json!([
            {"title": "A", "description": "Python backend role, 20+ chars", "location": "Remote"},
            {"title": "B", "description": "Graphic design role, no tech, 20+ chars"},
            {"title": "C", "description": "short"}
        ])
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobify-api");
    }

    #[tokio::test]
    async fn test_parse_docx_upload() {
        let docx = build_docx(&[
            "Experience",
            "Software Engineer at Tech Corp (2018-2020)",
            "Developed web apps using React",
        ]);
        let (status, body) = send(app(), multipart_request("file", "cv.docx", &docx)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"][0]["company"], "Tech Corp");
        assert_eq!(body["skills"]["all_skills"], json!(["react"]));
    }

    #[tokio::test]
    async fn test_parse_rejects_unknown_extension() {
        let (status, body) = send(app(), multipart_request("file", "cv.txt", b"hello")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_parse_requires_file_field() {
        let (status, body) = send(app(), multipart_request("resume", "cv.pdf", b"%PDF")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_enforces_upload_limit() {
        let config = Config::from_lookup(|key| (key == "MAX_UPLOAD_BYTES").then(|| "256".to_string()))
            .unwrap();
        let (status, _) = send(
            app_with(config),
            multipart_request("file", "cv.pdf", &vec![b'x'; 4096]),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_match_jobs_ranks_relevant_first() {
        let request = json_request(
            "/api/v1/jobs/match",
            json!({
                "profile": {"skills": {"all_skills": ["python", "react"]}},
                "postings": postings(),
                "limit": 5
            }),
        );
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["indexed"], 2);
        assert_eq!(body["matches"][0]["title"], "A");
        assert_eq!(body["matches"][0]["location"], "Remote");
        assert_eq!(body["matches"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_match_jobs_without_eligible_postings() {
        let request = json_request(
            "/api/v1/jobs/match",
            json!({
                "profile": {"skills": {"all_skills": ["python"]}},
                "postings": [{"title": "C", "description": "short"}]
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "NO_ELIGIBLE_POSTINGS");
    }

    #[tokio::test]
    async fn test_match_jobs_with_empty_profile() {
        let request = json_request(
            "/api/v1/jobs/match",
            json!({"profile": {}, "postings": postings()}),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_PROFILE_TEXT");
    }

    #[tokio::test]
    async fn test_career_paths() {
        let request = json_request(
            "/api/v1/career-paths",
            json!({
                "profile": {"skills": {"all_skills": ["docker", "kubernetes"]}},
                "postings": [
                    {"title": "DevOps Engineer", "description": "Kubernetes, Docker and AWS"},
                    {"title": "Data Scientist", "description": "Python, SQL and machine learning"},
                    {"title": "Web Developer", "description": "React, CSS and HTML work"}
                ]
            }),
        );
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["paths"].as_array().unwrap().len(), 3);
        let recommendations = body["recommendations"].as_array().unwrap();
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations.iter().all(|r| r["path_name"] != "DevOps"));
    }

    #[tokio::test]
    async fn test_analyze_resume() {
        let request = json_request("/api/v1/resumes/analyze", json!({"profile": {}}));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_market_insights() {
        let request = json_request(
            "/api/v1/market/insights",
            json!({
                "profile": {"skills": {"all_skills": ["python"]}},
                "matches": [
                    {"title": "A", "description": "Python backend role", "location": "Remote", "similarity_score": 0.4}
                ]
            }),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["top_skill"]["skill"], "python");
        assert_eq!(body["locations"][0]["location"], "Remote");
    }
}
