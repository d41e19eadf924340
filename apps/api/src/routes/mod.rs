pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/extract", post(handlers::handle_extract))
        .route("/api/v1/cv/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/cv/sessions/:id",
            get(handlers::handle_get_session),
        )
        .route(
            "/api/v1/cv/sessions/:id/export",
            get(handlers::handle_export),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::{Config, ReportProfile};
    use crate::export::docx::tests::read_part;
    use crate::extraction::pdf::tests::make_test_pdf;
    use crate::extraction::{ExtractionError, PdfTextExtractor, TextExtractor};
    use crate::session::SessionStore;

    const BOUNDARY: &str = "cvreviewtestboundary";
    const FLASK_CV: &str = "I built a Flask REST API and used Git. 2019 project.";

    /// Treats the upload as UTF-8 text, standing in for a PDF parser.
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            std::str::from_utf8(bytes)
                .map(|s| s.split('\u{0C}').map(String::from).collect())
                .map_err(|e| ExtractionError::PdfParsing(e.to_string()))
        }
    }

    fn test_state(extractor: Arc<dyn TextExtractor>) -> AppState {
        AppState {
            config: Config {
                profile: ReportProfile {
                    display_name: "Jane Doe".to_string(),
                    ..ReportProfile::default()
                },
                port: 0,
                max_upload_bytes: 1024 * 1024,
                max_sessions: 8,
                rust_log: "debug".to_string(),
            },
            extractor,
            sessions: SessionStore::with_capacity(8),
        }
    }

    fn multipart_body(file: &[u8], session_id: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
        if let Some(id) = session_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"session_id\"\r\n\r\n{id}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, file: &[u8], session_id: Option<&str>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(file, session_id)))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_extract_returns_trimmed_text() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let response = app
            .oneshot(upload_request(
                "/api/v1/cv/extract",
                b"  Page one\x0cPage two  ",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "Page one\nPage two");
        assert_eq!(body["char_count"], 17);
    }

    #[tokio::test]
    async fn test_analyze_flask_cv() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let response = app
            .oneshot(upload_request("/api/v1/cv/analyze", FLASK_CV.as_bytes(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let tech: Vec<&str> = body["analysis"]["tech"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(tech.contains(&"api"));
        assert!(tech.contains(&"git"));
        assert_eq!(
            body["analysis"]["experience_years_est"],
            (crate::analysis::current_year() - 2019) as u64
        );
        assert!(Uuid::parse_str(body["session_id"].as_str().unwrap()).is_ok());
        assert!(body["markdown"]
            .as_str()
            .unwrap()
            .contains("### Key Strengths"));
    }

    #[tokio::test]
    async fn test_short_text_rejected() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let response = app
            .oneshot(upload_request("/api/v1/cv/analyze", b"   too short   ", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_TOO_SHORT");
    }

    #[tokio::test]
    async fn test_non_pdf_is_extraction_error() {
        let app = build_router(test_state(Arc::new(PdfTextExtractor)));
        let response = app
            .oneshot(upload_request(
                "/api/v1/cv/analyze",
                b"this is plainly not a pdf document",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_upload_is_extraction_error() {
        let app = build_router(test_state(Arc::new(PdfTextExtractor)));
        let response = app
            .oneshot(upload_request("/api/v1/cv/analyze", b"", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn test_repeated_analyses_keep_sessions_bounded() {
        let state = test_state(Arc::new(PlainTextExtractor));
        let app = build_router(state.clone());

        let mut first_id = None;
        for _ in 0..40 {
            let response = app
                .clone()
                .oneshot(upload_request("/api/v1/cv/analyze", FLASK_CV.as_bytes(), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            first_id.get_or_insert_with(|| body["session_id"].as_str().unwrap().to_string());
        }

        assert_eq!(state.sessions.len(), 8);
        let uri = format!("/api/v1/cv/sessions/{}", first_id.unwrap());
        let response = app.oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_file_field_is_validation_error() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/cv/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_session_id_rejected() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let response = app
            .oneshot(upload_request(
                "/api/v1/cv/analyze",
                FLASK_CV.as_bytes(),
                Some("not-a-uuid"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_before_analysis_is_not_found() {
        let app = build_router(test_state(Arc::new(PlainTextExtractor)));
        let uri = format!("/api/v1/cv/sessions/{}/export", Uuid::new_v4());
        let response = app.oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("run an analysis first"));
    }

    #[tokio::test]
    async fn test_reanalysis_overwrites_and_exports() {
        let state = test_state(Arc::new(PlainTextExtractor));
        let app = build_router(state.clone());
        let session_id = Uuid::new_v4().to_string();

        let first = app
            .clone()
            .oneshot(upload_request(
                "/api/v1/cv/analyze",
                FLASK_CV.as_bytes(),
                Some(&session_id),
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .clone()
            .oneshot(upload_request(
                "/api/v1/cv/analyze",
                b"Computer vision with OpenCV and PyTorch, deployed on AWS",
                Some(&session_id),
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(state.sessions.len(), 1);

        let stored = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/cv/sessions/{session_id}")))
            .await
            .unwrap();
        let stored = json_body(stored).await;
        assert_eq!(stored["tech"], serde_json::json!(["cloud", "cv", "dl"]));

        let export = app
            .oneshot(get_request(&format!(
                "/api/v1/cv/sessions/{session_id}/export"
            )))
            .await
            .unwrap();
        assert_eq!(export.status(), StatusCode::OK);
        assert_eq!(
            export.headers()[header::CONTENT_TYPE],
            crate::export::DOCX_CONTENT_TYPE
        );
        assert_eq!(
            export.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"jane_doe_cv_review.docx\""
        );

        let docx = to_bytes(export.into_body(), usize::MAX).await.unwrap();
        let xml = read_part(&docx, "word/document.xml");
        assert!(xml.contains("Jane Doe — CV Review"));
        assert!(xml.contains("OpenCV and PyTorch"));
        assert!(!xml.contains("Flask REST API"));
    }

    #[tokio::test]
    async fn test_analyze_real_pdf() {
        let app = build_router(test_state(Arc::new(PdfTextExtractor)));
        let pdf = make_test_pdf("Python developer with Git and SQL experience since 2020");
        let response = app
            .oneshot(upload_request("/api/v1/cv/analyze", &pdf, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let tech = body["analysis"]["tech"].as_array().unwrap();
        assert!(tech.iter().any(|t| t == "python" || t == "git"));
    }
}
