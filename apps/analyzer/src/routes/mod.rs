pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Request body ceiling: the upload limit plus room for the text fields and
/// multipart framing. Oversized uploads inside this margin are rejected by
/// the handler with the same 413.
const BODY_LIMIT_BYTES: usize = analyze::MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/analyze", post(analyze::handle_analyze))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
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

    use crate::config::Config;
    use crate::pipeline::Toolkit;

    const BOUNDARY: &str = "analyzer-test-boundary";

    const RESUME: &str = "Jane Doe

Summary
Backend engineer with eight years of experience.

Skills
Python, Java

Experience
Senior Engineer, Acme Corp, 2018 - 2022

Education
B.Sc. Computer Science, 2014 - 2018
";

    struct Part<'a> {
        name: &'a str,
        file: Option<(&'a str, &'a str)>,
        data: &'a [u8],
    }

    impl<'a> Part<'a> {
        fn text(name: &'a str, value: &'a str) -> Self {
            Self {
                name,
                file: None,
                data: value.as_bytes(),
            }
        }

        fn file(name: &'a str, file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
            Self {
                name,
                file: Some((file_name, content_type)),
                data,
            }
        }
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part.file {
                Some((file_name, content_type)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    struct TestApp {
        _dir: tempfile::TempDir,
        router: Router,
    }

    fn app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let library_path = dir.path().join("skill_library.json");
        std::fs::write(
            &library_path,
            r#"{"programming": ["Python", "Java"], "databases": ["SQL"]}"#,
        )
        .unwrap();
        let config = Config {
            skill_library_path: library_path,
            ..Config::default()
        };
        let state = AppState {
            toolkit: Toolkit::init(&config).unwrap(),
        };
        TestApp {
            _dir: dir,
            router: build_router(state),
        }
    }

    async fn post_analyze(app: &TestApp, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_text_upload() {
        let app = app();
        let (status, body) = post_analyze(
            &app,
            &[
                Part::file("resume", "cv.txt", "text/plain", RESUME.as_bytes()),
                Part::text("jobDescription", "Python SQL"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Resume uploaded and analyzed successfully!");
        assert_eq!(body["analysisResult"]["atsScore"], json!(75.0));
        assert_eq!(
            body["analysisResult"]["skillsMatch"]["programming"],
            json!(["Python"])
        );
    }

    #[tokio::test]
    async fn test_weights_field_is_applied() {
        let app = app();
        let (status, body) = post_analyze(
            &app,
            &[
                Part::text("jobDescription", "Python SQL"),
                Part::text("weights", r#"{"skills": 100, "education": 0, "experience": 0, "grammar": 0}"#),
                Part::file("resume", "cv.md", "text/markdown", RESUME.as_bytes()),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysisResult"]["atsScore"], json!(50.0));
    }

    #[tokio::test]
    async fn test_pipeline_failure_is_reported_in_body() {
        let app = app();
        let (status, body) = post_analyze(
            &app,
            &[
                Part::file("resume", "cv.txt", "text/plain", b"   "),
                Part::text("jobDescription", "Python"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["analysisResult"],
            json!({"error": "Resume parsing failed: document contains no text"})
        );
    }

    #[tokio::test]
    async fn test_missing_job_description_is_rejected() {
        let app = app();
        let (status, body) = post_analyze(
            &app,
            &[Part::file("resume", "cv.txt", "text/plain", RESUME.as_bytes())],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_resume_is_rejected() {
        let app = app();
        let (status, _) = post_analyze(&app, &[Part::text("jobDescription", "Python")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_weights_are_rejected() {
        let app = app();
        let (status, body) = post_analyze(
            &app,
            &[
                Part::file("resume", "cv.txt", "text/plain", RESUME.as_bytes()),
                Part::text("jobDescription", "Python"),
                Part::text("weights", "not json"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_word_document_is_unsupported() {
        let app = app();
        let (status, body) = post_analyze(
            &app,
            &[
                Part::file("resume", "cv.doc", "application/msword", b"binary"),
                Part::text("jobDescription", "Python"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let app = app();
        let data = vec![b'a'; analyze::MAX_UPLOAD_BYTES + 1];
        let (status, body) = post_analyze(
            &app,
            &[
                Part::file("resume", "cv.txt", "text/plain", &data),
                Part::text("jobDescription", "Python"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
