//! Route table and middleware stack.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    core::{app_state::AppState, config::ApiConfig},
    error_handler::AppError,
    routes::{ask::ask_route::ask, health_route::health, upload::upload_route::upload},
};

/// Builds the gateway router.
///
/// # Errors
/// [`AppError::InvalidOrigin`] when a configured origin is not a usable header
/// value or is a wildcard (not allowed together with credentials).
pub fn build_router(state: Arc<AppState>, cfg: &ApiConfig) -> Result<Router, AppError> {
    let cors = cors_layer(&cfg.cors_origins)?;

    Ok(Router::new()
        .route("/", get(health))
        .route("/ask", post(ask))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(cfg.upload_max_bytes)),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Credentialed CORS for a fixed origin list; methods and headers are
/// mirrored from the preflight.
fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = origins
        .iter()
        .map(|origin| {
            if origin == "*" {
                return Err(AppError::InvalidOrigin(origin.clone()));
            }
            HeaderValue::from_str(origin).map_err(|_| AppError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use contextor::{Answerer, prompt::build_user_prompt};
    use http_body_util::BodyExt;
    use rag_base::Retriever;
    use tower::ServiceExt;
    use wiremock::matchers::{body_bytes, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";
    const BOUNDARY: &str = "X-COMPLIANCE-BOUNDARY";

    struct StubRetriever {
        docs: Vec<String>,
        calls: AtomicUsize,
        last: Mutex<Option<(String, usize)>>,
    }

    impl Retriever for StubRetriever {
        fn retrieve<'a>(
            &'a self,
            query: &'a str,
            top: usize,
        ) -> Pin<Box<dyn Future<Output = Vec<String>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((query.to_string(), top));
            let docs = self.docs.clone();
            Box::pin(async move { docs })
        }
    }

    /// Answers with the prompt it would have sent.
    struct EchoAnswerer;

    impl Answerer for EchoAnswerer {
        fn generate<'a>(
            &'a self,
            question: &'a str,
            docs: &'a [String],
        ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
            Box::pin(async move { build_user_prompt(question, docs) })
        }
    }

    fn test_app(storage: Option<String>) -> (Router, Arc<StubRetriever>) {
        let retriever = Arc::new(StubRetriever {
            docs: vec!["GDPR is a regulation on data protection.".to_string()],
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        });
        let state = AppState {
            retriever: retriever.clone(),
            answerer: Arc::new(EchoAnswerer),
            top_k: 5,
            storage_connection_string: storage,
            container_name: "regulatory-documents".into(),
        };
        let cfg = ApiConfig::from_lookup(|_| None).unwrap();
        (build_router(Arc::new(state), &cfg).unwrap(), retriever)
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_running() {
        let (app, retriever) = test_app(None);
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({ "message": "Compliance Bot API is running" })
        );
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ask_composes_retrieval_and_answer() {
        let (app, retriever) = test_app(None);
        let req = Request::builder()
            .method("POST")
            .uri("/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"question":"  What is GDPR?"}"#))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        let answer = json["answer"].as_str().unwrap();
        assert!(answer.contains("GDPR is a regulation"), "{answer}");
        assert!(answer.contains("  What is GDPR?"), "{answer}");
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            retriever.last.lock().unwrap().clone(),
            Some(("  What is GDPR?".to_string(), 5))
        );
    }

    #[tokio::test]
    async fn ask_without_question_is_rejected_by_extractor() {
        let (app, retriever) = test_app(None);
        let req = Request::builder()
            .method("POST")
            .uri("/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_client_error());
        assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upload_without_storage_reports_error() {
        let (app, _) = test_app(None);
        let req = multipart_request(&[("file", Some("policy.pdf"), b"%PDF")]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({ "error": "Storage not configured" })
        );
    }

    #[tokio::test]
    async fn upload_stores_blob_under_original_name() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/acct/regulatory-documents/policy.pdf"))
            .and(body_bytes(b"%PDF-1.7 body".to_vec()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let conn = format!("AccountName=acct;AccountKey={KEY};BlobEndpoint={}/acct", server.uri());
        let (app, _) = test_app(Some(conn));
        let req = multipart_request(&[
            ("note", None, b"ignored"),
            ("file", Some("policy.pdf"), b"%PDF-1.7 body"),
        ]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({
                "message": "File policy.pdf uploaded successfully",
                "filename": "policy.pdf"
            })
        );
    }

    #[tokio::test]
    async fn upload_keeps_filename_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/acct/regulatory-documents/%20policy.pdf%20"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let conn = format!("AccountName=acct;AccountKey={KEY};BlobEndpoint={}/acct", server.uri());
        let (app, _) = test_app(Some(conn));
        let req = multipart_request(&[("file", Some(" policy.pdf "), b"x")]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["filename"], " policy.pdf ");
        assert_eq!(json["message"], "File  policy.pdf  uploaded successfully");
    }

    #[tokio::test]
    async fn upload_with_blank_filename() {
        let (app, _) = test_app(Some("UseDevelopmentStorage=true".into()));
        let req = multipart_request(&[("file", Some("   "), b"x")]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({ "error": "Missing filename" }));
    }

    #[tokio::test]
    async fn upload_storage_rejection_is_error_payload() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_string("AuthenticationFailed"))
            .mount(&server)
            .await;

        let conn = format!("AccountName=acct;AccountKey={KEY};BlobEndpoint={}/acct", server.uri());
        let (app, _) = test_app(Some(conn));
        let req = multipart_request(&[("file", Some("policy.pdf"), b"x")]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        let error = json["error"].as_str().unwrap();
        assert!(error.contains("403"), "{error}");
    }

    #[tokio::test]
    async fn upload_without_file_part() {
        let (app, _) = test_app(Some("UseDevelopmentStorage=true".into()));
        let req = multipart_request(&[("note", None, b"hello")]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({ "error": "No file provided" }));
    }

    #[tokio::test]
    async fn upload_with_malformed_connection_string() {
        let (app, _) = test_app(Some("not-a-connection-string".into()));
        let req = multipart_request(&[("file", Some("policy.pdf"), b"x")]);

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(json_body(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_with_credentials() {
        let (app, _) = test_app(None);
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/ask")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "POST");
    }

    #[tokio::test]
    async fn cors_ignores_unknown_origin() {
        let (app, _) = test_app(None);
        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        let err = cors_layer(&["*".to_string()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidOrigin(_)));
    }
}
