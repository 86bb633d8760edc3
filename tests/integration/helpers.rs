//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use feedhub_api::{AppState, build_app};
use feedhub_core::config::AppConfig;
use feedhub_database::Stores;

/// Signing secret of every test app.
pub const JWT_SECRET: &str = "integration-test-secret";
/// Password used by [`TestApp::register`].
pub const PASSWORD: &str = "secret123";
/// Smallest byte string recognised as a PNG.
pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

const BOUNDARY: &str = "feedhub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state behind the router
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
    _data_dir: tempfile::TempDir,
}

/// A registered user and their token.
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

impl<'a> Part<'a> {
    /// A PNG file part.
    pub fn png(name: &'a str) -> Self {
        Part::File {
            name,
            file_name: "photo.png",
            content_type: "image/png",
            data: PNG,
        }
    }
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application over the in-memory store
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.auth.jwt_secret = JWT_SECRET.to_string();
        config.database.provider = "memory".to_string();
        config.storage.root_path = data_dir.path().to_string_lossy().to_string();
        adjust(&mut config);

        let state = AppState::build(config.clone(), Stores::in_memory())
            .await
            .expect("Failed to build state");

        Self {
            router: build_app(state.clone()),
            state,
            config,
            _data_dir: data_dir,
        }
    }

    /// Sign up and log in `email` with [`PASSWORD`].
    pub async fn register(&self, email: &str) -> TestUser {
        let response = self
            .request(
                "PUT",
                "/auth/signup",
                Some(json!({ "email": email, "name": "Max", "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        let token = self.login(email, PASSWORD).await;
        let id = response.data()["user_id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("signup returns user_id");
        TestUser { id, token }
    }

    /// Log in and return the token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.data()["token"]
            .as_str()
            .expect("login returns token")
            .to_string()
    }

    /// Create a post with a PNG image and return it.
    pub async fn create_post(&self, token: &str, title: &str) -> Value {
        let response = self
            .multipart(
                "POST",
                "/feed/post",
                &[
                    Part::Text("title", title),
                    Part::Text("content", "Some interesting content"),
                    Part::png("image"),
                ],
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data().clone()
    }

    /// Send a JSON request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a multipart/form-data request
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        parts: &[Part<'_>],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Run a GraphQL operation
    pub async fn graphql(&self, query: &str, variables: Value, token: Option<&str>) -> TestResponse {
        self.request(
            "POST",
            "/graphql",
            Some(json!({ "query": query, "variables": variables })),
            token,
        )
        .await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
