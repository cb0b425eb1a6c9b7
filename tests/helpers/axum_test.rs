// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Provides helpers to test Axum routes without running a full server

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;

/// Helper to build and execute HTTP requests against Axum routers
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl AxumTestRequest {
    /// Create a new GET request
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::GET,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a new POST request
    pub fn post(uri: &str) -> Self {
        Self {
            method: Method::POST,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add JSON body to the request
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("Failed to serialize JSON"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Execute the request against an Axum router
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);

        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        let body = self.body.unwrap_or_default();
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = app
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        AxumTestResponse::from_response(response).await
    }
}

/// Wrapper around Axum HTTP response for testing
pub struct AxumTestResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl AxumTestResponse {
    /// Create from response by eagerly reading the body
    async fn from_response(response: axum::http::Response<Body>) -> Self {
        use axum::body::to_bytes;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();
        Self { status, body }
    }

    /// Get the response status code as u16 for easy assertion
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get the response body as a JSON value
    pub fn json<T: serde::de::DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to deserialize JSON response")
    }

    /// Get the response body as a string
    pub fn text(self) -> String {
        String::from_utf8(self.body).expect("Failed to decode response as UTF-8")
    }
}
