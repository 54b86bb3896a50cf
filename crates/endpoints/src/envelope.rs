use std::fmt::Display;

use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE, HeaderMap, HeaderValue,
};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// What the hosting wrapper hands to an endpoint.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: Method) -> Self {
        Self { method, body: None }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// What an endpoint hands back: status, headers and serialized body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[cfg(test)]
impl Response {
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Per-endpoint response builder. Every response is CORS-permissive.
#[derive(Debug, Clone)]
pub struct Envelope {
    method: Method,
    allow_methods: &'static str,
}

impl Envelope {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            allow_methods: "GET, OPTIONS",
        }
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            allow_methods: "POST, OPTIONS",
        }
    }

    /// Answers preflight and wrong-verb requests so business logic never
    /// sees them.
    pub fn guard(&self, request: &Request) -> Option<Response> {
        if request.method == Method::OPTIONS {
            Some(self.preflight())
        } else if request.method != self.method {
            Some(self.error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"))
        } else {
            None
        }
    }

    pub fn preflight(&self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(self.allow_methods),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );

        Response {
            status: StatusCode::OK,
            headers,
            body: String::new(),
        }
    }

    pub fn json<T: Serialize>(&self, status: StatusCode, body: &T) -> Response {
        match serde_json::to_string(body) {
            Ok(body) => Self::json_response(status, body),
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.to_string() }).to_string(),
                )
            }
        }
    }

    pub fn error(&self, status: StatusCode, message: impl Display) -> Response {
        Self::json_response(status, json!({ "error": message.to_string() }).to_string())
    }

    fn json_response(status: StatusCode, body: String) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

        Response {
            status,
            headers,
            body,
        }
    }
}
