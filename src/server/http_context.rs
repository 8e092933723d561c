use super::context::{BindingFailure, RequestContext};
use super::request::{find_header, find_param, parse_query_params, split_path, HeaderVec, ParamVec};
use crate::ids::RequestId;
use anyhow::anyhow;
use futures::future::{self, BoxFuture};
use http::{Method, StatusCode};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

const REQUEST_ID_HEADER: &str = "x-request-id";

enum Body {
    Buffered(Vec<u8>),
    Streamed(mpsc::Receiver<Vec<u8>>),
    Consumed,
}

/// Response captured by [`HttpContext::write_response`](RequestContext::write_response).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// In-memory [`RequestContext`].
///
/// Holds one request and collects everything a dispatcher does to it: the
/// status code, the written response and any binding diagnostics. Used by
/// the endpoint registry, the benches and the tests.
///
/// ```
/// use brrtdispatch::server::{HttpContext, RequestContext};
/// use http::Method;
///
/// let ctx = HttpContext::new(Method::GET, "/todos/7?verbose=true")
///     .with_route_value("id", "7");
/// assert_eq!(ctx.path(), "/todos/7");
/// assert_eq!(ctx.route_value("id"), Some("7"));
/// assert_eq!(ctx.query_value("verbose"), Some("true"));
/// assert_eq!(ctx.status(), 200);
/// ```
pub struct HttpContext {
    request_id: RequestId,
    method: Method,
    path: String,
    route_values: ParamVec,
    query: ParamVec,
    headers: HeaderVec,
    body: Body,
    status: u16,
    response: Option<CapturedResponse>,
    binding_failures: Vec<BindingFailure>,
}

impl HttpContext {
    /// Create a context for `method` and a request target such as `/todos?limit=5`.
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: split_path(target).0.to_string(),
            route_values: ParamVec::new(),
            query: parse_query_params(target),
            headers: HeaderVec::new(),
            body: Body::Buffered(Vec::new()),
            status: StatusCode::OK.as_u16(),
            response: None,
            binding_failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_route_value(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_route_value(name, value);
        self
    }

    /// Add a header. An `x-request-id` header that parses as a ULID becomes
    /// the context's request id.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(REQUEST_ID_HEADER) {
            self.request_id = RequestId::from_header_or_new(Some(&value));
        }
        self.headers
            .push((Arc::from(name.to_ascii_lowercase()), value));
        self
    }

    /// Use `body` as the complete request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Body::Buffered(body.into());
        self
    }

    /// Serialize `value` as a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn with_json<T: serde::Serialize>(self, value: &T) -> anyhow::Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    /// Read the body from `chunks` until the sender side is dropped.
    #[must_use]
    pub fn with_body_stream(mut self, chunks: mpsc::Receiver<Vec<u8>>) -> Self {
        self.body = Body::Streamed(chunks);
        self
    }

    /// Add a route value captured by the route layer.
    pub fn set_route_value(&mut self, name: &str, value: impl Into<String>) {
        self.route_values.push((Arc::from(name), value.into()));
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn response(&self) -> Option<&CapturedResponse> {
        self.response.as_ref()
    }

    /// The written response body parsed as JSON, if any.
    #[must_use]
    pub fn response_json(&self) -> Option<serde_json::Value> {
        self.response
            .as_ref()
            .and_then(|r| serde_json::from_slice(&r.body).ok())
    }

    #[must_use]
    pub fn binding_failures(&self) -> &[BindingFailure] {
        &self.binding_failures
    }
}

impl RequestContext for HttpContext {
    fn route_value(&self, name: &str) -> Option<&str> {
        find_param(&self.route_values, name)
    }

    fn query_value(&self, name: &str) -> Option<&str> {
        find_param(&self.query, name)
    }

    fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    fn read_body(&mut self) -> BoxFuture<'_, anyhow::Result<Vec<u8>>> {
        match std::mem::replace(&mut self.body, Body::Consumed) {
            Body::Buffered(bytes) => Box::pin(future::ready(Ok(bytes))),
            Body::Streamed(mut chunks) => Box::pin(async move {
                let mut buf = Vec::new();
                while let Some(chunk) = chunks.recv().await {
                    buf.extend_from_slice(&chunk);
                }
                Ok(buf)
            }),
            Body::Consumed => Box::pin(future::ready(Err(anyhow!(
                "request body has already been consumed"
            )))),
        }
    }

    fn write_response(
        &mut self,
        content_type: &str,
        body: Vec<u8>,
    ) -> BoxFuture<'_, anyhow::Result<()>> {
        debug!(
            request_id = %self.request_id,
            status = self.status,
            content_type = %content_type,
            body_size_bytes = body.len(),
            "Response written"
        );
        self.response = Some(CapturedResponse {
            content_type: content_type.to_string(),
            body,
        });
        Box::pin(future::ready(Ok(())))
    }

    fn record_binding_failure(&mut self, failure: BindingFailure) {
        self.binding_failures.push(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_can_be_read_once() {
        let mut ctx = HttpContext::new(Method::POST, "/todos").with_body("abc");
        assert_eq!(ctx.read_body().await.unwrap(), b"abc");
        let err = ctx.read_body().await.unwrap_err();
        assert!(err.to_string().contains("already been consumed"));
    }

    #[tokio::test]
    async fn test_missing_body_reads_empty() {
        let mut ctx = HttpContext::new(Method::POST, "/todos");
        assert!(ctx.read_body().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_streamed_body_is_drained() {
        let (tx, rx) = mpsc::channel(4);
        let mut ctx = HttpContext::new(Method::POST, "/upload").with_body_stream(rx);
        tokio::spawn(async move {
            tx.send(b"hello ".to_vec()).await.unwrap();
            tx.send(b"world".to_vec()).await.unwrap();
        });
        assert_eq!(ctx.read_body().await.unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn test_write_response_is_captured() {
        let mut ctx = HttpContext::new(Method::GET, "/");
        ctx.set_status(201);
        ctx.write_response("application/json", b"{\"ok\":true}".to_vec())
            .await
            .unwrap();
        assert_eq!(ctx.status(), 201);
        assert_eq!(ctx.response().unwrap().content_type, "application/json");
        assert_eq!(ctx.response_json().unwrap()["ok"], true);
    }

    #[test]
    fn test_headers_and_route_values() {
        let ctx = HttpContext::new(Method::GET, "/users/5?id=9")
            .with_route_value("id", "5")
            .with_header("X-Token", "abc");
        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.route_value("id"), Some("5"));
        assert_eq!(ctx.query_value("id"), Some("9"));
        assert_eq!(ctx.header("x-token"), Some("abc"));
        assert!(ctx.response().is_none());
    }

    #[test]
    fn test_request_id_header_is_adopted() {
        let id = RequestId::new();
        let ctx = HttpContext::new(Method::GET, "/").with_header("X-Request-Id", id.to_string());
        assert_eq!(ctx.request_id(), id);
    }

    #[test]
    fn test_binding_failures_are_recorded() {
        let mut ctx = HttpContext::new(Method::GET, "/");
        ctx.record_binding_failure(BindingFailure {
            parameter_index: 1,
            parameter_type: "i32",
            parameter_name: "id".to_string(),
        });
        assert_eq!(ctx.binding_failures().len(), 1);
        assert_eq!(
            ctx.binding_failures()[0].to_string(),
            "failed to bind parameter 1 \"i32 id\""
        );
    }
}
