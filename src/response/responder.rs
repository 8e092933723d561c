use crate::binding::Json;
use crate::server::RequestContext;
use futures::future::{self, BoxFuture};
use http::StatusCode;
use serde::Serialize;

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// A handler return value that can be written to the response.
///
/// `respond` may suspend, e.g. for a handler that returns a future, so it
/// returns a boxed future like the rest of the dispatch path. An `Err` is an
/// unrecoverable fault and is surfaced to the caller of the dispatcher.
pub trait Responder: Send + 'static {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>>;
}

fn done<'a>() -> BoxFuture<'a, anyhow::Result<()>> {
    Box::pin(future::ready(Ok(())))
}

fn write_json<'a, T: Serialize>(
    ctx: &'a mut dyn RequestContext,
    value: &T,
) -> BoxFuture<'a, anyhow::Result<()>> {
    match serde_json::to_vec(value) {
        Ok(body) => ctx.write_response(APPLICATION_JSON, body),
        Err(err) => Box::pin(future::ready(Err(err.into()))),
    }
}

impl Responder for () {
    fn respond<'a>(self, _ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        done()
    }
}

impl Responder for String {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        ctx.write_response(TEXT_PLAIN, self.into_bytes())
    }
}

impl Responder for &'static str {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        ctx.write_response(TEXT_PLAIN, self.as_bytes().to_vec())
    }
}

impl Responder for serde_json::Value {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        write_json(ctx, &self)
    }
}

impl<T: Serialize + Send + 'static> Responder for Json<T> {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        write_json(ctx, &self.0)
    }
}

/// `None` maps to `404 Not Found` with no body.
impl<T: Responder> Responder for Option<T> {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        match self {
            Some(value) => value.respond(ctx),
            None => {
                ctx.set_status(StatusCode::NOT_FOUND.as_u16());
                done()
            }
        }
    }
}

impl<T, E> Responder for Result<T, E>
where
    T: Responder,
    E: Into<anyhow::Error> + Send + 'static,
{
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        match self {
            Ok(value) => value.respond(ctx),
            Err(err) => Box::pin(future::ready(Err(err.into()))),
        }
    }
}

/// Async handlers return a boxed future; it is awaited before its output is
/// written.
impl<T: Responder> Responder for BoxFuture<'static, T> {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move { self.await.respond(ctx).await })
    }
}

/// A status code with an optional JSON body.
///
/// ```
/// use brrtdispatch::response::Results;
/// use http::StatusCode;
///
/// let created = Results::created(vec![1, 2, 3]);
/// assert_eq!(created.status_code(), StatusCode::CREATED);
/// let missing = Results::<()>::not_found();
/// assert!(missing.body().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Results<T> {
    status: StatusCode,
    body: Option<T>,
}

impl<T> Results<T> {
    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, Some(body))
    }

    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, Some(body))
    }

    /// Status code only, no body.
    pub fn status(status: StatusCode) -> Self {
        Self::new(status, None)
    }

    pub fn no_content() -> Self {
        Self::status(StatusCode::NO_CONTENT)
    }

    pub fn not_found() -> Self {
        Self::status(StatusCode::NOT_FOUND)
    }

    pub fn bad_request() -> Self {
        Self::status(StatusCode::BAD_REQUEST)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }
}

impl<T: Serialize + Send + 'static> Responder for Results<T> {
    fn respond<'a>(self, ctx: &'a mut dyn RequestContext) -> BoxFuture<'a, anyhow::Result<()>> {
        ctx.set_status(self.status.as_u16());
        match self.body {
            Some(body) => write_json(ctx, &body),
            None => done(),
        }
    }
}
