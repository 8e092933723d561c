//! Method and path routing to registered dispatchers.
//!
//! Patterns are literal segments and `{name}` captures, e.g.
//! `/todos/{id}`. Captured values become route values on the request
//! context before the dispatcher runs.

use crate::dispatcher::{dispatch, RequestDispatcher};
use crate::server::request::ParamVec;
use crate::server::{HttpContext, RequestContext};
use http::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

fn parse_pattern(pattern: &str) -> Vec<Segment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Capture(name.to_string()),
            None => Segment::Literal(s.to_string()),
        })
        .collect()
}

struct Endpoint {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    dispatcher: Arc<dyn RequestDispatcher>,
}

impl Endpoint {
    fn match_path(&self, path: &str) -> Option<ParamVec> {
        let mut values = ParamVec::new();
        let mut parts = path.split('/').filter(|s| !s.is_empty());
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Capture(name) => values.push((Arc::from(name.as_str()), part.to_string())),
            }
        }
        parts.next().is_none().then_some(values)
    }
}

/// Outcome of looking up a request in the registry.
pub enum Resolved {
    Found {
        dispatcher: Arc<dyn RequestDispatcher>,
        route_values: ParamVec,
    },
    /// A pattern matched the path, but not for this method.
    MethodNotAllowed,
    NotFound,
}

/// Endpoints in registration order; the first match wins.
#[derive(Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `dispatcher` for `method` requests matching `pattern`.
    pub fn map(
        &mut self,
        method: Method,
        pattern: &str,
        dispatcher: impl RequestDispatcher + 'static,
    ) -> &mut Self {
        self.map_arc(method, pattern, Arc::new(dispatcher))
    }

    pub fn map_arc(
        &mut self,
        method: Method,
        pattern: &str,
        dispatcher: Arc<dyn RequestDispatcher>,
    ) -> &mut Self {
        info!(
            method = %method,
            pattern,
            has_body = dispatcher.has_body(),
            "Endpoint registered"
        );
        self.endpoints.push(Endpoint {
            method,
            pattern: pattern.to_string(),
            segments: parse_pattern(pattern),
            dispatcher,
        });
        self
    }

    pub fn map_get(&mut self, pattern: &str, dispatcher: impl RequestDispatcher + 'static) -> &mut Self {
        self.map(Method::GET, pattern, dispatcher)
    }

    pub fn map_post(&mut self, pattern: &str, dispatcher: impl RequestDispatcher + 'static) -> &mut Self {
        self.map(Method::POST, pattern, dispatcher)
    }

    pub fn map_put(&mut self, pattern: &str, dispatcher: impl RequestDispatcher + 'static) -> &mut Self {
        self.map(Method::PUT, pattern, dispatcher)
    }

    pub fn map_delete(&mut self, pattern: &str, dispatcher: impl RequestDispatcher + 'static) -> &mut Self {
        self.map(Method::DELETE, pattern, dispatcher)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Registered `(method, pattern)` pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.endpoints
            .iter()
            .map(|e| (&e.method, e.pattern.as_str()))
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Resolved {
        let mut path_matched = false;
        for endpoint in &self.endpoints {
            let Some(route_values) = endpoint.match_path(path) else {
                continue;
            };
            if &endpoint.method == method {
                return Resolved::Found {
                    dispatcher: Arc::clone(&endpoint.dispatcher),
                    route_values,
                };
            }
            path_matched = true;
        }
        if path_matched {
            Resolved::MethodNotAllowed
        } else {
            Resolved::NotFound
        }
    }

    /// Route `ctx` and run the matching dispatcher.
    ///
    /// Unmatched requests get status 404, or 405 when only the method differs.
    ///
    /// # Errors
    ///
    /// Propagates faults from the dispatcher.
    pub async fn handle(&self, ctx: &mut HttpContext) -> anyhow::Result<()> {
        match self.resolve(ctx.method(), ctx.path()) {
            Resolved::Found {
                dispatcher,
                route_values,
            } => {
                for (name, value) in route_values {
                    ctx.set_route_value(&name, value);
                }
                debug!(request_id = %ctx.request_id(), method = %ctx.method(), path = ctx.path(), "Dispatching request");
                dispatch(dispatcher.as_ref(), ctx).await
            }
            Resolved::MethodNotAllowed => {
                ctx.set_status(StatusCode::METHOD_NOT_ALLOWED.as_u16());
                Ok(())
            }
            Resolved::NotFound => {
                debug!(method = %ctx.method(), path = ctx.path(), "No endpoint matched");
                ctx.set_status(StatusCode::NOT_FOUND.as_u16());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{completed, DispatchFuture};

    struct Echo;

    impl RequestDispatcher for Echo {
        fn has_body(&self) -> bool {
            false
        }

        fn process_request<'a>(&'a self, ctx: &'a mut dyn RequestContext) -> DispatchFuture<'a> {
            let id = ctx.route_value("id").unwrap_or("none").to_string();
            ctx.write_response("text/plain", id.into_bytes())
        }

        fn process_request_with_body<'a>(
            &'a self,
            _ctx: &'a mut dyn RequestContext,
        ) -> DispatchFuture<'a> {
            completed()
        }
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(
            parse_pattern("/todos/{id}"),
            vec![
                Segment::Literal("todos".into()),
                Segment::Capture("id".into())
            ]
        );
        assert!(parse_pattern("/").is_empty());
    }

    #[tokio::test]
    async fn test_route_values_are_captured() {
        let mut registry = EndpointRegistry::new();
        registry.map_get("/todos/{id}", Echo);
        let mut ctx = HttpContext::new(Method::GET, "/todos/42");
        registry.handle(&mut ctx).await.unwrap();
        assert_eq!(ctx.route_value("id"), Some("42"));
        assert_eq!(ctx.response().unwrap().body, b"42");
    }

    #[tokio::test]
    async fn test_unmatched_path_and_method() {
        let mut registry = EndpointRegistry::new();
        registry.map_get("/todos/{id}", Echo);

        let mut ctx = HttpContext::new(Method::GET, "/todos/1/extra");
        registry.handle(&mut ctx).await.unwrap();
        assert_eq!(ctx.status(), 404);

        let mut ctx = HttpContext::new(Method::PUT, "/todos/1");
        registry.handle(&mut ctx).await.unwrap();
        assert_eq!(ctx.status(), 405);
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = EndpointRegistry::new();
        registry.map_get("/todos/active", Echo).map_get("/todos/{id}", Echo);
        assert_eq!(registry.len(), 2);
        match registry.resolve(&Method::GET, "/todos/active") {
            Resolved::Found { route_values, .. } => assert!(route_values.is_empty()),
            _ => panic!("expected a match"),
        }
        let routes: Vec<_> = registry.routes().map(|(_, p)| p).collect();
        assert_eq!(routes, ["/todos/active", "/todos/{id}"]);
    }
}
