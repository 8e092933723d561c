use crate::binding::ParameterInfo;
use crate::server::RequestContext;
use anyhow::ensure;
use futures::future::{self, BoxFuture};
use tracing::{debug, debug_span, Instrument};

/// Outcome of one dispatch. `Err` is reserved for faults the dispatcher cannot
/// turn into a response; a failed parameter bind is an `Ok` with status 400.
pub type DispatchResult = anyhow::Result<()>;

/// Future returned by both request entry points.
pub type DispatchFuture<'a> = BoxFuture<'a, DispatchResult>;

/// Uniform entry point for every generated dispatcher.
///
/// A transport asks [`has_body`](Self::has_body) once and then calls exactly
/// one entry point per request:
///
/// * [`process_request`](Self::process_request) binds every slot
///   synchronously. When a slot fails it sets status 400 and returns an
///   already-completed future without calling the handler.
/// * [`process_request_with_body`](Self::process_request_with_body) may
///   suspend while a body-bound slot reads the request body.
///
/// In both, slots are bound in declaration order and binding stops at the
/// first failure. [`dispatch`] makes the choice for you.
pub trait RequestDispatcher: Send + Sync {
    /// Whether any slot is bound from the request body. Fixed at construction.
    fn has_body(&self) -> bool;

    fn process_request<'a>(&'a self, ctx: &'a mut dyn RequestContext) -> DispatchFuture<'a>;

    fn process_request_with_body<'a>(
        &'a self,
        ctx: &'a mut dyn RequestContext,
    ) -> DispatchFuture<'a>;
}

/// An already-completed successful dispatch.
#[inline]
pub fn completed<'a>() -> DispatchFuture<'a> {
    Box::pin(future::ready(Ok(())))
}

/// Check the parameter metadata handed to a dispatcher constructor.
///
/// # Errors
///
/// Returns an error when `parameters` does not hold exactly `arity` entries.
pub fn ensure_arity(
    dispatcher: &str,
    parameters: &[ParameterInfo],
    arity: usize,
) -> anyhow::Result<()> {
    ensure!(
        parameters.len() == arity,
        "{dispatcher} expects metadata for {arity} parameter(s), got {}",
        parameters.len()
    );
    debug!(
        dispatcher,
        parameters = ?parameters.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "Dispatcher constructed"
    );
    Ok(())
}

/// Check that at most one slot of a dispatcher reads the request body.
///
/// The body can be drained once, so a second body-bound slot would fail on
/// every request.
///
/// # Errors
///
/// Returns an error naming the body-bound parameters when more than one of
/// `body_slots` is set.
pub fn ensure_single_body(
    dispatcher: &str,
    parameters: &[ParameterInfo],
    body_slots: &[bool],
) -> anyhow::Result<()> {
    let bound: Vec<&str> = parameters
        .iter()
        .zip(body_slots)
        .filter(|(_, body)| **body)
        .map(|(p, _)| p.name.as_str())
        .collect();
    ensure!(
        bound.len() <= 1,
        "{dispatcher} binds more than one parameter from the request body: {}",
        bound.join(", ")
    );
    Ok(())
}

/// Run `dispatcher` against `ctx` through the entry point its
/// [`has_body`](RequestDispatcher::has_body) selects.
///
/// Dropping the returned future cancels the dispatch; no further response
/// state is written after that.
pub fn dispatch<'a>(
    dispatcher: &'a dyn RequestDispatcher,
    ctx: &'a mut dyn RequestContext,
) -> DispatchFuture<'a> {
    let has_body = dispatcher.has_body();
    let span = debug_span!("dispatch", has_body);
    let fut = if has_body {
        dispatcher.process_request_with_body(ctx)
    } else {
        dispatcher.process_request(ctx)
    };
    Box::pin(fut.instrument(span))
}
