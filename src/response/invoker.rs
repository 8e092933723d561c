use super::responder::Responder;
use crate::server::RequestContext;
use futures::future::BoxFuture;
use std::any::type_name;
use std::marker::PhantomData;
use tracing::debug;

/// Writes handler results of type `R` to the response.
///
/// Created once per returning dispatcher, when the dispatcher is constructed.
pub struct ResultInvoker<R> {
    _marker: PhantomData<fn(R)>,
}

impl<R: Responder> ResultInvoker<R> {
    pub fn create() -> Self {
        debug!(result_type = type_name::<R>(), "Created result invoker");
        Self {
            _marker: PhantomData,
        }
    }

    pub fn result_type(&self) -> &'static str {
        type_name::<R>()
    }

    pub fn invoke<'a>(
        &'a self,
        ctx: &'a mut dyn RequestContext,
        result: R,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        result.respond(ctx)
    }
}

impl<R> std::fmt::Debug for ResultInvoker<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultInvoker")
            .field("result_type", &type_name::<R>())
            .finish()
    }
}
