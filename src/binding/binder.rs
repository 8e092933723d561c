use super::value::BindValue;
use crate::server::RequestContext;
use futures::future::{self, BoxFuture};
use std::any::type_name;
use std::marker::PhantomData;
use tracing::debug;

/// Where a parameter's raw value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSource {
    Route,
    Query,
    Header,
    Body,
}

/// Metadata for one handler parameter, in declaration order.
///
/// Dispatcher constructors take a slice of these whose length must equal the
/// handler's arity. `source` overrides the source inferred from the slot type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub source: Option<ParamSource>,
}

impl ParameterInfo {
    /// Parameter whose source is inferred from its type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: ParamSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn route(name: impl Into<String>) -> Self {
        Self::new(name).with_source(ParamSource::Route)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name).with_source(ParamSource::Query)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name).with_source(ParamSource::Header)
    }

    pub fn body(name: impl Into<String>) -> Self {
        Self::new(name).with_source(ParamSource::Body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// Route values first, then the query string.
    Inferred,
    Explicit(ParamSource),
}

/// Binds one parameter slot of type `T` from a request.
///
/// A binder is created once per slot when a dispatcher is constructed, so the
/// per-request path only performs the lookup and the parse. The type-only
/// associated functions bind without a binder instance, from the type and the
/// parameter name alone.
#[derive(Debug)]
pub struct ParameterBinder<T> {
    name: String,
    lookup: Lookup,
    _marker: PhantomData<fn() -> T>,
}

impl<T: BindValue> ParameterBinder<T> {
    pub fn create(info: &ParameterInfo) -> Self {
        let lookup = match info.source {
            Some(source) => Lookup::Explicit(source),
            None if T::BODY_BASED => Lookup::Explicit(ParamSource::Body),
            None => Lookup::Inferred,
        };
        debug!(
            parameter_name = %info.name,
            parameter_type = type_name::<T>(),
            lookup = ?lookup,
            "Created parameter binder"
        );
        Self {
            name: info.name.clone(),
            lookup,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Whether this slot is read from the request body.
    pub fn is_body(&self) -> bool {
        self.lookup == Lookup::Explicit(ParamSource::Body)
    }

    /// Bind without touching the body. Always `None` for a body slot.
    pub fn try_bind_value(&self, ctx: &dyn RequestContext) -> Option<T> {
        let raw = match self.lookup {
            Lookup::Inferred => inferred_value(ctx, &self.name),
            Lookup::Explicit(ParamSource::Route) => ctx.route_value(&self.name),
            Lookup::Explicit(ParamSource::Query) => ctx.query_value(&self.name),
            Lookup::Explicit(ParamSource::Header) => ctx.header(&self.name),
            Lookup::Explicit(ParamSource::Body) => return None,
        };
        T::parse_value(raw)
    }

    /// Bind from the body when this is a body slot, otherwise as
    /// [`try_bind_value`](Self::try_bind_value).
    pub fn bind_body_or_value<'a>(
        &'a self,
        ctx: &'a mut dyn RequestContext,
    ) -> BoxFuture<'a, Option<T>> {
        if self.is_body() {
            read_body_value(ctx, &self.name)
        } else {
            Box::pin(future::ready(self.try_bind_value(&*ctx)))
        }
    }

    pub fn has_body_based_on_type() -> bool {
        T::BODY_BASED
    }

    /// Type-only counterpart of [`try_bind_value`](Self::try_bind_value).
    pub fn try_bind_value_based_on_type(ctx: &dyn RequestContext, name: &str) -> Option<T> {
        if T::BODY_BASED {
            return None;
        }
        T::parse_value(inferred_value(ctx, name))
    }

    /// Type-only counterpart of [`bind_body_or_value`](Self::bind_body_or_value).
    pub fn bind_body_based_on_type<'a>(
        ctx: &'a mut dyn RequestContext,
        name: &'a str,
    ) -> BoxFuture<'a, Option<T>> {
        if T::BODY_BASED {
            read_body_value(ctx, name)
        } else {
            Box::pin(future::ready(Self::try_bind_value_based_on_type(
                &*ctx, name,
            )))
        }
    }
}

fn inferred_value<'c>(ctx: &'c dyn RequestContext, name: &str) -> Option<&'c str> {
    ctx.route_value(name).or_else(|| ctx.query_value(name))
}

fn read_body_value<'a, T: BindValue>(
    ctx: &'a mut dyn RequestContext,
    name: &'a str,
) -> BoxFuture<'a, Option<T>> {
    Box::pin(async move {
        match ctx.read_body().await {
            Ok(body) => T::parse_body(&body),
            Err(err) => {
                debug!(parameter_name = %name, error = %err, "Failed to read request body");
                None
            }
        }
    })
}
