//! Binding failure diagnostics.

use crate::binding::{BindValue, ParameterBinder};
use crate::server::{BindingFailure, RequestContext};
use std::any::type_name;
use tracing::debug;

/// Reports parameters that could not be bound from a request.
///
/// Each failure is logged at debug level and recorded on the request context,
/// so a transport can surface it alongside the `400 Bad Request` status.
pub struct ParameterLog;

impl ParameterLog {
    pub fn parameter_binding_failed<T: BindValue>(
        ctx: &mut dyn RequestContext,
        index: usize,
        binder: &ParameterBinder<T>,
    ) {
        record(ctx, index, binder.type_name(), binder.name());
    }

    pub fn parameter_binding_failed_for_type<T: BindValue>(
        ctx: &mut dyn RequestContext,
        index: usize,
        name: &str,
    ) {
        record(ctx, index, type_name::<T>(), name);
    }
}

fn record(
    ctx: &mut dyn RequestContext,
    parameter_index: usize,
    parameter_type: &'static str,
    parameter_name: &str,
) {
    debug!(
        parameter_index,
        parameter_type,
        parameter_name,
        "Failed to bind parameter \"{parameter_type} {parameter_name}\" from the request"
    );
    ctx.record_binding_failure(BindingFailure {
        parameter_index,
        parameter_type,
        parameter_name: parameter_name.to_string(),
    });
}
