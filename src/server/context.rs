use futures::future::BoxFuture;
use std::fmt;

/// Diagnostic recorded when a parameter slot fails to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFailure {
    /// Zero-based position of the slot in the handler signature.
    pub parameter_index: usize,
    /// Rust type name of the slot, as reported by `std::any::type_name`.
    pub parameter_type: &'static str,
    /// Name of the handler parameter.
    pub parameter_name: String,
}

impl fmt::Display for BindingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to bind parameter {} \"{} {}\"",
            self.parameter_index, self.parameter_type, self.parameter_name
        )
    }
}

/// The view of one in-flight request that dispatchers need.
///
/// Implemented by the transport layer. Dispatchers take it as
/// `&mut dyn RequestContext`, so the generated code is not generic over the
/// server in use.
///
/// # Cancellation
///
/// `read_body` and `write_response` return futures. Dropping a dispatch future
/// drops whichever of these is pending; implementations must not write any
/// further response state from a dropped future.
pub trait RequestContext: Send {
    /// Value captured by the route pattern, e.g. `id` in `/todos/{id}`.
    fn route_value(&self, name: &str) -> Option<&str>;

    /// Last query-string value named `name`.
    fn query_value(&self, name: &str) -> Option<&str>;

    /// Header value, matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Current response status code.
    fn status(&self) -> u16;

    fn set_status(&mut self, status: u16);

    /// Drain the request body.
    ///
    /// The body can be read once; later calls fail.
    fn read_body(&mut self) -> BoxFuture<'_, anyhow::Result<Vec<u8>>>;

    /// Write the response payload with the given content type.
    fn write_response(
        &mut self,
        content_type: &str,
        body: Vec<u8>,
    ) -> BoxFuture<'_, anyhow::Result<()>>;

    /// Diagnostic sink for parameter binding failures. Ignored by default.
    fn record_binding_failure(&mut self, failure: BindingFailure) {
        let _ = failure;
    }
}
