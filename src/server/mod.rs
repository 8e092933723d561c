//! Request context abstraction and the in-memory context used by the
//! endpoint registry and the tests.

mod context;
mod http_context;
pub mod request;

pub use context::{BindingFailure, RequestContext};
pub use http_context::{CapturedResponse, HttpContext};
