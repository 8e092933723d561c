//! Conversion of handler return values into responses.

mod invoker;
mod responder;

pub use invoker::ResultInvoker;
pub use responder::{Responder, Results, APPLICATION_JSON, TEXT_PLAIN};
