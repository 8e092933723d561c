//! Parameter binding: turning route, query, header and body data into the
//! typed arguments of a handler.

mod binder;
mod value;

pub use binder::{ParamSource, ParameterBinder, ParameterInfo};
pub use value::{BindValue, Json};
