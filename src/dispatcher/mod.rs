//! # Dispatcher Module
//!
//! Request dispatchers adapt a strongly-typed handler, a plain closure taking
//! `N` typed arguments, to the uniform [`RequestDispatcher`] contract. Each
//! argument slot is bound from the request by a
//! [`ParameterBinder`](crate::binding::ParameterBinder), the handler is
//! invoked, and its result is written by a
//! [`ResultInvoker`](crate::response::ResultInvoker).
//!
//! ## Generated types
//!
//! For every arity `N` there are four types:
//!
//! | Type | Handler | Binding |
//! |------|---------|---------|
//! | `ActionDispatcherN` | `Fn(T0, ..)` | one binder per slot |
//! | `FuncDispatcherN` | `Fn(T0, ..) -> R` | one binder per slot |
//! | `TypeOnlyActionDispatcherN` | `Fn(T0, ..)` | from the slot type and name |
//! | `TypeOnlyFuncDispatcherN` | `Fn(T0, ..) -> R` | from the slot type and name |
//!
//! Both binding strategies behave identically for the same handler and
//! request; they differ only in what state the dispatcher keeps.
//!
//! ## Example
//!
//! ```rust
//! use brrtdispatch::binding::ParameterInfo;
//! use brrtdispatch::dispatcher::{dispatch, FuncDispatcher2};
//! use brrtdispatch::server::{HttpContext, RequestContext};
//! use http::Method;
//!
//! # futures::executor::block_on(async {
//! let add = FuncDispatcher2::new(
//!     |a: i32, b: i32| (a + b).to_string(),
//!     &[ParameterInfo::new("a"), ParameterInfo::new("b")],
//! )
//! .unwrap();
//!
//! let mut ctx = HttpContext::new(Method::GET, "/add?a=2&b=3");
//! dispatch(&add, &mut ctx).await.unwrap();
//! assert_eq!(ctx.response().unwrap().body, b"5");
//!
//! let mut ctx = HttpContext::new(Method::GET, "/add?a=2");
//! dispatch(&add, &mut ctx).await.unwrap();
//! assert_eq!(ctx.status(), 400);
//! # });
//! ```
//!
//! ## Using generated code elsewhere
//!
//! Source written by the `brrtdispatch-gen` CLI expects the names in
//! [`prelude`] to be in scope:
//!
//! ```rust,ignore
//! use brrtdispatch::dispatcher::prelude::*;
//! include!("dispatchers.rs");
//! ```

mod core;
mod generated;

pub use core::{
    completed, dispatch, ensure_arity, ensure_single_body, DispatchFuture, DispatchResult,
    RequestDispatcher,
};
pub use generated::*;

/// Everything generated dispatcher source refers to by name.
pub mod prelude {
    pub use super::core::{
        completed, ensure_arity, ensure_single_body, DispatchFuture, DispatchResult,
        RequestDispatcher,
    };
    pub use crate::binding::{BindValue, ParameterBinder, ParameterInfo};
    pub use crate::diagnostics::ParameterLog;
    pub use crate::response::{Responder, ResultInvoker};
    pub use crate::server::RequestContext;
    pub use http::StatusCode;
}
