//! # brrtdispatch
//!
//! **brrtdispatch** adapts plain Rust closures to a uniform request
//! dispatcher contract. A handler declares the typed arguments it needs; a
//! dispatcher binds each one from the request (route values, query string,
//! headers or body), invokes the handler, and writes its result.
//!
//! The dispatcher types themselves are not written by hand. One type exists
//! per combination of handler arity, return presence and binding strategy,
//! and all of them are emitted by [`brrtdispatch_codegen`] at build time.
//!
//! ## Architecture
//!
//! - **[`dispatcher`]** - The [`RequestDispatcher`](dispatcher::RequestDispatcher)
//!   contract and the generated `ActionDispatcherN` / `FuncDispatcherN` types
//! - **[`binding`]** - [`BindValue`](binding::BindValue) conversions and the
//!   per-slot [`ParameterBinder`](binding::ParameterBinder)
//! - **[`response`]** - [`Responder`](response::Responder) conversions for
//!   handler results and the [`ResultInvoker`](response::ResultInvoker)
//! - **[`server`]** - The [`RequestContext`](server::RequestContext) seam and
//!   the in-memory [`HttpContext`](server::HttpContext)
//! - **[`registry`]** - Method and path routing to dispatchers
//! - **[`diagnostics`]** - Binding failure reporting
//! - **[`cli`]**, **[`config`]**, **[`logging`]** - The `brrtdispatch-gen` binary
//!
//! ## Request protocol
//!
//! 1. The transport asks the dispatcher whether it has a body-bound slot.
//! 2. Without one, `process_request` binds every slot synchronously.
//! 3. With one, `process_request_with_body` may suspend while the body is read.
//! 4. Slots bind in declaration order. The first failure sets status 400,
//!    records a diagnostic, and the handler is not called.
//! 5. Otherwise the handler runs once and its result, if any, is written.
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtdispatch::binding::{Json, ParameterInfo};
//! use brrtdispatch::dispatcher::{ActionDispatcher0, FuncDispatcher1};
//! use brrtdispatch::registry::EndpointRegistry;
//! use brrtdispatch::server::{HttpContext, RequestContext};
//! use http::Method;
//!
//! # futures::executor::block_on(async {
//! let mut registry = EndpointRegistry::new();
//! registry
//!     .map_get("/health", ActionDispatcher0::new(|| {}, &[]).unwrap())
//!     .map_get(
//!         "/square/{n}",
//!         FuncDispatcher1::new(|n: i64| Json(n * n), &[ParameterInfo::new("n")]).unwrap(),
//!     );
//!
//! let mut ctx = HttpContext::new(Method::GET, "/square/12");
//! registry.handle(&mut ctx).await.unwrap();
//! assert_eq!(ctx.response_json().unwrap(), serde_json::json!(144));
//!
//! let mut ctx = HttpContext::new(Method::GET, "/square/twelve");
//! registry.handle(&mut ctx).await.unwrap();
//! assert_eq!(ctx.status(), 400);
//! # });
//! ```

pub mod binding;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod registry;
pub mod response;
pub mod server;

pub use binding::{BindValue, Json, ParamSource, ParameterBinder, ParameterInfo};
pub use dispatcher::{dispatch, RequestDispatcher};
pub use registry::EndpointRegistry;
pub use response::{Responder, Results};
pub use server::{HttpContext, RequestContext};
