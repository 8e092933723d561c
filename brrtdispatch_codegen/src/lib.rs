//! # brrtdispatch_codegen
//!
//! Emits the family of request dispatcher types used by `brrtdispatch`.
//!
//! For every arity in a configured range, every return-value presence and
//! every binding strategy, the generator writes one Rust struct that wraps a
//! handler `Fn(T0, .., T(N-1)) [-> R]` and implements `RequestDispatcher`:
//!
//! ```text
//! GeneratorConfig ──▶ signatures() ──▶ emit_dispatcher() ──▶ CodeWriter ──▶ String
//!   0..=M arities      N × {Action, Func}   struct + new()        indent-aware
//!                      × {Instance, TypeOnly} + contract impl      buffer
//! ```
//!
//! Module layering, leaves first:
//!
//! - [`writer`] - indentation-aware text accumulation
//! - [`signature`] - type names, generic lists and the `Fn(..)` spelling
//! - `body` - struct, constructor and entry-point bodies, parameterised by
//!   the slot binding strategy
//! - [`generate`](mod@generate) - the driver
//!
//! The generator performs no I/O. `brrtdispatch`'s build script and the
//! `brrtdispatch-gen` binary decide where the text goes.
//!
//! ```
//! use brrtdispatch_codegen::{generate, GeneratorConfig};
//!
//! let source = generate(&GeneratorConfig::new(0, 2)).unwrap();
//! assert!(source.contains("pub struct FuncDispatcher2<T0, T1, R> {"));
//! ```

mod body;
mod config;
pub mod generate;
pub mod signature;
pub mod writer;

pub use config::{GeneratorConfig, MAX_ARITY};
pub use generate::{generate, signatures, DispatcherGenerator, HEADER};
pub use signature::{BindingStrategy, HandlerSignature};
pub use writer::CodeWriter;
