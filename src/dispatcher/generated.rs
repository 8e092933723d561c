//! Dispatcher types emitted at build time by `brrtdispatch_codegen`.
//!
//! `build.rs` writes one type per (arity, return presence, binding strategy)
//! for arities 0 through 4.

use super::prelude::*;

include!(concat!(env!("OUT_DIR"), "/dispatchers.rs"));
