//! # CLI Module
//!
//! The `brrtdispatch-gen` binary writes the dispatcher source that
//! `build.rs` generates for this crate, for any arity range, so other crates
//! can vendor or inspect it.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! brrtdispatch-gen generate --max-arity 8 --output src/dispatchers.rs
//! ```
//!
//! Options:
//! - `--config <FILE>` - Config file (default: `./brrtdispatch.toml` when present)
//! - `--min-arity <N>` / `--max-arity <N>` - Arity range, overriding the config
//! - `--output <FILE>` - Destination file (default: stdout)
//!
//! ### `inspect`
//!
//! List every type the range produces with its signature, one per line:
//!
//! ```bash
//! brrtdispatch-gen inspect --max-arity 2
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, RangeArgs};
