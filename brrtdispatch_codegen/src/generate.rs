//! Top-level driver: walks the signature space and emits one type per point.

use tracing::{debug, info};

use crate::body::emit_dispatcher;
use crate::config::GeneratorConfig;
use crate::signature::{BindingStrategy, HandlerSignature};
use crate::writer::CodeWriter;

/// Comment block placed at the top of every generated file.
pub const HEADER: &str = concat!(
    "// ------------------------------------------------------------------------------\n",
    "// <auto-generated>\n",
    "//     This code was generated by brrtdispatch_codegen ",
    env!("CARGO_PKG_VERSION"),
    ".\n",
    "//\n",
    "//     Changes to this file may cause incorrect behavior and will be lost if\n",
    "//     the code is regenerated.\n",
    "// </auto-generated>\n",
    "// ------------------------------------------------------------------------------\n",
);

/// Every signature in emission order: arity ascending, then return presence
/// (procedures first), then binding strategy (instance first). Empty for an
/// invalid range.
#[must_use]
pub fn signatures(config: &GeneratorConfig) -> Vec<HandlerSignature> {
    if config.validate().is_err() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(config.type_count());
    for arity in config.min_arity..=config.max_arity {
        for has_return in [false, true] {
            for strategy in BindingStrategy::ALL {
                out.push(HandlerSignature::new(arity, has_return, strategy));
            }
        }
    }
    out
}

/// Accumulates the generated source for one configuration.
#[derive(Debug)]
pub struct DispatcherGenerator {
    config: GeneratorConfig,
    writer: CodeWriter,
}

impl DispatcherGenerator {
    /// # Errors
    ///
    /// Returns an error if the configured arity range is invalid.
    pub fn new(config: GeneratorConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            writer: CodeWriter::new(),
        })
    }

    /// Emit the header followed by every dispatcher type.
    #[must_use]
    pub fn generate(mut self) -> String {
        self.writer.write_line(HEADER.trim_end_matches('\n'));

        let signatures = signatures(&self.config);
        for sig in &signatures {
            debug!(signature = %sig, type_name = %sig.type_name(), "Emitting dispatcher");
            self.writer.new_line();
            emit_dispatcher(&mut self.writer, sig);
        }

        info!(
            min_arity = self.config.min_arity,
            max_arity = self.config.max_arity,
            types = signatures.len(),
            "Generated dispatcher source"
        );
        self.writer.finish()
    }
}

/// Generate the dispatcher source for `config`.
///
/// Output is deterministic: the same configuration always yields the same text.
///
/// # Errors
///
/// Returns an error if the configured arity range is invalid.
pub fn generate(config: &GeneratorConfig) -> anyhow::Result<String> {
    Ok(DispatcherGenerator::new(*config)?.generate())
}
