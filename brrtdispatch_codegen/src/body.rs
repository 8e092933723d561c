//! Emitters for the dispatcher struct, its constructor and the two request
//! entry points.
//!
//! Control flow (slot order, short-circuit on the first failed bind, 400
//! status, delegate call, result conversion) is emitted once here. The binding
//! strategies only contribute per-slot snippets through [`SlotStrategy`], so
//! both strategies produce the same request protocol.

use crate::signature::{fn_trait, generic_params, input_type, BindingStrategy, HandlerSignature};
use crate::writer::CodeWriter;

const BAD_REQUEST: &str = "ctx.set_status(StatusCode::BAD_REQUEST.as_u16());";

/// Per-slot code fragments that differ between binding strategies.
pub(crate) trait SlotStrategy {
    /// Field declaration owned by slot `j`.
    fn field(&self, j: usize) -> String;

    /// Statements run in the constructor before `Self` is built.
    fn prelude(&self, w: &mut CodeWriter, arity: usize);

    /// Field initialisers for slot `j` inside `Self { .. }`.
    fn field_init(&self, j: usize) -> String;

    /// Fields and initialisers that belong to the dispatcher as a whole.
    fn extra_fields(&self) -> &'static [(&'static str, &'static str)];

    /// Body of `has_body()`.
    fn has_body(&self, arity: usize) -> String;

    /// Expression telling whether slot `j` reads the request body, valid in
    /// the constructor once `prelude` has run.
    fn body_flag(&self, j: usize) -> String;

    /// Expression yielding `Option<Tj>` without touching the body.
    fn try_bind(&self, j: usize) -> String;

    /// Future yielding `Option<Tj>`, allowed to consume the body.
    fn bind_body(&self, j: usize) -> String;

    /// Statement reporting a failed bind of slot `j`.
    fn log_failure(&self, j: usize) -> String;

    /// Short description used in the emitted doc comment.
    fn describe(&self) -> &'static str;
}

/// Each slot owns a `ParameterBinder<Tj>` built from its metadata.
pub(crate) struct InstanceSlots;

/// Slots keep only their name; binding is resolved from `Tj` alone.
pub(crate) struct TypeOnlySlots;

impl SlotStrategy for InstanceSlots {
    fn field(&self, j: usize) -> String {
        format!("parameter_binder{j}: ParameterBinder<{}>,", input_type(j))
    }

    fn prelude(&self, w: &mut CodeWriter, arity: usize) {
        for j in 0..arity {
            w.write_line(&format!(
                "let parameter_binder{j} = ParameterBinder::<{}>::create(&parameters[{j}]);",
                input_type(j)
            ));
        }
        w.write("let has_body = ");
        if arity == 0 {
            w.write("false");
        } else {
            w.write_joined((0..arity).map(|j| self.body_flag(j)), " || ");
        }
        w.write_line(";");
    }

    fn field_init(&self, j: usize) -> String {
        format!("parameter_binder{j},")
    }

    fn extra_fields(&self) -> &'static [(&'static str, &'static str)] {
        &[("has_body: bool,", "has_body,")]
    }

    fn has_body(&self, _arity: usize) -> String {
        "self.has_body".to_string()
    }

    fn body_flag(&self, j: usize) -> String {
        format!("parameter_binder{j}.is_body()")
    }

    fn try_bind(&self, j: usize) -> String {
        format!("self.parameter_binder{j}.try_bind_value(&*ctx)")
    }

    fn bind_body(&self, j: usize) -> String {
        format!("self.parameter_binder{j}.bind_body_or_value(&mut *ctx)")
    }

    fn log_failure(&self, j: usize) -> String {
        format!("ParameterLog::parameter_binding_failed(&mut *ctx, {j}, &self.parameter_binder{j});")
    }

    fn describe(&self) -> &'static str {
        "each slot bound through its own `ParameterBinder`"
    }
}

impl SlotStrategy for TypeOnlySlots {
    fn field(&self, j: usize) -> String {
        format!("name{j}: String,")
    }

    fn prelude(&self, _w: &mut CodeWriter, _arity: usize) {}

    fn field_init(&self, j: usize) -> String {
        format!("name{j}: parameters[{j}].name.clone(),")
    }

    fn extra_fields(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn has_body(&self, arity: usize) -> String {
        if arity == 0 {
            return "false".to_string();
        }
        (0..arity)
            .map(|j| self.body_flag(j))
            .collect::<Vec<_>>()
            .join(" || ")
    }

    fn body_flag(&self, j: usize) -> String {
        format!("ParameterBinder::<{}>::has_body_based_on_type()", input_type(j))
    }

    fn try_bind(&self, j: usize) -> String {
        format!(
            "ParameterBinder::<{}>::try_bind_value_based_on_type(&*ctx, &self.name{j})",
            input_type(j)
        )
    }

    fn bind_body(&self, j: usize) -> String {
        format!(
            "ParameterBinder::<{}>::bind_body_based_on_type(&mut *ctx, &self.name{j})",
            input_type(j)
        )
    }

    fn log_failure(&self, j: usize) -> String {
        format!(
            "ParameterLog::parameter_binding_failed_for_type::<{}>(&mut *ctx, {j}, &self.name{j});",
            input_type(j)
        )
    }

    fn describe(&self) -> &'static str {
        "each slot bound from its declared type"
    }
}

pub(crate) fn slot_strategy(strategy: BindingStrategy) -> &'static dyn SlotStrategy {
    match strategy {
        BindingStrategy::Instance => &InstanceSlots,
        BindingStrategy::TypeOnly => &TypeOnlySlots,
    }
}

/// Emit the complete definition of one dispatcher type.
pub(crate) fn emit_dispatcher(w: &mut CodeWriter, sig: &HandlerSignature) {
    let slots = slot_strategy(sig.strategy);
    emit_struct(w, sig, slots);
    w.new_line();
    emit_constructor(w, sig, slots);
    w.new_line();
    emit_contract(w, sig, slots);
}

fn emit_struct(w: &mut CodeWriter, sig: &HandlerSignature, slots: &dyn SlotStrategy) {
    w.write_line(&format!(
        "/// Dispatches to a `{}` handler, {}.",
        sig.fn_trait(),
        slots.describe()
    ));
    w.write_line(&format!("pub struct {} {{", sig.type_header()));
    w.indent();
    for j in 0..sig.arity {
        w.write_line(&slots.field(j));
    }
    if sig.has_return {
        w.write_line("result_invoker: ResultInvoker<R>,");
    }
    w.write_line(&format!(
        "delegate: Box<dyn {} + Send + Sync>,",
        fn_trait(sig.arity, sig.has_return)
    ));
    for (decl, _) in slots.extra_fields() {
        w.write_line(decl);
    }
    w.unindent();
    w.write_line("}");
}

/// `impl<..> [Trait for] Type<..>` plus the `where` clause bounding every slot.
fn emit_impl_header(w: &mut CodeWriter, sig: &HandlerSignature, contract: Option<&str>) {
    let generics = generic_params(sig.arity, sig.has_return);
    match contract {
        Some(name) => w.write(&format!("impl{generics} {name} for {}", sig.type_header())),
        None => w.write(&format!("impl{generics} {}", sig.type_header())),
    }

    if generics.is_empty() {
        w.write_line(" {");
        return;
    }
    w.new_line();
    w.write_line("where");
    w.indent();
    for j in 0..sig.arity {
        w.write_line(&format!("{}: BindValue,", input_type(j)));
    }
    if sig.has_return {
        w.write_line("R: Responder,");
    }
    w.unindent();
    w.write_line("{");
}

fn emit_constructor(w: &mut CodeWriter, sig: &HandlerSignature, slots: &dyn SlotStrategy) {
    emit_impl_header(w, sig, None);
    w.indent();

    let noun = if sig.arity == 1 { "entry" } else { "entries" };
    w.write_line(&format!(
        "/// Wrap `delegate`; `parameters` must hold exactly {} {noun}.",
        sig.arity
    ));
    w.write_line("pub fn new(");
    w.indent();
    w.write_line(&format!(
        "delegate: impl {} + Send + Sync + 'static,",
        fn_trait(sig.arity, sig.has_return)
    ));
    w.write_line("parameters: &[ParameterInfo],");
    w.unindent();
    w.write_line(") -> anyhow::Result<Self> {");
    w.indent();
    w.write_line(&format!(
        "ensure_arity(\"{}\", parameters, {})?;",
        sig.type_name(),
        sig.arity
    ));
    slots.prelude(w, sig.arity);
    if sig.arity > 1 {
        w.write(&format!("ensure_single_body(\"{}\", parameters, &[", sig.type_name()));
        w.write_joined((0..sig.arity).map(|j| slots.body_flag(j)), ", ");
        w.write_line("])?;");
    }
    w.write_line("Ok(Self {");
    w.indent();
    for j in 0..sig.arity {
        w.write_line(&slots.field_init(j));
    }
    if sig.has_return {
        w.write_line("result_invoker: ResultInvoker::create(),");
    }
    w.write_line("delegate: Box::new(delegate),");
    for (_, init) in slots.extra_fields() {
        w.write_line(init);
    }
    w.unindent();
    w.write_line("})");
    w.unindent();
    w.write_line("}");

    w.unindent();
    w.write_line("}");
}

fn emit_contract(w: &mut CodeWriter, sig: &HandlerSignature, slots: &dyn SlotStrategy) {
    emit_impl_header(w, sig, Some("RequestDispatcher"));
    w.indent();

    w.write_line("fn has_body(&self) -> bool {");
    w.indent();
    w.write_line(&slots.has_body(sig.arity));
    w.unindent();
    w.write_line("}");
    w.new_line();

    emit_process_request(w, sig, slots);
    w.new_line();
    emit_process_request_with_body(w, sig, slots);

    w.unindent();
    w.write_line("}");
}

/// A dispatcher with no slots and no result never looks at the context.
fn ctx_param(sig: &HandlerSignature) -> &'static str {
    if sig.arity > 0 || sig.has_return {
        "ctx"
    } else {
        "_ctx"
    }
}

fn emit_process_request(w: &mut CodeWriter, sig: &HandlerSignature, slots: &dyn SlotStrategy) {
    w.write_line(&format!(
        "fn process_request<'a>(&'a self, {}: &'a mut dyn RequestContext) -> DispatchFuture<'a> {{",
        ctx_param(sig)
    ));
    w.indent();

    for j in 0..sig.arity {
        w.write_line(&format!("let Some(arg{j}) = {} else {{", slots.try_bind(j)));
        w.indent();
        w.write_line(&slots.log_failure(j));
        w.write_line(BAD_REQUEST);
        w.write_line("return completed();");
        w.unindent();
        w.write_line("};");
        w.new_line();
    }

    emit_delegate_call(w, sig);
    w.new_line();

    if sig.has_return {
        w.write_line("self.result_invoker.invoke(ctx, result)");
    } else {
        w.write_line("completed()");
    }

    w.unindent();
    w.write_line("}");
}

fn emit_process_request_with_body(
    w: &mut CodeWriter,
    sig: &HandlerSignature,
    slots: &dyn SlotStrategy,
) {
    w.write_line("fn process_request_with_body<'a>(");
    w.indent();
    w.write_line("&'a self,");
    w.write_line(&format!("{}: &'a mut dyn RequestContext,", ctx_param(sig)));
    w.unindent();
    w.write_line(") -> DispatchFuture<'a> {");
    w.indent();
    w.write_line("Box::pin(async move {");
    w.indent();

    for j in 0..sig.arity {
        w.write_line(&format!("let Some(arg{j}) = {}.await else {{", slots.bind_body(j)));
        w.indent();
        w.write_line(&slots.log_failure(j));
        w.write_line(BAD_REQUEST);
        w.write_line("return Ok(());");
        w.unindent();
        w.write_line("};");
        w.new_line();
    }

    emit_delegate_call(w, sig);
    w.new_line();

    if sig.has_return {
        w.write_line("self.result_invoker.invoke(ctx, result).await");
    } else {
        w.write_line("DispatchResult::Ok(())");
    }

    w.unindent();
    w.write_line("})");
    w.unindent();
    w.write_line("}");
}

/// `let result = (self.delegate)(arg0, ..);` or the bare call for procedures.
fn emit_delegate_call(w: &mut CodeWriter, sig: &HandlerSignature) {
    if sig.has_return {
        w.write("let result = (self.delegate)(");
    } else {
        w.write("(self.delegate)(");
    }
    w.write_joined((0..sig.arity).map(|j| format!("arg{j}")), ", ");
    w.write_line(");");
}
