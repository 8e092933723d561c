//! Handler signatures and the type-level spellings derived from them.
//!
//! Everything here is a pure function of the signature. The struct header, the
//! stored delegate field and the constructor parameter all go through
//! [`generic_params`] and [`fn_trait`], so declaration and use sites cannot
//! drift apart.

use std::fmt;

/// How a dispatcher binds each of its parameter slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStrategy {
    /// One `ParameterBinder<T>` per slot, built from parameter metadata.
    Instance,
    /// Binding resolved from the slot type alone; only the name is kept.
    TypeOnly,
}

impl BindingStrategy {
    /// Emission order within one (arity, return-presence) pair.
    pub const ALL: [BindingStrategy; 2] = [BindingStrategy::Instance, BindingStrategy::TypeOnly];
}

impl fmt::Display for BindingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingStrategy::Instance => f.write_str("instance"),
            BindingStrategy::TypeOnly => f.write_str("type-only"),
        }
    }
}

/// One point of the generated combinatorial space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerSignature {
    pub arity: usize,
    pub has_return: bool,
    pub strategy: BindingStrategy,
}

impl HandlerSignature {
    #[must_use]
    pub fn new(arity: usize, has_return: bool, strategy: BindingStrategy) -> Self {
        Self {
            arity,
            has_return,
            strategy,
        }
    }

    /// Name of the emitted struct, e.g. `TypeOnlyFuncDispatcher2`.
    #[must_use]
    pub fn type_name(&self) -> String {
        let prefix = match self.strategy {
            BindingStrategy::Instance => "",
            BindingStrategy::TypeOnly => "TypeOnly",
        };
        let kind = if self.has_return { "Func" } else { "Action" };
        format!("{prefix}{kind}Dispatcher{}", self.arity)
    }

    /// The struct name with its generic parameter list, e.g. `FuncDispatcher1<T0, R>`.
    #[must_use]
    pub fn type_header(&self) -> String {
        format!(
            "{}{}",
            self.type_name(),
            generic_params(self.arity, self.has_return)
        )
    }

    #[must_use]
    pub fn fn_trait(&self) -> String {
        fn_trait(self.arity, self.has_return)
    }
}

impl fmt::Display for HandlerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arity={} return={} strategy={}",
            self.arity, self.has_return, self.strategy
        )
    }
}

/// Name of the input type parameter for slot `j`.
#[must_use]
pub fn input_type(j: usize) -> String {
    format!("T{j}")
}

/// `T0..T(N-1)` followed by `R` when a return value is present.
#[must_use]
pub fn type_params(arity: usize, has_return: bool) -> Vec<String> {
    let mut params: Vec<String> = (0..arity).map(input_type).collect();
    if has_return {
        params.push("R".to_string());
    }
    params
}

/// `<T0, .., R>`, or the empty string when there are no type parameters.
#[must_use]
pub fn generic_params(arity: usize, has_return: bool) -> String {
    let params = type_params(arity, has_return);
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

/// The callable shape of the stored delegate: `Fn(T0, ..)` or `Fn(T0, ..) -> R`.
#[must_use]
pub fn fn_trait(arity: usize, has_return: bool) -> String {
    let inputs = (0..arity).map(input_type).collect::<Vec<_>>().join(", ");
    if has_return {
        format!("Fn({inputs}) -> R")
    } else {
        format!("Fn({inputs})")
    }
}
