//! Binding Module - value providers behind parameter names
//!
//! A [`Binding`] is the current strategy a registry entry uses to produce
//! its value:
//! - `Unset`: declared but not bound yet, reading fails
//! - `Constant`: a fixed JSON value
//! - `Function`: a provider re-evaluated on every read (no caching)
//! - `Forwarding`: delegates to the same name on a base class
//!
//! Submodules:
//! - `validate`: parameter name rules
//! - `args`: typed and flat `name, value` argument lists

mod args;
mod validate;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::class_id::ClassId;

pub use args::{pairs_from_flat, ParamPairs};
pub use validate::validate_param_name;

/// Zero-argument value provider
pub type Provider = Arc<dyn Fn() -> Value + Send + Sync>;

/// Value-producing strategy for one parameter
#[derive(Clone)]
pub enum Binding {
    /// Declared without a value
    Unset,
    /// Constant value, cloned on each read
    Constant(Value),
    /// Provider called on each read
    Function(Provider),
    /// Live link to the same name on the given base class
    Forwarding(ClassId),
}

/// Binding variant without its payload (for introspection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Unset,
    Constant,
    Function,
    Forwarding,
}

/// What a single binding yields before forwarding is followed
pub(crate) enum Step {
    Value(Value),
    Unset,
    Forward(ClassId),
}

impl Binding {
    /// Bind a fixed value.
    ///
    /// Conversion follows `serde_json`: non-finite floats (`NaN`, `±inf`)
    /// have no JSON form and are stored as `null`.
    pub fn constant(value: impl Into<Value>) -> Self {
        Binding::Constant(value.into())
    }

    /// Bind a provider evaluated fresh on every accessor call
    pub fn function<F>(provider: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Binding::Function(Arc::new(provider))
    }

    pub fn kind(&self) -> BindingKind {
        match self {
            Binding::Unset => BindingKind::Unset,
            Binding::Constant(_) => BindingKind::Constant,
            Binding::Function(_) => BindingKind::Function,
            Binding::Forwarding(_) => BindingKind::Forwarding,
        }
    }

    pub fn is_forwarding(&self) -> bool {
        matches!(self, Binding::Forwarding(_))
    }

    /// Evaluate one hop. Must be called without any registry lock held,
    /// since providers may read other parameters.
    pub(crate) fn step(&self) -> Step {
        match self {
            Binding::Unset => Step::Unset,
            Binding::Constant(value) => Step::Value(value.clone()),
            Binding::Function(provider) => Step::Value(provider()),
            Binding::Forwarding(base) => Step::Forward(base.clone()),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Unset => f.write_str("Unset"),
            Binding::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Binding::Function(_) => f.write_str("Function(..)"),
            Binding::Forwarding(base) => f.debug_tuple("Forwarding").field(base).finish(),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Unset => write!(f, "unset"),
            BindingKind::Constant => write!(f, "constant"),
            BindingKind::Function => write!(f, "function"),
            BindingKind::Forwarding => write!(f, "forwarding"),
        }
    }
}

impl From<Provider> for Binding {
    fn from(provider: Provider) -> Self {
        Binding::Function(provider)
    }
}

macro_rules! constant_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Binding {
                fn from(value: $ty) -> Self {
                    Binding::Constant(Value::from(value))
                }
            }
        )*
    };
}

// f64 goes through `Value::from`, so NaN and infinities become null
constant_from!(Value, bool, i32, i64, u32, u64, f64, &str, String);
