//! Process-wide registry
//!
//! Created on first use, never torn down. The free functions mirror the
//! [`Registry`] methods against this instance.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{ParamDump, Registry};
use crate::binding::Binding;
use crate::class_id::ClassId;
use crate::error::Result;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry
#[inline]
pub fn global() -> &'static Registry {
    &GLOBAL
}

#[track_caller]
pub fn declare<C, I>(class: C, names: I) -> Result<()>
where
    C: Into<ClassId>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    GLOBAL.declare(class, names)
}

#[track_caller]
pub fn declare_with_defaults<C, I, N, B>(class: C, pairs: I) -> Result<()>
where
    C: Into<ClassId>,
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: Into<Binding>,
{
    GLOBAL.declare_with_defaults(class, pairs)
}

/// Always succeeds; see [`Registry::inherit`]
pub fn inherit<C, B>(class: C, base: B) -> Result<()>
where
    C: Into<ClassId>,
    B: Into<ClassId>,
{
    GLOBAL.inherit(class, base)
}

#[track_caller]
pub fn configure<C, I, N, B>(class: C, pairs: I) -> Result<()>
where
    C: AsRef<str>,
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: Into<Binding>,
{
    GLOBAL.configure(class, pairs)
}

#[track_caller]
pub fn change_params<C, I, N, B>(class: C, pairs: I) -> Result<()>
where
    C: AsRef<str>,
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: Into<Binding>,
{
    GLOBAL.change_params(class, pairs)
}

pub fn has_registry(class: impl AsRef<str>) -> bool {
    GLOBAL.has_registry(class)
}

#[track_caller]
pub fn dump_params(class: impl AsRef<str>) -> Result<ParamDump> {
    GLOBAL.dump_params(class)
}

/// Current value of `class::name` in the global registry
#[track_caller]
pub fn get<C, N>(class: C, name: N) -> Result<Value>
where
    C: AsRef<str>,
    N: AsRef<str>,
{
    GLOBAL.get(class, name)
}
