//! Name/value argument lists
//!
//! The typed form is a list of `(name, Binding)` pairs, usually built with
//! `params!`. The flat form alternates names and values
//! (`NAME, value, NAME, value`) and comes from text sources such as CLI
//! arguments or YAML sequences; it only carries constants.

use serde_json::Value;

use super::Binding;
use crate::class_id::{ClassId, ParamName};
use crate::error::{CallSite, ParamError};

/// Typed name/value pairs
pub type ParamPairs = Vec<(ParamName, Binding)>;

/// Split a flat alternating list into typed pairs.
///
/// Names are not interned here; the registry interns a name only when it
/// stores a new entry.
///
/// Fails with `UnevenArguments` on an odd count before looking at any
/// element, and with `InvalidParameterName` when a name slot is not a string.
pub fn pairs_from_flat(
    class: &str,
    flat: &[Value],
    at: CallSite,
) -> Result<ParamPairs, ParamError> {
    if flat.len() % 2 != 0 {
        return Err(ParamError::UnevenArguments {
            class: ClassId::unshared(class),
            count: flat.len(),
            at,
        });
    }

    flat.chunks_exact(2)
        .map(|pair| match &pair[0] {
            Value::String(name) => {
                let name = ParamName::from(name.as_str());
                Ok((name, Binding::Constant(pair[1].clone())))
            }
            other => Err(ParamError::InvalidParameterName {
                class: ClassId::unshared(class),
                name: other.to_string(),
                reason: "name must be a string",
                at,
            }),
        })
        .collect()
}
