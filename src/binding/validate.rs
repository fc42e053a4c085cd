//! Parameter name validation
//!
//! Parameter names must be identifiers, since they stand in for constants
//! on the class (and become accessor functions via `class_params!`):
//! - Start with an ASCII letter or underscore
//! - Contain only ASCII letters, digits, underscores
//!
//! Single-pass byte check, no allocation on the success path.

use crate::class_id::ClassId;
use crate::error::{CallSite, ParamError};

/// Validate a parameter name.
///
/// Valid: `SESSION_TIMEOUT`, `timeout`, `_internal`, `V2`
/// Invalid: `""`, `2FAST`, `session-timeout`, `a.b`, `délai`
pub fn validate_param_name(class: &str, name: &str, at: CallSite) -> Result<(), ParamError> {
    let invalid = |reason: &'static str| ParamError::InvalidParameterName {
        class: ClassId::unshared(class),
        name: name.to_string(),
        reason,
        at,
    };

    let Some((&first, rest)) = name.as_bytes().split_first() else {
        return Err(invalid("cannot be empty"));
    };

    if !first.is_ascii_alphabetic() && first != b'_' {
        return Err(invalid("must start with a letter or underscore"));
    }

    if rest
        .iter()
        .any(|&byte| !byte.is_ascii_alphanumeric() && byte != b'_')
    {
        return Err(invalid("may only contain letters, digits and underscores"));
    }

    Ok(())
}
