//! Error types with fix suggestions
//!
//! Error code ranges:
//! - PARAM-001-009: Registry errors (declaration, binding, access)
//! - PARAM-010-019: Manifest and CLI errors

use std::fmt;
use std::panic::Location;

use thiserror::Error;

use crate::class_id::{ClassId, ParamName};

pub type Result<T> = std::result::Result<T, ParamError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Source location of the call that triggered an error.
///
/// Captured through `#[track_caller]` on every public registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Error, Debug)]
pub enum ParamError {
    // ─────────────────────────────────────────────────────────────
    // Registry errors (PARAM-001 to PARAM-007)
    // ─────────────────────────────────────────────────────────────

    #[error("PARAM-001: Parameter '{name}' already declared on class '{class}' (at {at})")]
    DuplicateParameter {
        class: ClassId,
        name: ParamName,
        at: CallSite,
    },

    #[error("PARAM-002: Parameter '{class}::{name}' has no value bound (at {at})")]
    UninitializedParameter {
        class: ClassId,
        name: ParamName,
        at: CallSite,
    },

    #[error("PARAM-003: Odd number of arguments ({count}) in name/value list for class '{class}' (at {at})")]
    UnevenArguments {
        class: ClassId,
        count: usize,
        at: CallSite,
    },

    #[error("PARAM-004: Unknown parameter '{name}' for class '{class}' (at {at})")]
    UnknownParameter {
        class: ClassId,
        name: ParamName,
        at: CallSite,
    },

    #[error("PARAM-005: Cyclic inheritance while reading '{class}::{name}': {chain} (at {at})")]
    CyclicInheritance {
        class: ClassId,
        name: ParamName,
        chain: String,
        at: CallSite,
    },

    #[error("PARAM-006: Invalid parameter name '{name}' for class '{class}': {reason} (at {at})")]
    InvalidParameterName {
        class: ClassId,
        name: String,
        reason: &'static str,
        at: CallSite,
    },

    #[error("PARAM-007: Parameter '{class}::{name}' is not a {expected}: {details} (at {at})")]
    TypeMismatch {
        class: ClassId,
        name: ParamName,
        expected: &'static str,
        details: String,
        at: CallSite,
    },

    // ─────────────────────────────────────────────────────────────
    // Manifest and CLI errors (PARAM-010 to PARAM-012)
    // ─────────────────────────────────────────────────────────────

    #[error("PARAM-010: Manifest parse error: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("PARAM-011: IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PARAM-012: Invalid override '{input}' (expected Class.NAME=VALUE)")]
    InvalidOverride { input: String },
}

impl ParamError {
    /// Class the error refers to, if any
    pub fn class(&self) -> Option<&ClassId> {
        match self {
            ParamError::DuplicateParameter { class, .. }
            | ParamError::UninitializedParameter { class, .. }
            | ParamError::UnevenArguments { class, .. }
            | ParamError::UnknownParameter { class, .. }
            | ParamError::CyclicInheritance { class, .. }
            | ParamError::InvalidParameterName { class, .. }
            | ParamError::TypeMismatch { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Call site that triggered the error, if any
    pub fn location(&self) -> Option<CallSite> {
        match self {
            ParamError::DuplicateParameter { at, .. }
            | ParamError::UninitializedParameter { at, .. }
            | ParamError::UnevenArguments { at, .. }
            | ParamError::UnknownParameter { at, .. }
            | ParamError::CyclicInheritance { at, .. }
            | ParamError::InvalidParameterName { at, .. }
            | ParamError::TypeMismatch { at, .. } => Some(*at),
            _ => None,
        }
    }
}

impl FixSuggestion for ParamError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ParamError::DuplicateParameter { .. } => {
                Some("Declare each parameter once, or use declare_with_defaults to layer values")
            }
            ParamError::UninitializedParameter { .. } => {
                Some("Bind a value with configure() before reading the parameter")
            }
            ParamError::UnevenArguments { .. } => {
                Some("Pass arguments as NAME VALUE pairs")
            }
            ParamError::UnknownParameter { .. } => {
                Some("Declare the parameter on the class before configuring it")
            }
            ParamError::CyclicInheritance { .. } => {
                Some("Break the cycle by configuring an own value on one of the classes")
            }
            ParamError::InvalidParameterName { .. } => {
                Some("Use identifier names: a letter or underscore, then letters, digits, underscores")
            }
            ParamError::TypeMismatch { .. } => {
                Some("Bind a value of the expected type, or read it with get() as JSON")
            }
            ParamError::Manifest(_) => Some("Check YAML syntax: indentation and quoting"),
            ParamError::Io(_) => Some("Check file path and permissions"),
            ParamError::InvalidOverride { .. } => {
                Some("Use --set Class.NAME=VALUE, e.g. --set Session.SESSION_TIMEOUT=30")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_site_points_at_caller() {
        let at = CallSite::caller();
        assert!(at.file.ends_with("error.rs"));
        assert!(at.line > 0);
        assert_eq!(at.to_string(), format!("{}:{}:{}", at.file, at.line, at.column));
    }

    #[test]
    fn messages_carry_code_class_and_location() {
        let at = CallSite::caller();
        let err = ParamError::UnknownParameter {
            class: ClassId::new("Session"),
            name: "SESSION_TTL".into(),
            at,
        };
        let msg = err.to_string();
        assert!(msg.contains("PARAM-004"));
        assert!(msg.contains("Session"));
        assert!(msg.contains("SESSION_TTL"));
        assert!(msg.contains(&at.to_string()));
        assert_eq!(err.location(), Some(at));
        assert_eq!(err.class().map(|c| c.as_str()), Some("Session"));
    }

    #[test]
    fn registry_and_cli_errors_have_suggestions() {
        let at = CallSite::caller();
        let errors = [
            ParamError::UninitializedParameter {
                class: ClassId::new("A"),
                name: "X".into(),
                at,
            },
            ParamError::UnevenArguments {
                class: ClassId::new("A"),
                count: 3,
                at,
            },
            ParamError::InvalidOverride {
                input: "nope".into(),
            },
        ];
        for err in &errors {
            assert!(err.fix_suggestion().is_some(), "{err}");
        }
    }

    #[test]
    fn io_errors_have_no_location() {
        let err = ParamError::from(std::io::Error::other("boom"));
        assert!(err.location().is_none());
        assert!(err.class().is_none());
        assert!(err.to_string().contains("PARAM-011"));
    }
}
