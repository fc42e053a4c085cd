//! classparam - class-level configuration parameters
//!
//! A class declares a fixed set of named parameters, optionally with
//! defaults. Other code binds constants or providers to those names before
//! or after the class is used, and the class reads them back as if they
//! were constants.
//!
//! ```
//! use classparam::{params, Registry};
//!
//! let registry = Registry::new();
//! registry.declare("Session", ["SESSION_TIMEOUT", "SESSION_ID_LENGTH"]).unwrap();
//! assert!(registry.get("Session", "SESSION_TIMEOUT").is_err());
//!
//! registry
//!     .configure("Session", params! { SESSION_TIMEOUT => 30, SESSION_ID_LENGTH => 20 })
//!     .unwrap();
//! assert_eq!(registry.get("Session", "SESSION_TIMEOUT").unwrap(), 30);
//! ```
//!
//! Modules:
//! - `registry`: declaration, configuration, inheritance, introspection
//! - `binding`: value providers and argument lists
//! - `manifest`: YAML load-time configuration
//! - `error`: error taxonomy with fix suggestions

pub mod binding;
pub mod class_id;
pub mod error;
pub mod interner;
pub mod macros;
pub mod manifest;
pub mod registry;

pub use binding::{Binding, BindingKind, ParamPairs, Provider};
pub use class_id::{param_name, ClassId, ParamName};
pub use error::{CallSite, FixSuggestion, ParamError, Result};
pub use manifest::Manifest;
pub use registry::{
    change_params, configure, declare, declare_with_defaults, dump_params, get, global,
    has_registry, inherit, Accessor, ParamDump, Registry,
};
pub use serde_json::Value;
