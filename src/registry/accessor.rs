//! Stable per-parameter read handle

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Registry;
use crate::class_id::{ClassId, ParamName};
use crate::error::{CallSite, ParamError, Result};

/// Reads one parameter of one class.
///
/// Holds no value: every call looks up the binding currently registered
/// for the name, so replacing the binding never invalidates the accessor.
#[derive(Clone)]
pub struct Accessor {
    registry: Registry,
    class: ClassId,
    name: ParamName,
}

impl Accessor {
    pub(crate) fn new(registry: Registry, class: ClassId, name: ParamName) -> Self {
        Self {
            registry,
            class,
            name,
        }
    }

    /// Evaluate the parameter now
    #[track_caller]
    pub fn get(&self) -> Result<Value> {
        let at = CallSite::caller();
        self.registry.read(self.class.as_str(), &self.name, at)
    }

    /// Evaluate the parameter and deserialize it into `T`
    #[track_caller]
    pub fn get_as<T: DeserializeOwned>(&self) -> Result<T> {
        let at = CallSite::caller();
        let value = self.registry.read(self.class.as_str(), &self.name, at)?;
        serde_json::from_value(value).map_err(|e| ParamError::TypeMismatch {
            class: self.class.clone(),
            name: self.name.clone(),
            expected: std::any::type_name::<T>(),
            details: e.to_string(),
            at,
        })
    }

    pub fn class(&self) -> &ClassId {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({}::{})", self.class, self.name)
    }
}
