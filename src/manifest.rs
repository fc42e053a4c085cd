//! YAML manifests for load-time configuration
//!
//! ```yaml
//! classes:
//!   - name: Base
//!     defaults: { TIMEOUT: 30 }
//!   - name: Session
//!     params: [SESSION_TIMEOUT, SESSION_ID_LENGTH]
//!     inherit: Base
//! configure:
//!   - class: Session
//!     set: { SESSION_TIMEOUT: 30, SESSION_ID_LENGTH: 20 }
//! ```
//!
//! Class entries apply in file order; inside an entry the steps run as
//! `params`, `inherit`, `defaults`. `configure` entries apply last.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::class_id::ClassId;
use crate::error::Result;
use crate::registry::Registry;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
    #[serde(default)]
    pub configure: Vec<ConfigureEntry>,
}

/// Declarations for one class
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassEntry {
    pub name: ClassId,
    /// Names declared without a value
    #[serde(default)]
    pub params: Vec<String>,
    /// Base class to forward to
    #[serde(default)]
    pub inherit: Option<ClassId>,
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,
}

/// Values bound to already declared parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigureEntry {
    pub class: ClassId,
    #[serde(default)]
    pub set: BTreeMap<String, Value>,
}

impl Manifest {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Apply every declaration, then every configure entry.
    ///
    /// Stops at the first failing step; steps already applied stay applied.
    #[track_caller]
    pub fn apply(&self, registry: &Registry) -> Result<()> {
        for entry in &self.classes {
            registry.declare(&entry.name, &entry.params)?;

            if let Some(base) = &entry.inherit {
                registry.inherit(&entry.name, base)?;
            }

            if !entry.defaults.is_empty() {
                registry.declare_with_defaults(&entry.name, constants(&entry.defaults))?;
            }
        }

        for entry in &self.configure {
            registry.configure(&entry.class, constants(&entry.set))?;
        }

        info!(
            classes = self.classes.len(),
            configured = self.configure.len(),
            "applied manifest"
        );
        Ok(())
    }
}

fn constants(values: &BTreeMap<String, Value>) -> impl Iterator<Item = (&str, Value)> + '_ {
    values
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
}
