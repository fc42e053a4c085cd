//! Class identifiers and parameter names

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::interner::intern;

/// Interned parameter name
pub type ParamName = Arc<str>;

/// Intern a parameter name
#[inline]
pub fn param_name(name: &str) -> ParamName {
    intern(name)
}

/// Identifies the class a registry belongs to.
///
/// Any string works as an identifier; [`ClassId::of`] derives one from a
/// Rust type so that parameters can be attached to a struct.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Arc<str>);

impl ClassId {
    pub fn new(name: &str) -> Self {
        Self(intern(name))
    }

    /// Identifier that skips the interner. Errors from failed lookups carry
    /// these so that reading unknown names never grows the interner.
    pub(crate) fn unshared(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Identifier for a Rust type (its fully qualified type name)
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<&ClassId> for ClassId {
    fn from(id: &ClassId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ClassId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the class table be queried with a plain `&str`
impl Borrow<str> for ClassId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for ClassId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClassId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
