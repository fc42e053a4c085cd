//! Per-class parameter table

use std::collections::HashMap;

use crate::binding::{Binding, BindingKind};
use crate::class_id::{param_name, ParamName};

/// Parameters of one class: name → binding, in declaration order.
#[derive(Debug, Default)]
pub(crate) struct ClassRegistry {
    order: Vec<ParamName>,
    bindings: HashMap<ParamName, Binding>,
}

impl ClassRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn kind(&self, name: &str) -> Option<BindingKind> {
        self.bindings.get(name).map(Binding::kind)
    }

    /// Stored (interned) name matching `name`
    pub fn key(&self, name: &str) -> Option<&ParamName> {
        self.bindings.get_key_value(name).map(|(key, _)| key)
    }

    /// Insert or overwrite. Only new names are interned; they are appended
    /// to the declaration order.
    pub fn set(&mut self, name: &str, binding: Binding) -> Option<Binding> {
        if let Some(current) = self.bindings.get_mut(name) {
            return Some(std::mem::replace(current, binding));
        }

        let name = param_name(name);
        self.order.push(name.clone());
        self.bindings.insert(name, binding);
        None
    }

    pub fn names(&self) -> &[ParamName] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}
