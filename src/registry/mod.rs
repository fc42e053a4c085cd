//! Parameter registry - declaration, binding, inheritance, introspection
//!
//! One [`Registry`] owns a table of class registries keyed by [`ClassId`].
//! Each class registry maps parameter names to their current [`Binding`]
//! and sits behind its own `RwLock`:
//!
//! ```text
//! Registry
//! └── classes: DashMap<ClassId, Arc<RwLock<ClassRegistry>>>
//!     ├── "Base"    { TIMEOUT: Constant(30) }
//!     └── "Session" { TIMEOUT: Forwarding("Base"), SESSION_ID_LENGTH: Unset }
//! ```
//!
//! Locking rules:
//! - a mutating call holds the target class's write lock for the whole call,
//!   so each call is all-or-nothing
//! - a read clones the binding under the read lock, releases it, then
//!   evaluates; providers therefore run with no lock held and may read
//!   other parameters
//! - no call ever holds two class locks at once
//!
//! Only calls that store entries intern names. Lookups borrow `&str`, and
//! errors from failed lookups carry uninterned copies.

mod accessor;
mod class;
mod global;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::binding::{pairs_from_flat, validate_param_name, Binding, BindingKind, Step};
use crate::class_id::{param_name, ClassId, ParamName};
use crate::error::{CallSite, ParamError, Result};

pub use accessor::Accessor;
use class::ClassRegistry;
pub use global::{
    change_params, configure, declare, declare_with_defaults, dump_params, get, global,
    has_registry, inherit,
};

/// Snapshot of every parameter of a class, evaluated at dump time
pub type ParamDump = BTreeMap<String, Value>;

type Slot = Arc<RwLock<ClassRegistry>>;

/// Table of class registries.
///
/// Cloning is cheap and yields a handle to the same table.
#[derive(Clone, Default)]
pub struct Registry {
    classes: Arc<DashMap<ClassId, Slot>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────
    // Declaration modes
    // ─────────────────────────────────────────────────────────────

    /// Declare parameters without values.
    ///
    /// Each name gets an `Unset` binding; reading it fails with
    /// `UninitializedParameter` until a value is configured. Fails with
    /// `DuplicateParameter` if a name repeats within the call or is already
    /// present on the class, and nothing is declared in that case.
    #[track_caller]
    pub fn declare<C, I>(&self, class: C, names: I) -> Result<()>
    where
        C: Into<ClassId>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let at = CallSite::caller();
        let class = class.into();

        let mut declared: Vec<ParamName> = Vec::new();
        for name in names {
            let name = name.as_ref();
            validate_param_name(class.as_str(), name, at)?;
            let name = param_name(name);
            if declared.contains(&name) {
                return Err(ParamError::DuplicateParameter { class, name, at });
            }
            declared.push(name);
        }

        let slot = self.slot_or_create(&class);
        let mut registry = slot.write();

        if let Some(name) = declared.iter().find(|name| registry.contains(name)) {
            return Err(ParamError::DuplicateParameter {
                class: class.clone(),
                name: name.clone(),
                at,
            });
        }

        for name in &declared {
            registry.set(name, Binding::Unset);
        }

        debug!(class = %class, count = declared.len(), total = registry.len(), "declared parameters");
        Ok(())
    }

    /// Declare parameters with default values.
    ///
    /// Existing entries are overwritten without a duplicate check, so a
    /// class may layer several calls of defaults.
    #[track_caller]
    pub fn declare_with_defaults<C, I, N, B>(&self, class: C, pairs: I) -> Result<()>
    where
        C: Into<ClassId>,
        I: IntoIterator<Item = (N, B)>,
        N: AsRef<str>,
        B: Into<Binding>,
    {
        let at = CallSite::caller();
        let class = class.into();
        let pairs = collect_pairs(pairs);
        self.apply_defaults(&class, pairs, at)
    }

    /// [`Registry::declare_with_defaults`] from a flat `name, value, ...` list
    #[track_caller]
    pub fn declare_with_defaults_flat<C>(&self, class: C, flat: &[Value]) -> Result<()>
    where
        C: Into<ClassId>,
    {
        let at = CallSite::caller();
        let class = class.into();
        let pairs = pairs_from_flat(class.as_str(), flat, at)?;
        self.apply_defaults(&class, pairs, at)
    }

    fn apply_defaults<N>(
        &self,
        class: &ClassId,
        pairs: Vec<(N, Binding)>,
        at: CallSite,
    ) -> Result<()>
    where
        N: AsRef<str>,
    {
        for (name, _) in &pairs {
            validate_param_name(class.as_str(), name.as_ref(), at)?;
        }

        let slot = self.slot_or_create(class);
        let mut registry = slot.write();
        let count = pairs.len();
        for (name, binding) in pairs {
            registry.set(name.as_ref(), binding);
        }

        debug!(class = %class, count, "declared parameter defaults");
        Ok(())
    }

    /// Make every parameter currently declared on `base` available on
    /// `class`, forwarding reads to `base` until `class` binds its own value.
    ///
    /// The forwarding is live: later changes to `base` are observed. Always
    /// succeeds; cycles, including `inherit(A, A)`, surface when a
    /// parameter is read. The `Result` matches the other declaration calls.
    pub fn inherit<C, B>(&self, class: C, base: B) -> Result<()>
    where
        C: Into<ClassId>,
        B: Into<ClassId>,
    {
        let class = class.into();
        let base = base.into();

        let names = match self.slot(base.as_str()) {
            Some(slot) => slot.read().names().to_vec(),
            None => {
                warn!(class = %class, base = %base, "inheriting from a class without parameters");
                Vec::new()
            }
        };

        let slot = self.slot_or_create(&class);
        let mut registry = slot.write();
        for name in &names {
            registry.set(name, Binding::Forwarding(base.clone()));
        }

        debug!(class = %class, base = %base, count = names.len(), "inherited parameters");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────

    /// Bind values to parameters already declared on `class`.
    ///
    /// Fails with `UnknownParameter` for the first undeclared name, in which
    /// case no binding of this call is applied. Replacing a forwarding
    /// binding cuts the link to the base class for that name.
    #[track_caller]
    pub fn configure<C, I, N, B>(&self, class: C, pairs: I) -> Result<()>
    where
        C: AsRef<str>,
        I: IntoIterator<Item = (N, B)>,
        N: AsRef<str>,
        B: Into<Binding>,
    {
        let at = CallSite::caller();
        self.apply_configure(class.as_ref(), collect_pairs(pairs), at)
    }

    /// [`Registry::configure`] from a flat `name, value, ...` list
    #[track_caller]
    pub fn configure_flat<C>(&self, class: C, flat: &[Value]) -> Result<()>
    where
        C: AsRef<str>,
    {
        let at = CallSite::caller();
        let class = class.as_ref();
        let pairs = pairs_from_flat(class, flat, at)?;
        self.apply_configure(class, pairs, at)
    }

    /// Reconfigure parameters at run time.
    ///
    /// Same semantics as [`Registry::configure`]: values only move forward,
    /// defaults that were overwritten are not restored.
    #[track_caller]
    pub fn change_params<C, I, N, B>(&self, class: C, pairs: I) -> Result<()>
    where
        C: AsRef<str>,
        I: IntoIterator<Item = (N, B)>,
        N: AsRef<str>,
        B: Into<Binding>,
    {
        let at = CallSite::caller();
        let class = class.as_ref();
        let pairs = collect_pairs(pairs);
        info!(class, count = pairs.len(), "changing parameters");
        self.apply_configure(class, pairs, at)
    }

    fn apply_configure<N>(
        &self,
        class: &str,
        pairs: Vec<(N, Binding)>,
        at: CallSite,
    ) -> Result<()>
    where
        N: AsRef<str>,
    {
        let unknown = |name: &str| ParamError::UnknownParameter {
            class: ClassId::unshared(class),
            name: ParamName::from(name),
            at,
        };

        let Some(slot) = self.slot(class) else {
            return match pairs.first() {
                Some((name, _)) => Err(unknown(name.as_ref())),
                None => Ok(()),
            };
        };

        let mut registry = slot.write();
        if let Some((name, _)) = pairs
            .iter()
            .find(|(name, _)| !registry.contains(name.as_ref()))
        {
            return Err(unknown(name.as_ref()));
        }

        let count = pairs.len();
        for (name, binding) in pairs {
            registry.set(name.as_ref(), binding);
        }

        debug!(class, count, "configured parameters");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Access
    // ─────────────────────────────────────────────────────────────

    /// Stable accessor for a declared parameter.
    ///
    /// The accessor stays valid when the binding behind it is replaced.
    #[track_caller]
    pub fn accessor<C, N>(&self, class: C, name: N) -> Result<Accessor>
    where
        C: AsRef<str>,
        N: AsRef<str>,
    {
        let at = CallSite::caller();
        let (class, name) = (class.as_ref(), name.as_ref());

        // The accessor keeps the stored keys, which are already interned
        let stored = self
            .classes
            .get(class)
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())));
        let found = stored.and_then(|(id, slot)| {
            let key = slot.read().key(name).cloned();
            key.map(|key| (id, key))
        });

        match found {
            Some((id, key)) => Ok(Accessor::new(self.clone(), id, key)),
            None => Err(ParamError::UnknownParameter {
                class: ClassId::unshared(class),
                name: ParamName::from(name),
                at,
            }),
        }
    }

    /// Current value of a parameter, evaluated now
    #[track_caller]
    pub fn get<C, N>(&self, class: C, name: N) -> Result<Value>
    where
        C: AsRef<str>,
        N: AsRef<str>,
    {
        let at = CallSite::caller();
        self.read(class.as_ref(), name.as_ref(), at)
    }

    /// Follow forwarding links from `class` and evaluate the first
    /// non-forwarding binding found for `name`.
    pub(crate) fn read(&self, class: &str, name: &str, at: CallSite) -> Result<Value> {
        // Base classes reached so far, in forwarding order
        let mut hops: Vec<ClassId> = Vec::new();

        loop {
            let current = hops.last().map_or(class, ClassId::as_str);
            let Some(binding) = self.binding_of(current, name) else {
                return Err(ParamError::UnknownParameter {
                    class: ClassId::unshared(current),
                    name: ParamName::from(name),
                    at,
                });
            };

            match binding.step() {
                Step::Value(value) => return Ok(value),
                Step::Unset => {
                    return Err(ParamError::UninitializedParameter {
                        class: ClassId::unshared(current),
                        name: ParamName::from(name),
                        at,
                    })
                }
                Step::Forward(base) => {
                    let seen = base.as_str() == class || hops.contains(&base);
                    hops.push(base);
                    if seen {
                        return Err(ParamError::CyclicInheritance {
                            class: ClassId::unshared(class),
                            name: ParamName::from(name),
                            chain: join_chain(class, &hops),
                            at,
                        });
                    }
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Introspection
    // ─────────────────────────────────────────────────────────────

    /// Whether any declaration-style call ever targeted `class`
    pub fn has_registry(&self, class: impl AsRef<str>) -> bool {
        self.classes.contains_key(class.as_ref())
    }

    /// Evaluate every parameter of `class` now.
    ///
    /// Function bindings run once per dump; nothing is cached. Returns an
    /// empty dump for classes without a registry.
    #[track_caller]
    pub fn dump_params(&self, class: impl AsRef<str>) -> Result<ParamDump> {
        let at = CallSite::caller();
        let class = class.as_ref();

        let mut dump = ParamDump::new();
        for name in self.param_names(class) {
            let value = self.read(class, &name, at)?;
            dump.insert(name.to_string(), value);
        }
        Ok(dump)
    }

    /// Declared names of `class`, in declaration order
    pub fn param_names(&self, class: impl AsRef<str>) -> Vec<ParamName> {
        self.slot(class.as_ref())
            .map(|slot| slot.read().names().to_vec())
            .unwrap_or_default()
    }

    /// Kind of the binding currently behind `class::name`
    pub fn binding_kind(&self, class: impl AsRef<str>, name: &str) -> Option<BindingKind> {
        let slot = self.slot(class.as_ref())?;
        let registry = slot.read();
        registry.kind(name)
    }

    /// Every class with a registry, sorted by name
    pub fn classes(&self) -> Vec<ClassId> {
        let mut classes: Vec<ClassId> = self.classes.iter().map(|e| e.key().clone()).collect();
        classes.sort();
        classes
    }

    // ─────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────

    fn slot(&self, class: &str) -> Option<Slot> {
        self.classes.get(class).map(|entry| Arc::clone(entry.value()))
    }

    fn slot_or_create(&self, class: &ClassId) -> Slot {
        if let Some(slot) = self.slot(class.as_str()) {
            return slot;
        }
        Arc::clone(self.classes.entry(class.clone()).or_default().value())
    }

    fn binding_of(&self, class: &str, name: &str) -> Option<Binding> {
        let slot = self.slot(class)?;
        let registry = slot.read();
        registry.get(name).cloned()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("classes", &self.classes())
            .finish()
    }
}

fn collect_pairs<I, N, B>(pairs: I) -> Vec<(N, Binding)>
where
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: Into<Binding>,
{
    pairs
        .into_iter()
        .map(|(name, binding)| (name, binding.into()))
        .collect()
}

fn join_chain(start: &str, hops: &[ClassId]) -> String {
    std::iter::once(start)
        .chain(hops.iter().map(ClassId::as_str))
        .collect::<Vec<_>>()
        .join(" -> ")
}
