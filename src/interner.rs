//! String interning for class and parameter names
//!
//! Class identifiers and parameter names are compared on every accessor
//! read and forwarding hop. Interning keeps one allocation per distinct
//! name and makes clones O(1).
//! Uses DashMap for lock-free concurrent access.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

/// Global string interner (thread-safe, lock-free)
static INTERNER: Lazy<Interner> = Lazy::new(Interner::new);

/// Thread-safe string interner using DashMap
pub struct Interner {
    /// Map from string content to interned Arc<str>
    strings: DashMap<Arc<str>, ()>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            strings: DashMap::new(),
        }
    }

    /// Intern a string, returning a shared Arc<str>
    ///
    /// If the string was already interned, returns the existing Arc.
    pub fn intern(&self, s: &str) -> Arc<str> {
        if let Some(existing) = self.strings.get(s) {
            return Arc::clone(existing.key());
        }

        // entry() closes the race between two threads interning the same name
        let entry = self.strings.entry(Arc::from(s)).or_insert(());
        Arc::clone(entry.key())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of distinct names in the global interner
pub fn interned_count() -> usize {
    INTERNER.len()
}

/// Intern a name using the global interner
#[inline]
pub fn intern(s: &str) -> Arc<str> {
    INTERNER.intern(s)
}
