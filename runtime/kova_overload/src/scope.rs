//! Permission scopes.
//!
//! Overloaded dispatch is opt-in per lexical region: a rewritten region
//! that declares usage gets a child scope extending its parent with the
//! granted types' ordinals. Scopes are immutable — a child is a new set,
//! never a mutation — so they form a tree mirroring lexical nesting and
//! are safely shared across threads.
//!
//! Built-in ordinals are implicitly present in every scope, including the
//! empty root: overloading never has to be granted for built-in types.

use std::sync::Arc;

use smallvec::SmallVec;

use kova_values::{not_overloadable, EvalError, SharedSet, Value, BUILTIN_SET_COUNT};

/// An immutable set of enabled type ordinals.
///
/// Cloning is cheap (one reference count); the ordinal storage is shared.
#[derive(Clone, Debug, Default)]
pub struct PermissionScope {
    inner: Arc<ScopeSet>,
}

#[derive(Debug, Default)]
struct ScopeSet {
    /// Sorted, deduplicated ordinals. Scopes hold a handful of grants in
    /// practice, so they stay inline.
    ordinals: SmallVec<[u32; 8]>,
}

impl PermissionScope {
    /// The empty root scope: only built-in ordinals are permitted.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether the given ordinal's overloads may be invoked.
    #[inline]
    pub fn permits(&self, ordinal: u32) -> bool {
        ordinal < BUILTIN_SET_COUNT || self.inner.ordinals.binary_search(&ordinal).is_ok()
    }

    /// Create a child scope extending this one with the granted sets.
    ///
    /// The child permits everything the parent permitted plus exactly the
    /// grants; nothing is ever revoked.
    pub fn child(&self, granted: &[SharedSet]) -> PermissionScope {
        let mut ordinals = self.inner.ordinals.clone();
        for set in granted {
            if let Err(position) = ordinals.binary_search(&set.ordinal()) {
                ordinals.insert(position, set.ordinal());
            }
        }
        PermissionScope {
            inner: Arc::new(ScopeSet { ordinals }),
        }
    }

    /// The explicitly enabled ordinals, in ascending order. Built-in
    /// ordinals are implicit and not listed.
    pub fn enabled_ordinals(&self) -> &[u32] {
        &self.inner.ordinals
    }
}

/// Scope construction from granted values, as emitted at each rewritten
/// region that declares usage.
///
/// Every granted value must carry an operator set — the class object of
/// an overloadable type, or any instance of one. A value without a set
/// fails with `NotOverloadable`.
pub fn declare_scope(
    parent: Option<&PermissionScope>,
    granted: &[Value],
) -> Result<PermissionScope, EvalError> {
    let mut sets = Vec::with_capacity(granted.len());
    for value in granted {
        match value {
            Value::Record(record) => match record.operators() {
                Some(set) => sets.push(set.clone()),
                None => return Err(not_overloadable(&value.type_label())),
            },
            other => return Err(not_overloadable(&other.type_label())),
        }
    }
    let base = parent.cloned().unwrap_or_default();
    Ok(base.child(&sets))
}
