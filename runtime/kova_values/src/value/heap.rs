//! Enforced-Arc wrapper for heap values.
//!
//! `Heap<T>` has a crate-private constructor, so heap values can only be
//! created through `Value` factory methods. Cloning a `Heap` bumps the
//! reference count; the payload is shared, never copied.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared heap allocation.
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    /// Allocate a new heap value. Crate-private: all construction goes
    /// through `Value` factories.
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether two heap values are the same allocation.
    ///
    /// Used for record identity; records have no structural equality.
    pub fn ptr_eq(a: &Heap<T>, b: &Heap<T>) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: fmt::Display> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}
