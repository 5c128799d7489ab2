//! Shared payload storage with copy-on-write.
//!
//! `Heap<T>` wraps `Rc<T>` and is the only way a [`Value`](super::Value)
//! owns text, arrays, maps or big numbers. Cloning a `Heap` shares the
//! payload; [`Heap::make_mut`] is the single place where a shared payload is
//! split off before mutation. The constructor is `pub(super)`, so payloads
//! are only created through `Value`'s factory methods.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A shared, immutable-until-unique payload.
///
/// `#[repr(transparent)]` keeps the layout identical to `Rc<T>`.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: Clone> Heap<T> {
    /// Exclusive access to the payload, copying it first if other handles
    /// still share it. Copies are shallow: nested values are shared again.
    pub(crate) fn make_mut(&mut self) -> &mut T {
        let shares = Rc::strong_count(&self.0) - 1;
        if shares > 0 {
            tracing::trace!(shares, "copy-on-write split");
        }
        Rc::make_mut(&mut self.0)
    }
}

impl<T: ?Sized> Heap<T> {
    /// Number of *other* handles that share this payload.
    #[inline]
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.0) - 1
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
