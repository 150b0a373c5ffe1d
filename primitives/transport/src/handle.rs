//! Lifetime management for native objects.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::fault::Fault;
use crate::native::NativePointer;

type FreeFn = Box<dyn Fn(NativePointer) + Send + Sync>;

/// Shared ownership of one native object.
///
/// The call counter starts at `0`.  Each in-flight call adds one for its
/// duration; [`ObjectHandle::destroy`] subtracts one.  Whichever decrement
/// lands the counter on `-1` invokes the free routine, so the object is
/// released exactly once and only after the last in-flight call returns.
pub struct ObjectHandle {
    type_name: &'static str,
    pointer: NativePointer,
    call_counter: AtomicI64,
    destroyed: AtomicBool,
    free: FreeFn,
}

impl ObjectHandle {
    /// Take ownership of `pointer`, released later through `free`.
    pub fn new(
        type_name: &'static str,
        pointer: NativePointer,
        free: impl Fn(NativePointer) + Send + Sync + 'static,
    ) -> Self {
        Self {
            type_name,
            pointer,
            call_counter: AtomicI64::new(0),
            destroyed: AtomicBool::new(false),
            free: Box::new(free),
        }
    }

    /// Register an in-flight call.
    ///
    /// Raises [`Fault::AlreadyDestroyed`] once [`ObjectHandle::destroy`] has
    /// been called, even while earlier calls are still in flight, and
    /// [`Fault::CounterOverflow`] at the counter limit.
    pub fn acquire(&self) -> HandleGuard<'_> {
        let mut counter = self.call_counter.load(Ordering::SeqCst);
        loop {
            if counter <= -1 || self.is_destroyed() {
                Fault::AlreadyDestroyed(self.type_name).raise()
            }
            if counter == i64::MAX {
                Fault::CounterOverflow(self.type_name).raise()
            }
            match self.call_counter.compare_exchange_weak(
                counter,
                counter + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break,
                Err(actual) => counter = actual,
            }
        }
        HandleGuard { handle: self }
    }

    /// Drop this handle's own reference to the native object.
    ///
    /// Only the first call has any effect.  If calls are in flight, the
    /// object is freed when the last of them finishes.
    pub fn destroy(&self) {
        if self
            .destroyed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::debug!(object = self.type_name, "destroying native object");
            self.release();
        }
    }

    /// Whether [`ObjectHandle::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool { self.destroyed.load(Ordering::SeqCst) }

    /// Name of the wrapped native type.
    pub fn type_name(&self) -> &'static str { self.type_name }

    fn release(&self) {
        if self.call_counter.fetch_sub(1, Ordering::SeqCst) == 0 {
            tracing::debug!(object = self.type_name, "freeing native object");
            (self.free)(self.pointer);
        }
    }
}

impl Drop for ObjectHandle {
    fn drop(&mut self) { self.destroy() }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("type_name", &self.type_name)
            .field("pointer", &self.pointer)
            .field("call_counter", &self.call_counter.load(Ordering::SeqCst))
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

/// An in-flight call on an [`ObjectHandle`].
///
/// Holds the object alive until dropped; hold it across the whole native
/// call, not just while fetching the pointer.
#[derive(Debug)]
pub struct HandleGuard<'a> {
    handle: &'a ObjectHandle,
}

impl HandleGuard<'_> {
    /// The native pointer, valid while the guard lives.
    pub fn pointer(&self) -> NativePointer { self.handle.pointer }
}

impl Drop for HandleGuard<'_> {
    fn drop(&mut self) { self.handle.release() }
}
