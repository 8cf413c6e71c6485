use std::ffi::{c_void, CStr};
use std::ptr::{self, NonNull};

use crate::hook::SymbolResolver;

/// Address of an exported symbol, compared by identity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(usize);

impl Address {
    pub fn of_fn(f: extern "C" fn()) -> Self {
        Address(f as usize)
    }

    /// Returns `None` for null.
    pub fn new(ptr: *const c_void) -> Option<Self> {
        (!ptr.is_null()).then_some(Address(ptr as usize))
    }
}

/// A non-null handle returned by the dynamic loader.
///
/// Borrowed from whoever opened it; dropping a `Library` does not `dlclose`.
#[derive(Debug)]
pub struct Library {
    handle: NonNull<c_void>,
}

impl Library {
    /// Wraps a handle passed in by a loader. Returns `None` for null.
    pub fn from_raw(handle: *mut c_void) -> Option<Self> {
        NonNull::new(handle).map(|handle| Library { handle })
    }

    /// Handle for the global symbol namespace of the running process.
    pub fn this_process() -> Option<Self> {
        let handle = unsafe { libc::dlopen(ptr::null(), libc::RTLD_NOW) };
        Self::from_raw(handle)
    }

    pub fn resolve(&self, symbol: &CStr) -> Option<Address> {
        let addr = unsafe { libc::dlsym(self.handle.as_ptr(), symbol.as_ptr()) };
        let resolved = Address::new(addr);
        if resolved.is_none() {
            debug!("dlsym({:?}) found nothing", symbol);
        }
        resolved
    }
}

impl SymbolResolver for Library {
    fn resolve(&self, symbol: &CStr) -> Option<Address> {
        Library::resolve(self, symbol)
    }
}
