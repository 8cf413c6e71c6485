#[macro_use]
extern crate log;

use std::os::raw::c_void;

use jni::sys::{self, jint};
use jni::JavaVM;

mod abort;
mod bridge;
mod config;
pub mod dl;
pub mod error;
pub mod hook;
mod strings_config;
pub mod version;

pub use bridge::SystemOut;
pub use dl::{Address, Library};
pub use error::LoadError;
pub use hook::{on_load, Console, Runtime, SymbolResolver};

/// Probe symbol: the loader-supplied handle must resolve it to this address.
#[no_mangle]
pub extern "C" fn test_func() {}

/// Load hook. Besides the VM, the ELF loader passes the library's own
/// `dlopen` handle where the system loader passes `reserved`.
#[allow(non_snake_case)]
#[no_mangle]
pub extern "system" fn JNI_OnLoad(vm: *mut sys::JavaVM, handle: *mut c_void) -> jint {
    init_logging();

    let vm = unsafe { JavaVM::from_raw(vm) }.ok();
    let library = Library::from_raw(handle);

    match on_load(vm.as_ref(), library.as_ref(), Address::of_fn(test_func)) {
        Ok(version) => version,
        Err(e) => abort::fatal(&e.to_string()),
    }
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(config::LOG_TAG)
            .with_max_level(config::LOG_LEVEL),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    log::set_max_level(config::LOG_LEVEL);
}
