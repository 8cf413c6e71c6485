//! The body of `JNI_OnLoad`, written against small traits so it can run
//! without a live VM or a real loader handle.

use std::ffi::CStr;
use std::fmt::Display;

use jni::sys::jint;

use crate::config;
use crate::dl::Address;
use crate::error::LoadError;
use crate::strings_config;
use crate::version;

/// Looks up exported symbols in one loaded library.
pub trait SymbolResolver {
    fn resolve(&self, symbol: &CStr) -> Option<Address>;
}

/// A managed runtime that can hand out its standard output stream.
pub trait Runtime {
    type Console<'a>: Console
    where
        Self: 'a;
    type Error: Display;

    /// Attaches an execution context for `version` and looks up the output stream.
    fn console(&self, version: jint) -> Result<Self::Console<'_>, Self::Error>;
}

pub trait Console {
    type Error: Display;

    fn println(&mut self, line: &str) -> Result<(), Self::Error>;
}

/// Runs the load sequence.
///
/// `entry` is the address of this library's own probe symbol. The two
/// `LoadError`s are the only failures; everything the runtime reports is
/// logged and otherwise ignored.
pub fn on_load<R, L>(
    runtime: Option<&R>,
    library: Option<&L>,
    entry: Address,
) -> Result<jint, LoadError>
where
    R: Runtime,
    L: SymbolResolver,
{
    info!("{}", strings_config::MSG_LOADED);

    let runtime = runtime.ok_or(LoadError::NullVm)?;
    let library = library.ok_or(LoadError::NullHandle)?;

    let mut console = match runtime.console(config::JNI_VERSION) {
        Ok(console) => Some(console),
        Err(e) => {
            error!("Failed to reach System.out: {}", e);
            None
        }
    };

    let handle_ok = library.resolve(config::PROBE_SYMBOL) == Some(entry);
    if !handle_ok {
        warn!(
            "{:?} in the supplied handle does not match {:?}",
            config::PROBE_SYMBOL,
            entry
        );
    }

    if let Some(console) = console.as_mut() {
        println(console, strings_config::JNI_LOADED);
        println(
            console,
            if handle_ok {
                strings_config::JNI_HANDLE_OK
            } else {
                strings_config::JNI_HANDLE_ERROR
            },
        );
    }

    let status = test_lib::test_lib_add(
        config::JNI_VERSION - config::ADD_OPERAND,
        config::ADD_OPERAND,
    );
    match rejection(status) {
        Some(msg) => warn!("{}", msg),
        None => debug!("JNI_OnLoad returning {:#x}", status),
    }
    Ok(status)
}

/// What a loader would report for `status`, or `None` if it accepts it.
fn rejection(status: jint) -> Option<String> {
    version::classify(status).rejection(config::LIBRARY_FILE)
}

fn println<C: Console>(console: &mut C, line: &str) {
    if let Err(e) = console.println(line) {
        error!("println({:?}) failed: {}", line, e);
    }
}
