use std::cell::RefCell;
use std::ffi::{c_void, CStr};
use std::os::unix::process::ExitStatusExt;
use std::process::Command;
use std::ptr::{self, NonNull};
use std::sync::Mutex;

use elfloader_test::{on_load, Address, Console, Library, LoadError, Runtime, SymbolResolver};
use jni::sys::JNI_VERSION_1_6;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.0.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture(Mutex::new(Vec::new()));

fn capture_logs() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

#[derive(Default)]
struct Vm {
    out: RefCell<Vec<String>>,
}

struct Out<'a>(&'a RefCell<Vec<String>>);

impl Console for Out<'_> {
    type Error = String;

    fn println(&mut self, line: &str) -> Result<(), String> {
        self.0.borrow_mut().push(line.to_owned());
        Ok(())
    }
}

impl Runtime for Vm {
    type Console<'a> = Out<'a>;
    type Error = String;

    fn console(&self, _version: i32) -> Result<Out<'_>, String> {
        Ok(Out(&self.out))
    }
}

/// Every `println` fails, as if `System.out` were broken.
struct FlakyVm;

struct FlakyOut;

impl Console for FlakyOut {
    type Error = &'static str;

    fn println(&mut self, _line: &str) -> Result<(), Self::Error> {
        Err("java.lang.NullPointerException")
    }
}

impl Runtime for FlakyVm {
    type Console<'a> = FlakyOut;
    type Error = &'static str;

    fn console(&self, _version: i32) -> Result<FlakyOut, Self::Error> {
        Ok(FlakyOut)
    }
}

struct Symbols(Vec<(&'static CStr, Address)>);

impl SymbolResolver for Symbols {
    fn resolve(&self, symbol: &CStr) -> Option<Address> {
        self.0.iter().find(|(name, _)| *name == symbol).map(|(_, a)| *a)
    }
}

fn probe() -> Address {
    Address::of_fn(elfloader_test::test_func)
}

#[test]
fn valid_handle_returns_requested_version() {
    capture_logs();
    let vm = Vm::default();
    let lib = Symbols(vec![(c"test_func", probe())]);

    assert_eq!(on_load(Some(&vm), Some(&lib), probe()), Ok(JNI_VERSION_1_6));
    assert_eq!(*vm.out.borrow(), ["JNI: loaded", "JNI: handle ok"]);

    let records = LOGGER.0.lock().unwrap();
    assert!(records.iter().any(|(level, msg)| *level == Level::Info && msg == "loaded"));
}

#[test]
fn foreign_handle_reports_error_but_still_loads() {
    let vm = Vm::default();
    let other = Address::new(0x4000 as *const c_void).unwrap();
    let lib = Symbols(vec![(c"test_func", other)]);

    assert_eq!(on_load(Some(&vm), Some(&lib), probe()), Ok(JNI_VERSION_1_6));
    assert_eq!(*vm.out.borrow(), ["JNI: loaded", "JNI: handle error"]);
}

#[test]
fn handle_without_probe_symbol_reports_error() {
    let vm = Vm::default();
    let lib = Symbols(Vec::new());

    assert_eq!(on_load(Some(&vm), Some(&lib), probe()), Ok(JNI_VERSION_1_6));
    assert_eq!(vm.out.borrow().last().map(String::as_str), Some("JNI: handle error"));
}

#[test]
fn process_handle_resolves_through_dlsym() {
    let vm = Vm::default();
    let lib = Library::this_process().expect("dlopen(NULL)");
    let malloc = lib.resolve(c"malloc").expect("malloc");

    // Any real symbol works as the expected entry; only identity matters.
    let status = on_load(Some(&vm), Some(&lib), malloc).unwrap();
    assert_eq!(status, JNI_VERSION_1_6);
    assert_eq!(vm.out.borrow()[0], "JNI: loaded");
}

#[test]
fn console_failures_do_not_change_the_result() {
    let lib = Symbols(vec![(c"test_func", probe())]);
    assert_eq!(on_load(Some(&FlakyVm), Some(&lib), probe()), Ok(JNI_VERSION_1_6));
}

fn loaded_count() -> usize {
    let records = LOGGER.0.lock().unwrap();
    records
        .iter()
        .filter(|(level, msg)| *level == Level::Info && msg == "loaded")
        .count()
}

#[test]
fn null_arguments_map_to_abort_messages() {
    capture_logs();
    let lib = Symbols(Vec::new());
    let vm = Vm::default();

    // Other tests log concurrently, so only require growth.
    let before = loaded_count();
    assert_eq!(
        on_load::<Vm, _>(None, Some(&lib), probe()),
        Err(LoadError::NullVm)
    );
    let after_vm = loaded_count();
    assert!(after_vm > before, "`loaded` not logged before the vm check");

    assert_eq!(
        on_load::<_, Symbols>(Some(&vm), None, probe()),
        Err(LoadError::NullHandle)
    );
    assert!(loaded_count() > after_vm, "`loaded` not logged before the handle check");
    assert!(vm.out.borrow().is_empty());
}

const CHILD_ENV: &str = "ELFLOADER_TEST_ABORT_CHILD";

/// Re-runs `test` in a child process with `CHILD_ENV` set and returns its output.
fn run_child(test: &str, case: &str) -> std::process::Output {
    Command::new(std::env::current_exe().unwrap())
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, case)
        .output()
        .unwrap()
}

#[test]
fn jni_onload_aborts_on_null_pointers() {
    match std::env::var(CHILD_ENV).as_deref() {
        Ok("vm") => {
            elfloader_test::JNI_OnLoad(ptr::null_mut(), ptr::null_mut());
            return;
        }
        Ok("handle") => {
            let vm = NonNull::dangling().as_ptr();
            elfloader_test::JNI_OnLoad(vm, ptr::null_mut());
            return;
        }
        _ => {}
    }

    for (case, message) in [("vm", "vm == nullptr"), ("handle", "handle == nullptr")] {
        let output = run_child("jni_onload_aborts_on_null_pointers", case);
        assert_eq!(output.status.signal(), Some(libc::SIGABRT), "case {}", case);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(message), "case {}: {}", case, stderr);
    }
}
