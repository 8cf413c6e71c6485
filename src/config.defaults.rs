// Defaults used when a generated config.rs is absent.
// Packaging may overwrite src/config.rs with its own values.
#![allow(dead_code)]

use std::ffi::CStr;

use jni::sys::{jint, JNI_VERSION_1_6};
use log::LevelFilter;

pub const LOG_TAG: &str = "JNI-main";
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Version requested from `GetEnv` and folded into the return value.
pub const JNI_VERSION: jint = JNI_VERSION_1_6;

/// Exported symbol used to check that the loader handed us our own handle.
pub const PROBE_SYMBOL: &CStr = c"test_func";

pub const ADD_OPERAND: jint = 123;

/// File name loaders see for this library; quoted in version diagnostics.
pub const LIBRARY_FILE: &str = "libelfloader_test.so";
