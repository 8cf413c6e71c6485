// Defaults used when a generated strings_config.rs is absent.
#![allow(dead_code)]

pub const MSG_LOADED: &str = "loaded";

pub const JNI_LOADED: &str = "JNI: loaded";
pub const JNI_HANDLE_OK: &str = "JNI: handle ok";
pub const JNI_HANDLE_ERROR: &str = "JNI: handle error";

pub const SYSTEM_CLASS: &str = "java/lang/System";
pub const OUT_FIELD: &str = "out";
pub const PRINT_STREAM_SIG: &str = "Ljava/io/PrintStream;";
pub const PRINT_STREAM_CLASS: &str = "java/io/PrintStream";
pub const PRINTLN: &str = "println";
pub const PRINTLN_SIG: &str = "(Ljava/lang/String;)V";
