#[cfg(target_os = "android")]
extern "C" {
    fn android_set_abort_message(msg: *const libc::c_char);
}

/// Records `message` for the crash report and aborts the process.
pub fn fatal(message: &str) -> ! {
    error!("{}", message);
    set_abort_message(message);
    unsafe { libc::abort() }
}

#[cfg(target_os = "android")]
fn set_abort_message(message: &str) {
    let msg = std::ffi::CString::new(message.replace('\0', " ")).unwrap_or_default();
    unsafe { android_set_abort_message(msg.as_ptr()) }
}

#[cfg(not(target_os = "android"))]
fn set_abort_message(message: &str) {
    eprintln!("abort message: {}", message);
}
