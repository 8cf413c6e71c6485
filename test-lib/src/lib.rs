use jni::sys::jint;

#[no_mangle]
pub extern "C" fn test_lib_add(a: jint, b: jint) -> jint {
    a.wrapping_add(b)
}
