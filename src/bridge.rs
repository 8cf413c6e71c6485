use std::os::raw::c_void;
use std::ptr;

use jni::errors::{jni_error_code_to_result, Error, Result};
use jni::objects::{JMethodID, JObject, JValue};
use jni::signature::{Primitive, ReturnType};
use jni::sys::{self, jint, JNI_OK};
use jni::{JNIEnv, JavaVM};

use crate::hook::{Console, Runtime};
use crate::strings_config;

impl Runtime for JavaVM {
    type Console<'a> = SystemOut<'a>;
    type Error = Error;

    fn console(&self, version: jint) -> Result<SystemOut<'_>> {
        let mut env = get_env(self, version)?;
        match SystemOut::lookup(&mut env) {
            Ok((out, println)) => Ok(SystemOut { env, out, println }),
            Err(e) => {
                let _ = env.exception_clear();
                Err(e)
            }
        }
    }
}

/// `JavaVM::get_env` requests JNI 1.1; call the raw `GetEnv` to request `version`.
fn get_env(vm: &JavaVM, version: jint) -> Result<JNIEnv<'_>> {
    let raw = vm.get_java_vm_pointer();
    let get_env = unsafe { (**raw).GetEnv }.ok_or(Error::JNIEnvMethodNotFound("GetEnv"))?;

    let mut env: *mut c_void = ptr::null_mut();
    let res = unsafe { get_env(raw, &mut env, version) };
    if res != JNI_OK {
        debug!("GetEnv({:#x}) returned {}", version, res);
    }
    jni_error_code_to_result(res)?;
    unsafe { JNIEnv::from_raw(env as *mut sys::JNIEnv) }
}

/// `java.lang.System.out` and its `println(String)` method.
pub struct SystemOut<'local> {
    env: JNIEnv<'local>,
    out: JObject<'local>,
    println: JMethodID,
}

impl<'local> SystemOut<'local> {
    fn lookup(env: &mut JNIEnv<'local>) -> Result<(JObject<'local>, JMethodID)> {
        let out = env
            .get_static_field(
                strings_config::SYSTEM_CLASS,
                strings_config::OUT_FIELD,
                strings_config::PRINT_STREAM_SIG,
            )?
            .l()?;
        let println = env.get_method_id(
            strings_config::PRINT_STREAM_CLASS,
            strings_config::PRINTLN,
            strings_config::PRINTLN_SIG,
        )?;
        Ok((out, println))
    }
}

impl Console for SystemOut<'_> {
    type Error = Error;

    fn println(&mut self, line: &str) -> Result<()> {
        let res = print_line(&mut self.env, &self.out, self.println, line);
        if res.is_err() {
            let _ = self.env.exception_clear();
        }
        res
    }
}

fn print_line(env: &mut JNIEnv, out: &JObject, println: JMethodID, line: &str) -> Result<()> {
    let line = env.new_string(line)?;
    unsafe {
        env.call_method_unchecked(
            out,
            println,
            ReturnType::Primitive(Primitive::Void),
            &[JValue::Object(&line).as_jni()],
        )?;
    }
    env.delete_local_ref(line)
}
