//! JNI entry points for `ornithopter.myapplication.IOTest`.
//!
//! ```kotlin
//! external fun prepareNative(filePath: String, bufferSize: Int): Long
//! external fun startNative(param: Long): Long
//! external fun teardownNative(param: Long): Long
//! external fun closeNative(param: Long): Long
//! ```
//!
//! The `Long` passed around is a registry handle, never an address. Every
//! entry point runs under [`guarded`], so neither a Rust error nor a panic
//! unwinds into the JVM: errors become pending Java exceptions and the
//! function returns its fallback value.
//!
//! | failure | exception |
//! |---|---|
//! | unknown or destroyed handle | `IllegalStateException` |
//! | buffer size `<= 0` | `IllegalArgumentException` |
//! | anything else, including panics | `RuntimeException` |
//!
//! A file that cannot be opened is not a failure here: `prepareNative`
//! still returns a handle and `startNative` reads nothing.

// JNI symbols must be unmangled and named after the Java class
#![allow(unsafe_code, non_snake_case)]

use crate::error::{Error, SessionError};
use crate::session::{SessionHandle, global};
use anyhow::Context;
use jni::JNIEnv;
use jni::JavaVM;
use jni::objects::{JObject, JString};
use jni::sys::{JNI_VERSION_1_6, jint, jlong};
use std::any::Any;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

const ILLEGAL_STATE: &str = "java/lang/IllegalStateException";
const ILLEGAL_ARGUMENT: &str = "java/lang/IllegalArgumentException";
const RUNTIME: &str = "java/lang/RuntimeException";

/// Installs logging when the library is loaded.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    crate::logging::init(false);
    JNI_VERSION_1_6
}

/// Opens `file_path` and allocates a `buffer_size` byte buffer.
#[unsafe(no_mangle)]
pub extern "system" fn Java_ornithopter_myapplication_IOTest_prepareNative<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    file_path: JString<'local>,
    buffer_size: jint,
) -> jlong {
    guarded(&mut env, "prepareNative", 0, |env| {
        let size = buffer_size_from(buffer_size)?;
        // JavaStr releases the UTF chars when dropped, on every path out
        let path: String = env
            .get_string(&file_path)
            .context("reading file path argument")?
            .into();
        let handle = global().create(&path, size)?;
        Ok(handle.as_raw())
    })
}

/// Drains the session's file. Always returns 0.
#[unsafe(no_mangle)]
pub extern "system" fn Java_ornithopter_myapplication_IOTest_startNative<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    param: jlong,
) -> jlong {
    guarded(&mut env, "startNative", 0, |_| {
        global().run(handle_from(param)?)?;
        Ok(0)
    })
}

/// Destroys the session, freeing its buffer and closing its file.
#[unsafe(no_mangle)]
pub extern "system" fn Java_ornithopter_myapplication_IOTest_teardownNative<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    param: jlong,
) -> jlong {
    guarded(&mut env, "teardownNative", 0, |_| {
        global().destroy(handle_from(param)?)?;
        Ok(0)
    })
}

/// Closes the session's file early; the session stays valid until teardown.
#[unsafe(no_mangle)]
pub extern "system" fn Java_ornithopter_myapplication_IOTest_closeNative<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    param: jlong,
) -> jlong {
    guarded(&mut env, "closeNative", 0, |_| {
        global().close(handle_from(param)?)?;
        Ok(0)
    })
}

fn buffer_size_from(raw: jint) -> Result<usize, SessionError> {
    usize::try_from(raw)
        .ok()
        .filter(|&size| size > 0)
        .ok_or(SessionError::InvalidBufferSize {
            size: i64::from(raw),
        })
}

fn handle_from(raw: jlong) -> Result<SessionHandle, SessionError> {
    SessionHandle::from_raw(raw).ok_or(SessionError::UnknownHandle { handle: raw })
}

fn exception_class(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<Error>() {
        Some(Error::Session(SessionError::UnknownHandle { .. } | SessionError::Poisoned { .. })) => {
            ILLEGAL_STATE
        }
        Some(Error::Session(SessionError::InvalidBufferSize { .. })) => ILLEGAL_ARGUMENT,
        _ => match err.downcast_ref::<SessionError>() {
            Some(SessionError::InvalidBufferSize { .. }) => ILLEGAL_ARGUMENT,
            Some(_) => ILLEGAL_STATE,
            None => RUNTIME,
        },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Runs `body`, converting errors and panics into a pending Java exception
/// plus `fallback`.
fn guarded<'local, T>(
    env: &mut JNIEnv<'local>,
    entry: &'static str,
    fallback: T,
    body: impl FnOnce(&mut JNIEnv<'local>) -> anyhow::Result<T>,
) -> T {
    match panic::catch_unwind(AssertUnwindSafe(|| body(&mut *env))) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            let message = format!("{err:#}");
            tracing::warn!(entry, error = %message, "native call failed");
            throw(env, exception_class(&err), &message);
            fallback
        }
        Err(payload) => {
            let message = format!("native panic in {entry}: {}", panic_message(&*payload));
            tracing::error!(entry, "{message}");
            throw(env, RUNTIME, &message);
            fallback
        }
    }
}

fn throw(env: &mut JNIEnv<'_>, class: &str, message: &str) {
    // An exception raised by a JNI call inside the body is already pending
    if env.exception_check().unwrap_or(false) {
        return;
    }
    if let Err(e) = env.throw_new(class, message) {
        tracing::error!(class, error = %e, "failed to raise Java exception");
    }
}
