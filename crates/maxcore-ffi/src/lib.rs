//! C ABI bindings for the MAX-Core structural dynamics engine.
//!
//! Engines live behind opaque `u64` handles. Every entry point is wrapped
//! in a panic guard, reports failures through [`MaxcoreStatus`] or
//! [`MaxcoreEvent`], and never writes an out-parameter on error. Stepping
//! through this layer is bit-identical to calling
//! [`MaxCore`](maxcore_engine::MaxCore) directly. This is the only crate in
//! the workspace that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

// ── Guards ──────────────────────────────────────────────────────────

/// Run `$body` under `catch_unwind`, returning `$on_panic` if it panics.
///
/// The panic text is stored for [`maxcore_last_panic_message`].
macro_rules! ffi_guard_or {
    ($on_panic:expr, $body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $on_panic
            }
        }
    };
}

/// [`ffi_guard_or!`] for status-returning functions.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::MaxcoreStatus::Panicked as i32, $body)
    };
}

/// Lock a mutex, returning early on poison.
///
/// The one-argument form returns `InternalError` as a status code.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        ffi_lock!(
            $mutex,
            $crate::status::MaxcoreStatus::InternalError as i32
        )
    };
    ($mutex:expr, $on_poison:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $on_poison,
        }
    };
}

pub mod engine;
mod handle;
pub mod status;
pub mod types;

pub use engine::{
    maxcore_compute_derived, maxcore_create, maxcore_destroy, maxcore_get_current,
    maxcore_get_lifecycle, maxcore_get_previous, maxcore_last_error, maxcore_step,
};
pub use status::MaxcoreStatus;
pub use types::{MaxcoreDerivedFrame, MaxcoreEvent, MaxcoreLifecycle, MaxcoreParams, MaxcoreState};

// ── Panic reporting ─────────────────────────────────────────────────

thread_local! {
    /// Text of the most recent panic caught on this thread.
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %msg, "panic caught at C ABI boundary");
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Copy `text` into a caller buffer of `cap` bytes, null-terminated and
/// truncated if needed. Returns the full length of `text` in bytes.
///
/// A null `buf` or zero `cap` only reports the length.
#[allow(unsafe_code)]
pub(crate) fn copy_out(text: &str, buf: *mut c_char, cap: usize) -> usize {
    let bytes = text.as_bytes();
    if !buf.is_null() && cap > 0 {
        let n = bytes.len().min(cap - 1);
        // SAFETY: buf points to at least cap writable bytes per caller contract.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
            *buf.add(n) = 0;
        }
    }
    bytes.len()
}

/// Copy the most recent panic message caught on this thread into `buf`.
///
/// Returns the message length in bytes (excluding the terminator), or 0 if
/// no panic has been caught.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_last_panic_message(buf: *mut c_char, cap: usize) -> usize {
    ffi_guard_or!(0, {
        LAST_PANIC.with(|cell| copy_out(&cell.borrow(), buf, cap))
    })
}

static VERSION: &str = concat!("MAX-Core C API V", env!("CARGO_PKG_VERSION"), "\0");

/// Static, null-terminated version string. Never free it.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_version() -> *const c_char {
    VERSION.as_ptr().cast::<c_char>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    #[allow(unsafe_code)]
    fn version_is_null_terminated() {
        // SAFETY: maxcore_version returns a static C string.
        let v = unsafe { CStr::from_ptr(maxcore_version()) };
        assert_eq!(v.to_str().unwrap(), "MAX-Core C API V2.5.0");
    }

    #[test]
    fn copy_out_truncates_and_terminates() {
        let mut buf = [0x7f as c_char; 4];
        assert_eq!(copy_out("hello", buf.as_mut_ptr(), buf.len()), 5);
        let got: Vec<u8> = buf.iter().map(|&c| c as u8).collect();
        assert_eq!(got, b"hel\0");

        assert_eq!(copy_out("hello", std::ptr::null_mut(), 0), 5);
        assert_eq!(copy_out("", buf.as_mut_ptr(), buf.len()), 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn guard_catches_panic_and_stores_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());

        let status: i32 = ffi_guard!({
            panic!("deliberate panic at the boundary");
        });
        assert_eq!(status, MaxcoreStatus::Panicked as i32);

        let len = maxcore_last_panic_message(std::ptr::null_mut(), 0);
        assert!(len > 0);
        let mut buf = vec![0u8; len + 1];
        let len2 = maxcore_last_panic_message(buf.as_mut_ptr().cast::<c_char>(), buf.len());
        assert_eq!(len, len2);
        let msg = std::str::from_utf8(&buf[..len]).unwrap();
        assert!(msg.contains("deliberate panic at the boundary"), "got {msg:?}");
    }

    #[test]
    fn guard_passes_through_normal_values() {
        let v: i32 = ffi_guard!({ 7 });
        assert_eq!(v, 7);
        let e = ffi_guard_or!(MaxcoreEvent::Error, { MaxcoreEvent::Collapse });
        assert_eq!(e, MaxcoreEvent::Collapse);
    }
}
