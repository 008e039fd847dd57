//! Engine lifecycle over the C ABI: create, step, read, project, destroy.
//!
//! Each engine sits in its own `Arc<Mutex<_>>`, so the global `ENGINES`
//! lock is only held long enough to look up a handle. Distinct engines can
//! be stepped from different threads concurrently.

use std::ffi::c_char;
use std::sync::{Arc, Mutex};

use maxcore_core::StepError;
use maxcore_engine::{EngineConfig, MaxCore};
use tracing::debug;

use crate::handle::HandleRegistry;
use crate::status::MaxcoreStatus;
use crate::types::{MaxcoreDerivedFrame, MaxcoreEvent, MaxcoreLifecycle, MaxcoreParams, MaxcoreState};

/// An engine plus its last-error text.
struct EngineSlot {
    core: MaxCore,
    last_error: String,
}

type EngineArc = Arc<Mutex<EngineSlot>>;

static ENGINES: Mutex<HandleRegistry<EngineArc>> = Mutex::new(HandleRegistry::new());

const INVALID_HANDLE_MESSAGE: &str = "invalid engine handle";
const POISONED_MESSAGE: &str = "engine state poisoned by an earlier panic";

/// Clone the `Arc` behind a handle, holding the registry lock briefly.
///
/// `None` if the handle is invalid or the registry is poisoned.
fn lookup(handle: u64) -> Option<EngineArc> {
    ENGINES.lock().ok()?.get(handle).cloned()
}

/// Build an engine and return its handle through `handle_out`.
///
/// `delta_max` is optional: pass null for no magnitude guard.
/// `params`, `initial_state` and `handle_out` must be non-null.
/// `handle_out` is only written on success.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_create(
    params: *const MaxcoreParams,
    delta_dim: usize,
    initial_state: *const MaxcoreState,
    delta_max: *const f64,
    handle_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if params.is_null() || initial_state.is_null() || handle_out.is_null() {
            return MaxcoreStatus::InvalidArgument as i32;
        }
        // SAFETY: non-null pointers are valid for reads per caller contract.
        let (params, initial_state, delta_max) = unsafe {
            (
                *params,
                *initial_state,
                if delta_max.is_null() {
                    None
                } else {
                    Some(*delta_max)
                },
            )
        };

        let config = EngineConfig {
            params: params.into(),
            delta_dim,
            initial_state: initial_state.into(),
            delta_max,
        };
        let core = match MaxCore::new(config) {
            Ok(core) => core,
            Err(e) => return MaxcoreStatus::from(&e) as i32,
        };

        let slot = EngineSlot {
            core,
            last_error: String::new(),
        };
        let handle = match ffi_lock!(ENGINES).insert(Arc::new(Mutex::new(slot))) {
            Some(h) => h,
            None => return MaxcoreStatus::OutOfHandles as i32,
        };
        debug!(handle, delta_dim, "engine handle created");
        // SAFETY: handle_out is valid per caller contract.
        unsafe { *handle_out = handle };
        MaxcoreStatus::Ok as i32
    })
}

/// Destroy an engine. Destroying a stale or zero handle returns
/// `InvalidHandle` and has no other effect.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ENGINES).remove(handle) {
            Some(_) => {
                debug!(handle, "engine handle destroyed");
                MaxcoreStatus::Ok as i32
            }
            None => MaxcoreStatus::InvalidHandle as i32,
        }
    })
}

/// Advance an engine by one step.
///
/// `delta` points to `delta_len` forcing components; null means "no
/// forcing vector", which a terminal engine absorbs and a live engine
/// rejects. A `delta_len` other than the engine's dimension is rejected
/// without reading `delta`. Returns `Error` for an invalid handle as well; the reason for
/// a rejected step is available from [`maxcore_last_error`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_step(
    handle: u64,
    delta: *const f64,
    delta_len: usize,
    dt: f64,
) -> MaxcoreEvent {
    ffi_guard_or!(MaxcoreEvent::Error, {
        let Some(arc) = lookup(handle) else {
            return MaxcoreEvent::Error;
        };
        let mut slot = ffi_lock!(arc, MaxcoreEvent::Error);

        let result = match forcing_from_raw(&slot.core, delta, delta_len) {
            Ok(forcing) => slot.core.try_step(forcing, dt),
            Err(e) => {
                debug!(handle, error = %e, "step rejected at the ABI boundary");
                Err(e)
            }
        };

        match result {
            Ok(outcome) => {
                slot.last_error.clear();
                outcome.event().into()
            }
            Err(e) => {
                slot.last_error = e.to_string();
                MaxcoreEvent::Error
            }
        }
    })
}

/// Borrow the caller's forcing buffer once its length is known to match.
///
/// Terminal engines and null pointers yield `None` without touching the
/// buffer. A length other than the engine's dimension is rejected before
/// any slice is formed, so an oversized `delta_len` is never dereferenced.
#[allow(unsafe_code)]
fn forcing_from_raw<'a>(
    core: &MaxCore,
    delta: *const f64,
    delta_len: usize,
) -> Result<Option<&'a [f64]>, StepError> {
    if core.is_terminal() || delta.is_null() {
        return Ok(None);
    }
    if delta_len != core.delta_dim() {
        return Err(StepError::DimensionMismatch {
            expected: core.delta_dim(),
            got: delta_len,
        });
    }
    // SAFETY: delta points to delta_len readable f64s per caller contract,
    // and delta_len equals the engine's validated dimension.
    Ok(Some(unsafe { std::slice::from_raw_parts(delta, delta_len) }))
}

/// Read one value from an engine into `out`.
///
/// Shared body of the `maxcore_get_*` accessors: checks `out`, resolves
/// the handle, locks the engine, and writes only on success.
#[allow(unsafe_code)]
fn read_into<T>(handle: u64, out: *mut T, read: impl FnOnce(&MaxCore) -> T) -> i32 {
    if out.is_null() {
        return MaxcoreStatus::InvalidArgument as i32;
    }
    let Some(arc) = lookup(handle) else {
        return MaxcoreStatus::InvalidHandle as i32;
    };
    let slot = ffi_lock!(arc);
    let value = read(&slot.core);
    // SAFETY: out is valid for writes per caller contract.
    unsafe { out.write(value) };
    MaxcoreStatus::Ok as i32
}

/// Copy the current state into `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_get_current(handle: u64, out: *mut MaxcoreState) -> i32 {
    ffi_guard!({ read_into(handle, out, |core| core.current().into()) })
}

/// Copy the previous state into `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_get_previous(handle: u64, out: *mut MaxcoreState) -> i32 {
    ffi_guard!({ read_into(handle, out, |core| core.previous().into()) })
}

/// Copy the lifecycle context into `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_get_lifecycle(handle: u64, out: *mut MaxcoreLifecycle) -> i32 {
    ffi_guard!({ read_into(handle, out, |core| core.lifecycle().into()) })
}

/// Compute derived diagnostics at time step `dt` into `out`.
///
/// Returns `ProjectionFailed` (leaving `out` untouched) if the projection
/// rejects its inputs.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_compute_derived(
    handle: u64,
    dt: f64,
    out: *mut MaxcoreDerivedFrame,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return MaxcoreStatus::InvalidArgument as i32;
        }
        let Some(arc) = lookup(handle) else {
            return MaxcoreStatus::InvalidHandle as i32;
        };
        let slot = ffi_lock!(arc);
        let frame = match slot.core.derived(dt) {
            Ok(frame) => frame,
            Err(e) => return MaxcoreStatus::from(&e) as i32,
        };
        // SAFETY: out is valid for writes per caller contract.
        unsafe { out.write(frame.into()) };
        MaxcoreStatus::Ok as i32
    })
}

/// Copy the engine's last-error text into `buf` (`cap` bytes including
/// the terminator) and return its full length.
///
/// Empty after creation and after any non-`Error` step; describes the
/// rejection after an `Error` step. An invalid handle reports
/// `"invalid engine handle"` instead of failing.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn maxcore_last_error(handle: u64, buf: *mut c_char, cap: usize) -> usize {
    ffi_guard_or!(0, {
        let Some(arc) = lookup(handle) else {
            return crate::copy_out(INVALID_HANDLE_MESSAGE, buf, cap);
        };
        let slot = ffi_lock!(arc, crate::copy_out(POISONED_MESSAGE, buf, cap));
        crate::copy_out(&slot.last_error, buf, cap)
    })
}
