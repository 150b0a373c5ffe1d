//! Call dispatch: run a native call, interpret its status, move values
//! across in buffers.
//!
//! Buffer ownership rules enforced here:
//!
//! - a buffer produced by [`lower_into_buffer`] belongs to the native side
//!   once it is passed as an argument;
//! - every buffer the native side returns, including error and panic
//!   buffers, is released exactly once, after its contents are read and
//!   before any fault is raised.

use codec::{CodecError, FfiConverter};

use crate::buffer::{ForeignBytes, OwnedBuffer, TransferBuffer};
use crate::fault::Fault;
use crate::native::NativeApi;
use crate::status::{CallStatus, CallStatusCode};

/// Run a native call whose caller errors decode as `E`.
///
/// `callback` receives a fresh success status and performs the call.
/// On a caller error the error buffer is lifted into `E` and returned;
/// panics and unknown status codes raise a [`Fault`].
pub fn call_with_error<E, T, N, F>(native: &N, callback: F) -> Result<T, E>
where
    E: FfiConverter,
    N: NativeApi + ?Sized,
    F: FnOnce(&mut CallStatus) -> T,
{
    let mut status = CallStatus::default();
    let value = callback(&mut status);
    check_call_status::<E, N>(native, status)?;
    Ok(value)
}

/// Run a native call that declares no error type.
///
/// A caller error from such a call is itself a contract violation.
pub fn call<T, N, F>(native: &N, callback: F) -> T
where
    N: NativeApi + ?Sized,
    F: FnOnce(&mut CallStatus) -> T,
{
    let mut status = CallStatus::default();
    let value = callback(&mut status);
    let CallStatus { code, error_buf } = status;
    match CallStatusCode::from_raw(code) {
        Some(CallStatusCode::Success) => value,
        Some(CallStatusCode::Error) => {
            free_buffer(native, error_buf);
            Fault::UnexpectedError.raise()
        }
        Some(CallStatusCode::Panic) => raise_native_panic(native, error_buf),
        None => {
            free_buffer(native, error_buf);
            Fault::UnknownStatus(code).raise()
        }
    }
}

/// Run a native release call from a destructor.
///
/// Behaves like [`call`] unless the thread is already unwinding; then a
/// failed status is logged, its buffer is released, and nothing is raised.
pub fn call_in_cleanup<N, F>(native: &N, callback: F)
where
    N: NativeApi + ?Sized,
    F: FnOnce(&mut CallStatus),
{
    if !std::thread::panicking() {
        return call(native, callback);
    }
    let mut status = CallStatus::default();
    callback(&mut status);
    let CallStatus { code, error_buf } = status;
    if code != CallStatusCode::Success as i8 {
        tracing::error!(
            library = native.library_name(),
            code,
            "native release failed while unwinding"
        );
        free_buffer(native, error_buf);
    }
}

/// Interpret a completed call's status.
pub fn check_call_status<E, N>(native: &N, status: CallStatus) -> Result<(), E>
where
    E: FfiConverter,
    N: NativeApi + ?Sized,
{
    let CallStatus { code, error_buf } = status;
    match CallStatusCode::from_raw(code) {
        Some(CallStatusCode::Success) => Ok(()),
        Some(CallStatusCode::Error) => {
            tracing::debug!(library = native.library_name(), "native call returned a caller error");
            Err(lift_from_buffer(native, error_buf))
        }
        Some(CallStatusCode::Panic) => raise_native_panic(native, error_buf),
        None => {
            free_buffer(native, error_buf);
            Fault::UnknownStatus(code).raise()
        }
    }
}

fn raise_native_panic<N: NativeApi + ?Sized>(native: &N, message: TransferBuffer) -> ! {
    if message.is_empty() {
        free_buffer(native, message);
        Fault::DoubleFault.raise()
    }
    let message: String = lift_from_buffer(native, message);
    Fault::Panic(message).raise()
}

/// Decode a returned buffer as `T`, consuming it exactly.
///
/// The buffer is released before this returns or faults.  Leftover bytes
/// and malformed payloads raise [`Fault::Decode`].
pub fn lift_from_buffer<T, N>(native: &N, buf: TransferBuffer) -> T
where
    T: FfiConverter,
    N: NativeApi + ?Sized,
{
    let owned = OwnedBuffer::new(native, buf);
    let lifted = T::lift_bytes(owned.as_slice());
    owned.release();
    match lifted {
        Ok(value) => value,
        Err(err) => Fault::Decode(err).raise(),
    }
}

/// Encode `value` into a fresh native buffer.
///
/// Exactly one allocation call is made, including for empty payloads.
/// Encoding failures are returned before anything is allocated.
pub fn lower_into_buffer<T, N>(native: &N, value: &T) -> Result<TransferBuffer, CodecError>
where
    T: FfiConverter,
    N: NativeApi + ?Sized,
{
    let bytes = value.lower_bytes()?;
    let foreign = ForeignBytes::from_slice(&bytes)?;
    Ok(call(native, |status| native.buffer_from_bytes(foreign, status)))
}

/// Release a native buffer.
///
/// While the thread is already unwinding, a failed release is logged rather
/// than raised, and whatever the failure reported is left to leak.
pub fn free_buffer<N: NativeApi + ?Sized>(native: &N, buf: TransferBuffer) {
    if std::thread::panicking() {
        let mut status = CallStatus::default();
        native.buffer_free(buf, &mut status);
        if status.code != CallStatusCode::Success as i8 {
            tracing::error!(
                library = native.library_name(),
                code = status.code,
                "buffer release failed while unwinding"
            );
        }
        return;
    }
    call(native, |status| native.buffer_free(buf, status))
}

/// Buffer-level lowering and lifting for every wire type.
pub trait BufferConverter: FfiConverter {
    /// See [`lower_into_buffer`].
    fn lower<N: NativeApi + ?Sized>(&self, native: &N) -> Result<TransferBuffer, CodecError> {
        lower_into_buffer(native, self)
    }

    /// See [`lift_from_buffer`].
    fn lift<N: NativeApi + ?Sized>(native: &N, buf: TransferBuffer) -> Self {
        lift_from_buffer(native, buf)
    }
}

impl<T: FfiConverter> BufferConverter for T {}
