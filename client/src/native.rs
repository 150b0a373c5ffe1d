//! Entry points of the Greenlight Alby native library.

use std::sync::Arc;

use transport::{CallStatus, NativeApi, NativePointer, TransferBuffer};

use crate::manifest::ClientMethod;

/// The Greenlight Alby library's exported functions.
///
/// Argument buffers are handed over: the implementation owns and releases
/// them.  Returned buffers belong to the caller.
pub trait GreenlightNative: NativeApi {
    /// Construct a client from a raw-string mnemonic and encoded
    /// [`GreenlightCredentials`](types::GreenlightCredentials).
    fn new_blocking_greenlight_alby_client(
        &self,
        mnemonic: TransferBuffer,
        credentials: TransferBuffer,
        status: &mut CallStatus,
    ) -> NativePointer;

    /// Register or recover the node for a raw-string mnemonic.
    fn recover(&self, mnemonic: TransferBuffer, status: &mut CallStatus) -> TransferBuffer;

    /// Free a client object.
    fn free_blocking_greenlight_alby_client(&self, client: NativePointer, status: &mut CallStatus);

    /// Invoke `method` on a client.  `request` is `None` exactly for
    /// methods where [`ClientMethod::takes_request`] is false.
    fn call_client_method(
        &self,
        method: ClientMethod,
        client: NativePointer,
        request: Option<TransferBuffer>,
        status: &mut CallStatus,
    ) -> TransferBuffer;
}

/// Shared, type-erased Greenlight library.
pub type DynGreenlightNative = Arc<dyn GreenlightNative>;
