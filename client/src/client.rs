//! The blocking client object.

use std::sync::Arc;

use codec::FfiConverter;
use transport::{
    call_in_cleanup, call_with_error, lift_from_buffer, lower_into_buffer, HandleGuard,
    NativePointer, ObjectHandle, TransferBuffer,
};
use types::{
    ConnectPeerRequest, ConnectPeerResponse, FundChannelRequest, FundChannelResponse,
    GetInfoResponse, KeySendRequest, KeySendResponse, ListFundsRequest, ListFundsResponse,
    ListInvoicesRequest, ListInvoicesResponse, ListPaymentsRequest, ListPaymentsResponse,
    MakeInvoiceRequest, MakeInvoiceResponse, NewAddressRequest, NewAddressResponse, PayRequest,
    PayResponse, SdkError,
};

use crate::manifest::ClientMethod;
use crate::native::GreenlightNative;

/// A connected Greenlight node.
///
/// Methods block until the node answers and may be called from any number
/// of threads at once.  The native object is freed after
/// [`destroy`](Self::destroy) (or drop) once every in-flight call returns;
/// calls made after `destroy` raise
/// [`Fault::AlreadyDestroyed`](transport::Fault::AlreadyDestroyed).
pub struct BlockingGreenlightAlbyClient {
    native: Arc<dyn GreenlightNative>,
    handle: ObjectHandle,
}

impl BlockingGreenlightAlbyClient {
    /// Type name used in faults and logs.
    pub const TYPE_NAME: &'static str = "BlockingGreenlightAlbyClient";

    pub(crate) fn from_raw(native: Arc<dyn GreenlightNative>, pointer: NativePointer) -> Self {
        let free_with = Arc::clone(&native);
        let handle = ObjectHandle::new(Self::TYPE_NAME, pointer, move |pointer| {
            let native = &*free_with;
            call_in_cleanup(native, |status| {
                native.free_blocking_greenlight_alby_client(pointer, status)
            })
        });
        Self { native, handle }
    }

    /// Connect to a peer.
    pub fn connect_peer(&self, request: ConnectPeerRequest) -> Result<ConnectPeerResponse, SdkError> {
        self.invoke(ClientMethod::ConnectPeer, &request)
    }

    /// Open a channel.
    pub fn fund_channel(&self, request: FundChannelRequest) -> Result<FundChannelResponse, SdkError> {
        self.invoke(ClientMethod::FundChannel, &request)
    }

    /// Node identity and chain height.
    pub fn get_info(&self) -> Result<GetInfoResponse, SdkError> {
        let guard = self.handle.acquire();
        self.dispatch(ClientMethod::GetInfo, &guard, None)
    }

    /// Send a keysend payment.
    pub fn key_send(&self, request: KeySendRequest) -> Result<KeySendResponse, SdkError> {
        self.invoke(ClientMethod::KeySend, &request)
    }

    /// On-chain outputs and channels.
    pub fn list_funds(&self, request: ListFundsRequest) -> Result<ListFundsResponse, SdkError> {
        self.invoke(ClientMethod::ListFunds, &request)
    }

    /// Invoices matching the request's filters.
    pub fn list_invoices(
        &self,
        request: ListInvoicesRequest,
    ) -> Result<ListInvoicesResponse, SdkError> {
        self.invoke(ClientMethod::ListInvoices, &request)
    }

    /// Outgoing payments matching the request's filters.
    pub fn list_payments(
        &self,
        request: ListPaymentsRequest,
    ) -> Result<ListPaymentsResponse, SdkError> {
        self.invoke(ClientMethod::ListPayments, &request)
    }

    /// Create an invoice.
    pub fn make_invoice(&self, request: MakeInvoiceRequest) -> Result<MakeInvoiceResponse, SdkError> {
        self.invoke(ClientMethod::MakeInvoice, &request)
    }

    /// Generate a deposit address.
    pub fn new_address(&self, request: NewAddressRequest) -> Result<NewAddressResponse, SdkError> {
        self.invoke(ClientMethod::NewAddress, &request)
    }

    /// Pay an invoice.
    pub fn pay(&self, request: PayRequest) -> Result<PayResponse, SdkError> {
        self.invoke(ClientMethod::Pay, &request)
    }

    /// Release this client's reference to the native object.  Idempotent.
    pub fn destroy(&self) { self.handle.destroy() }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool { self.handle.is_destroyed() }

    fn invoke<Req, Resp>(&self, method: ClientMethod, request: &Req) -> Result<Resp, SdkError>
    where
        Req: FfiConverter,
        Resp: FfiConverter,
    {
        let guard = self.handle.acquire();
        let request = lower_into_buffer(&*self.native, request)?;
        self.dispatch(method, &guard, Some(request))
    }

    fn dispatch<Resp: FfiConverter>(
        &self,
        method: ClientMethod,
        guard: &HandleGuard<'_>,
        request: Option<TransferBuffer>,
    ) -> Result<Resp, SdkError> {
        let native = &*self.native;
        tracing::debug!(%method, "calling greenlight client");

        let response = call_with_error::<SdkError, _, _, _>(native, |status| {
            native.call_client_method(method, guard.pointer(), request, status)
        })
        .map_err(|err| {
            tracing::warn!(%method, error = %err, "greenlight call failed");
            err
        })?;
        Ok(lift_from_buffer(native, response))
    }
}

impl std::fmt::Debug for BlockingGreenlightAlbyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingGreenlightAlbyClient").field("handle", &self.handle).finish()
    }
}
