//! End-to-end client calls against an in-process Greenlight library.

use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use client::{Bindings, BlockingGreenlightAlbyClient, ClientMethod, GreenlightNative, CONTRACT};
use codec::FfiConverter;
use transport::testing::LoopbackNative;
use transport::{catch_fault, CallStatus, Fault, ForeignBytes, NativeApi, NativePointer, TransferBuffer};
use types::{
    ConnectPeerRequest, ConnectPeerResponse, GetInfoResponse, GreenlightCredentials, ListFundsRequest,
    ListFundsResponse, MakeInvoiceRequest, MakeInvoiceResponse, PayRequest, SdkError,
};

/// A Greenlight library that answers from canned data.
struct FakeGreenlight {
    loopback: LoopbackNative,
    frees: AtomicUsize,
}

impl FakeGreenlight {
    fn new() -> Self { Self::with(LoopbackNative::matching(&CONTRACT)) }

    fn with(loopback: LoopbackNative) -> Self { Self { loopback, frees: AtomicUsize::new(0) } }

    fn decode<T: FfiConverter>(&self, buf: TransferBuffer) -> T {
        T::lift_bytes(&self.loopback.reclaim(buf)).expect("request decodes")
    }

    fn respond<T: FfiConverter>(&self, value: &T) -> TransferBuffer {
        self.loopback.allocate_value(value).expect("response encodes")
    }

    fn fail(&self, status: &mut CallStatus, err: SdkError) -> TransferBuffer {
        self.loopback.fail_with(status, &err);
        TransferBuffer::empty()
    }
}

impl NativeApi for FakeGreenlight {
    fn library_name(&self) -> &str { "fake-greenlight" }

    fn buffer_from_bytes(&self, bytes: ForeignBytes<'_>, status: &mut CallStatus) -> TransferBuffer {
        self.loopback.buffer_from_bytes(bytes, status)
    }

    fn buffer_free(&self, buf: TransferBuffer, status: &mut CallStatus) {
        self.loopback.buffer_free(buf, status)
    }

    fn contract_version(&self, status: &mut CallStatus) -> u32 { self.loopback.contract_version(status) }

    fn checksum(&self, symbol: &str, status: &mut CallStatus) -> u16 {
        self.loopback.checksum(symbol, status)
    }
}

impl GreenlightNative for FakeGreenlight {
    fn new_blocking_greenlight_alby_client(
        &self,
        mnemonic: TransferBuffer,
        credentials: TransferBuffer,
        status: &mut CallStatus,
    ) -> NativePointer {
        let mnemonic = String::from_utf8(self.loopback.reclaim(mnemonic)).expect("utf-8 mnemonic");
        let credentials: GreenlightCredentials = self.decode(credentials);
        self.loopback.record("new_client");

        if mnemonic.is_empty() || credentials.device_key.is_empty() {
            let err = SdkError::InvalidArgument("missing credentials".to_string());
            self.loopback.fail_with(status, &err);
            return NativePointer::null();
        }
        NativePointer::from_raw(NonNull::<c_void>::dangling().as_ptr())
    }

    fn recover(&self, mnemonic: TransferBuffer, status: &mut CallStatus) -> TransferBuffer {
        let mnemonic = String::from_utf8(self.loopback.reclaim(mnemonic)).expect("utf-8 mnemonic");
        self.loopback.record("recover");

        if mnemonic.split_whitespace().count() != 12 {
            let err = SdkError::InvalidArgument("mnemonic must have 12 words".to_string());
            return self.fail(status, err);
        }
        self.respond(&GreenlightCredentials {
            device_key: "key".to_string(),
            device_cert: "cert".to_string(),
        })
    }

    fn free_blocking_greenlight_alby_client(&self, client: NativePointer, _status: &mut CallStatus) {
        assert!(!client.is_null());
        self.frees.fetch_add(1, Ordering::SeqCst);
    }

    fn call_client_method(
        &self,
        method: ClientMethod,
        client: NativePointer,
        request: Option<TransferBuffer>,
        status: &mut CallStatus,
    ) -> TransferBuffer {
        assert!(!client.is_null());
        assert_eq!(request.is_some(), method.takes_request());
        self.loopback.record(method.name());

        match method {
            ClientMethod::GetInfo => self.respond(&GetInfoResponse {
                pubkey: "03".repeat(33),
                alias: "alby".to_string(),
                color: "ffcc00".to_string(),
                network: "bitcoin".to_string(),
                block_height: 840_000,
            }),
            ClientMethod::ConnectPeer => {
                let request: ConnectPeerRequest = self.decode(request.expect("request"));
                match request.host.as_deref() {
                    Some("localhost") => {
                        self.fail(status, SdkError::InvalidArgument("bad host".to_string()))
                    }
                    _ => self.respond(&ConnectPeerResponse { id: request.id }),
                }
            }
            ClientMethod::MakeInvoice => {
                let request: MakeInvoiceRequest = self.decode(request.expect("request"));
                if request.amount_msat == 0 {
                    let err = SdkError::GreenlightApi("amount must be positive".to_string());
                    return self.fail(status, err);
                }
                let bolt11 = format!("lnbc{}n1{}", request.amount_msat, request.label);
                self.respond(&MakeInvoiceResponse { bolt11 })
            }
            ClientMethod::Pay => {
                let _: PayRequest = self.decode(request.expect("request"));
                self.loopback.panic_with(status, Some("payment thread crashed"));
                TransferBuffer::empty()
            }
            ClientMethod::ListFunds => {
                let request: ListFundsRequest = self.decode(request.expect("request"));
                let mut bytes = ListFundsResponse::default().lower_bytes().expect("lower");
                if request.spent == Some(true) {
                    bytes.push(0xff);
                }
                self.loopback.allocate(bytes).expect("allocate")
            }
            _ => {
                if let Some(request) = request {
                    self.loopback.reclaim(request);
                }
                self.fail(status, SdkError::GreenlightApi(format!("{} unsupported", method)))
            }
        }
    }
}

const MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn connect(native: &Arc<FakeGreenlight>) -> Arc<BlockingGreenlightAlbyClient> {
    let bindings = Bindings::new(Arc::clone(native) as Arc<dyn GreenlightNative>);
    let credentials = bindings.recover(MNEMONIC).expect("recover");
    bindings.new_blocking_greenlight_alby_client(MNEMONIC, &credentials).expect("client")
}

#[test]
fn test_recover_and_get_info() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    let info = client.get_info().expect("get_info");
    assert_eq!(info.alias, "alby");
    assert_eq!(info.block_height, 840_000);
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_recover_rejects_short_mnemonic() {
    let native = Arc::new(FakeGreenlight::new());
    let bindings = Bindings::new(Arc::clone(&native) as Arc<dyn GreenlightNative>);

    let err = bindings.recover("abandon about").expect_err("short mnemonic");
    assert_eq!(err, SdkError::InvalidArgument("mnemonic must have 12 words".to_string()));
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_constructor_error_yields_no_client() {
    let native = Arc::new(FakeGreenlight::new());
    let bindings = Bindings::new(Arc::clone(&native) as Arc<dyn GreenlightNative>);

    let err = bindings
        .new_blocking_greenlight_alby_client(MNEMONIC, &GreenlightCredentials::default())
        .expect_err("empty credentials");
    assert!(matches!(err, SdkError::InvalidArgument(_)));
    assert_eq!(native.frees.load(Ordering::SeqCst), 0);
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_caller_error_surfaces_as_invalid_argument() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    let err = client
        .connect_peer(ConnectPeerRequest {
            id: "02".repeat(33),
            host: Some("localhost".to_string()),
            port: Some(9735),
        })
        .expect_err("rejected host");

    match err {
        SdkError::InvalidArgument(message) => assert_eq!(message, "bad host"),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_make_invoice() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    let invoice = client
        .make_invoice(MakeInvoiceRequest {
            amount_msat: 1000,
            description: "coffee".to_string(),
            label: "c1".to_string(),
        })
        .expect("invoice");
    assert_eq!(invoice.bolt11, "lnbc1000n1c1");

    let err = client.make_invoice(MakeInvoiceRequest::default()).expect_err("zero amount");
    assert_eq!(err, SdkError::GreenlightApi("amount must be positive".to_string()));
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_native_panic_is_a_fault() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    let fault = catch_fault(|| client.pay(PayRequest { bolt11: "lnbc1".to_string() }))
        .expect_err("native panic");
    assert_eq!(fault, Fault::Panic("payment thread crashed".to_string()));
    assert_eq!(native.loopback.outstanding(), 0);

    assert!(client.get_info().is_ok(), "handle released after the fault");
}

#[test]
fn test_undecodable_response_is_a_fault() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    assert!(client.list_funds(ListFundsRequest::default()).is_ok());

    let fault = catch_fault(|| client.list_funds(ListFundsRequest { spent: Some(true) }))
        .expect_err("trailing byte");
    assert!(matches!(fault, Fault::Decode(_)));
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_calls_after_destroy_fault() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    client.destroy();
    client.destroy();
    assert!(client.is_destroyed());
    assert_eq!(native.frees.load(Ordering::SeqCst), 1);

    let fault = catch_fault(|| client.get_info()).expect_err("destroyed");
    assert_eq!(fault, Fault::AlreadyDestroyed(BlockingGreenlightAlbyClient::TYPE_NAME));
    assert!(!native.loopback.calls().iter().any(|call| call == "get_info"));

    drop(client);
    assert_eq!(native.frees.load(Ordering::SeqCst), 1);
}

#[test]
fn test_drop_frees_native_object() {
    let native = Arc::new(FakeGreenlight::new());
    drop(connect(&native));
    assert_eq!(native.frees.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_calls_then_destroy() {
    let native = Arc::new(FakeGreenlight::new());
    let client = connect(&native);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                for _ in 0..50 {
                    match catch_fault(|| client.get_info()) {
                        Ok(info) => assert_eq!(info.expect("get_info").network, "bitcoin"),
                        Err(Fault::AlreadyDestroyed(_)) => break,
                        Err(other) => panic!("unexpected fault: {}", other),
                    }
                }
            })
        })
        .collect();

    client.destroy();
    for worker in workers {
        worker.join().expect("worker");
    }

    assert_eq!(native.frees.load(Ordering::SeqCst), 1);
    assert_eq!(native.loopback.outstanding(), 0);
}

#[test]
fn test_contract_mismatch_blocks_all_calls() {
    let loopback = LoopbackNative::matching(&CONTRACT)
        .with_checksum("method_blockinggreenlightalbyclient_pay", 1);
    let native = Arc::new(FakeGreenlight::with(loopback));

    let fault = catch_fault(|| Bindings::new(Arc::clone(&native) as Arc<dyn GreenlightNative>))
        .expect_err("checksum drift");

    match fault {
        Fault::ChecksumMismatch { symbol, expected, actual, .. } => {
            assert_eq!(symbol, "method_blockinggreenlightalbyclient_pay");
            assert_eq!(expected, 10999);
            assert_eq!(actual, 1);
        }
        other => panic!("expected checksum mismatch, got {:?}", other),
    }
    assert!(native
        .loopback
        .calls()
        .iter()
        .all(|call| call == "contract_version" || call.starts_with("checksum_")));
}

#[test]
fn test_contract_version_drift() {
    let loopback = LoopbackNative::matching(&CONTRACT).with_contract_version(23);
    let native = Arc::new(FakeGreenlight::with(loopback));

    let fault = catch_fault(|| Bindings::new(Arc::clone(&native) as Arc<dyn GreenlightNative>))
        .expect_err("version drift");
    assert_eq!(
        fault,
        Fault::ContractVersionMismatch { namespace: "glalby_bindings", expected: 24, actual: 23 }
    );
}
