//! In-process native stand-in for tests.
//!
//! [`LoopbackNative`] allocates buffers from the Rust heap, answers contract
//! queries from a configurable table and counts every allocation and
//! release, so tests can assert that no buffer leaks or is freed twice.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use codec::{CodecError, FfiConverter};

use crate::buffer::{ForeignBytes, TransferBuffer};
use crate::contract::ContractManifest;
use crate::native::NativeApi;
use crate::status::CallStatus;

/// A native library implemented in Rust, with bookkeeping.
#[derive(Debug)]
pub struct LoopbackNative {
    name: String,
    contract_version: u32,
    checksums: HashMap<String, u16>,
    allocated: AtomicUsize,
    released: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl Default for LoopbackNative {
    fn default() -> Self {
        Self {
            name: "loopback".to_string(),
            contract_version: 0,
            checksums: HashMap::new(),
            allocated: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl LoopbackNative {
    /// A library that satisfies `manifest` exactly.
    pub fn matching(manifest: &ContractManifest) -> Self {
        let mut native = Self { contract_version: manifest.contract_version, ..Self::default() };
        for entry in manifest.checksums {
            native.checksums.insert(entry.symbol.to_string(), entry.checksum);
        }
        native
    }

    /// Report `version` as the contract version.
    pub fn with_contract_version(mut self, version: u32) -> Self {
        self.contract_version = version;
        self
    }

    /// Report `checksum` for `symbol`.
    pub fn with_checksum(mut self, symbol: &str, checksum: u16) -> Self {
        self.checksums.insert(symbol.to_string(), checksum);
        self
    }

    /// Allocate a native-side buffer holding `bytes`.
    pub fn allocate(&self, bytes: Vec<u8>) -> Result<TransferBuffer, CodecError> {
        let buf = TransferBuffer::from_vec(bytes)?;
        self.allocated.fetch_add(1, Ordering::SeqCst);
        Ok(buf)
    }

    /// Consume a buffer passed in as an argument, as the native side would.
    pub fn reclaim(&self, buf: TransferBuffer) -> Vec<u8> {
        self.released.fetch_add(1, Ordering::SeqCst);
        // SAFETY: every buffer in circulation was built by `allocate`.
        unsafe { buf.into_vec() }
    }

    /// Allocate a buffer holding the wire encoding of `value`.
    pub fn allocate_value<T: FfiConverter>(&self, value: &T) -> Result<TransferBuffer, CodecError> {
        self.allocate(value.lower_bytes()?)
    }

    /// Report a caller error carrying `error`.
    ///
    /// An error that cannot be encoded is reported as a double panic.
    pub fn fail_with<E: FfiConverter>(&self, status: &mut CallStatus, error: &E) {
        match self.allocate_value(error) {
            Ok(buf) => status.set_error(buf),
            Err(_) => status.set_panic(TransferBuffer::empty()),
        }
    }

    /// Report a panic, with a message or, for `None`, as a double panic.
    pub fn panic_with(&self, status: &mut CallStatus, message: Option<&str>) {
        let buf = match message {
            Some(message) => self.allocate(message.as_bytes().to_vec()).unwrap_or_default(),
            None => TransferBuffer::empty(),
        };
        status.set_panic(buf);
    }

    /// Record that `entry` was called.
    pub fn record(&self, entry: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(entry.to_string());
        }
    }

    /// Entry points called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Buffers allocated so far.
    pub fn allocated(&self) -> usize { self.allocated.load(Ordering::SeqCst) }

    /// Buffers released so far.
    pub fn released(&self) -> usize { self.released.load(Ordering::SeqCst) }

    /// Buffers allocated but not yet released.
    pub fn outstanding(&self) -> isize { self.allocated() as isize - self.released() as isize }
}

impl NativeApi for LoopbackNative {
    fn library_name(&self) -> &str { &self.name }

    fn buffer_from_bytes(&self, bytes: ForeignBytes<'_>, status: &mut CallStatus) -> TransferBuffer {
        match self.allocate(bytes.as_slice().to_vec()) {
            Ok(buf) => buf,
            Err(_) => {
                status.set_panic(TransferBuffer::empty());
                TransferBuffer::empty()
            }
        }
    }

    fn buffer_free(&self, buf: TransferBuffer, _status: &mut CallStatus) {
        if buf.data_pointer().is_null() {
            return;
        }
        self.reclaim(buf);
    }

    fn contract_version(&self, _status: &mut CallStatus) -> u32 {
        self.record("contract_version");
        self.contract_version
    }

    fn checksum(&self, symbol: &str, _status: &mut CallStatus) -> u16 {
        self.record(&format!("checksum_{}", symbol));
        self.checksums.get(symbol).copied().unwrap_or(0)
    }
}
