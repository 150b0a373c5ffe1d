//! Exported symbol names and their resolved entry points.

use std::collections::HashMap;

use client::{ClientMethod, CONTRACT, FUNC_NEW_CLIENT, FUNC_RECOVER, OBJECT_NAME};
use libloading::Library;
use transport::{CallStatus, ForeignBytes, NativePointer, TransferBuffer};

use crate::LoadError;

pub(crate) type BufferFromBytesFn =
    for<'a> unsafe extern "C" fn(ForeignBytes<'a>, *mut CallStatus) -> TransferBuffer;
pub(crate) type BufferFreeFn = unsafe extern "C" fn(TransferBuffer, *mut CallStatus);
pub(crate) type ContractVersionFn = unsafe extern "C" fn(*mut CallStatus) -> u32;
pub(crate) type ChecksumFn = unsafe extern "C" fn(*mut CallStatus) -> u16;
pub(crate) type RecoverFn = unsafe extern "C" fn(TransferBuffer, *mut CallStatus) -> TransferBuffer;
pub(crate) type NewClientFn =
    unsafe extern "C" fn(TransferBuffer, TransferBuffer, *mut CallStatus) -> NativePointer;
pub(crate) type FreeClientFn = unsafe extern "C" fn(NativePointer, *mut CallStatus);
pub(crate) type MethodFn =
    unsafe extern "C" fn(NativePointer, TransferBuffer, *mut CallStatus) -> TransferBuffer;
pub(crate) type NoArgMethodFn = unsafe extern "C" fn(NativePointer, *mut CallStatus) -> TransferBuffer;

/// `ffi_{namespace}_{name}`, for scaffolding such as buffer management.
pub fn scaffolding_symbol(namespace: &str, name: &str) -> String {
    format!("ffi_{}_{}", namespace, name)
}

/// `uniffi_{namespace}_checksum_{api_symbol}`.
pub fn checksum_symbol(namespace: &str, api_symbol: &str) -> String {
    format!("uniffi_{}_checksum_{}", namespace, api_symbol)
}

/// `uniffi_{namespace}_fn_{api_symbol}`.
pub fn function_symbol(namespace: &str, api_symbol: &str) -> String {
    format!("uniffi_{}_fn_{}", namespace, api_symbol)
}

/// A client method entry point.
#[derive(Clone, Copy)]
pub(crate) enum MethodEntry {
    WithRequest(MethodFn),
    WithoutRequest(NoArgMethodFn),
}

/// Every entry point the bindings call, resolved up front.
pub(crate) struct Symbols {
    pub(crate) buffer_from_bytes: BufferFromBytesFn,
    pub(crate) buffer_free: BufferFreeFn,
    pub(crate) contract_version: ContractVersionFn,
    pub(crate) checksums: HashMap<&'static str, ChecksumFn>,
    pub(crate) recover: RecoverFn,
    pub(crate) new_client: NewClientFn,
    pub(crate) free_client: FreeClientFn,
    pub(crate) methods: HashMap<ClientMethod, MethodEntry>,
}

impl Symbols {
    /// Resolve every symbol in `library`.
    ///
    /// # Safety
    /// `library` must export each symbol with the declared signature, and
    /// must outlive the returned table.
    pub(crate) unsafe fn resolve(library: &Library, library_name: &str) -> Result<Self, LoadError> {
        let ns = CONTRACT.namespace;

        let mut checksums = HashMap::new();
        for entry in CONTRACT.checksums {
            let name = checksum_symbol(ns, entry.symbol);
            checksums.insert(entry.symbol, lookup::<ChecksumFn>(library, library_name, &name)?);
        }

        let mut methods = HashMap::new();
        for method in ClientMethod::ALL {
            let name = function_symbol(ns, method.api_symbol());
            let entry = if method.takes_request() {
                MethodEntry::WithRequest(lookup::<MethodFn>(library, library_name, &name)?)
            } else {
                MethodEntry::WithoutRequest(lookup::<NoArgMethodFn>(library, library_name, &name)?)
            };
            methods.insert(method, entry);
        }

        Ok(Self {
            buffer_from_bytes: lookup(
                library,
                library_name,
                &scaffolding_symbol(ns, "rustbuffer_from_bytes"),
            )?,
            buffer_free: lookup(library, library_name, &scaffolding_symbol(ns, "rustbuffer_free"))?,
            contract_version: lookup(
                library,
                library_name,
                &scaffolding_symbol(ns, "uniffi_contract_version"),
            )?,
            checksums,
            recover: lookup(library, library_name, &function_symbol(ns, FUNC_RECOVER))?,
            new_client: lookup(library, library_name, &function_symbol(ns, FUNC_NEW_CLIENT))?,
            free_client: lookup(
                library,
                library_name,
                &function_symbol(ns, &format!("free_{}", OBJECT_NAME)),
            )?,
            methods,
        })
    }
}

unsafe fn lookup<T: Copy>(library: &Library, library_name: &str, symbol: &str) -> Result<T, LoadError> {
    logging::trace("DYLIB", &format!("resolving {}", symbol));
    let found = library.get::<T>(symbol.as_bytes()).map_err(|_| LoadError::SymbolNotFound {
        library: library_name.to_string(),
        symbol: symbol.to_string(),
    })?;
    Ok(*found)
}
