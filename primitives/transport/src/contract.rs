//! Contract version and checksum gate.

use crate::dispatch::call;
use crate::fault::Fault;
use crate::native::NativeApi;

/// Expected checksum of one exported API symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiChecksum {
    /// Symbol name without namespace, e.g. `func_recover`.
    pub symbol: &'static str,
    /// Checksum the bindings were generated with.
    pub checksum: u16,
}

/// What a set of bindings expects from the native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractManifest {
    /// Binding namespace, e.g. `glalby_bindings`.
    pub namespace: &'static str,
    /// Contract version the bindings speak.
    pub contract_version: u32,
    /// Every API symbol the bindings call, with its checksum.
    pub checksums: &'static [ApiChecksum],
}

impl ContractManifest {
    /// Expected checksum for `symbol`, if the manifest lists it.
    pub fn checksum_for(&self, symbol: &str) -> Option<u16> {
        self.checksums.iter().find(|entry| entry.symbol == symbol).map(|entry| entry.checksum)
    }
}

/// Check the library against `manifest` before first use.
///
/// The version is checked first, then each listed symbol in order; the
/// first mismatch raises a [`Fault`] naming it.
pub fn verify_contract<N: NativeApi + ?Sized>(native: &N, manifest: &ContractManifest) {
    let actual = call(native, |status| native.contract_version(status));
    if actual != manifest.contract_version {
        Fault::ContractVersionMismatch {
            namespace: manifest.namespace,
            expected: manifest.contract_version,
            actual,
        }
        .raise()
    }

    for entry in manifest.checksums {
        let actual = call(native, |status| native.checksum(entry.symbol, status));
        if actual != entry.checksum {
            Fault::ChecksumMismatch {
                namespace: manifest.namespace,
                symbol: entry.symbol,
                expected: entry.checksum,
                actual,
            }
            .raise()
        }
    }

    tracing::debug!(
        library = native.library_name(),
        namespace = manifest.namespace,
        symbols = manifest.checksums.len(),
        "native contract verified"
    );
}
