#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `glalby-dylib` — Shared-Library Backend
//!
//! Loads the native Greenlight Alby library (`libglalby_bindings.so`,
//! `.dylib` or `glalby_bindings.dll`) with `libloading` and implements
//! [`GreenlightNative`] over its exported symbols.
//!
//! Every symbol the bindings call is resolved when the library is opened,
//! so a library missing an entry point fails at [`DylibNative::open`] with
//! a [`LoadError`] instead of at first use.  Opening does not check the
//! contract; [`client::Bindings::new`] does.
//!
//! ## Example
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! use client::Bindings;
//! use glalby_dylib::DylibNative;
//!
//! let native = DylibNative::open("glalby_bindings", &[PathBuf::from("/opt/glalby/lib")])
//!     .expect("library");
//! let bindings = Bindings::new(Arc::new(native));
//! let credentials = bindings.recover("abandon ... about").expect("recover");
//! println!("device cert: {} bytes", credentials.device_cert.len());
//! ```

use std::path::{Path, PathBuf};

use client::{ClientMethod, GreenlightNative};
use libloading::Library;
use thiserror::Error;
use transport::{CallStatus, ForeignBytes, NativeApi, NativePointer, TransferBuffer};

pub mod symbols;

use symbols::{MethodEntry, Symbols};

/// Type alias for loader results.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures while locating or loading the native library.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate file exists in any search path.
    #[error("Library not found: {name} (searched {} paths)", .searched.len())]
    LibraryNotFound {
        /// Library name or path as given.
        name: String,
        /// Directories that were searched.
        searched: Vec<PathBuf>,
    },
    /// The file exists but the system loader rejected it.
    #[error("Failed to load library {}: {message}", .path.display())]
    LoadFailed {
        /// File that failed to load.
        path: PathBuf,
        /// Loader error text.
        message: String,
    },
    /// A required symbol is not exported.
    #[error("Symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound {
        /// Library file name.
        library: String,
        /// Missing symbol.
        symbol: String,
    },
}

/// Candidate file names for `name` on this platform, in priority order.
pub fn library_file_names(name: &str) -> Vec<String> {
    let extensions: &[&str] = if cfg!(target_os = "windows") {
        &["dll"]
    } else if cfg!(target_os = "macos") {
        &["dylib", "so"]
    } else {
        &["so"]
    };
    let prefixes: &[&str] = if cfg!(target_os = "windows") { &["", "lib"] } else { &["lib", ""] };

    let mut names = Vec::new();
    for prefix in prefixes {
        for ext in extensions {
            names.push(format!("{}{}.{}", prefix, name, ext));
        }
    }
    names
}

/// Locate the library file for `name`.
///
/// A `name` that already points at an existing file is used as is;
/// otherwise every search path is tried with each platform file name.
pub fn resolve_library_path(name: &str, search_paths: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.components().count() > 1 && direct.is_file() {
        return Some(direct.to_path_buf());
    }

    let candidates = library_file_names(name);
    search_paths
        .iter()
        .flat_map(|dir| candidates.iter().map(move |file| dir.join(file)))
        .find(|path| path.is_file())
}

/// The native library loaded from disk.
pub struct DylibNative {
    name: String,
    path: PathBuf,
    symbols: Symbols,
    _library: Library,
}

impl DylibNative {
    /// Locate `name` in `search_paths` and load it.
    pub fn open(name: &str, search_paths: &[PathBuf]) -> Result<Self> {
        let path = resolve_library_path(name, search_paths).ok_or_else(|| {
            LoadError::LibraryNotFound { name: name.to_string(), searched: search_paths.to_vec() }
        })?;
        Self::open_path(&path)
    }

    /// Load the library at `path`.
    pub fn open_path(path: &Path) -> Result<Self> {
        logging::trace("DYLIB", &format!("loading {}", path.display()));

        // SAFETY: loading runs the library's initializers; the path comes from
        // the caller's configuration, which is trusted.
        let library = unsafe { Library::new(path) }.map_err(|err| LoadError::LoadFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        let name = path
            .file_name()
            .map(|file| file.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // SAFETY: the symbol table is stored next to the library it came from
        // and dropped with it.
        let symbols = unsafe { Symbols::resolve(&library, &name)? };
        tracing::info!(library = %name, path = %path.display(), "loaded native library");

        Ok(Self { name, path: path.to_path_buf(), symbols, _library: library })
    }

    /// File the library was loaded from.
    pub fn path(&self) -> &Path { &self.path }

    /// Report a call this table cannot route as a native panic.
    fn reject(&self, status: &mut CallStatus, message: String) {
        tracing::error!(library = %self.name, "{}", message);
        let mut alloc_status = CallStatus::default();
        let buf = match ForeignBytes::from_slice(message.as_bytes()) {
            // SAFETY: resolved with this signature at load time.
            Ok(bytes) => unsafe { (self.symbols.buffer_from_bytes)(bytes, &mut alloc_status) },
            Err(_) => TransferBuffer::empty(),
        };
        if alloc_status.code != 0 {
            status.set_panic(TransferBuffer::empty());
            return;
        }
        status.set_panic(buf);
    }
}

impl NativeApi for DylibNative {
    fn library_name(&self) -> &str { &self.name }

    fn buffer_from_bytes(&self, bytes: ForeignBytes<'_>, status: &mut CallStatus) -> TransferBuffer {
        // SAFETY: resolved with this signature at load time.
        unsafe { (self.symbols.buffer_from_bytes)(bytes, status) }
    }

    fn buffer_free(&self, buf: TransferBuffer, status: &mut CallStatus) {
        // SAFETY: resolved with this signature at load time.
        unsafe { (self.symbols.buffer_free)(buf, status) }
    }

    fn contract_version(&self, status: &mut CallStatus) -> u32 {
        // SAFETY: resolved with this signature at load time.
        unsafe { (self.symbols.contract_version)(status) }
    }

    fn checksum(&self, symbol: &str, status: &mut CallStatus) -> u16 {
        match self.symbols.checksums.get(symbol) {
            // SAFETY: resolved with this signature at load time.
            Some(checksum) => unsafe { (*checksum)(status) },
            None => {
                self.reject(status, format!("no checksum resolved for {}", symbol));
                0
            }
        }
    }
}

impl GreenlightNative for DylibNative {
    fn new_blocking_greenlight_alby_client(
        &self,
        mnemonic: TransferBuffer,
        credentials: TransferBuffer,
        status: &mut CallStatus,
    ) -> NativePointer {
        // SAFETY: resolved with this signature at load time.
        unsafe { (self.symbols.new_client)(mnemonic, credentials, status) }
    }

    fn recover(&self, mnemonic: TransferBuffer, status: &mut CallStatus) -> TransferBuffer {
        // SAFETY: resolved with this signature at load time.
        unsafe { (self.symbols.recover)(mnemonic, status) }
    }

    fn free_blocking_greenlight_alby_client(&self, client: NativePointer, status: &mut CallStatus) {
        // SAFETY: resolved with this signature at load time.
        unsafe { (self.symbols.free_client)(client, status) }
    }

    fn call_client_method(
        &self,
        method: ClientMethod,
        client: NativePointer,
        request: Option<TransferBuffer>,
        status: &mut CallStatus,
    ) -> TransferBuffer {
        logging::trace("DYLIB", &format!("calling {}", method));
        match (self.symbols.methods.get(&method).copied(), request) {
            // SAFETY: resolved with this signature at load time.
            (Some(MethodEntry::WithRequest(entry)), Some(request)) => unsafe {
                entry(client, request, status)
            },
            // SAFETY: resolved with this signature at load time.
            (Some(MethodEntry::WithoutRequest(entry)), None) => unsafe { entry(client, status) },
            (_, request) => {
                if let Some(request) = request {
                    let mut free_status = CallStatus::default();
                    self.buffer_free(request, &mut free_status);
                }
                self.reject(status, format!("{} called with the wrong arguments", method));
                TransferBuffer::empty()
            }
        }
    }
}

impl std::fmt::Debug for DylibNative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DylibNative").field("name", &self.name).field("path", &self.path).finish()
    }
}
