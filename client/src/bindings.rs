//! Library-level entry points.

use std::sync::Arc;

use transport::{call_with_error, free_buffer, lift_from_buffer, lower_into_buffer, verify_contract};
use types::{GreenlightCredentials, SdkError};

use crate::client::BlockingGreenlightAlbyClient;
use crate::manifest::CONTRACT;
use crate::native::GreenlightNative;

/// A verified handle on the native library.
///
/// Cheap to clone; every clone shares the same library.
#[derive(Clone)]
pub struct Bindings {
    native: Arc<dyn GreenlightNative>,
}

impl Bindings {
    /// Verify the library's contract and wrap it.
    ///
    /// Raises a [`Fault`](transport::Fault) naming the first mismatch when
    /// the library was built against a different contract.
    pub fn new(native: Arc<dyn GreenlightNative>) -> Self {
        verify_contract(&*native, &CONTRACT);
        tracing::info!(library = native.library_name(), "greenlight bindings ready");
        Self { native }
    }

    /// The underlying library.
    pub fn native(&self) -> &Arc<dyn GreenlightNative> { &self.native }

    /// Register the node for `mnemonic`, or recover it if it exists.
    pub fn recover(&self, mnemonic: &str) -> Result<GreenlightCredentials, SdkError> {
        let native = &*self.native;
        let mnemonic = lower_into_buffer(native, &mnemonic.to_owned())?;

        let response =
            call_with_error::<SdkError, _, _, _>(native, |status| native.recover(mnemonic, status))?;
        Ok(lift_from_buffer(native, response))
    }

    /// Connect to the node for `mnemonic` with previously issued
    /// `credentials`.
    pub fn new_blocking_greenlight_alby_client(
        &self,
        mnemonic: &str,
        credentials: &GreenlightCredentials,
    ) -> Result<Arc<BlockingGreenlightAlbyClient>, SdkError> {
        let native = &*self.native;
        let mnemonic = lower_into_buffer(native, &mnemonic.to_owned())?;
        let credentials = match lower_into_buffer(native, credentials) {
            Ok(buf) => buf,
            Err(err) => {
                free_buffer(native, mnemonic);
                return Err(err.into());
            }
        };

        let pointer = call_with_error::<SdkError, _, _, _>(native, |status| {
            native.new_blocking_greenlight_alby_client(mnemonic, credentials, status)
        })?;
        tracing::debug!(library = native.library_name(), "constructed greenlight client");

        Ok(Arc::new(BlockingGreenlightAlbyClient::from_raw(Arc::clone(&self.native), pointer)))
    }
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings").field("library", &self.native.library_name()).finish()
    }
}
