//! Node, peer, channel and payment types.

use codec::{ffi_enum, ffi_record};
use serde::{Deserialize, Serialize};

ffi_record! {
    /// Device credentials issued when a node is registered or recovered.
    ///
    /// Persist these: together with the mnemonic they are required to
    /// construct a client for the same node again.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct GreenlightCredentials {
        /// PEM-encoded device private key.
        pub device_key: String,
        /// PEM-encoded device certificate.
        pub device_cert: String,
    }
}

ffi_record! {
    /// Open a network connection to a peer.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ConnectPeerRequest {
        /// Peer node id, optionally `id@host:port`.
        pub id: String,
        /// Host, when not part of `id`.
        pub host: Option<String>,
        /// Port, when not part of `id`.
        pub port: Option<u16>,
    }
}

ffi_record! {
    /// Result of [`ConnectPeerRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ConnectPeerResponse {
        /// Node id of the connected peer.
        pub id: String,
    }
}

ffi_record! {
    /// Open a channel to a connected peer.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FundChannelRequest {
        /// Peer node id.
        pub id: String,
        /// Channel size; absent lets the node decide.
        pub amount_msat: Option<u64>,
        /// Whether to announce the channel publicly.
        pub announce: Option<bool>,
        /// Minimum confirmations for the funding inputs.
        pub minconf: Option<u32>,
    }
}

ffi_record! {
    /// Result of [`FundChannelRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FundChannelResponse {
        /// Funding transaction id.
        pub txid: String,
    }
}

ffi_record! {
    /// Node identity and chain position.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct GetInfoResponse {
        /// Hex-encoded node public key.
        pub pubkey: String,
        /// Node alias.
        pub alias: String,
        /// Hex-encoded node color.
        pub color: String,
        /// Network name, e.g. `bitcoin`.
        pub network: String,
        /// Best block height seen by the node.
        pub block_height: u32,
    }
}

ffi_record! {
    /// Spontaneous payment to a node id.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct KeySendRequest {
        /// Destination node id.
        pub destination: String,
        /// Amount to send.
        pub amount_msat: Option<u64>,
        /// Local label for the payment.
        pub label: Option<String>,
    }
}

ffi_record! {
    /// Result of [`KeySendRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct KeySendResponse {
        /// Hex-encoded payment preimage.
        pub payment_preimage: String,
    }
}

ffi_record! {
    /// Create a BOLT11 invoice.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct MakeInvoiceRequest {
        /// Requested amount.
        pub amount_msat: u64,
        /// Invoice description.
        pub description: String,
        /// Unique local label.
        pub label: String,
    }
}

ffi_record! {
    /// Result of [`MakeInvoiceRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct MakeInvoiceResponse {
        /// Encoded BOLT11 invoice.
        pub bolt11: String,
    }
}

ffi_enum! {
    /// Address kinds the node can generate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum NewAddressType {
        /// Native segwit v0.
        Bech32 = 1,
        /// Taproot.
        P2tr = 2,
        /// One address of every kind.
        All = 3,
    }
}

ffi_record! {
    /// Generate an on-chain deposit address.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct NewAddressRequest {
        /// Address kind; absent uses the node default.
        pub address_type: Option<NewAddressType>,
    }
}

ffi_record! {
    /// Result of [`NewAddressRequest`]; only requested kinds are present.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct NewAddressResponse {
        /// Taproot address.
        pub p2tr: Option<String>,
        /// Native segwit address.
        pub bech32: Option<String>,
        /// Wrapped segwit address.
        pub p2sh_segwit: Option<String>,
    }
}

ffi_record! {
    /// Pay a BOLT11 invoice.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct PayRequest {
        /// Encoded BOLT11 invoice.
        pub bolt11: String,
    }
}

ffi_record! {
    /// Result of [`PayRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct PayResponse {
        /// Hex-encoded payment preimage.
        pub preimage: String,
    }
}
