//! On-chain outputs and channel balances.

use codec::ffi_record;
use serde::{Deserialize, Serialize};

ffi_record! {
    /// List the node's funds.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListFundsRequest {
        /// Include spent outputs.
        pub spent: Option<bool>,
    }
}

ffi_record! {
    /// One on-chain output owned by the node.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListFundsOutput {
        /// Transaction id.
        pub txid: String,
        /// Output index.
        pub output: u32,
        /// Output value.
        pub amount_msat: Option<u64>,
        /// Hex-encoded output script.
        pub scriptpubkey: String,
        /// Address form of the script, when it has one.
        pub address: Option<String>,
        /// Hex-encoded redeem script for wrapped outputs.
        pub redeemscript: Option<String>,
        /// Output status code as reported by the node.
        pub status: i32,
        /// Whether the output is reserved for a pending transaction.
        pub reserved: bool,
        /// Confirmation height.
        pub blockheight: Option<u32>,
    }
}

ffi_record! {
    /// One channel and the node's balance in it.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListFundsChannel {
        /// Peer node id.
        pub peer_id: String,
        /// Local balance.
        pub our_amount_msat: Option<u64>,
        /// Channel capacity.
        pub amount_msat: Option<u64>,
        /// Funding transaction id.
        pub funding_txid: String,
        /// Funding output index.
        pub funding_output: u32,
        /// Whether the peer is currently connected.
        pub connected: bool,
        /// Channel state code as reported by the node.
        pub state: i32,
        /// Full channel id.
        pub channel_id: Option<String>,
        /// Short channel id, once confirmed.
        pub short_channel_id: Option<String>,
    }
}

ffi_record! {
    /// Result of [`ListFundsRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListFundsResponse {
        /// On-chain outputs.
        pub outputs: Vec<ListFundsOutput>,
        /// Channels.
        pub channels: Vec<ListFundsChannel>,
    }
}
