//! Invoice listing.

use codec::{ffi_enum, ffi_record};
use serde::{Deserialize, Serialize};

ffi_enum! {
    /// Which index `start` and `limit` page over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ListInvoicesIndex {
        /// Creation order.
        Created = 1,
        /// Last-update order.
        Updated = 2,
    }
}

ffi_record! {
    /// Filter and page the node's invoices.  All filters are optional.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListInvoicesRequest {
        /// Invoice label.
        pub label: Option<String>,
        /// Encoded BOLT11 or BOLT12 string.
        pub invstring: Option<String>,
        /// Hex-encoded payment hash.
        pub payment_hash: Option<String>,
        /// BOLT12 offer id.
        pub offer_id: Option<String>,
        /// Index used for paging.
        pub index: Option<ListInvoicesIndex>,
        /// First index value to return.
        pub start: Option<u64>,
        /// Maximum number of invoices.
        pub limit: Option<u32>,
    }
}

ffi_record! {
    /// On-chain outpoint that paid an invoice.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListInvoicesInvoicePaidOutpoint {
        /// Transaction id.
        pub txid: Option<String>,
        /// Output index.
        pub outnum: Option<u32>,
    }
}

ffi_record! {
    /// One invoice.
    #[allow(missing_docs)]
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListInvoicesInvoice {
        pub label: String,
        pub description: Option<String>,
        pub payment_hash: String,
        /// Invoice status code as reported by the node.
        pub status: i32,
        /// Expiry as a UNIX timestamp.
        pub expires_at: u64,
        pub amount_msat: Option<u64>,
        pub bolt11: Option<String>,
        pub bolt12: Option<String>,
        pub local_offer_id: Option<String>,
        pub invreq_payer_note: Option<String>,
        pub created_index: Option<u64>,
        pub updated_index: Option<u64>,
        pub pay_index: Option<u64>,
        pub amount_received_msat: Option<u64>,
        /// Payment time as a UNIX timestamp.
        pub paid_at: Option<u64>,
        pub paid_outpoint: Option<ListInvoicesInvoicePaidOutpoint>,
        pub payment_preimage: Option<String>,
    }
}

ffi_record! {
    /// Result of [`ListInvoicesRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListInvoicesResponse {
        /// Matching invoices.
        pub invoices: Vec<ListInvoicesInvoice>,
    }
}
