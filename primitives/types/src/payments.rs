//! Payment listing.

use codec::{ffi_enum, ffi_record};
use serde::{Deserialize, Serialize};

ffi_enum! {
    /// Payment state filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ListPaymentsStatus {
        /// In flight.
        Pending = 1,
        /// Settled.
        Complete = 2,
        /// Failed permanently.
        Failed = 3,
    }
}

ffi_record! {
    /// Filter the node's outgoing payments.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListPaymentsRequest {
        /// Encoded BOLT11 invoice.
        pub bolt11: Option<String>,
        /// Hex-encoded payment hash.
        pub payment_hash: Option<String>,
        /// Payment state.
        pub status: Option<ListPaymentsStatus>,
    }
}

ffi_record! {
    /// One outgoing payment.
    #[allow(missing_docs)]
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListPaymentsPayment {
        pub payment_hash: String,
        /// Payment status code as reported by the node.
        pub status: i32,
        pub destination: Option<String>,
        pub created_at: u64,
        pub completed_at: Option<u64>,
        pub label: Option<String>,
        pub bolt11: Option<String>,
        pub description: Option<String>,
        pub bolt12: Option<String>,
        pub amount_msat: Option<u64>,
        pub amount_sent_msat: Option<u64>,
        pub preimage: Option<String>,
        pub number_of_parts: Option<u64>,
        pub erroronion: Option<String>,
    }
}

ffi_record! {
    /// Result of [`ListPaymentsRequest`].
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListPaymentsResponse {
        /// Matching payments.
        pub payments: Vec<ListPaymentsPayment>,
    }
}
