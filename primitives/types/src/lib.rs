#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `glalby-types` — Greenlight Alby Domain Types
//!
//! Request, response and error types exchanged with the native Greenlight
//! Alby library.  Every type here implements
//! [`FfiConverter`](codec::FfiConverter), and its field order is its wire
//! layout: fields are written back to back, with no tags.
//!
//! The types also derive `serde` so hosts can log or persist them as JSON.
//!
//! ## Layout
//! - [`node`]: node identity, peers, channels, on-chain addresses, payments
//!   by keysend or invoice
//! - [`funds`]: on-chain outputs and channel balances
//! - [`invoices`]: invoice listing
//! - [`payments`]: payment listing
//! - [`amount`]: the `AmountOrAll` union
//! - [`error`]: [`SdkError`], the error every client call can return

pub mod amount;
pub mod error;
pub mod funds;
pub mod invoices;
pub mod node;
pub mod payments;

pub use amount::AmountOrAll;
pub use error::SdkError;
pub use funds::{ListFundsChannel, ListFundsOutput, ListFundsRequest, ListFundsResponse};
pub use invoices::{
    ListInvoicesIndex, ListInvoicesInvoice, ListInvoicesInvoicePaidOutpoint, ListInvoicesRequest,
    ListInvoicesResponse,
};
pub use node::{
    ConnectPeerRequest, ConnectPeerResponse, FundChannelRequest, FundChannelResponse,
    GetInfoResponse, GreenlightCredentials, KeySendRequest, KeySendResponse, MakeInvoiceRequest,
    MakeInvoiceResponse, NewAddressRequest, NewAddressResponse, NewAddressType, PayRequest,
    PayResponse,
};
pub use payments::{ListPaymentsPayment, ListPaymentsRequest, ListPaymentsResponse, ListPaymentsStatus};
