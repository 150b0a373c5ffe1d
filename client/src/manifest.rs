//! API symbols and the contract manifest.

use std::fmt;

use transport::{ApiChecksum, ContractManifest};

/// Binding namespace shared by every exported symbol.
pub const NAMESPACE: &str = "glalby_bindings";

/// Contract version these bindings speak.
pub const CONTRACT_VERSION: u32 = 24;

/// Symbol-level name of the client object.
pub const OBJECT_NAME: &str = "blockinggreenlightalbyclient";

/// Methods of the native client object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientMethod {
    /// `connect_peer`
    ConnectPeer,
    /// `fund_channel`
    FundChannel,
    /// `get_info`
    GetInfo,
    /// `key_send`
    KeySend,
    /// `list_funds`
    ListFunds,
    /// `list_invoices`
    ListInvoices,
    /// `list_payments`
    ListPayments,
    /// `make_invoice`
    MakeInvoice,
    /// `new_address`
    NewAddress,
    /// `pay`
    Pay,
}

impl ClientMethod {
    /// Every method, in symbol order.
    pub const ALL: [ClientMethod; 10] = [
        ClientMethod::ConnectPeer,
        ClientMethod::FundChannel,
        ClientMethod::GetInfo,
        ClientMethod::KeySend,
        ClientMethod::ListFunds,
        ClientMethod::ListInvoices,
        ClientMethod::ListPayments,
        ClientMethod::MakeInvoice,
        ClientMethod::NewAddress,
        ClientMethod::Pay,
    ];

    /// Method name as exported.
    pub fn name(self) -> &'static str {
        match self {
            ClientMethod::ConnectPeer => "connect_peer",
            ClientMethod::FundChannel => "fund_channel",
            ClientMethod::GetInfo => "get_info",
            ClientMethod::KeySend => "key_send",
            ClientMethod::ListFunds => "list_funds",
            ClientMethod::ListInvoices => "list_invoices",
            ClientMethod::ListPayments => "list_payments",
            ClientMethod::MakeInvoice => "make_invoice",
            ClientMethod::NewAddress => "new_address",
            ClientMethod::Pay => "pay",
        }
    }

    /// API symbol, as used in checksum and function symbol names.
    pub fn api_symbol(self) -> &'static str {
        match self {
            ClientMethod::ConnectPeer => "method_blockinggreenlightalbyclient_connect_peer",
            ClientMethod::FundChannel => "method_blockinggreenlightalbyclient_fund_channel",
            ClientMethod::GetInfo => "method_blockinggreenlightalbyclient_get_info",
            ClientMethod::KeySend => "method_blockinggreenlightalbyclient_key_send",
            ClientMethod::ListFunds => "method_blockinggreenlightalbyclient_list_funds",
            ClientMethod::ListInvoices => "method_blockinggreenlightalbyclient_list_invoices",
            ClientMethod::ListPayments => "method_blockinggreenlightalbyclient_list_payments",
            ClientMethod::MakeInvoice => "method_blockinggreenlightalbyclient_make_invoice",
            ClientMethod::NewAddress => "method_blockinggreenlightalbyclient_new_address",
            ClientMethod::Pay => "method_blockinggreenlightalbyclient_pay",
        }
    }

    /// Whether the method takes a request record.
    pub fn takes_request(self) -> bool { !matches!(self, ClientMethod::GetInfo) }
}

impl fmt::Display for ClientMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// API symbol of the client constructor.
pub const FUNC_NEW_CLIENT: &str = "func_new_blocking_greenlight_alby_client";

/// API symbol of node recovery.
pub const FUNC_RECOVER: &str = "func_recover";

/// Expected contract of the Greenlight Alby library.
pub static CONTRACT: ContractManifest = ContractManifest {
    namespace: NAMESPACE,
    contract_version: CONTRACT_VERSION,
    checksums: &[
        ApiChecksum { symbol: FUNC_NEW_CLIENT, checksum: 13984 },
        ApiChecksum { symbol: FUNC_RECOVER, checksum: 3522 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_connect_peer", checksum: 50417 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_fund_channel", checksum: 52932 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_get_info", checksum: 49263 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_key_send", checksum: 14883 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_list_funds", checksum: 6766 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_list_invoices", checksum: 8342 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_list_payments", checksum: 56886 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_make_invoice", checksum: 62877 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_new_address", checksum: 52875 },
        ApiChecksum { symbol: "method_blockinggreenlightalbyclient_pay", checksum: 10999 },
    ],
};
