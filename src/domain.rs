// ===============================
// src/domain.rs
// ===============================
/// Private API command, already validated by the CLI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenAll,
    OpenPair { coin: String },
    Buy { coin: String, price: String, idr: String },
    Sell { coin: String, price: String, quantity: String },
    Cancel { client_order_id: String },
    GetInfo,
}

/// Ordered request fields. Serialized as-is, no re-encoding: the joined
/// string is exactly what gets signed and sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    fields: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn to_body(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest { pub body: String, pub signature: String }

/// Which response shape the dispatcher expects, plus the values echoed back
/// in the table that the server never sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    Orders { coin: Option<String> },
    Balances,
    Trade { coin: String, price: String },
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest { pub params: RequestParams, pub kind: ResponseKind }

// ---- Parsed rows ----
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow { pub coin: String, pub price: String, pub remaining: String, pub client_order_id: String }

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRow { pub asset: String, pub available: f64, pub hold: f64 }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeConfirmation {
    pub coin: String,
    pub price: String,
    pub remaining: String,
    pub order_id: String,
    pub client_order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelConfirmation { pub coin: String, pub client_order_id: String, pub order_type: String }

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedData {
    Orders(Vec<OrderRow>),
    Balances(Vec<BalanceRow>),
    Trade(TradeConfirmation),
    Cancel(CancelConfirmation),
}
