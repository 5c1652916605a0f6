// ===============================
// src/parser.rs (JSON envelope -> rows)
// ===============================
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{
    BalanceRow, CancelConfirmation, OrderRow, ParsedData, ResponseKind, TradeConfirmation,
};

pub const NA: &str = "N/A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Invalid success field")]
    InvalidSuccess,
    #[error("Missing 'return' object")]
    MissingReturn,
    #[error("Missing '{0}' object")]
    MissingField(&'static str),
    #[error("Missing balance information")]
    MissingBalance,
    #[error("Unknown 'orders' format in JSON response")]
    UnknownOrdersFormat,
    #[error("API Error: {0}")]
    Api(String),
    #[error("Unknown API error")]
    UnknownApi,
}

/// `orders` arrives either grouped by pair or as a bare list when the
/// request was scoped to one pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrdersPayload {
    MultiPair(Map<String, Value>),
    SinglePair(Vec<Value>),
}

/// `btc_idr` -> `btc`. Anything not ending in exactly `_idr` after the
/// first underscore is returned unchanged.
pub fn extract_coin_name(pair: Option<&str>) -> String {
    match pair {
        None => NA.to_string(),
        Some(p) => match p.split_once('_') {
            Some((coin, "idr")) => coin.to_string(),
            _ => p.to_string(),
        },
    }
}

/// String, integer or real -> f64. Unparseable strings and other types are 0.0.
pub fn coerce_f64(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn display_text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => NA.to_string(),
    }
}

fn remain_key(coin: &str) -> String {
    format!("remain_{coin}")
}

/// Validate the envelope and hand back the `return` object.
fn open_envelope(raw: &[u8]) -> Result<Map<String, Value>, ResponseError> {
    let root: Value = serde_json::from_slice(raw).map_err(|e| ResponseError::Json(e.to_string()))?;
    let success = root
        .get("success")
        .and_then(Value::as_i64)
        .ok_or(ResponseError::InvalidSuccess)?;

    if success == 0 {
        return Err(match root.get("error") {
            Some(Value::String(msg)) => ResponseError::Api(msg.clone()),
            _ => ResponseError::UnknownApi,
        });
    }

    match root {
        Value::Object(mut obj) => match obj.remove("return") {
            Some(Value::Object(ret)) => Ok(ret),
            _ => Err(ResponseError::MissingReturn),
        },
        _ => Err(ResponseError::MissingReturn),
    }
}

fn order_rows(coin: &str, orders: &[Value], out: &mut Vec<OrderRow>) {
    let key = remain_key(coin);
    for order in orders {
        out.push(OrderRow {
            coin: coin.to_string(),
            price: display_text(order.get("price")),
            remaining: display_text(order.get(&key)),
            client_order_id: display_text(order.get("client_order_id")),
        });
    }
}

pub fn normalize_orders(payload: &OrdersPayload, coin_hint: Option<&str>) -> Vec<OrderRow> {
    let mut rows = Vec::new();
    match payload {
        OrdersPayload::MultiPair(groups) => {
            for (pair, group) in groups {
                // grup yang bukan array dilewati
                if let Some(list) = group.as_array() {
                    order_rows(&extract_coin_name(Some(pair)), list, &mut rows);
                }
            }
        }
        OrdersPayload::SinglePair(list) => {
            order_rows(&extract_coin_name(coin_hint), list, &mut rows);
        }
    }
    rows
}

pub fn parse_orders(raw: &[u8], coin_hint: Option<&str>) -> Result<Vec<OrderRow>, ResponseError> {
    let mut ret = open_envelope(raw)?;
    let orders = ret.remove("orders").ok_or(ResponseError::MissingField("orders"))?;
    let payload: OrdersPayload =
        serde_json::from_value(orders).map_err(|_| ResponseError::UnknownOrdersFormat)?;
    Ok(normalize_orders(&payload, coin_hint))
}

/// Merge `balance` and `balance_hold`. Rows keep the exchange's key order:
/// assets from `balance` first, then hold-only assets.
pub fn merge_balances(balance: &Map<String, Value>, hold: &Map<String, Value>) -> Vec<BalanceRow> {
    let mut rows = Vec::new();
    for (asset, value) in balance {
        let available = coerce_f64(value);
        let on_hold = hold.get(asset).map(coerce_f64).unwrap_or(0.0);
        if available > 0.0 || on_hold > 0.0 {
            rows.push(BalanceRow { asset: asset.clone(), available, hold: on_hold });
        }
    }
    for (asset, value) in hold {
        if balance.contains_key(asset) {
            continue;
        }
        let on_hold = coerce_f64(value);
        if on_hold > 0.0 {
            rows.push(BalanceRow { asset: asset.clone(), available: 0.0, hold: on_hold });
        }
    }
    rows
}

pub fn parse_balances(raw: &[u8]) -> Result<Vec<BalanceRow>, ResponseError> {
    let ret = open_envelope(raw)?;
    match (ret.get("balance"), ret.get("balance_hold")) {
        (Some(Value::Object(balance)), Some(Value::Object(hold))) => Ok(merge_balances(balance, hold)),
        _ => Err(ResponseError::MissingBalance),
    }
}

pub fn parse_trade(raw: &[u8], coin: &str, price: &str) -> Result<TradeConfirmation, ResponseError> {
    let ret = open_envelope(raw)?;
    let order_id = match ret.get("order_id") {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => NA.to_string(),
    };
    Ok(TradeConfirmation {
        coin: coin.to_string(),
        price: price.to_string(),
        remaining: display_text(ret.get(&remain_key(coin))),
        order_id,
        client_order_id: display_text(ret.get("client_order_id")),
    })
}

pub fn parse_cancel(raw: &[u8]) -> Result<CancelConfirmation, ResponseError> {
    let ret = open_envelope(raw)?;
    Ok(CancelConfirmation {
        coin: extract_coin_name(ret.get("pair").and_then(Value::as_str)),
        client_order_id: display_text(ret.get("client_order_id")),
        order_type: display_text(ret.get("type")),
    })
}

/// Pick the shape-specific parser for the command that was sent.
pub fn parse(raw: &[u8], kind: &ResponseKind) -> Result<ParsedData, ResponseError> {
    Ok(match kind {
        ResponseKind::Orders { coin } => ParsedData::Orders(parse_orders(raw, coin.as_deref())?),
        ResponseKind::Balances => ParsedData::Balances(parse_balances(raw)?),
        ResponseKind::Trade { coin, price } => ParsedData::Trade(parse_trade(raw, coin, price)?),
        ResponseKind::Cancel => ParsedData::Cancel(parse_cancel(raw)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bytes(v: Value) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    #[test]
    fn coin_name_extraction() {
        assert_eq!(extract_coin_name(Some("btc_idr")), "btc");
        assert_eq!(extract_coin_name(Some("btc_usdt")), "btc_usdt");
        assert_eq!(extract_coin_name(Some("btcidr")), "btcidr");
        assert_eq!(extract_coin_name(Some("btc_idrx")), "btc_idrx");
        assert_eq!(extract_coin_name(None), "N/A");
    }

    #[test]
    fn tolerant_numeric_coercion() {
        assert_eq!(coerce_f64(&json!("1.5")), 1.5);
        assert_eq!(coerce_f64(&json!(2)), 2.0);
        assert_eq!(coerce_f64(&json!(0.25)), 0.25);
        assert_eq!(coerce_f64(&json!("abc")), 0.0);
        assert_eq!(coerce_f64(&json!(null)), 0.0);
    }

    #[test]
    fn api_error_is_reported_verbatim() {
        let err = parse(br#"{"success":0,"error":"Invalid signature"}"#, &ResponseKind::Balances)
            .unwrap_err();
        assert_eq!(err.to_string(), "API Error: Invalid signature");
    }

    #[test]
    fn api_error_without_message() {
        let err = parse_cancel(br#"{"success":0}"#).unwrap_err();
        assert_eq!(err, ResponseError::UnknownApi);
        assert_eq!(err.to_string(), "Unknown API error");
    }

    #[test]
    fn envelope_protocol_errors() {
        assert!(matches!(parse_cancel(b"not json").unwrap_err(), ResponseError::Json(_)));
        assert_eq!(parse_cancel(br#"{"return":{}}"#).unwrap_err(), ResponseError::InvalidSuccess);
        assert_eq!(parse_cancel(br#"{"success":"1"}"#).unwrap_err(), ResponseError::InvalidSuccess);
        assert_eq!(parse_cancel(br#"{"success":1}"#).unwrap_err(), ResponseError::MissingReturn);
        assert_eq!(
            parse_orders(br#"{"success":1,"return":{}}"#, None).unwrap_err(),
            ResponseError::MissingField("orders")
        );
        assert_eq!(
            parse_orders(br#"{"success":1,"return":{"orders":"x"}}"#, None).unwrap_err(),
            ResponseError::UnknownOrdersFormat
        );
        assert_eq!(
            parse_balances(br#"{"success":1,"return":{"balance":{}}}"#).unwrap_err(),
            ResponseError::MissingBalance
        );
    }

    #[test]
    fn multi_pair_orders_use_per_pair_remain_key() {
        let raw = bytes(json!({"success":1,"return":{"orders":{
            "btc_idr":[{"price":"100000","client_order_id":"cid1","remain_btc":"0.1"}],
            "eth_idr":[{"price":"5000","client_order_id":"cid2","remain_eth":"2"}],
            "bad_idr":{"not":"an array"}
        }}}));
        let rows = parse_orders(&raw, None).unwrap();
        assert_eq!(
            rows,
            vec![
                OrderRow { coin: "btc".into(), price: "100000".into(), remaining: "0.1".into(), client_order_id: "cid1".into() },
                OrderRow { coin: "eth".into(), price: "5000".into(), remaining: "2".into(), client_order_id: "cid2".into() },
            ]
        );
    }

    #[test]
    fn single_and_multi_pair_shapes_normalize_identically() {
        let order = json!({"price":"100000","client_order_id":"cid1","remain_btc":"0.1"});
        let multi = bytes(json!({"success":1,"return":{"orders":{"btc_idr":[order.clone()]}}}));
        let single = bytes(json!({"success":1,"return":{"orders":[order]}}));
        assert_eq!(
            parse_orders(&multi, None).unwrap(),
            parse_orders(&single, Some("btc")).unwrap()
        );
    }

    #[test]
    fn single_pair_without_hint_has_no_coin() {
        let raw = bytes(json!({"success":1,"return":{"orders":[{"price":"1","remain_btc":"3"}]}}));
        let rows = parse_orders(&raw, None).unwrap();
        assert_eq!(rows[0].coin, "N/A");
        assert_eq!(rows[0].remaining, "N/A");
        assert_eq!(rows[0].client_order_id, "N/A");
    }

    #[test]
    fn balance_merge() {
        let raw = bytes(json!({"success":1,"return":{
            "balance":{"btc":"0.5"},
            "balance_hold":{"btc":"0.0","eth":"1.2"}
        }}));
        assert_eq!(
            parse_balances(&raw).unwrap(),
            vec![
                BalanceRow { asset: "btc".into(), available: 0.5, hold: 0.0 },
                BalanceRow { asset: "eth".into(), available: 0.0, hold: 1.2 },
            ]
        );
    }

    #[test]
    fn zero_balances_are_suppressed() {
        let raw = bytes(json!({"success":1,"return":{
            "balance":{"idr":0,"btc":"0.00000000"},
            "balance_hold":{"idr":"0","xrp":0.0}
        }}));
        assert!(parse_balances(&raw).unwrap().is_empty());
    }

    #[test]
    fn mixed_numeric_types_in_balances() {
        let raw = bytes(json!({"success":1,"return":{
            "balance":{"idr":150000,"doge":"12.5"},
            "balance_hold":{"idr":2500.75}
        }}));
        assert_eq!(
            parse_balances(&raw).unwrap(),
            vec![
                BalanceRow { asset: "idr".into(), available: 150000.0, hold: 2500.75 },
                BalanceRow { asset: "doge".into(), available: 12.5, hold: 0.0 },
            ]
        );
    }

    #[test]
    fn trade_with_integer_order_id() {
        let raw = bytes(json!({"success":1,"return":{
            "remain_doge":"5.0","order_id":123456789,"client_order_id":"dogeidr-1-idX"
        }}));
        let t = parse_trade(&raw, "doge", "1500").unwrap();
        assert_eq!(
            t,
            TradeConfirmation {
                coin: "doge".into(),
                price: "1500".into(),
                remaining: "5.0".into(),
                order_id: "123456789".into(),
                client_order_id: "dogeidr-1-idX".into(),
            }
        );
    }

    #[test]
    fn trade_with_string_or_missing_order_id() {
        let raw = bytes(json!({"success":1,"return":{"order_id":"A-77"}}));
        let t = parse_trade(&raw, "btc", "1").unwrap();
        assert_eq!(t.order_id, "A-77");
        assert_eq!(t.remaining, "N/A");
        assert_eq!(t.client_order_id, "N/A");

        let raw = bytes(json!({"success":1,"return":{}}));
        assert_eq!(parse_trade(&raw, "btc", "1").unwrap().order_id, "N/A");
    }

    #[test]
    fn cancel_confirmation() {
        let raw = bytes(json!({"success":1,"return":{
            "pair":"btc_idr","client_order_id":"btcidr-1-idX","type":"buy"
        }}));
        assert_eq!(
            parse_cancel(&raw).unwrap(),
            CancelConfirmation { coin: "btc".into(), client_order_id: "btcidr-1-idX".into(), order_type: "buy".into() }
        );

        let raw = bytes(json!({"success":1,"return":{}}));
        let c = parse_cancel(&raw).unwrap();
        assert_eq!(c.coin, "N/A");
        assert_eq!(c.order_type, "N/A");
    }
}
