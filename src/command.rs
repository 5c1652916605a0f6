// ===============================
// src/command.rs (Command -> canonical params)
// ===============================
use chrono::{DateTime, Utc};

use crate::domain::{Command, PreparedRequest, RequestParams, ResponseKind};

/// Added to `timestamp` to get the `recvWindow` bound (~49,900 s).
pub const RECV_WINDOW_OFFSET_MS: i64 = 49_900_000;

/// `<coin>idr-<unix_seconds>-idX`. Dua order koin yang sama dalam detik yang
/// sama akan bentrok.
pub fn client_order_id(coin: &str, now: DateTime<Utc>) -> String {
    format!("{}idr-{}-idX", coin, now.timestamp())
}

fn pair_of(coin: &str) -> String {
    format!("{coin}_idr")
}

/// Build the canonical field list for `cmd`. Field order is fixed per
/// command because the joined string is the signed payload.
pub fn build(cmd: &Command, now: DateTime<Utc>) -> PreparedRequest {
    let ts = now.timestamp_millis();
    let recv_window = ts + RECV_WINDOW_OFFSET_MS;

    let method = match cmd {
        Command::OpenAll | Command::OpenPair { .. } => "openOrders",
        Command::Buy { .. } | Command::Sell { .. } => "trade",
        Command::Cancel { .. } => "cancelByClientOrderId",
        Command::GetInfo => "getInfo",
    };

    let mut params = RequestParams::new();
    params
        .push("method", method)
        .push("timestamp", ts.to_string())
        .push("recvWindow", recv_window.to_string());

    let kind = match cmd {
        Command::OpenAll => ResponseKind::Orders { coin: None },
        Command::OpenPair { coin } => {
            params.push("pair", pair_of(coin));
            ResponseKind::Orders { coin: Some(coin.clone()) }
        }
        Command::Buy { coin, price, idr } => {
            params
                .push("pair", pair_of(coin))
                .push("type", "buy")
                .push("price", price.as_str())
                .push("idr", idr.as_str())
                .push("client_order_id", client_order_id(coin, now));
            ResponseKind::Trade { coin: coin.clone(), price: price.clone() }
        }
        Command::Sell { coin, price, quantity } => {
            // quirk API: quantity dikirim sebagai `idr=` dan juga `<coin>=`
            params
                .push("pair", pair_of(coin))
                .push("type", "sell")
                .push("price", price.as_str())
                .push("idr", quantity.as_str())
                .push("client_order_id", client_order_id(coin, now))
                .push(coin.as_str(), quantity.as_str());
            ResponseKind::Trade { coin: coin.clone(), price: price.clone() }
        }
        Command::Cancel { client_order_id } => {
            params.push("client_order_id", client_order_id.as_str());
            ResponseKind::Cancel
        }
        Command::GetInfo => ResponseKind::Balances,
    };

    PreparedRequest { params, kind }
}
