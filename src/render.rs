// ===============================
// src/render.rs (fixed-width tables)
// ===============================
use std::fmt::Write;

use crate::domain::{BalanceRow, CancelConfirmation, OrderRow, ParsedData, TradeConfirmation};

pub const NO_BALANCES_ROW: &str = "| No balances found with non-zero values |";

const ORDERS_COLS: [(&str, usize); 4] =
    [("Coin Name", 10), ("Price", 15), ("Open/Remain Order", 17), ("Client Order ID", 27)];
const BALANCE_COLS: [(&str, usize); 3] =
    [("Asset", 10), ("Available Balance", 17), ("On Hold Balance", 17)];
const TRADE_COLS: [(&str, usize); 4] =
    [("Coin Name", 10), ("Price", 15), ("Remaining Amount", 17), ("Client Order ID", 27)];
const CANCEL_COLS: [(&str, usize); 4] =
    [("Coin Name", 10), ("Status", 10), ("Client Order ID", 27), ("Type", 4)];

/// Column layout: each cell is left-aligned and padded to its width, borders
/// are `width + 2` dashes.
struct Table<'a> {
    cols: &'a [(&'a str, usize)],
    out: String,
}

impl<'a> Table<'a> {
    fn new(cols: &'a [(&'a str, usize)]) -> Self {
        let mut t = Self { cols, out: String::new() };
        t.border();
        let header: Vec<&str> = cols.iter().map(|(h, _)| *h).collect();
        t.row(&header);
        t.border();
        t
    }

    fn border(&mut self) {
        self.out.push('+');
        for (_, w) in self.cols {
            self.out.push_str(&"-".repeat(w + 2));
            self.out.push('+');
        }
        self.out.push('\n');
    }

    fn row(&mut self, cells: &[&str]) {
        self.out.push('|');
        for ((_, w), cell) in self.cols.iter().zip(cells) {
            let _ = write!(self.out, " {:<width$} |", cell, width = *w);
        }
        self.out.push('\n');
    }

    fn raw_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        self.border();
        self.out
    }
}

/// Drop trailing zero decimals, then the point itself if nothing is left
/// after it. Strings without a decimal point are returned as-is.
pub fn trim_decimal(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let t = s.trim_end_matches('0');
    t.strip_suffix('.').unwrap_or(t).to_string()
}

pub fn format_amount(v: f64) -> String {
    trim_decimal(&format!("{v:.8}"))
}

pub fn orders_table(rows: &[OrderRow]) -> String {
    let mut t = Table::new(&ORDERS_COLS);
    for r in rows {
        t.row(&[&r.coin, &r.price, &r.remaining, &r.client_order_id]);
    }
    t.finish()
}

pub fn balances_table(rows: &[BalanceRow]) -> String {
    let mut t = Table::new(&BALANCE_COLS);
    if rows.is_empty() {
        t.raw_line(NO_BALANCES_ROW);
    }
    for r in rows {
        t.row(&[&r.asset, &format_amount(r.available), &format_amount(r.hold)]);
    }
    t.finish()
}

pub fn trade_table(trade: &TradeConfirmation) -> String {
    let mut t = Table::new(&TRADE_COLS);
    t.row(&[&trade.coin, &trade.price, &trade.remaining, &trade.client_order_id]);
    t.finish()
}

pub fn cancel_table(cancel: &CancelConfirmation) -> String {
    let mut t = Table::new(&CANCEL_COLS);
    t.row(&[&cancel.coin, "Cancelled", &cancel.client_order_id, &cancel.order_type]);
    t.finish()
}

pub fn render(data: &ParsedData) -> String {
    match data {
        ParsedData::Orders(rows) => orders_table(rows),
        ParsedData::Balances(rows) => balances_table(rows),
        ParsedData::Trade(trade) => trade_table(trade),
        ParsedData::Cancel(cancel) => cancel_table(cancel),
    }
}
