// ===============================
// src/cli.rs
// ===============================
use clap::{Parser, Subcommand};

use crate::domain::Command;

pub const BANNER: &str = concat!(
    " _   ___   _      __    ___   _  \n",
    "| | | | \\ \\ \\_/  / /\\  | |_) | | \n",
    "|_| |_|_/ /_/ \\ /_/--\\ |_|   |_| \n",
    "indodax api v.001\n",
);

pub const ABOUT_TEXT: &str = "This program uses the Indodax REST API, a proof of concept (POC) \
demonstrating that we can create and utilize a REST API.\n\n\
If you'd like to give a gift, please send some DOGE to my wallet \
\"D6ckQMfcWSosY7J4rNQkY1rKX1pQTmNuTt\"\n\n\
Or if you're an Indodax user, you can send it using my username \"idban\" \
without the quotation marks.\n";

pub fn usage(bin: &str) -> String {
    format!(
        "Usage: \t{bin} <openallorder> or <open>\n\
         \t{bin} <openorder> <coin>\n\
         \t{bin} <buy> <coin> <coin_price> <spend_idr>\n\
         \t{bin} <sell> <coin> <coin_price> <quantity>\n\
         \t{bin} <cancel> <orderid>\n\
         \t{bin} getInfo\n\
         \t{bin} about\n"
    )
}

#[derive(Debug, Parser)]
#[command(name = "indodax_cli", about = "Indodax private API client", disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List open orders on every pair
    #[command(name = "open", alias = "openallorder")]
    Open,
    /// List open orders on <coin>_idr
    #[command(name = "openorder")]
    OpenOrder { coin: String },
    /// Buy <coin> at <price>, spending <idr_amount> IDR
    Buy { coin: String, price: String, idr_amount: String },
    /// Sell <quantity> <coin> at <price>
    Sell { coin: String, price: String, quantity: String },
    /// Cancel an order by client order id
    Cancel { client_order_id: String },
    /// Show non-zero balances
    #[command(name = "getinfo", alias = "getInfo")]
    GetInfo,
    /// About this tool
    About,
}

/// What `main` should do after parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    About,
    Request(Command),
}

impl From<CliCommand> for Action {
    fn from(c: CliCommand) -> Self {
        match c {
            CliCommand::Open => Action::Request(Command::OpenAll),
            CliCommand::OpenOrder { coin } => Action::Request(Command::OpenPair { coin }),
            CliCommand::Buy { coin, price, idr_amount } => {
                Action::Request(Command::Buy { coin, price, idr: idr_amount })
            }
            CliCommand::Sell { coin, price, quantity } => {
                Action::Request(Command::Sell { coin, price, quantity })
            }
            CliCommand::Cancel { client_order_id } => Action::Request(Command::Cancel { client_order_id }),
            CliCommand::GetInfo => Action::Request(Command::GetInfo),
            CliCommand::About => Action::About,
        }
    }
}
