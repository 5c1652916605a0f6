// ===============================
// src/main.rs
// ===============================
/*
 cd /home/kukuhtw/rust/indodax_cli

 # indodax_config.txt berisi dua baris: key=... dan secret=...
 cargo run -- getinfo
 cargo run -- openorder btc
 RUST_LOG=debug cargo run -- sell doge 1600 5

*/
/*
=============================================================================
Project : indodax_cli — signed command-line client for the Indodax private API
Module  : main.rs
Version : 0.1.0
Author  : Kukuh Tripamungkas Wicaksono (Kukuh TW)
Email   : kukuhtw@gmail.com
WhatsApp: https://wa.me/628129893706
LinkedIn: https://id.linkedin.com/in/kukuhtw
License : MIT (see LICENSE)

Summary : Signs private API calls with HMAC-SHA512, posts them to the
          exchange, and prints open orders, balances, trade and cancel
          confirmations as fixed-width tables.

(c) 2025 Kukuh TW. All rights reserved where applicable.
=============================================================================
*/
mod cli;
mod command;      // Command -> canonical params
mod config;
mod dispatch;
mod domain;
mod gateway;      // HTTPS transport (reqwest)
mod parser;
mod render;
mod signer;       // HMAC-SHA512


use std::process::ExitCode;

use chrono::Utc;
use clap::{error::ErrorKind, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Action, Cli, ABOUT_TEXT, BANNER};
use crate::config::{ConfigError, Settings};
use crate::dispatch::DispatchError;
use crate::gateway::{HttpGateway, Transport, TransportError};

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;

fn bin_name() -> String {
    std::env::args().next().unwrap_or_else(|| "indodax_cli".to_string())
}

fn usage_error(msg: Option<&str>) -> u8 {
    println!("{BANNER}");
    if let Some(m) = msg {
        eprintln!("{m}");
    }
    eprint!("{}", cli::usage(&bin_name()));
    EXIT_FAILURE
}

/// Print the outcome of a finished round trip. Error API maupun transport
/// tetap dianggap request selesai: exit 0.
fn report(outcome: &Result<String, DispatchError>) -> u8 {
    match outcome {
        Ok(table) => print!("{table}"),
        Err(e @ DispatchError::Transport(_)) => eprintln!("\n{e}"),
        Err(e) => eprintln!("{e}"),
    }
    EXIT_OK
}

/// Whole invocation minus process setup. `load` is only called once the
/// arguments are valid and the command needs the network.
async fn run<L, C, T>(parsed: Result<Cli, clap::Error>, load: L, connect: C) -> u8
where
    L: FnOnce() -> Result<Settings, ConfigError>,
    C: FnOnce(&Settings) -> Result<T, TransportError>,
    T: Transport,
{
    let cli = match parsed {
        Ok(c) => c,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return EXIT_OK;
        }
        Err(e) => {
            debug!(kind = ?e.kind(), "argument parse failed");
            return usage_error(Some("Invalid or insufficient arguments"));
        }
    };
    let Some(sub) = cli.command else {
        return usage_error(None);
    };

    let cmd = match Action::from(sub) {
        Action::About => {
            println!("{BANNER}");
            print!("{ABOUT_TEXT}");
            // sengaja exit 1 walau bukan error
            return EXIT_FAILURE;
        }
        Action::Request(cmd) => cmd,
    };

    // ---- Config & credentials ----
    let settings = match load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_FAILURE;
        }
    };
    debug!(config = %settings.config_path, endpoint = %settings.tapi_url, "config loaded");

    let transport = match connect(&settings) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_FAILURE;
        }
    };

    println!("{BANNER}");
    let req = command::build(&cmd, Utc::now());
    report(&dispatch::execute(&req, &settings.credentials, &transport).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // ---- Logging (stderr; stdout khusus tabel) ----
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let code = run(Cli::try_parse(), config::load, |s: &Settings| {
        HttpGateway::new(s.tapi_url.clone())
    })
    .await;
    ExitCode::from(code)
}
