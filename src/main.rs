#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod error;
mod fetch;
mod notify;
mod parse;
mod watch;

use std::{env, process};

use clap::{error::ErrorKind, Parser};

pub use error::Result;

/// Watches a Grocery Gateway postal code for newly opened delivery
/// windows and texts a phone number when one appears.
#[derive(Debug, Parser)]
#[command(name = "slotwatch")]
struct Args {
    /// Phone number to send to (ex +12349115678)
    #[arg(long)]
    phone: String,
    /// Postal code to check (ex m5v3v9)
    #[arg(long)]
    postal: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    pretty_env_logger::formatted_builder()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            process::exit(0);
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };
    let client = fetch::make_client();
    log::info!(
        "watching postal code {} every {:?}",
        args.postal,
        watch::POLL_INTERVAL
    );
    watch::run(&client, &args.postal, &args.phone).await;
}
