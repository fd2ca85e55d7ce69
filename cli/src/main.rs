// Copyright (c) 2026 DEDIS HBT Team. MIT License.
// See LICENSE for details.

//! # HBT Command-Line Tool
//!
//! Entry point for the `hbt` binary. Parses CLI arguments, initializes
//! logging, and dispatches to one subcommand:
//!
//! - `mrz`: extract a passport MRZ from OCR text
//! - `check-digit`: compute an ICAO 9303 check digit
//! - `pending`: build a receiver's QR payload
//! - `decode`: validate and decode a scanned QR payload
//! - `simulate`: run a full two-wallet transfer in process
//! - `version`: print build version information

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use hbt_protocol::config::DEFAULT_LOG_FILTER;
use hbt_protocol::handshake::{
    MemoryLedger, ScanOutcome, TransactionState, TransactionStateManager, WalletSession,
};
use hbt_protocol::mrz;
use hbt_protocol::transaction::{
    parse_amount, CompleteTransaction, PendingTransaction, WireCodec, WireMessage,
};

use cli::{Commands, HbtCli, PayloadKind};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = HbtCli::parse();
    logging::init_logging(DEFAULT_LOG_FILTER, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Mrz(args) => run_mrz(args),
        Commands::CheckDigit(args) => run_check_digit(args),
        Commands::Pending(args) => run_pending(args),
        Commands::Decode(args) => run_decode(args),
        Commands::Simulate(args) => run_simulate(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Reads the whole of `path`, or stdin when no path was given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn run_mrz(args: cli::MrzArgs) -> Result<()> {
    let raw = read_input(args.file.as_deref())?;
    let text = mrz::normalize_ocr(&raw);

    let info = if args.strict {
        mrz::extract_full(&text)
    } else {
        mrz::extract(&text)
    }
    .context("no valid passport MRZ in input")?;

    tracing::info!(number = info.number(), "passport MRZ extracted");
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn run_check_digit(args: cli::CheckDigitArgs) -> Result<()> {
    match mrz::check_digit(&args.data) {
        Some(digit) => {
            println!("{digit}");
            Ok(())
        }
        None => bail!("{:?} contains characters outside the MRZ alphabet", args.data),
    }
}

fn run_pending(args: cli::PendingArgs) -> Result<()> {
    let amount = parse_amount(&args.amount)?;
    let pending = match args.datetime {
        Some(datetime) => PendingTransaction::new(args.destination, amount, datetime),
        None => PendingTransaction::now(args.destination, amount),
    };

    let codec = WireCodec::new()?;
    println!("{}", codec.encode(&pending)?);
    Ok(())
}

/// Decodes `payload` as `T` and re-encodes it in canonical form.
fn reencode<T: WireMessage>(codec: &WireCodec, payload: &str) -> Result<String> {
    let message: T = codec
        .decode(payload.trim())
        .context("invalid transaction data")?;
    Ok(codec.encode(&message)?)
}

fn run_decode(args: cli::DecodeArgs) -> Result<()> {
    let payload = read_input(args.file.as_deref())?;
    let codec = WireCodec::new()?;

    let canonical = match args.kind {
        PayloadKind::Pending => reencode::<PendingTransaction>(&codec, &payload)?,
        PayloadKind::Complete => reencode::<CompleteTransaction>(&codec, &payload)?,
    };
    println!("{canonical}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Logs every state a device publishes until its manager is dropped.
fn observe(device: String, mut rx: watch::Receiver<TransactionState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            tracing::info!(device = %device, %state, "state changed");
        }
    })
}

async fn run_simulate(args: cli::SimulateArgs) -> Result<()> {
    let amount = parse_amount(&args.amount)?;
    let codec = WireCodec::new()?;

    let receiver_ledger = Arc::new(MemoryLedger::new());
    let sender_ledger = Arc::new(MemoryLedger::new());

    let observers;
    {
        let receiver = WalletSession::new(
            args.receiver.as_str(),
            Arc::new(TransactionStateManager::with_ledger(receiver_ledger.clone())),
            codec.clone(),
        );
        let sender = WalletSession::new(
            args.sender.as_str(),
            Arc::new(TransactionStateManager::with_ledger(sender_ledger.clone())),
            codec,
        );
        observers = [
            observe(args.receiver.clone(), receiver.manager().subscribe()),
            observe(args.sender.clone(), sender.manager().subscribe()),
        ];

        run_handshake(&receiver, &sender, amount).await?;
    }

    // Both managers are gone, so the observers drain and stop.
    for observer in observers {
        observer.await.context("state observer panicked")?;
    }

    let ledgers = serde_json::json!({
        "receiver": { "identity": args.receiver, "entries": receiver_ledger.entries() },
        "sender": { "identity": args.sender, "entries": sender_ledger.entries() },
    });
    println!("{}", serde_json::to_string_pretty(&ledgers)?);
    Ok(())
}

/// The receiver/sender exchange, with QR codes passed as strings.
async fn run_handshake(receiver: &WalletSession, sender: &WalletSession, amount: f64) -> Result<()> {
    receiver.request_payment(amount)?;
    sender.start_sending()?;
    tokio::task::yield_now().await;

    let request = receiver
        .qr_payload()?
        .context("receiver is not showing a payment request")?;
    tracing::info!(payload = %request, "sender scans request");
    if let ScanOutcome::Ignored = sender.on_scan(&request)? {
        bail!("sender ignored the payment request");
    }
    receiver.confirm_shown()?;
    tokio::task::yield_now().await;

    let completion = sender
        .qr_payload()?
        .context("sender is not showing a completed transaction")?;
    tracing::info!(payload = %completion, "receiver scans completion");
    if let ScanOutcome::Ignored = receiver.on_scan(&completion)? {
        bail!("receiver ignored the completed transaction");
    }
    sender.confirm_shown()?;
    tokio::task::yield_now().await;

    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("hbt       {}", env!("CARGO_PKG_VERSION"));
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PXABCDUMMY<<BOB<SMITH<<<<<<<<<<<<<<<<<<<<<<<").unwrap();
        writeln!(file, "A1234567<6ABC0102030X0405063<<<<<<<<<<<<<<<0").unwrap();

        let raw = read_input(Some(file.path())).unwrap();
        let info = mrz::extract_full(&mrz::normalize_ocr(&raw)).unwrap();
        assert_eq!(info.surname(), Some("DUMMY"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("absent.txt"))).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn decode_canonicalizes_payload() {
        let codec = WireCodec::new().unwrap();
        let out = reencode::<PendingTransaction>(
            &codec,
            " {\"datetime\": 104320, \"destination\": \"marc\", \"amount\": 10.5}\n",
        )
        .unwrap();
        assert_eq!(out, r#"{"amount":10.5,"datetime":104320,"destination":"marc"}"#);
    }

    #[tokio::test]
    async fn simulated_handshake_fills_both_ledgers() {
        let codec = WireCodec::new().unwrap();
        let receiver_ledger = Arc::new(MemoryLedger::new());
        let sender_ledger = Arc::new(MemoryLedger::new());
        let receiver = WalletSession::new(
            "alice",
            Arc::new(TransactionStateManager::with_ledger(receiver_ledger.clone())),
            codec.clone(),
        );
        let sender = WalletSession::new(
            "bob",
            Arc::new(TransactionStateManager::with_ledger(sender_ledger.clone())),
            codec,
        );

        run_handshake(&receiver, &sender, 3.0).await.unwrap();

        assert_eq!(receiver_ledger.balance(), 3.0);
        assert_eq!(sender_ledger.balance(), -3.0);
        assert_eq!(sender_ledger.entries()[0].transaction.source, "bob");
    }
}
