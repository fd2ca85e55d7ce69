//! # CLI Interface
//!
//! Defines the command-line argument structure for `hbt` using `clap`
//! derive. Every subcommand reads its input from arguments, a file, or
//! stdin and writes its result to stdout.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// HBT wallet core tools.
///
/// Extracts passport MRZ data from OCR text and produces, checks, and
/// replays the QR payloads of a wallet-to-wallet transfer.
#[derive(Parser, Debug)]
#[command(
    name = "hbt",
    about = "HBT wallet core: passport MRZ and QR transfer tools",
    version,
    propagate_version = true
)]
pub struct HbtCli {
    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "HBT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `hbt` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a passport MRZ from OCR text and print it as JSON.
    Mrz(MrzArgs),
    /// Print the ICAO 9303 check digit of a string.
    CheckDigit(CheckDigitArgs),
    /// Build the QR payload a receiver shows to request tokens.
    Pending(PendingArgs),
    /// Validate and decode a scanned QR payload.
    Decode(DecodeArgs),
    /// Run a full transfer between two in-process wallets.
    Simulate(SimulateArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `mrz` subcommand.
#[derive(Parser, Debug)]
pub struct MrzArgs {
    /// File holding the OCR text. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Require the holder line as well as the document line.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `check-digit` subcommand.
#[derive(Parser, Debug)]
pub struct CheckDigitArgs {
    /// Characters from the MRZ alphabet: `0-9`, `A-Z`, `<`.
    pub data: String,
}

/// Arguments for the `pending` subcommand.
#[derive(Parser, Debug)]
pub struct PendingArgs {
    /// Identity of the receiving wallet.
    #[arg(long, env = "HBT_IDENTITY")]
    pub destination: String,

    /// Amount of tokens to request.
    #[arg(long)]
    pub amount: String,

    /// Unix time in milliseconds. Defaults to now.
    #[arg(long)]
    pub datetime: Option<i64>,
}

/// Which message a payload should hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PayloadKind {
    Pending,
    Complete,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Message kind the payload must match.
    #[arg(long, value_enum)]
    pub kind: PayloadKind,

    /// File holding the payload. Reads stdin when omitted.
    pub file: Option<PathBuf>,
}

/// Arguments for the `simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Amount the receiver requests.
    #[arg(long, default_value = "10.5")]
    pub amount: String,

    /// Identity of the receiving wallet.
    #[arg(long, default_value = "alice")]
    pub receiver: String,

    /// Identity of the sending wallet.
    #[arg(long, env = "HBT_IDENTITY", default_value = "bob")]
    pub sender: String,
}
