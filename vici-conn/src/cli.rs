use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "vici-conn")]
#[command(about = "Build and check strongSwan VICI load-conn requests")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Render the requests a TOML connection file turns into.
    Render(RenderArgs),
    /// Check a TOML connection file for local inconsistencies.
    Verify(VerifyArgs),
    /// Decode a rendered load-conn JSON message back into connections.
    Decode(DecodeArgs),
    /// Encode DER SubjectPublicKeyInfo files as PUBLIC KEY PEM blocks.
    PemKey(PemKeyArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print element counts only.
    #[arg(long)]
    pub summary: bool,
    /// Write the load-conn message as JSON to this path.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Fail on warnings as well as errors.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct PemKeyArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
