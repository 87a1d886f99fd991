use anyhow::Result;
use clap::Parser;

mod cli;
mod decode_cmd;
mod path_guard;
mod pem_cmd;
mod render_cmd;
mod verify_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Render(args) => render_cmd::run_render(args),
        Command::Verify(args) => verify_cmd::run_verify(args, cli.verbose),
        Command::Decode(args) => decode_cmd::run_decode(args),
        Command::PemKey(args) => pem_cmd::run_pem_key(args),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "vici_conn=debug" } else { "vici_conn=warn" };
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new(default),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}
