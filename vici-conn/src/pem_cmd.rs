use std::fs;

use anyhow::{Context, Result};
use vici_conn::credentials::PublicKey;

use crate::cli::PemKeyArgs;

pub fn run_pem_key(args: PemKeyArgs) -> Result<()> {
    for path in &args.files {
        let der = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let pem = PublicKey::Spki(der)
            .to_pem()
            .with_context(|| format!("failed to encode {}", path.display()))?;
        print!("{pem}");
    }
    Ok(())
}
