use anyhow::{bail, Result};
use vici_conn::config::load_config;
use vici_conn::report::render_verify;
use vici_conn::verify::build_verify_report;

use crate::cli::{OutputFormat, VerifyArgs};

pub fn run_verify(args: VerifyArgs, verbose: bool) -> Result<()> {
    let config = load_config(&args.file)?;
    let report = build_verify_report(&config);

    match args.format {
        OutputFormat::Text => println!("{}", render_verify(&report, verbose)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.errors > 0 {
        bail!("verify failed: {} errors", report.errors);
    }
    if args.strict && report.warnings > 0 {
        bail!("verify failed in strict mode: {} warnings", report.warnings);
    }
    Ok(())
}
