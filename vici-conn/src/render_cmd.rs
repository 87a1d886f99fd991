use anyhow::{Context, Result};
use vici_conn::client::{LOAD_CONN, LOAD_SHARED};
use vici_conn::config::load_config;
use vici_conn::encode::{connections_message, shared_message};
use vici_conn::report::{render_message, render_summary};
use vici_message::{format_json, write_file, Message};

use crate::cli::{OutputFormat, RenderArgs};
use crate::path_guard::ensure_not_input;

pub fn run_render(args: RenderArgs) -> Result<()> {
    let config = load_config(&args.file)?;
    let conns = connections_message(&config.connections)
        .with_context(|| format!("failed to build {LOAD_CONN} request"))?;

    let mut secrets = Vec::with_capacity(config.secrets.len());
    for (name, secret) in &config.secrets {
        let msg = shared_message(secret)
            .with_context(|| format!("failed to build {LOAD_SHARED} request for '{name}'"))?;
        secrets.push((name.as_str(), msg));
    }

    if let Some(out_path) = &args.output {
        ensure_not_input(out_path, &args.file)?;
        write_file(&conns, out_path)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    if args.summary {
        println!("{}", render_summary(LOAD_CONN, &conns));
        for (name, msg) in &secrets {
            println!("{}", render_summary(&format!("{LOAD_SHARED} {name}"), msg));
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => {
            println!("{LOAD_CONN}");
            println!("{}", render_message(&conns));
            for (name, msg) in &secrets {
                println!();
                println!("{LOAD_SHARED} {name}");
                println!("{}", render_message(&redacted(msg)));
            }
        }
        OutputFormat::Json => {
            if !secrets.is_empty() {
                eprintln!(
                    "warning: {} shared secret(s) are not included in JSON output",
                    secrets.len()
                );
            }
            println!("{}", format_json(&conns));
        }
    }
    Ok(())
}

fn redacted(msg: &Message) -> Message {
    let mut out = msg.clone();
    if out.contains_key("data") {
        out.insert_value("data", "<redacted>");
    }
    out
}
