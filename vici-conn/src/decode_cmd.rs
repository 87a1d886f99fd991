use anyhow::{Context, Result};
use vici_conn::decode::connections_from_message;
use vici_conn::model::{AuthConfig, IkeConfig};
use vici_message::parse_file;

use crate::cli::DecodeArgs;

pub fn run_decode(args: DecodeArgs) -> Result<()> {
    let msg = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let connections = connections_from_message(&msg)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    println!("connections={}", connections.len());
    for (name, conn) in &connections {
        println!("{}", describe(name, conn));
    }
    Ok(())
}

fn describe(name: &str, conn: &IkeConfig) -> String {
    let children: Vec<&str> = conn.children.keys().map(String::as_str).collect();
    format!(
        "- {name} version={} local={} remote={} children={}",
        conn.version,
        endpoint(&conn.local),
        endpoint(&conn.remote),
        if children.is_empty() {
            "none".to_string()
        } else {
            children.join(",")
        }
    )
}

fn endpoint(auth: &AuthConfig) -> String {
    format!("{}({})", auth.id, auth.auth)
}
