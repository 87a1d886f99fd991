//! Optional local consistency checks over a configuration file.
//!
//! The daemon stays the authority on what it accepts; nothing here runs as
//! part of [`crate::client::Client::load_conn`].

use serde::Serialize;

use crate::config::ConfigFile;
use crate::model::{AuthConfig, AuthMethod, IkeConfig, SecretKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerifySeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyIssue {
    pub severity: VerifySeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub connections: usize,
    pub secrets: usize,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<VerifyIssue>,
}

pub fn build_verify_report(config: &ConfigFile) -> VerifyReport {
    let mut issues = Vec::new();
    for (name, conn) in &config.connections {
        if name.is_empty() {
            issues.push(err("empty_connection_name", "connection name is empty"));
        }
        issues.extend(connection_issues(name, conn));
        issues.extend(auth_issues(name, "local-1", &conn.local));
        issues.extend(auth_issues(name, "remote-1", &conn.remote));
        issues.extend(secret_issues(name, conn, config));
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == VerifySeverity::Error)
        .count();
    let warnings = issues
        .iter()
        .filter(|i| i.severity == VerifySeverity::Warning)
        .count();

    VerifyReport {
        connections: config.connections.len(),
        secrets: config.secrets.len(),
        errors,
        warnings,
        issues,
    }
}

pub fn render_verify_text(report: &VerifyReport, verbose: bool) -> String {
    let mut out = Vec::new();
    if verbose {
        out.push(format!(
            "verify connections={} secrets={}",
            report.connections, report.secrets
        ));
    }
    out.push(format!(
        "result errors={} warnings={}",
        report.errors, report.warnings
    ));
    out.push("issues".to_string());
    if report.issues.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for issue in &report.issues {
        let sev = match issue.severity {
            VerifySeverity::Error => "error",
            VerifySeverity::Warning => "warning",
        };
        out.push(format!("- [{sev}] {}: {}", issue.code, issue.message));
    }
    out.join("\n")
}

fn connection_issues(name: &str, conn: &IkeConfig) -> Vec<VerifyIssue> {
    let mut out = Vec::new();
    if conn.local_addrs.is_empty() {
        out.push(warn(
            "empty_local_addrs",
            &format!("connection '{name}' has no local_addrs; the daemon will use %any"),
        ));
    }
    if conn.children.is_empty() {
        out.push(warn(
            "no_children",
            &format!("connection '{name}' defines no child SAs"),
        ));
    }
    for (child_name, child) in &conn.children {
        if child.local_ts.is_empty() || child.remote_ts.is_empty() {
            out.push(warn(
                "empty_traffic_selectors",
                &format!(
                    "child '{name}.{child_name}' has empty traffic selectors; the daemon will use dynamic"
                ),
            ));
        }
    }
    out
}

fn auth_issues(name: &str, round: &str, auth: &AuthConfig) -> Vec<VerifyIssue> {
    let mut out = Vec::new();
    let path = format!("{name}.{round}");
    if auth.id.trim().is_empty() {
        out.push(err("empty_identity", &format!("'{path}' has an empty id")));
    }

    let has_keys = !auth.pubkeys.is_empty() || !auth.certs.is_empty();
    if auth.auth.is_public_key() && !has_keys && round == "local-1" {
        out.push(warn(
            "pubkey_auth_without_keys",
            &format!(
                "'{path}' uses {} authentication without pubkeys or certs",
                auth.auth
            ),
        ));
    }
    if auth.auth == AuthMethod::Psk && has_keys {
        out.push(warn(
            "psk_auth_with_keys",
            &format!("'{path}' uses psk authentication but carries pubkeys or certs"),
        ));
    }

    let blocks = [
        ("pubkeys", &auth.pubkeys),
        ("certs", &auth.certs),
        ("cacerts", &auth.cacerts),
    ];
    for (key, items) in blocks {
        for (idx, item) in items.iter().enumerate() {
            if let Err(parse_err) = pem::parse(item) {
                out.push(err(
                    "invalid_pem",
                    &format!("'{path}.{key}[{idx}]' is not valid PEM: {parse_err}"),
                ));
            }
        }
    }
    out
}

fn secret_issues(name: &str, conn: &IkeConfig, config: &ConfigFile) -> Vec<VerifyIssue> {
    let uses_psk = conn.local.auth == AuthMethod::Psk || conn.remote.auth == AuthMethod::Psk;
    if !uses_psk {
        return Vec::new();
    }
    let ids = [conn.local.id.as_str(), conn.remote.id.as_str()];
    let covered = config.secrets.values().any(|secret| {
        secret.kind == SecretKind::Ike
            && (secret.owners.is_empty()
                || secret.owners.iter().any(|owner| ids.contains(&owner.as_str())))
    });
    if covered {
        Vec::new()
    } else {
        vec![warn(
            "psk_without_secret",
            &format!("connection '{name}' uses psk but no IKE secret in this file matches its ids"),
        )]
    }
}

fn err(code: &str, message: &str) -> VerifyIssue {
    VerifyIssue {
        severity: VerifySeverity::Error,
        code: code.to_string(),
        message: message.to_string(),
    }
}

fn warn(code: &str, message: &str) -> VerifyIssue {
    VerifyIssue {
        severity: VerifySeverity::Warning,
        code: code.to_string(),
        message: message.to_string(),
    }
}
