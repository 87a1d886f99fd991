use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{ConnectionSet, SharedSecret};

/// Connections and secrets read from a TOML file.
///
/// Tables use the VICI key names: `[connections.<name>]`,
/// `[connections.<name>.local-1]`, `[connections.<name>.children.<child>]`
/// and `[secrets.<name>]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub connections: ConnectionSet,
    #[serde(default)]
    pub secrets: BTreeMap<String, SharedSecret>,
}

/// Errors returned when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load connections and secrets from a TOML file.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

/// Parse TOML text; `origin` names the input in errors.
pub fn parse_config(raw: &str, origin: String) -> Result<ConfigFile, ConfigLoadError> {
    toml::from_str(raw).map_err(|source| ConfigLoadError::Parse {
        path: origin,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_config, ConfigLoadError};
    use crate::model::{AuthMethod, IkeVersion, Mode, SecretKind, StartAction};

    #[test]
    fn parses_connection_tables_with_wire_names() {
        let cfg = parse_config(
            r#"
            [connections.rw]
            local_addrs = ["0.0.0.0"]
            pools = ["rw-pool"]
            version = "2"
            encap = true
            keyingtries = 0
            rekey_time = "0s"
            mobike = false

            [connections.rw.local-1]
            id = "gw.example.org"
            auth = "pubkey"
            certs = ["-----BEGIN CERTIFICATE-----\nMA==\n-----END CERTIFICATE-----\n"]

            [connections.rw.remote-1]
            id = "%any"
            auth = "eap-mschapv2"
            eap_id = "%any"

            [connections.rw.children.rw-net]
            local-ts = ["10.0.0.0/8"]
            remote-ts = ["dynamic"]
            start_action = "none"
            close_action = "none"
            rekey_time = "1h"
            mode = "transport"
            policies = true
            priority = 10

            [secrets.eap-carol]
            type = "EAP"
            data = "Ar3etTnp"
            owners = ["carol"]
            "#,
            "inline".to_string(),
        )
        .expect("config parses");

        let rw = &cfg.connections["rw"];
        assert_eq!(rw.version, IkeVersion::V2);
        assert!(rw.encap);
        assert_eq!(rw.mobike, Some(false));
        assert_eq!(rw.local.auth, AuthMethod::Pubkey(None));
        assert_eq!(
            rw.remote.auth,
            AuthMethod::Eap(Some("mschapv2".to_string()))
        );
        let child = &rw.children["rw-net"];
        assert_eq!(child.mode, Mode::Transport);
        assert_eq!(child.start_action, StartAction::None);
        assert_eq!(child.priority, Some(10));
        assert_eq!(child.remote_ts, vec!["dynamic".to_string()]);
        assert_eq!(cfg.secrets["eap-carol"].kind, SecretKind::Eap);
    }

    #[test]
    fn unknown_keys_and_keywords_are_parse_errors() {
        let err = parse_config(
            "[connections.gw]\nversion = \"3\"\n",
            "inline".to_string(),
        )
        .expect_err("bad version");
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse config file inline"));

        let err = parse_config("[listeners]\nport = 1\n", "inline".to_string())
            .expect_err("unknown table");
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }
}
