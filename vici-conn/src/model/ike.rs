use std::collections::BTreeMap;

use serde::Deserialize;

use super::auth::AuthConfig;
use super::child::ChildSaConfig;
use super::keywords::IkeVersion;

/// One IKE connection with exactly one local and one remote authentication
/// round.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IkeConfig {
    /// Local addresses to accept or initiate from; sent even when empty.
    #[serde(default)]
    pub local_addrs: Vec<String>,
    #[serde(default)]
    pub remote_addrs: Vec<String>,
    pub local_port: Option<u16>,
    pub remote_port: Option<u16>,
    /// IKE proposals such as `aes128-sha256-x25519`.
    #[serde(default)]
    pub proposals: Vec<String>,
    /// Virtual IPs to request from the peer.
    #[serde(default)]
    pub vips: Vec<String>,
    pub version: IkeVersion,
    /// Force UDP encapsulation of ESP (NAT traversal).
    pub encap: bool,
    pub keyingtries: u32,
    pub rekey_time: String,
    pub dpd_delay: Option<String>,
    #[serde(rename = "local-1")]
    pub local: AuthConfig,
    #[serde(rename = "remote-1")]
    pub remote: AuthConfig,
    /// Address pools to assign virtual IPs from.
    #[serde(default)]
    pub pools: Vec<String>,
    #[serde(default)]
    pub children: BTreeMap<String, ChildSaConfig>,
    pub mobike: Option<bool>,
}

impl IkeConfig {
    /// Create a connection using daemon defaults for every tunable.
    pub fn new(local: AuthConfig, remote: AuthConfig) -> Self {
        Self {
            local_addrs: Vec::new(),
            remote_addrs: Vec::new(),
            local_port: None,
            remote_port: None,
            proposals: Vec::new(),
            vips: Vec::new(),
            version: IkeVersion::Any,
            encap: false,
            keyingtries: 1,
            rekey_time: "4h".to_string(),
            dpd_delay: None,
            local,
            remote,
            pools: Vec::new(),
            children: BTreeMap::new(),
            mobike: None,
        }
    }
}
