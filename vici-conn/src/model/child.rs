use serde::Deserialize;

use super::keywords::{CloseAction, DpdAction, Mode, StartAction};

/// One child SA negotiated under an IKE connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildSaConfig {
    #[serde(rename = "local-ts", default)]
    pub local_ts: Vec<String>,
    #[serde(rename = "remote-ts", default)]
    pub remote_ts: Vec<String>,
    /// ESP proposals such as `aes128gcm128-x25519`.
    #[serde(default)]
    pub esp_proposals: Vec<String>,
    pub start_action: StartAction,
    pub close_action: CloseAction,
    pub reqid: Option<u32>,
    pub rekey_time: String,
    pub replay_window: Option<u32>,
    pub mode: Mode,
    /// Install IPsec policies for this child SA.
    pub policies: bool,
    /// Path of the up/down script.
    pub updown: Option<String>,
    pub priority: Option<u32>,
    pub mark_in: Option<String>,
    pub mark_out: Option<String>,
    pub dpd_action: Option<DpdAction>,
    pub life_time: Option<String>,
}

impl ChildSaConfig {
    /// Create a tunnel-mode child SA with daemon defaults.
    pub fn new<L, R>(local_ts: L, remote_ts: R) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            local_ts: local_ts.into_iter().map(Into::into).collect(),
            remote_ts: remote_ts.into_iter().map(Into::into).collect(),
            esp_proposals: Vec::new(),
            start_action: StartAction::None,
            close_action: CloseAction::None,
            reqid: None,
            rekey_time: "1h".to_string(),
            replay_window: None,
            mode: Mode::Tunnel,
            policies: true,
            updown: None,
            priority: None,
            mark_in: None,
            mark_out: None,
            dpd_action: None,
            life_time: None,
        }
    }
}
