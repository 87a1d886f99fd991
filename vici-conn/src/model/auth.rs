use serde::Deserialize;

use super::keywords::AuthMethod;

/// One authentication round of a connection endpoint.
///
/// Credential lists hold PEM text. Use [`AuthConfig::set_public_keys`],
/// [`AuthConfig::set_certs`] or [`AuthConfig::set_cacerts`] to fill them
/// from binary key and certificate material.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub id: String,
    pub round: Option<u32>,
    pub auth: AuthMethod,
    pub eap_id: Option<String>,
    #[serde(default)]
    pub pubkeys: Vec<String>,
    #[serde(default)]
    pub certs: Vec<String>,
    /// Certificate policy class constraint.
    pub class: Option<String>,
    #[serde(default)]
    pub cacerts: Vec<String>,
}

impl AuthConfig {
    pub fn new(id: impl Into<String>, auth: AuthMethod) -> Self {
        Self {
            id: id.into(),
            round: None,
            auth,
            eap_id: None,
            pubkeys: Vec::new(),
            certs: Vec::new(),
            class: None,
            cacerts: Vec::new(),
        }
    }
}
