use serde::Deserialize;

use super::keywords::SecretKind;

/// A shared secret loaded with `load-shared`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedSecret {
    /// Unique identifier, used to replace or unload the secret later.
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: SecretKind,
    pub data: String,
    /// Identities the secret belongs to; empty matches any identity.
    #[serde(default)]
    pub owners: Vec<String>,
}

impl SharedSecret {
    pub fn ike(data: impl Into<String>, owners: Vec<String>) -> Self {
        Self {
            id: None,
            kind: SecretKind::Ike,
            data: data.into(),
            owners,
        }
    }
}
