use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// A string did not name any variant of a keyword enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownKeyword {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed set of VICI keywords with their literal wire spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Wire spelling of this keyword.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownKeyword {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownKeyword;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

keyword_enum! {
    /// IKE major version selector.
    IkeVersion ("IKE version") {
        /// Accept both IKEv1 and IKEv2 (initiates with IKEv2).
        Any => "0",
        V1 => "1",
        V2 => "2",
    }
}

keyword_enum! {
    /// Action taken for a child SA once its connection is loaded.
    StartAction ("start action") {
        None => "none",
        /// Install a trap policy and negotiate on matching traffic.
        Trap => "trap",
        /// Initiate immediately.
        Start => "start",
    }
}

keyword_enum! {
    /// Action taken for a child SA when the peer closes it.
    CloseAction ("close action") {
        None => "none",
        Trap => "trap",
        Start => "start",
    }
}

keyword_enum! {
    /// IPsec encapsulation mode of a child SA.
    Mode ("mode") {
        Tunnel => "tunnel",
        Transport => "transport",
    }
}

keyword_enum! {
    /// Action taken for a child SA when dead peer detection times out.
    DpdAction ("DPD action") {
        Clear => "clear",
        Trap => "trap",
        Restart => "restart",
    }
}

keyword_enum! {
    /// Kind of credential loaded with `load-shared`.
    SecretKind ("secret type") {
        Ike => "IKE",
        Eap => "EAP",
        Xauth => "XAUTH",
        Ntlm => "NTLM",
        Ppk => "PPK",
    }
}

/// Authentication method of one authentication round.
///
/// Public key methods keep any constraint suffix verbatim, separator
/// included: `rsa/pss` is `Rsa(Some("/pss"))`, `pubkey-sha256` is
/// `Pubkey(Some("-sha256"))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum AuthMethod {
    /// Pre-shared key.
    Psk,
    /// Public key of any supported type.
    Pubkey(Option<String>),
    Rsa(Option<String>),
    Ecdsa(Option<String>),
    Ed25519,
    Ed448,
    /// EAP, optionally bound to one EAP method (`eap-<method>`).
    Eap(Option<String>),
    /// XAuth, optionally bound to one backend (`xauth-<backend>`).
    Xauth(Option<String>),
}

impl AuthMethod {
    /// Whether this method authenticates with public keys or certificates.
    pub fn is_public_key(&self) -> bool {
        matches!(
            self,
            AuthMethod::Pubkey(_)
                | AuthMethod::Rsa(_)
                | AuthMethod::Ecdsa(_)
                | AuthMethod::Ed25519
                | AuthMethod::Ed448
        )
    }
}

impl Display for AuthMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Psk => f.write_str("psk"),
            AuthMethod::Pubkey(constraints) => constrained(f, "pubkey", constraints),
            AuthMethod::Rsa(constraints) => constrained(f, "rsa", constraints),
            AuthMethod::Ecdsa(constraints) => constrained(f, "ecdsa", constraints),
            AuthMethod::Ed25519 => f.write_str("ed25519"),
            AuthMethod::Ed448 => f.write_str("ed448"),
            AuthMethod::Eap(None) => f.write_str("eap"),
            AuthMethod::Eap(Some(method)) => write!(f, "eap-{method}"),
            AuthMethod::Xauth(None) => f.write_str("xauth"),
            AuthMethod::Xauth(Some(backend)) => write!(f, "xauth-{backend}"),
        }
    }
}

fn constrained(f: &mut Formatter<'_>, family: &str, constraints: &Option<String>) -> fmt::Result {
    f.write_str(family)?;
    match constraints {
        Some(constraints) => f.write_str(constraints),
        None => Ok(()),
    }
}

impl FromStr for AuthMethod {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownKeyword {
            kind: "authentication method",
            value: s.to_string(),
        };
        match s {
            "psk" => return Ok(AuthMethod::Psk),
            "ed25519" => return Ok(AuthMethod::Ed25519),
            "ed448" => return Ok(AuthMethod::Ed448),
            "eap" => return Ok(AuthMethod::Eap(None)),
            "xauth" => return Ok(AuthMethod::Xauth(None)),
            _ => {}
        }

        if let Some(method) = s.strip_prefix("eap-") {
            return suffix(method).map(AuthMethod::Eap).ok_or_else(unknown);
        }
        if let Some(backend) = s.strip_prefix("xauth-") {
            return suffix(backend).map(AuthMethod::Xauth).ok_or_else(unknown);
        }

        let families: [(&str, fn(Option<String>) -> AuthMethod); 3] = [
            ("pubkey", AuthMethod::Pubkey),
            ("rsa", AuthMethod::Rsa),
            ("ecdsa", AuthMethod::Ecdsa),
        ];
        for (family, build) in families {
            if let Some(rest) = s.strip_prefix(family) {
                return constraint_suffix(rest).map(build).ok_or_else(unknown);
            }
        }
        Err(unknown())
    }
}

impl TryFrom<String> for AuthMethod {
    type Error = UnknownKeyword;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn suffix(raw: &str) -> Option<Option<String>> {
    if raw.is_empty() {
        None
    } else {
        Some(Some(raw.to_string()))
    }
}

/// Empty means no constraints; otherwise a `-` or `/` separator must lead
/// and something must follow it.
fn constraint_suffix(raw: &str) -> Option<Option<String>> {
    if raw.is_empty() {
        return Some(None);
    }
    let mut chars = raw.chars();
    match chars.next() {
        Some('-' | '/') if chars.next().is_some() => Some(Some(raw.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthMethod, IkeVersion, StartAction};

    #[test]
    fn keywords_use_wire_spelling() {
        assert_eq!(IkeVersion::Any.to_string(), "0");
        assert_eq!("1".parse::<IkeVersion>(), Ok(IkeVersion::V1));
        assert_eq!(StartAction::Trap.as_str(), "trap");

        let err = "later".parse::<StartAction>().expect_err("unknown action");
        assert_eq!(err.to_string(), "unknown start action 'later'");
    }

    #[test]
    fn auth_method_keeps_eap_and_xauth_suffixes() {
        let eap: AuthMethod = "eap-mschapv2".parse().expect("eap method");
        assert_eq!(eap, AuthMethod::Eap(Some("mschapv2".to_string())));
        assert_eq!(eap.to_string(), "eap-mschapv2");
        assert_eq!("xauth".parse(), Ok(AuthMethod::Xauth(None)));
        assert!("eap-".parse::<AuthMethod>().is_err());
        assert!("certificate".parse::<AuthMethod>().is_err());
        assert!(AuthMethod::Ecdsa(None).is_public_key());
        assert!(AuthMethod::Ed448.is_public_key());
        assert!(!AuthMethod::Psk.is_public_key());
    }

    #[test]
    fn public_key_constraints_survive_parse_and_display() {
        let cases = [
            ("pubkey", AuthMethod::Pubkey(None)),
            ("pubkey-sha256", AuthMethod::Pubkey(Some("-sha256".to_string()))),
            ("rsa/pss", AuthMethod::Rsa(Some("/pss".to_string()))),
            ("rsa-sha384", AuthMethod::Rsa(Some("-sha384".to_string()))),
            ("ecdsa-256", AuthMethod::Ecdsa(Some("-256".to_string()))),
            ("ed25519", AuthMethod::Ed25519),
            ("ed448", AuthMethod::Ed448),
        ];
        for (wire, expected) in cases {
            let parsed: AuthMethod = wire.parse().expect(wire);
            assert_eq!(parsed, expected);
            assert!(parsed.is_public_key());
            assert_eq!(parsed.to_string(), wire);
        }
    }

    #[test]
    fn public_key_family_needs_a_separator() {
        for wire in ["rsassa", "pubkey-", "rsa/", "ecdsa256", "ed25519-sha256"] {
            assert!(wire.parse::<AuthMethod>().is_err(), "{wire} should not parse");
        }
    }
}
