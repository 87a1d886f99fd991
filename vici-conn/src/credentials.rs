//! PEM encoding of public keys and certificates for authentication rounds.

use ed25519_dalek::pkcs8::EncodePublicKey;
use ed25519_dalek::VerifyingKey;
use pem::{EncodeConfig, LineEnding, Pem};
use thiserror::Error;
use x509_parser::prelude::{FromDer, SubjectPublicKeyInfo};

use crate::model::AuthConfig;

pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
const OID_ED25519: &str = "1.3.101.112";
const OID_ED448: &str = "1.3.101.113";

/// A public key to hand to the daemon as a raw trusted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519(VerifyingKey),
    /// DER-encoded SubjectPublicKeyInfo, e.g. extracted from a certificate.
    Spki(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyEncodingError {
    #[error("failed to encode {algorithm} key: {message}")]
    Encode {
        algorithm: &'static str,
        message: String,
    },
    #[error("malformed SubjectPublicKeyInfo: {0}")]
    Malformed(String),
    #[error("unsupported public key algorithm {oid}")]
    UnsupportedAlgorithm { oid: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    #[error("certificate {index} is not valid DER X.509: {message}")]
    Malformed { index: usize, message: String },
}

impl PublicKey {
    /// Encode the key as a DER SubjectPublicKeyInfo.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, KeyEncodingError> {
        match self {
            PublicKey::Ed25519(key) => key
                .to_public_key_der()
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|err| KeyEncodingError::Encode {
                    algorithm: "Ed25519",
                    message: err.to_string(),
                }),
            PublicKey::Spki(der) => {
                check_spki(der)?;
                Ok(der.clone())
            }
        }
    }

    /// Encode the key as a "PUBLIC KEY" PEM block.
    pub fn to_pem(&self) -> Result<String, KeyEncodingError> {
        Ok(armor(PUBLIC_KEY_LABEL, self.to_spki_der()?))
    }
}

fn armor(label: &str, der: Vec<u8>) -> String {
    let config = EncodeConfig::new().set_line_ending(LineEnding::LF);
    pem::encode_config(&Pem::new(label, der), config)
}

fn check_spki(der: &[u8]) -> Result<(), KeyEncodingError> {
    let (rest, spki) = SubjectPublicKeyInfo::from_der(der)
        .map_err(|err| KeyEncodingError::Malformed(err.to_string()))?;
    if !rest.is_empty() {
        return Err(KeyEncodingError::Malformed(format!(
            "{} trailing bytes",
            rest.len()
        )));
    }
    let oid = spki.algorithm.algorithm.to_id_string();
    match oid.as_str() {
        OID_RSA_ENCRYPTION | OID_EC_PUBLIC_KEY | OID_ED25519 | OID_ED448 => Ok(()),
        _ => Err(KeyEncodingError::UnsupportedAlgorithm { oid }),
    }
}

fn certificates_to_pem(certs: &[Vec<u8>]) -> Result<Vec<String>, CertificateError> {
    let mut encoded = Vec::with_capacity(certs.len());
    for (index, der) in certs.iter().enumerate() {
        x509_parser::parse_x509_certificate(der).map_err(|err| CertificateError::Malformed {
            index,
            message: err.to_string(),
        })?;
        encoded.push(armor(CERTIFICATE_LABEL, der.clone()));
    }
    Ok(encoded)
}

impl AuthConfig {
    /// Replace `pubkeys` with the PEM encoding of `keys`.
    ///
    /// The first key that cannot be encoded aborts the call and leaves the
    /// current list untouched.
    pub fn set_public_keys(&mut self, keys: &[PublicKey]) -> Result<(), KeyEncodingError> {
        let encoded = keys
            .iter()
            .map(PublicKey::to_pem)
            .collect::<Result<Vec<_>, _>>()?;
        self.pubkeys = encoded;
        Ok(())
    }

    /// Replace `certs` with the PEM encoding of DER certificates.
    pub fn set_certs(&mut self, certs: &[Vec<u8>]) -> Result<(), CertificateError> {
        self.certs = certificates_to_pem(certs)?;
        Ok(())
    }

    /// Replace `cacerts` with the PEM encoding of DER CA certificates.
    pub fn set_cacerts(&mut self, certs: &[Vec<u8>]) -> Result<(), CertificateError> {
        self.cacerts = certificates_to_pem(certs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::SigningKey;

    use super::{KeyEncodingError, PublicKey, PUBLIC_KEY_LABEL};
    use crate::model::{AuthConfig, AuthMethod};

    // SEQUENCE { SEQUENCE { OID 1.2.840.10040.4.1 (DSA) }, BIT STRING 0x0102 }
    const DSA_SPKI: [u8; 18] = [
        0x30, 0x10, 0x30, 0x09, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x38, 0x04, 0x01, 0x03, 0x03,
        0x00, 0x01, 0x02,
    ];

    fn ed25519(seed: u8) -> PublicKey {
        PublicKey::Ed25519(SigningKey::from_bytes(&[seed; 32]).verifying_key())
    }

    #[test]
    fn encodes_each_key_as_public_key_pem() {
        let keys = vec![ed25519(1), ed25519(2)];
        let mut auth = AuthConfig::new("moon", AuthMethod::Pubkey(None));
        auth.set_public_keys(&keys).expect("keys encode");

        assert_eq!(auth.pubkeys.len(), 2);
        for (pem_text, key) in auth.pubkeys.iter().zip(&keys) {
            assert!(pem_text.starts_with("-----BEGIN PUBLIC KEY-----"));
            let block = pem::parse(pem_text).expect("pem parses");
            assert_eq!(block.tag(), PUBLIC_KEY_LABEL);
            assert_eq!(block.contents(), key.to_spki_der().expect("der").as_slice());
        }
    }

    #[test]
    fn spki_input_round_trips_through_validation() {
        let der = ed25519(3).to_spki_der().expect("der");
        assert_eq!(der.len(), 44);
        assert_eq!(PublicKey::Spki(der.clone()).to_spki_der(), Ok(der));
    }

    #[test]
    fn unsupported_key_leaves_existing_list_unchanged() {
        let mut auth = AuthConfig::new("moon", AuthMethod::Pubkey(None));
        auth.pubkeys = vec!["existing".to_string()];

        let err = auth
            .set_public_keys(&[ed25519(4), PublicKey::Spki(DSA_SPKI.to_vec())])
            .expect_err("DSA is not supported");

        assert_eq!(
            err,
            KeyEncodingError::UnsupportedAlgorithm {
                oid: "1.2.840.10040.4.1".to_string()
            }
        );
        assert_eq!(auth.pubkeys, vec!["existing".to_string()]);
    }

    #[test]
    fn rejects_garbage_and_trailing_bytes() {
        assert!(matches!(
            PublicKey::Spki(vec![0x01, 0x02]).to_spki_der(),
            Err(KeyEncodingError::Malformed(_))
        ));

        let mut der = ed25519(5).to_spki_der().expect("der");
        der.push(0);
        assert!(matches!(
            PublicKey::Spki(der).to_spki_der(),
            Err(KeyEncodingError::Malformed(_))
        ));
    }

    #[test]
    fn empty_key_list_clears_pubkeys() {
        let mut auth = AuthConfig::new("moon", AuthMethod::Pubkey(None));
        auth.pubkeys = vec!["stale".to_string()];
        auth.set_public_keys(&[]).expect("no keys");
        assert!(auth.pubkeys.is_empty());
    }
}
