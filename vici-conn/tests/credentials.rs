use std::fs;
use std::path::PathBuf;

use vici_conn::credentials::{CertificateError, PublicKey, CERTIFICATE_LABEL, PUBLIC_KEY_LABEL};
use vici_conn::model::{AuthConfig, AuthMethod};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn self_signed(name: &str) -> Vec<u8> {
    rcgen::generate_simple_self_signed(vec![name.to_string()])
        .expect("certificate")
        .serialize_der()
        .expect("der")
}

#[test]
fn certificates_are_armored_in_order() {
    let first = self_signed("moon.strongswan.org");
    let second = self_signed("sun.strongswan.org");
    let mut auth = AuthConfig::new("moon.strongswan.org", AuthMethod::Pubkey(None));

    auth.set_certs(&[first.clone(), second.clone()])
        .expect("certs encode");
    auth.set_cacerts(&[second.clone()]).expect("cacert encodes");

    assert_eq!(auth.certs.len(), 2);
    let parsed = pem::parse(&auth.certs[1]).expect("pem");
    assert_eq!(parsed.tag(), CERTIFICATE_LABEL);
    assert_eq!(parsed.contents(), second.as_slice());
    assert_eq!(
        pem::parse(&auth.certs[0]).expect("pem").contents(),
        first.as_slice()
    );
    assert!(auth.cacerts[0].starts_with("-----BEGIN CERTIFICATE-----\n"));
}

#[test]
fn invalid_certificate_keeps_previous_list() {
    let mut auth = AuthConfig::new("moon.strongswan.org", AuthMethod::Pubkey(None));
    auth.certs = vec!["previous".to_string()];

    let err = auth
        .set_certs(&[self_signed("moon.strongswan.org"), vec![0x30, 0x00]])
        .expect_err("second cert is garbage");

    assert!(matches!(err, CertificateError::Malformed { index: 1, .. }));
    assert_eq!(auth.certs, vec!["previous".to_string()]);
}

#[test]
fn ec_and_rsa_spki_are_armored_unchanged() {
    let ec = rcgen::KeyPair::generate(&rcgen::PKCS_ECDSA_P256_SHA256)
        .expect("ec key")
        .public_key_der();
    let rsa = fs::read(fixture("fixtures/rsa-2048-spki.der")).expect("rsa fixture");
    let mut auth = AuthConfig::new("moon.strongswan.org", AuthMethod::Ecdsa(None));

    auth.set_public_keys(&[PublicKey::Spki(ec.clone()), PublicKey::Spki(rsa.clone())])
        .expect("ec and rsa keys encode");

    assert_eq!(auth.pubkeys.len(), 2);
    for (pem_text, der) in auth.pubkeys.iter().zip([&ec, &rsa]) {
        let block = pem::parse(pem_text).expect("pem");
        assert_eq!(block.tag(), PUBLIC_KEY_LABEL);
        assert_eq!(block.contents(), der.as_slice());
    }
}
