use std::path::PathBuf;

use pretty_assertions::assert_eq;
use vici_conn::config::load_config;
use vici_conn::decode::connections_from_message;
use vici_conn::encode::connections_message;
use vici_conn::model::{
    AuthConfig, AuthMethod, ChildSaConfig, CloseAction, ConnectionSet, DpdAction, IkeConfig,
    IkeVersion, Mode, StartAction,
};
use vici_message::parse_file;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn fully_populated() -> ConnectionSet {
    let mut local = AuthConfig::new("carol@strongswan.org", AuthMethod::Eap(Some("tls".into())));
    local.round = Some(1);
    local.eap_id = Some("carol".to_string());
    local.pubkeys = vec!["-----BEGIN PUBLIC KEY-----\nMCowBQYDK2VwAyEA\n-----END PUBLIC KEY-----\n".to_string()];
    local.certs = vec!["-----BEGIN CERTIFICATE-----\nMA==\n-----END CERTIFICATE-----\n".to_string()];
    local.class = Some("eap".to_string());
    local.cacerts = vec!["-----BEGIN CERTIFICATE-----\nMQ==\n-----END CERTIFICATE-----\n".to_string()];
    let remote = AuthConfig::new("moon.strongswan.org", AuthMethod::Pubkey(None));

    let mut conn = IkeConfig::new(local, remote);
    conn.local_addrs = vec!["%any".to_string()];
    conn.remote_addrs = vec!["moon.strongswan.org".to_string(), "192.0.2.1".to_string()];
    conn.local_port = Some(4500);
    conn.remote_port = Some(4501);
    conn.proposals = vec!["aes256-sha384-ecp384".to_string(), "default".to_string()];
    conn.vips = vec!["0.0.0.0".to_string(), "::".to_string()];
    conn.version = IkeVersion::V1;
    conn.encap = true;
    conn.keyingtries = 0;
    conn.rekey_time = "2h".to_string();
    conn.dpd_delay = Some("30s".to_string());
    conn.pools = vec!["v4".to_string()];
    conn.mobike = Some(true);

    let mut child = ChildSaConfig::new(["dynamic"], ["10.1.0.0/16", "fd00::/64"]);
    child.esp_proposals = vec!["aes256gcm16".to_string()];
    child.start_action = StartAction::Start;
    child.close_action = CloseAction::Trap;
    child.reqid = Some(7);
    child.rekey_time = "20m".to_string();
    child.replay_window = Some(64);
    child.mode = Mode::Transport;
    child.policies = false;
    child.updown = Some("/usr/local/libexec/ipsec/_updown iptables".to_string());
    child.priority = Some(2);
    child.mark_in = Some("42".to_string());
    child.mark_out = Some("0x2a/0xffffffff".to_string());
    child.dpd_action = Some(DpdAction::Clear);
    child.life_time = Some("30m".to_string());
    conn.children.insert("home".to_string(), child);

    let mut set = ConnectionSet::new();
    set.insert("home".to_string(), conn);
    set
}

#[test]
fn every_field_survives_encode_then_decode() {
    let set = fully_populated();
    let msg = connections_message(&set).expect("encode");
    let decoded = connections_from_message(&msg).expect("decode");
    assert_eq!(decoded, set);
}

#[test]
fn unset_optionals_decode_to_defaults() {
    let mut set = fully_populated();
    let conn = set.get_mut("home").expect("home");
    conn.remote_addrs.clear();
    conn.local_port = None;
    conn.mobike = None;
    conn.local.round = None;
    conn.local.pubkeys.clear();
    let child = conn.children.get_mut("home").expect("child");
    child.reqid = None;
    child.dpd_action = None;

    let msg = connections_message(&set).expect("encode");
    let conn_msg = msg.section("home").expect("home section");
    assert!(!conn_msg.contains_key("remote_addrs"));
    assert!(!conn_msg.contains_key("local_port"));
    assert!(!conn_msg.contains_key("mobike"));
    assert!(!conn_msg.section("local-1").expect("local-1").contains_key("pubkeys"));

    assert_eq!(connections_from_message(&msg).expect("decode"), set);
}

#[test]
fn toml_fixture_renders_expected_message() {
    let config = load_config(&fixture("fixtures/site-to-site.toml")).expect("config loads");
    let msg = connections_message(&config.connections).expect("encode");
    let expected = parse_file(&fixture("fixtures/load-conn.json")).expect("expected message");

    assert_eq!(msg, expected);
    assert_eq!(
        connections_from_message(&expected).expect("decode"),
        config.connections
    );
}
