extern crate sasl;

use std::sync::Arc;

use sasl::{
    encoding, Cache, Config, Credentials, Error, Mechanism, Negotiator, Outcome, Plain, Step,
};

/// Answers `start` with "r1" and the first challenge with "r2", failing on any challenge that
/// isn't "c1". Checks that the cache from `start` makes it back.
struct TwoStep;

impl Mechanism for TwoStep {
    fn name(&self) -> &str {
        "X-TWO-STEP"
    }

    fn start(&self, _: &Negotiator) -> sasl::Result<Outcome> {
        Ok(Outcome::new(true, "r1").with_cache("cache1"))
    }

    fn next(&self, _: &Negotiator, challenge: &[u8], cache: Cache) -> sasl::Result<Outcome> {
        let from_start = cache
            .as_deref()
            .and_then(|c| c.downcast_ref::<&'static str>())
            .copied();
        if from_start != Some("cache1") {
            return Err(Error::mechanism("cache was not threaded through"));
        }
        if challenge != b"c1" {
            return Err(Error::mechanism("unexpected challenge"));
        }
        Ok(Outcome::new(false, "r2").with_cache("cache2"))
    }
}

fn two_step() -> Negotiator {
    Negotiator::client(Arc::new(TwoStep), Config::default())
}

#[test]
fn client_exchange() {
    let mut c = two_step();

    let (more, resp) = c.step(b"").unwrap();
    assert!(more);
    assert_eq!(encoding::encode(b"r1"), resp);
    assert_eq!(Step::AuthTextSent, c.state().step());

    let (more, resp) = c.step(&encoding::encode(b"c1")).unwrap();
    assert!(!more);
    assert_eq!(encoding::encode(b"r2"), resp);
    assert_eq!(Step::ResponseSent, c.state().step());
    assert!(!c.state().errored());
}

#[test]
#[should_panic(expected = "has errored")]
fn step_after_mechanism_error_panics() {
    let mut c = two_step();
    c.step(b"").unwrap();
    assert!(c.step(&encoding::encode(b"bogus")).is_err());
    assert!(c.state().errored());
    let _ = c.step(&encoding::encode(b"c1"));
}

#[test]
#[should_panic(expected = "has errored")]
fn step_after_decode_error_panics() {
    let mut c = two_step();
    assert!(matches!(c.step(b"%%"), Err(Error::Decode(_))));
    let _ = c.step(b"");
}

#[test]
#[should_panic(expected = "has errored")]
fn server_step_after_error_panics() {
    let mut s = Negotiator::server(Arc::new(Plain), Config::default());
    assert!(matches!(s.step(b"%%"), Err(Error::Decode(_))));
    let _ = s.step(b"");
}

#[test]
fn reset_after_error_restarts() {
    let mut c = two_step();
    c.step(b"").unwrap();
    match c.step(&encoding::encode(b"bogus")) {
        Err(Error::Mechanism(e)) => assert_eq!("unexpected challenge", e.to_string()),
        other => panic!("expected mechanism error, got {:?}", other),
    }
    assert!(c.state().errored());

    c.reset();
    assert_eq!(Step::Initial, c.state().step());
    c.step(b"").unwrap();
    assert_eq!(Step::AuthTextSent, c.state().step());
    let (more, _) = c.step(&encoding::encode(b"c1")).unwrap();
    assert!(!more);
    assert_eq!(Step::ResponseSent, c.state().step());
}

#[test]
fn bad_base64_is_terminal() {
    let mut c = two_step();
    c.step(b"").unwrap();
    assert!(matches!(c.step(b"c1 not base64"), Err(Error::Decode(_))));
    assert!(c.state().errored());
    assert_eq!(Step::AuthTextSent, c.state().step());
}

#[test]
fn reset_refreshes_nonce() {
    let mut c = two_step();
    for _ in 0..16 {
        let before = c.nonce().to_vec();
        c.reset();
        assert_ne!(before, c.nonce());
        assert_eq!(sasl::NONCE_LEN, c.nonce().len());
    }
}

#[test]
fn shared_mechanism() {
    let mechanism: Arc<dyn Mechanism> = Arc::new(TwoStep);
    let mut a = Negotiator::client(mechanism.clone(), Config::default());
    let mut b = Negotiator::client(mechanism, Config::default());
    a.step(b"").unwrap();
    assert_eq!(Step::Initial, b.state().step());
    b.step(b"").unwrap();
    a.step(&encoding::encode(b"c1")).unwrap();
    b.step(&encoding::encode(b"c1")).unwrap();
    assert_ne!(a.nonce(), b.nonce());
}

#[test]
fn plain_client_and_server() {
    let plain: Arc<dyn Mechanism> = Arc::new(Plain);
    let mut client = Negotiator::client(
        plain.clone(),
        Config::builder()
            .credentials(Credentials::new("tim", "tanstaaftanstaaf").with_identity("admin"))
            .remote_mechanisms(["PLAIN"])
            .build(),
    );
    let mut server = Negotiator::server(
        plain,
        Config::builder()
            .permissions(|c| {
                c.identity == b"admin" && c.username == b"tim" && c.password == b"tanstaaftanstaaf"
            })
            .build(),
    );
    assert_eq!("PLAIN", client.mechanism_name());
    assert!(!client.state().remote_channel_binding());

    let (more, resp) = client.step(b"").unwrap();
    assert!(!more);
    let (more, resp) = server.step(&resp).unwrap();
    assert!(!more);
    assert!(resp.is_empty());
    assert_eq!(Step::ResponseSent, server.state().step());

    client.reset();
    server.reset();
    assert_eq!(Step::Initial, client.state().step());
    assert_eq!(Step::AuthTextSent, server.state().step());
    assert!(server.state().is_receiver());
}
