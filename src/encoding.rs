//! The text-safe framing applied to every challenge and response.
//!
//! All payloads crossing [`Negotiator::step`](crate::Negotiator::step) use the standard base64
//! alphabet with padding ([RFC 4648, section 4](https://tools.ietf.org/html/rfc4648#section-4)),
//! which is what `AUTHENTICATE` continuation lines carry in IMAP, SMTP and XMPP.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::Result;

/// Decode a base64 challenge into the raw bytes a mechanism operates on.
///
/// An empty input decodes to an empty payload.
pub fn decode(text: &[u8]) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

/// Encode a mechanism response for transmission.
pub fn encode(bytes: &[u8]) -> Vec<u8> {
    STANDARD.encode(bytes).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;

    #[test]
    fn encode_known() {
        assert_eq!(b"".to_vec(), encode(b""));
        assert_eq!(b"Zg==".to_vec(), encode(b"f"));
        assert_eq!(b"Zm9vYmFy".to_vec(), encode(b"foobar"));
        assert_eq!(b"AHVzZXIAcGFzcw==".to_vec(), encode(b"\0user\0pass"));
    }

    #[test]
    fn decode_inverts_encode_empty() {
        assert_eq!(Vec::<u8>::new(), decode(&encode(b"")).unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn decode_inverts_encode(bytes in any::<Vec<u8>>()) {
            prop_assert_eq!(&bytes, &decode(&encode(&bytes)).unwrap());
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        for bad in [&b"not base64!"[..], b"Zg=", b"Zm9v\r\n"] {
            match decode(bad) {
                Err(Error::Decode(_)) => {}
                other => panic!("expected decode error for {:?}, got {:?}", bad, other),
            }
        }
    }
}
