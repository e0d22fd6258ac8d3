//! GENERAL AUTHENTICATE request encoding.

use crate::codec::{concat, encode_tlv};
use crate::constants::HostConfig;
use crate::ecdh::EncodedPublicKey;

/// Name passed to [`crate::Transceiver::transceive`] for this request, for
/// diagnostics only.
pub const APDU_NAME: &str = "GENERAL AUTHENTICATE";

/// Outer dynamic authentication template tag.
const TAG_DYNAMIC_AUTH_TEMPLATE: u8 = 0x7C;
/// Empty challenge-request marker.
const TAG_CHALLENGE_MARKER: u8 = 0x80;
/// Host identity/public-key TLV.
const TAG_HOST_IDENTITY: u8 = 0x81;

/// Build the `0x7C`-wrapped command body for a GENERAL AUTHENTICATE request
/// carrying the host's control byte, host identifier, and ephemeral public
/// key.
pub fn encode_request(host: &HostConfig, host_public: &EncodedPublicKey) -> Vec<u8> {
    let host_identity = concat(&[&[host.cbh], &host.idh, &host_public.0]);
    let inner = concat(&[
        &encode_tlv(TAG_CHALLENGE_MARKER, &[]),
        &encode_tlv(TAG_HOST_IDENTITY, &host_identity),
    ]);
    encode_tlv(TAG_DYNAMIC_AUTH_TEMPLATE, &inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TlvReader;

    #[test]
    fn encodes_the_documented_template() {
        let host = HostConfig::DEMO;
        let pub_key = EncodedPublicKey([0x04; 65]);
        let request = encode_request(&host, &pub_key);

        assert_eq!(request[0], TAG_DYNAMIC_AUTH_TEMPLATE);

        let outer: Vec<_> = {
            let mut reader = TlvReader::new(&request);
            vec![reader.next().unwrap().unwrap()]
        };
        let inner: Vec<_> = TlvReader::new(outer[0].value)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(inner[0].tag, TAG_CHALLENGE_MARKER);
        assert!(inner[0].value.is_empty());
        assert_eq!(inner[1].tag, TAG_HOST_IDENTITY);
        assert_eq!(inner[1].value[0], host.cbh);
        assert_eq!(&inner[1].value[1..9], &host.idh);
        assert_eq!(&inner[1].value[9..], &pub_key.0);
    }
}
