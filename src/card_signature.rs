//! GENERAL AUTHENTICATE response parser (C5).

use crate::codec::{Tlv, TlvReader};
use crate::constants::OID_ECDH_P256;
use crate::ecdh::EncodedPublicKey;
use crate::error::TunnelError;

/// Outer template tag wrapping the dynamic authentication response.
const TAG_DYNAMIC_AUTH_TEMPLATE: u8 = 0x7C;
/// Card nonce (`Nicc`).
const TAG_NONCE: u8 = 0x81;
/// Authentication cryptogram.
const TAG_CRYPTOGRAM: u8 = 0x82;
/// Composite card-identity blob (`cb || id || issuerId || guid ||
/// algorithmOID || publicKey || cvc`).
const TAG_CARD_IDENTITY: u8 = 0x83;

const OFFSET_CB: usize = 0;
const OFFSET_ID: usize = 1;
const OFFSET_ISSUER_ID: usize = OFFSET_ID + 8;
const OFFSET_GUID: usize = OFFSET_ISSUER_ID + 8;
const OFFSET_ALGORITHM_OID: usize = OFFSET_GUID + 16;
const OFFSET_PUBLIC_KEY: usize = OFFSET_ALGORITHM_OID + 8;
const OFFSET_CVC: usize = OFFSET_PUBLIC_KEY + 65;

/// The card's signed response to a GENERAL AUTHENTICATE request.
#[derive(Debug, Clone)]
pub struct CardSignature {
    /// Card control byte. `0x00` means no persistent binding was requested;
    /// any other value is a policy decision for the orchestrator, not this
    /// parser, to reject.
    pub cb: u8,
    /// Card-generated nonce.
    pub nonce: [u8; 16],
    /// Authentication cryptogram to verify against the derived `cfrm` key.
    pub cryptogram: [u8; 16],
    /// Card signer ID.
    pub id: [u8; 8],
    pub issuer_id: [u8; 8],
    pub guid: [u8; 16],
    /// ECDH key-agreement public key, SEC1-uncompressed.
    pub public_key: EncodedPublicKey,
    /// Opaque Card Verifiable Certificate / signature trailer. CVC
    /// verification is an optional, caller-side concern; this core only
    /// carries the bytes through.
    pub cvc: Vec<u8>,
}

/// Parse a raw GENERAL AUTHENTICATE response body into a [`CardSignature`].
///
/// Dispatches on tag rather than reading fixed byte offsets for the outer
/// and middle TLV layers, so unknown or reordered tags at that level don't
/// break parsing. The `0x83` sub-fields are still read positionally, since
/// SP 800-73-4 defines that inner layout as fixed-width, not as nested TLV.
pub fn parse(data: &[u8]) -> Result<CardSignature, TunnelError> {
    let mut outer = TlvReader::new(data);
    let template: Tlv = outer
        .next()
        .ok_or_else(|| TunnelError::Parse("empty response".into()))??;
    if template.tag != TAG_DYNAMIC_AUTH_TEMPLATE {
        return Err(TunnelError::Parse(format!(
            "expected dynamic authentication template tag 0x7C, got 0x{:02x}",
            template.tag
        )));
    }

    let mut nonce: Option<[u8; 16]> = None;
    let mut cryptogram: Option<[u8; 16]> = None;
    let mut identity: Option<&[u8]> = None;

    for entry in TlvReader::new(template.value) {
        let entry = entry?;
        match entry.tag {
            TAG_NONCE => nonce = Some(fixed::<16>(entry.value, "Nicc nonce")?),
            TAG_CRYPTOGRAM => cryptogram = Some(fixed::<16>(entry.value, "AuthCryptogram")?),
            TAG_CARD_IDENTITY => identity = Some(entry.value),
            _ => { /* unknown tags are ignored, preserving forward compatibility */ }
        }
    }

    let nonce = nonce.ok_or_else(|| TunnelError::Parse("missing tag 0x81 (nonce)".into()))?;
    let cryptogram =
        cryptogram.ok_or_else(|| TunnelError::Parse("missing tag 0x82 (cryptogram)".into()))?;
    let identity =
        identity.ok_or_else(|| TunnelError::Parse("missing tag 0x83 (card identity)".into()))?;

    if identity.len() < OFFSET_CVC {
        return Err(TunnelError::Parse(format!(
            "tag 0x83 too short: {} bytes, need at least {}",
            identity.len(),
            OFFSET_CVC
        )));
    }

    let cb = identity[OFFSET_CB];
    let id: [u8; 8] = identity[OFFSET_ID..OFFSET_ISSUER_ID].try_into().unwrap();
    let issuer_id: [u8; 8] = identity[OFFSET_ISSUER_ID..OFFSET_GUID].try_into().unwrap();
    let guid: [u8; 16] = identity[OFFSET_GUID..OFFSET_ALGORITHM_OID].try_into().unwrap();
    let algorithm_oid: [u8; 8] = identity[OFFSET_ALGORITHM_OID..OFFSET_PUBLIC_KEY]
        .try_into()
        .unwrap();
    let public_key_bytes: [u8; 65] = identity[OFFSET_PUBLIC_KEY..OFFSET_CVC].try_into().unwrap();
    let cvc = identity[OFFSET_CVC..].to_vec();

    if algorithm_oid != OID_ECDH_P256 {
        return Err(TunnelError::Parse(format!(
            "unexpected algorithm OID: {}",
            hex::encode(algorithm_oid)
        )));
    }
    if public_key_bytes[0] != 0x04 {
        return Err(TunnelError::Parse(format!(
            "public key is not SEC1-uncompressed (leading byte 0x{:02x})",
            public_key_bytes[0]
        )));
    }

    Ok(CardSignature {
        cb,
        nonce,
        cryptogram,
        id,
        issuer_id,
        guid,
        public_key: EncodedPublicKey(public_key_bytes),
        cvc,
    })
}

fn fixed<const N: usize>(value: &[u8], name: &str) -> Result<[u8; N], TunnelError> {
    value
        .try_into()
        .map_err(|_| TunnelError::Parse(format!("{name}: expected {N} bytes, got {}", value.len())))
}
