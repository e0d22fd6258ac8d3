//! CMAC-AES-128 (C3): one-shot compute and constant-time verify, per
//! NIST SP 800-38B.

use aes::Aes128;
use cmac::{Cmac, Mac};

use crate::error::TunnelError;

/// Compute the CMAC-AES-128 tag over `message` under `key`.
pub fn compute(key: &[u8; 16], message: &[u8]) -> [u8; 16] {
    let mut mac = Cmac::<Aes128>::new_from_slice(key).expect("AES-128 key is always 16 bytes");
    mac.update(message);
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; 16];
    out.copy_from_slice(&tag);
    out
}

/// Verify `expected` against the CMAC-AES-128 tag of `message` under `key`,
/// in constant time.
pub fn verify(key: &[u8; 16], message: &[u8], expected: &[u8; 16]) -> Result<(), TunnelError> {
    let mut mac = Cmac::<Aes128>::new_from_slice(key).expect("AES-128 key is always 16 bytes");
    mac.update(message);
    mac.verify_slice(expected)
        .map_err(|_| TunnelError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    // NIST SP 800-38B D.1 CMAC-AES128 example #2 (16-byte message).
    const KEY: [u8; 16] = hex_literal::hex!("2b7e151628aed2a6abf7158809cf4f3c");
    const MSG: [u8; 16] = hex_literal::hex!("6bc1bee22e409f96e93d7e117393172a");
    const TAG: [u8; 16] = hex_literal::hex!("070a16b46b4d4144f79bdd9dd04a287c");

    #[test]
    fn matches_nist_known_answer_vector() {
        assert_eq!(compute(&KEY, &MSG), TAG);
        assert!(verify(&KEY, &MSG, &TAG).is_ok());
    }

    #[test]
    fn verify_rejects_single_bit_flip() {
        let mut bad_tag = TAG;
        bad_tag[0] ^= 0x01;
        assert!(verify(&KEY, &MSG, &bad_tag).is_err());
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let mut bad_msg = MSG;
        bad_msg[0] ^= 0x01;
        assert!(verify(&KEY, &bad_msg, &TAG).is_err());
    }
}
