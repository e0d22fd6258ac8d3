//! NIST SP 800-56A §5.8.1 single-step KDF (C4), and the OtherInfo layout
//! and key-block partition this protocol builds on top of it.

use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::OTHERINFO_PREAMBLE;
use crate::error::TunnelError;

/// Length in bytes of the derived key block (512 bits).
const KEY_BLOCK_LEN: usize = 64;

/// Derive a 64-byte key block from the ECDH shared secret `z` and the
/// handshake-specific `other_info`, using SHA-256 as the single-step KDF's
/// hash function.
///
/// Delegates the counter-mode construction itself to the `concat-kdf`
/// crate, which implements SP 800-56A's concatenation KDF directly, rather
/// than hand-rolling the counter loop over raw `sha2` calls.
pub fn derive_key_block(
    z: &[u8; 32],
    other_info: &[u8],
) -> Result<Zeroizing<[u8; KEY_BLOCK_LEN]>, TunnelError> {
    let mut okm = Zeroizing::new([0u8; KEY_BLOCK_LEN]);
    concat_kdf::derive_key_into::<Sha256>(z, other_info, okm.as_mut_slice())
        .map_err(|e| TunnelError::CryptoInit(format!("KDF failed: {e}")))?;
    Ok(okm)
}

/// Build the `OtherInfo` buffer that binds the derived keys to this
/// handshake's transcript.
///
/// Layout:
///
/// ```text
/// 04 09 09 09 09 08          OTHERINFO_PREAMBLE
/// IDH(8)
/// 01 CBH(1)
/// 10 hostPubX[0..16](16)     -- only the first 16 bytes of host X, to match
///                               the reference implementation's behaviour
/// 08 cardSigId(8)
/// 10 cardNonce(16)
/// 01 cardCb(1)
/// ```
pub fn build_other_info(
    idh: &[u8; 8],
    cbh: u8,
    host_pub_x: &[u8; 32],
    card_sig_id: &[u8; 8],
    card_nonce: &[u8; 16],
    card_cb: u8,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + 8 + 2 + 17 + 9 + 17 + 2);
    out.extend_from_slice(&OTHERINFO_PREAMBLE);
    out.extend_from_slice(idh);
    out.push(0x01);
    out.push(cbh);
    out.push(0x10);
    out.extend_from_slice(&host_pub_x[0..16]);
    out.push(0x08);
    out.extend_from_slice(card_sig_id);
    out.push(0x10);
    out.extend_from_slice(card_nonce);
    out.push(0x01);
    out.push(card_cb);
    out
}

/// Partition a 64-byte key block into the four fixed-order session key
/// slices: `cfrm`, `mac`, `enc`, `rmac`.
pub fn partition_key_block(block: &[u8; KEY_BLOCK_LEN]) -> crate::session_keys::SessionKeys {
    let mut cfrm = [0u8; 16];
    let mut mac = [0u8; 16];
    let mut enc = [0u8; 16];
    let mut rmac = [0u8; 16];
    cfrm.copy_from_slice(&block[0..16]);
    mac.copy_from_slice(&block[16..32]);
    enc.copy_from_slice(&block[32..48]);
    rmac.copy_from_slice(&block[48..64]);

    crate::session_keys::SessionKeys::new(cfrm, mac, enc, rmac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_info_has_the_documented_length_and_layout() {
        let idh = [0u8; 8];
        let host_x = [0xAAu8; 32];
        let card_id = [0xBBu8; 8];
        let nonce = [0xCCu8; 16];

        let info = build_other_info(&idh, 0x00, &host_x, &card_id, &nonce, 0x00);
        assert_eq!(info.len(), 61);
        assert_eq!(&info[0..6], &OTHERINFO_PREAMBLE);
        assert_eq!(&info[6..14], &idh);
        assert_eq!(info[14], 0x01);
        assert_eq!(info[15], 0x00);
        assert_eq!(info[16], 0x10);
        assert_eq!(&info[17..33], &host_x[0..16]);
        assert_eq!(info[33], 0x08);
        assert_eq!(&info[34..42], &card_id);
        assert_eq!(info[42], 0x10);
        assert_eq!(&info[43..59], &nonce);
        assert_eq!(info[59], 0x01);
        assert_eq!(info[60], 0x00);
    }

    #[test]
    fn derivation_is_deterministic_and_partition_order_is_stable() {
        let z = [0x42u8; 32];
        let info = build_other_info(&[0; 8], 0, &[0; 32], &[0; 8], &[0; 16], 0);

        let block1 = derive_key_block(&z, &info).unwrap();
        let block2 = derive_key_block(&z, &info).unwrap();
        assert_eq!(*block1, *block2);

        let keys = partition_key_block(&block1);
        assert_eq!(keys.cfrm(), &block1[0..16]);
        assert_eq!(keys.mac(), &block1[16..32]);
        assert_eq!(keys.enc(), &block1[32..48]);
        assert_eq!(keys.rmac(), &block1[48..64]);
    }

    #[test]
    fn different_other_info_yields_different_keys() {
        let z = [0x42u8; 32];
        let info_a = build_other_info(&[0; 8], 0, &[0; 32], &[0; 8], &[0; 16], 0);
        let info_b = build_other_info(&[1; 8], 0, &[0; 32], &[0; 8], &[0; 16], 0);

        let block_a = derive_key_block(&z, &info_a).unwrap();
        let block_b = derive_key_block(&z, &info_b).unwrap();
        assert_ne!(*block_a, *block_b);
    }
}
