//! P-256 EC primitives (C2): ephemeral keypair generation, on-curve
//! validation, and ECDH.

use elliptic_curve::sec1::ToEncodedPoint;
use p256::ecdh::EphemeralSecret;
use p256::PublicKey;
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::error::TunnelError;

/// 65-byte uncompressed SEC1 encoding of a P-256 public key: `04 || X || Y`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncodedPublicKey(pub [u8; 65]);

impl EncodedPublicKey {
    /// The X-coordinate, as a 32-byte big-endian field element.
    pub fn x(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[1..33]);
        out
    }

    /// The Y-coordinate, as a 32-byte big-endian field element.
    pub fn y(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[33..65]);
        out
    }

    /// `X || Y`, without the leading `0x04` SEC1 prefix byte.
    pub fn xy(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out.copy_from_slice(&self.0[1..65]);
        out
    }
}

impl std::fmt::Debug for EncodedPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncodedPublicKey({})", hex::encode(self.0))
    }
}

/// A freshly generated ephemeral P-256 keypair.
///
/// The private scalar is held inside a `p256::ecdh::EphemeralSecret`, which
/// cannot be exported or re-derived from raw bytes and zeroizes its internal
/// state on drop -- generated at handshake start, held only for the
/// duration of ECDH, and cleaned up by the type itself rather than by
/// manual cleanup code.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
    public: EncodedPublicKey,
}

impl EphemeralKeyPair {
    /// Generate a fresh P-256 keypair using the OS CSPRNG.
    pub fn generate() -> Result<Self, TunnelError> {
        let secret = EphemeralSecret::random(&mut OsRng);
        let encoded = secret.public_key().to_encoded_point(false);
        let bytes = encoded.as_bytes();
        if bytes.len() != 65 {
            return Err(TunnelError::CryptoInit(format!(
                "unexpected public key encoding length {}",
                bytes.len()
            )));
        }
        let mut public = [0u8; 65];
        public.copy_from_slice(bytes);

        Ok(EphemeralKeyPair {
            secret,
            public: EncodedPublicKey(public),
        })
    }

    /// This keypair's public component, as an uncompressed SEC1 encoding.
    pub fn public(&self) -> EncodedPublicKey {
        self.public
    }

    /// Perform ECDH between this keypair's private scalar and the card's
    /// public point, returning the shared secret's X-coordinate as a
    /// 32-byte big-endian field element.
    ///
    /// Fails if the resulting shared point is the identity -- the `p256`
    /// crate cannot itself report this distinctly (Diffie-Hellman never
    /// errors), so an all-zero result, which is the only way a P-256 ECDH
    /// output can look like the identity's X-coordinate in practice, is
    /// treated as that failure.
    pub fn ecdh(&self, card_public: &PublicKey) -> Result<Zeroizing<[u8; 32]>, TunnelError> {
        let shared = self.secret.diffie_hellman(card_public);
        let mut z = [0u8; 32];
        z.copy_from_slice(shared.raw_secret_bytes().as_slice());

        if z.iter().all(|&b| b == 0) {
            return Err(TunnelError::Ecdh("shared secret is the identity".into()));
        }

        Ok(Zeroizing::new(z))
    }
}

/// Validate that `encoded` is a valid P-256 point: on the curve, and not the
/// identity. Returns the parsed key on success.
///
/// A non-on-curve or identity point is a security issue and must be fatal,
/// never merely logged and ignored.
pub fn check_key(encoded: &EncodedPublicKey) -> Result<PublicKey, TunnelError> {
    PublicKey::from_sec1_bytes(&encoded.0)
        .map_err(|e| TunnelError::KeyValidation(format!("invalid P-256 point: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_uncompressed_sec1_point() {
        let kp = EphemeralKeyPair::generate().unwrap();
        assert_eq!(kp.public().0[0], 0x04);
        assert_eq!(kp.public().0.len(), 65);
    }

    #[test]
    fn check_key_accepts_a_freshly_generated_point() {
        let kp = EphemeralKeyPair::generate().unwrap();
        assert!(check_key(&kp.public()).is_ok());
    }

    #[test]
    fn check_key_rejects_identity_encoding() {
        // SEC1 encodes the point at infinity as a single 0x00 byte; padded
        // or otherwise, it never round-trips as a valid 65-byte uncompressed
        // point, so from_sec1_bytes must reject it.
        let bogus = EncodedPublicKey([0u8; 65]);
        assert!(check_key(&bogus).is_err());
    }

    #[test]
    fn check_key_rejects_off_curve_point() {
        let mut bytes = EphemeralKeyPair::generate().unwrap().public().0;
        bytes[64] ^= 0x01; // corrupt Y so (X, Y) is off-curve
        assert!(check_key(&EncodedPublicKey(bytes)).is_err());
    }

    #[test]
    fn two_parties_agree_on_the_same_shared_secret() {
        let host = EphemeralKeyPair::generate().unwrap();
        let card = EphemeralKeyPair::generate().unwrap();

        let card_pub = check_key(&card.public()).unwrap();
        let host_pub = check_key(&host.public()).unwrap();

        let z_host = host.ecdh(&card_pub).unwrap();
        let z_card = card.ecdh(&host_pub).unwrap();

        assert_eq!(*z_host, *z_card);
    }
}
