use thiserror::Error;

/// Failure taxonomy for the Opacity handshake.
///
/// The orchestrator never recovers from any of these internally: every
/// variant reaching a caller means the transceiver has already been closed
/// and any partial key material has been zeroized.
#[derive(Debug, Error)]
pub enum TunnelError {
    /// Ephemeral keypair generation failed, or a public-key component had an
    /// unexpected size.
    #[error("crypto initialization failed: {0}")]
    CryptoInit(String),

    /// The transceiver returned nothing, or a subsequent I/O operation on it
    /// failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The GENERAL AUTHENTICATE response was malformed: a missing tag, a
    /// wrong fixed length, or a wrong algorithm OID.
    #[error("malformed card response: {0}")]
    Parse(String),

    /// The card requested persistent binding (`cb != 0`), which this core
    /// does not support.
    #[error("card requested persistent binding (cb = {0:#04x})")]
    Policy(u8),

    /// The card's public key failed the on-curve / non-identity check.
    #[error("card public key failed validation: {0}")]
    KeyValidation(String),

    /// The ECDH shared-secret computation produced the identity point, or
    /// otherwise failed.
    #[error("ECDH computation failed: {0}")]
    Ecdh(String),

    /// The CMAC of the authentication cryptogram did not verify.
    #[error("authentication cryptogram did not verify")]
    Authentication,
}

impl TunnelError {
    /// A stable, loggable label for this error's kind -- used by
    /// [`crate::observer::HandshakeEvent::HandshakeFailed`] so observers can
    /// distinguish failure kinds without the core ever handing them a
    /// formatted message that might embed sensitive detail.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TunnelError::CryptoInit(_) => "crypto_init",
            TunnelError::Transport(_) => "transport",
            TunnelError::Parse(_) => "parse",
            TunnelError::Policy(_) => "policy",
            TunnelError::KeyValidation(_) => "key_validation",
            TunnelError::Ecdh(_) => "ecdh",
            TunnelError::Authentication => "authentication",
        }
    }
}
