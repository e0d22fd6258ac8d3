//! Fixed protocol constants from SP 800-73-4 Cipher Suite 2.

/// `id-ecPublicKey` for P-256 (secp256r1), as carried in the card's signed
/// response (`algorithmOID` field of the `0x83` sub-TLV).
pub const OID_ECDH_P256: [u8; 8] = [0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];

/// ASCII `"KC_1_V"`, the key-confirmation label mixed into the authentication
/// cryptogram message.
pub const KC_TAG: &[u8; 6] = b"KC_1_V";

/// AlgorithmID length-tagged header for the KDF's `OtherInfo`, per
/// SP 800-56A.
pub const OTHERINFO_PREAMBLE: [u8; 6] = [0x04, 0x09, 0x09, 0x09, 0x09, 0x08];

/// Host control byte signalling "no persistent binding" -- the only value
/// this core's host side will ever send.
pub const CBH_NO_PERSISTENT_BINDING: u8 = 0x00;

/// Deployment-specific host/session configuration.
///
/// `IDH`/`CBH` are fixed per deployment; this crate threads them through as
/// a value instead of baking them into the orchestrator, so callers in
/// different deployments (or tests) can supply their own without touching
/// the handshake logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// 8-byte host identifier.
    pub idh: [u8; 8],
    /// Host control byte. This core always uses
    /// [`CBH_NO_PERSISTENT_BINDING`]; the field exists so the wire layout is
    /// explicit rather than implicit.
    pub cbh: u8,
}

impl HostConfig {
    /// A demo host identifier, for examples and tests.
    pub const DEMO: HostConfig = HostConfig {
        idh: [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07],
        cbh: CBH_NO_PERSISTENT_BINDING,
    };
}
