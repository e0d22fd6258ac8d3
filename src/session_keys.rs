//! The four symmetric session keys this handshake produces.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// `{cfrm, mac, enc, rmac}`, the fixed record of Secure-Messaging inputs
/// this handshake exists to produce.
///
/// A typed record rather than a string-keyed map, so each key's role is
/// fixed at compile time. Zeroizes all four keys on drop, and never prints
/// its contents via `Debug` -- only the caller that receives `SessionKeys`
/// from a successful [`crate::open_tunnel`] call is meant to see the key
/// bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKeys {
    cfrm: [u8; 16],
    mac: [u8; 16],
    enc: [u8; 16],
    rmac: [u8; 16],
}

impl SessionKeys {
    pub(crate) fn new(cfrm: [u8; 16], mac: [u8; 16], enc: [u8; 16], rmac: [u8; 16]) -> Self {
        SessionKeys { cfrm, mac, enc, rmac }
    }

    /// Key-confirmation key, used to authenticate the card's cryptogram.
    pub fn cfrm(&self) -> &[u8; 16] {
        &self.cfrm
    }

    /// Request-MAC key for Secure Messaging.
    pub fn mac(&self) -> &[u8; 16] {
        &self.mac
    }

    /// Encryption key for Secure Messaging.
    pub fn enc(&self) -> &[u8; 16] {
        &self.enc
    }

    /// Response-MAC key for Secure Messaging.
    pub fn rmac(&self) -> &[u8; 16] {
        &self.rmac
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys").field("cfrm", &"<redacted>").field("mac", &"<redacted>").field("enc", &"<redacted>").field("rmac", &"<redacted>").finish()
    }
}
