//! The external Transceiver contract.
//!
//! The byte-level NFC/contact-card transport is out of scope for this core;
//! this trait is the whole of its contract surface with the outside world.

/// A single GENERAL AUTHENTICATE response.
#[derive(Debug, Clone)]
pub struct Response {
    /// R-APDU body, excluding the trailing SW1SW2 status bytes.
    pub data: Vec<u8>,
    /// Whether the card reported success via its status word.
    pub status_ok: bool,
}

/// External capability the orchestrator drives to talk to the card.
///
/// Implementations own the actual NFC/contact transport; this core only
/// ever calls `transceive` once per handshake and `close` on every exit
/// path.
pub trait Transceiver {
    /// Send `apdu` (named `apdu_name` for diagnostics) and block for a
    /// response. Returns `None` on transport failure.
    fn transceive(&mut self, apdu_name: &str, apdu: &[u8]) -> Option<Response>;

    /// Release the transport. Called exactly once by the orchestrator on
    /// every exit path, success or failure.
    fn close(&mut self);
}
