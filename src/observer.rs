//! Injected structured-event observer.
//!
//! Handshake progress is reported as structured events rather than
//! formatted log strings interleaved with the cryptographic steps, and no
//! event payload ever carries key material or other sensitive values.

use crate::HandshakeMetrics;

/// One step of the handshake state machine, as reported to a
/// [`HandshakeObserver`].
///
/// Every payload here is a size, a kind, or a boolean -- never key material,
/// shared secrets, or private scalars.
#[derive(Debug, Clone, Copy)]
pub enum HandshakeEvent {
    EphemeralKeyGenerated,
    RequestEncoded { len: usize },
    ResponseReceived { len: usize },
    SignatureParsed,
    KeyValidated,
    SharedSecretComputed,
    KeysDerived,
    CryptogramVerified,
    HandshakeComplete { metrics: HandshakeMetrics },
    HandshakeFailed { error_kind: &'static str },
}

/// Receives [`HandshakeEvent`]s as `open_tunnel` progresses.
///
/// `on_event` defaults to doing nothing, so callers that don't care about
/// observability can implement this trait for a unit struct with an empty
/// body, or use [`NoopObserver`] directly.
pub trait HandshakeObserver {
    fn on_event(&mut self, _event: HandshakeEvent) {}
}

/// An observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl HandshakeObserver for NoopObserver {}
