//! Tunnel orchestrator: drives the handshake state machine end-to-end.
//!
//! One function runs every step in order and returns a value record, rather
//! than mutating long-lived fields on the caller's object -- this handshake
//! is one-shot, so there is no long-lived object for it to mutate.

use std::time::Instant;

use crate::apdu;
use crate::card_signature::{self, CardSignature};
use crate::cmac;
use crate::codec::concat;
use crate::constants::{HostConfig, KC_TAG};
use crate::ecdh::{self, EphemeralKeyPair};
use crate::error::TunnelError;
use crate::kdf;
use crate::observer::{HandshakeEvent, HandshakeObserver};
use crate::session_keys::SessionKeys;
use crate::transceiver::Transceiver;

/// Observability output of a successful handshake: wall-clock time spent in
/// [`open_tunnel`]. Set on success only -- a failed handshake has no
/// meaningful "tunnel creation time".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeMetrics {
    pub tunnel_creation_ms: u64,
}

/// Run the Opacity handshake state machine to completion against `card`,
/// returning the four Secure-Messaging session keys on success.
///
/// ```text
/// INIT -> generate ephemeral kp -> KP_READY
/// KP_READY -> transceive GA(CBH,IDH,hostPub) -> AWAIT_RESP
/// AWAIT_RESP -> parse CardSignature -> SIG_PARSED
/// SIG_PARSED -> if cb != 0 -> REJECTED (fatal)
/// SIG_PARSED -> checkKey(cardPub) -> CURVE_OK
/// CURVE_OK -> ECDH(priv, cardPub) = Z -> Z_READY
/// Z_READY -> KDF(Z, OtherInfo) -> keys -> KEYS_DERIVED
/// KEYS_DERIVED -> CMAC(cfrm, KC_1_V || cardId || IDH || hostPubXY) -> CRYPTOGRAM_OK
/// CRYPTOGRAM_OK -> return keys; record elapsed ms -> DONE
/// ```
///
/// Every exit path -- success or any `TunnelError` -- closes `card` exactly
/// once. Any ephemeral private scalar, shared secret, or KDF key block used
/// along the way is held in a `zeroize`-on-drop wrapper, so no early return
/// needs its own manual cleanup.
pub fn open_tunnel<T, O>(
    card: &mut T,
    host: &HostConfig,
    observer: &mut O,
) -> Result<(SessionKeys, HandshakeMetrics), TunnelError>
where
    T: Transceiver,
    O: HandshakeObserver,
{
    let start = Instant::now();
    let result = run(card, host, observer);
    card.close();

    match &result {
        Ok((_, metrics)) => observer.on_event(HandshakeEvent::HandshakeComplete { metrics: *metrics }),
        Err(e) => observer.on_event(HandshakeEvent::HandshakeFailed {
            error_kind: e.kind_name(),
        }),
    }

    result.map(|(keys, _)| {
        let elapsed = start.elapsed().as_millis() as u64;
        (keys, HandshakeMetrics { tunnel_creation_ms: elapsed })
    })
}

fn run<T, O>(
    card: &mut T,
    host: &HostConfig,
    observer: &mut O,
) -> Result<(SessionKeys, HandshakeMetrics), TunnelError>
where
    T: Transceiver,
    O: HandshakeObserver,
{
    // INIT -> KP_READY
    let ephemeral = EphemeralKeyPair::generate()?;
    observer.on_event(HandshakeEvent::EphemeralKeyGenerated);

    // KP_READY -> AWAIT_RESP
    let request = apdu::encode_request(host, &ephemeral.public());
    observer.on_event(HandshakeEvent::RequestEncoded { len: request.len() });

    let response = card
        .transceive(apdu::APDU_NAME, &request)
        .ok_or_else(|| TunnelError::Transport("no response from card".into()))?;
    if !response.status_ok {
        return Err(TunnelError::Transport(
            "card reported a non-success status word".into(),
        ));
    }
    observer.on_event(HandshakeEvent::ResponseReceived { len: response.data.len() });

    // AWAIT_RESP -> SIG_PARSED
    let signature: CardSignature = card_signature::parse(&response.data)?;
    observer.on_event(HandshakeEvent::SignatureParsed);

    // SIG_PARSED -> REJECTED (fatal) if persistent binding was requested
    if signature.cb != 0x00 {
        return Err(TunnelError::Policy(signature.cb));
    }

    // SIG_PARSED -> CURVE_OK
    let card_public = ecdh::check_key(&signature.public_key)?;
    observer.on_event(HandshakeEvent::KeyValidated);

    // CURVE_OK -> Z_READY
    let z = ephemeral.ecdh(&card_public)?;
    observer.on_event(HandshakeEvent::SharedSecretComputed);

    // Z_READY -> KEYS_DERIVED
    let host_public = ephemeral.public();
    let other_info = kdf::build_other_info(
        &host.idh,
        host.cbh,
        &host_public.x(),
        &signature.id,
        &signature.nonce,
        signature.cb,
    );
    let key_block = kdf::derive_key_block(&z, &other_info)?;
    let keys = kdf::partition_key_block(&key_block);
    observer.on_event(HandshakeEvent::KeysDerived);

    // KEYS_DERIVED -> CRYPTOGRAM_OK
    let message = concat(&[KC_TAG, &signature.id, &host.idh, &host_public.xy()]);
    cmac::verify(keys.cfrm(), &message, &signature.cryptogram)?;
    observer.on_event(HandshakeEvent::CryptogramVerified);

    // CRYPTOGRAM_OK -> DONE (elapsed time is stamped by the caller, which
    // alone knows the wall-clock start)
    Ok((keys, HandshakeMetrics { tunnel_creation_ms: 0 }))
}
