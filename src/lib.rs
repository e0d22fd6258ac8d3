//! Opacity secure-tunnel handshake core (NIST SP 800-73-4, Cipher Suite 2).
//!
//! This crate implements the host side of the Opacity key-agreement
//! handshake between a host application and a PIV smart card: an
//! ephemeral-static ECDH over P-256, a NIST SP 800-56A single-step KDF, and
//! a CMAC-AES-128 authentication-cryptogram check, yielding four symmetric
//! session keys (`cfrm`, `mac`, `enc`, `rmac`) for a downstream Secure
//! Messaging channel.
//!
//! The card authenticates to the host; this crate does not perform mutual
//! authentication, persistent-binding mode, key storage, PIN handling, or
//! certificate-chain validation. The byte-level card transport, UI, log
//! formatting, and the Secure Messaging channel itself are all external
//! collaborators -- see [`Transceiver`] and [`HandshakeObserver`] for this
//! crate's entire contract surface with them.
//!
//! ```no_run
//! use opacity_tunnel::{open_tunnel, HostConfig, NoopObserver, Response, Transceiver};
//!
//! struct MyCardLink;
//!
//! impl Transceiver for MyCardLink {
//!     fn transceive(&mut self, _apdu_name: &str, _apdu: &[u8]) -> Option<Response> {
//!         // talk to real hardware here
//!         None
//!     }
//!     fn close(&mut self) {}
//! }
//!
//! let mut link = MyCardLink;
//! let mut observer = NoopObserver;
//! match open_tunnel(&mut link, &HostConfig::DEMO, &mut observer) {
//!     Ok((keys, metrics)) => {
//!         let _ = (keys, metrics.tunnel_creation_ms);
//!     }
//!     Err(e) => eprintln!("handshake failed: {e}"),
//! }
//! ```

#![forbid(unsafe_code)]

mod apdu;
mod card_signature;
mod cmac;
mod codec;
mod constants;
mod ecdh;
mod error;
mod kdf;
mod observer;
mod session_keys;
mod transceiver;
mod tunnel;

pub use card_signature::CardSignature;
pub use constants::HostConfig;
pub use ecdh::EncodedPublicKey;
pub use error::TunnelError;
pub use observer::{HandshakeEvent, HandshakeObserver, NoopObserver};
pub use session_keys::SessionKeys;
pub use transceiver::{Response, Transceiver};
pub use tunnel::{open_tunnel, HandshakeMetrics};
