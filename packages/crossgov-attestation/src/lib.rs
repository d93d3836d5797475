//! Verification and decoding for guardian-attested cross-chain data.
//!
//! Two kinds of guardian-signed material flow through the governance suite.
//! Query responses carry state read from a remote chain at an attested block
//! and arrive with a batch of detached guardian signatures; core-bridge
//! messages (VAAs) carry hub-published payloads with their signatures
//! embedded. This crate parses both, verifies their signatures against a
//! registered guardian set, and decodes the typed per-chain query payloads.
//! It holds no storage of its own; contracts keep the guardian sets and feed
//! them in.

pub mod bytes;
pub mod error;
pub mod eth;
pub mod guardians;
pub mod response;
pub mod solana;
pub mod vaa;
pub mod validate;
pub mod verify;

pub use error::AttestationError;
