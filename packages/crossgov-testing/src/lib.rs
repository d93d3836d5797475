//! Test harness for the cross-chain governance suite: cw-multi-test
//! contract boxes for every contract in the workspace, deterministic
//! guardian test keys, and builders for guardian-signed query response
//! envelopes and core-bridge messages.

#[cfg(not(target_arch = "wasm32"))]
pub mod attest;

#[cfg(not(target_arch = "wasm32"))]
pub mod contracts;
