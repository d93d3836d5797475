//! Message and query interfaces the governance contracts use to talk to one
//! another without depending on each other's crates.

pub mod airlock;
pub mod dispatch;
pub mod governor;
pub mod voting;
