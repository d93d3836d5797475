//! Shared governance vocabulary: votes, tallies, proposal ids, and the
//! proposal status machine.

pub mod pre_propose;
pub mod proposal;
pub mod status;
pub mod voting;
