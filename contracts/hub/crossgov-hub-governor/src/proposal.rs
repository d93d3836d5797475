use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, StdResult, Storage};
use crossgov_voting::status::Status;
use crossgov_voting::voting::Votes;

use crate::state::QUORUM;

/// The upper bound on a proposal's stored size in bytes. Bounds the
/// gas cost of loading a proposal.
pub const MAX_PROPOSAL_SIZE: u64 = 30_000;

#[cw_serde]
pub struct Proposal {
    /// The 32-byte payload hash identifying this proposal on every
    /// chain: `keccak256(serialized msgs | keccak256(description))`.
    pub id: HexBinary,
    /// The address that created the proposal.
    pub proposer: Addr,
    pub title: String,
    /// Keccak-256 of the description text. The full text is emitted in
    /// the creation event rather than stored.
    pub description_hash: HexBinary,
    /// Unix seconds at which voting power is snapshot. Voting opens
    /// the second after.
    pub snapshot: u64,
    /// Unix seconds at which the voting window closes (inclusive).
    pub deadline: u64,
    /// Unix seconds at which a queued proposal's timelock matures.
    /// Zero until the proposal is queued.
    pub eta: u64,
    /// The status stored at the last state transition. May lag the
    /// clock; `current_status` recomputes.
    pub status: Status,
    /// Hub ballots plus merged spoke tallies.
    pub votes: Votes,
    /// Whether the one-shot deadline extension has been used.
    pub extended: bool,
}

impl Proposal {
    /// Consumes the proposal and returns a version whose status
    /// reflects the current block. Stored statuses only advance on
    /// explicit transitions, so a query may otherwise see a proposal
    /// whose voting window or timelock has lapsed without its status
    /// catching up.
    pub fn into_response(
        mut self,
        storage: &dyn Storage,
        now: u64,
        grace_period: u64,
    ) -> StdResult<Proposal> {
        self.update_status(storage, now, grace_period)?;
        Ok(self)
    }

    /// Gets the current status of the proposal. Pending becomes Active
    /// once the snapshot time passes, Active resolves to Succeeded or
    /// Defeated once the deadline passes, and Queued becomes Expired
    /// once the grace period after its eta lapses. Other statuses are
    /// terminal or advance only through explicit transitions.
    pub fn current_status(
        &self,
        storage: &dyn Storage,
        now: u64,
        grace_period: u64,
    ) -> StdResult<Status> {
        match self.status {
            Status::Pending | Status::Active => {
                if now <= self.snapshot {
                    Ok(Status::Pending)
                } else if now <= self.deadline {
                    Ok(Status::Active)
                } else {
                    // Quorum is read as of the snapshot so later
                    // quorum changes never reach back into proposals
                    // whose voting power is already fixed.
                    let quorum = QUORUM.load_at(storage, self.snapshot)?.unwrap_or_default();
                    if self.votes.quorum_reached(quorum)? && self.votes.vote_succeeded() {
                        Ok(Status::Succeeded)
                    } else {
                        Ok(Status::Defeated)
                    }
                }
            }
            Status::Queued if now > self.eta + grace_period => Ok(Status::Expired),
            _ => Ok(self.status),
        }
    }

    /// Sets the proposal's status to its current status.
    pub fn update_status(
        &mut self,
        storage: &dyn Storage,
        now: u64,
        grace_period: u64,
    ) -> StdResult<()> {
        self.status = self.current_status(storage, now, grace_period)?;
        Ok(())
    }
}
