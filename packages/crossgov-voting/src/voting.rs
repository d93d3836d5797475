use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Uint128};

#[cw_serde]
#[derive(Copy)]
#[repr(u8)]
pub enum Vote {
    /// Marks opposition to the proposal.
    Against,
    /// Marks support for the proposal.
    For,
    /// Marks participation but supports neither side.
    Abstain,
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vote::Against => write!(f, "against"),
            Vote::For => write!(f, "for"),
            Vote::Abstain => write!(f, "abstain"),
        }
    }
}

#[cw_serde]
#[derive(Default)]
pub struct Votes {
    pub against_votes: Uint128,
    pub for_votes: Uint128,
    pub abstain_votes: Uint128,
}

impl Votes {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn add_vote(&mut self, vote: Vote, power: Uint128) -> StdResult<()> {
        let bucket = match vote {
            Vote::Against => &mut self.against_votes,
            Vote::For => &mut self.for_votes,
            Vote::Abstain => &mut self.abstain_votes,
        };
        *bucket = bucket.checked_add(power).map_err(StdError::overflow)?;
        Ok(())
    }

    pub fn add(&self, other: &Votes) -> StdResult<Votes> {
        Ok(Votes {
            against_votes: self
                .against_votes
                .checked_add(other.against_votes)
                .map_err(StdError::overflow)?,
            for_votes: self
                .for_votes
                .checked_add(other.for_votes)
                .map_err(StdError::overflow)?,
            abstain_votes: self
                .abstain_votes
                .checked_add(other.abstain_votes)
                .map_err(StdError::overflow)?,
        })
    }

    /// Component-wise difference. Errors if any component of `other`
    /// exceeds this tally.
    pub fn checked_sub(&self, other: &Votes) -> StdResult<Votes> {
        Ok(Votes {
            against_votes: self
                .against_votes
                .checked_sub(other.against_votes)
                .map_err(StdError::overflow)?,
            for_votes: self
                .for_votes
                .checked_sub(other.for_votes)
                .map_err(StdError::overflow)?,
            abstain_votes: self
                .abstain_votes
                .checked_sub(other.abstain_votes)
                .map_err(StdError::overflow)?,
        })
    }

    /// True when every component is at least its value in `previous`. A
    /// spoke tally only ever grows, so a reported tally that fails this
    /// against the stored one cannot be genuine.
    pub fn covers(&self, previous: &Votes) -> bool {
        self.against_votes >= previous.against_votes
            && self.for_votes >= previous.for_votes
            && self.abstain_votes >= previous.abstain_votes
    }

    pub fn total(&self) -> StdResult<Uint128> {
        self.against_votes
            .checked_add(self.for_votes)
            .and_then(|sum| sum.checked_add(self.abstain_votes))
            .map_err(StdError::overflow)
    }

    /// The weight that counts toward quorum: for and abstain votes.
    pub fn countable(&self) -> StdResult<Uint128> {
        self.for_votes
            .checked_add(self.abstain_votes)
            .map_err(StdError::overflow)
    }

    pub fn quorum_reached(&self, quorum: Uint128) -> StdResult<bool> {
        Ok(self.countable()? >= quorum)
    }

    /// For votes must strictly outnumber against votes.
    pub fn vote_succeeded(&self) -> bool {
        self.for_votes > self.against_votes
    }
}
