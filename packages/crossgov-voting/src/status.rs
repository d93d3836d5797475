use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy)]
pub enum Status {
    /// The voting delay has not elapsed yet.
    Pending,
    /// The proposal is open for voting.
    Active,
    /// Voting closed with the proposal passing. It may be queued.
    Succeeded,
    /// Voting closed without the proposal passing.
    Defeated,
    /// The proposal sits in the timelock until its eta.
    Queued,
    /// The proposal's messages have been dispatched.
    Executed,
    /// The proposal was withdrawn before execution.
    Canceled,
    /// The proposal was queued but not executed within its grace period.
    Expired,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Active => write!(f, "active"),
            Status::Succeeded => write!(f, "succeeded"),
            Status::Defeated => write!(f, "defeated"),
            Status::Queued => write!(f, "queued"),
            Status::Executed => write!(f, "executed"),
            Status::Canceled => write!(f, "canceled"),
            Status::Expired => write!(f, "expired"),
        }
    }
}
