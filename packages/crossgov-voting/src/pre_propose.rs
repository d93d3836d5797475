use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;

/// The policy configured in the governor that determines whether or
/// not a pre-propose module is in use. If so, only the module can
/// create new proposals. Otherwise, there is no restriction on
/// proposal creation.
#[cw_serde]
pub enum ProposalCreationPolicy {
    /// Anyone may create a proposal.
    Anyone {},
    /// Only ADDR may create proposals. It is expected that ADDR is a
    /// pre-propose module, though we only require that it is a valid
    /// address.
    Module { addr: Addr },
}

impl ProposalCreationPolicy {
    /// Determines if CREATOR is permitted to create a proposal.
    pub fn is_permitted(&self, creator: &Addr) -> bool {
        match self {
            Self::Anyone {} => true,
            Self::Module { addr } => creator == addr,
        }
    }
}
